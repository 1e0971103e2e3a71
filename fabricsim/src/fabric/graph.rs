// Fabricsim: Underlay Routing and Overlay Tunnel Simulation
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Weighted undirected graph of the fabric
//!
//! The graph is keyed by node names. Vertices and links keep the order in which they were added,
//! which is the order used for iteration and serialization.

use crate::fabric::types::{Link, LinkCost, TopologyError};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Undirected;
use std::collections::HashMap;

type IndexType = u32;
/// Vertex identification (index into the graph)
pub(crate) type VertexId = NodeIndex<IndexType>;
type LinkGraph = StableGraph<String, LinkCost, Undirected, IndexType>;

/// # Fabric Graph
///
/// Undirected graph with integer link costs. There is at most one link between two vertices, and
/// a link never connects a vertex to itself.
#[derive(Debug, Clone)]
pub struct FabricGraph {
    graph: LinkGraph,
    index: HashMap<String, VertexId>,
}

impl Default for FabricGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FabricGraph {
    /// Generate an empty graph
    pub fn new() -> Self {
        Self { graph: LinkGraph::with_capacity(0, 0), index: HashMap::new() }
    }

    /// Add a vertex with the given name. If the vertex already exists, nothing is changed and the
    /// existing id is returned.
    pub(crate) fn add_vertex(&mut self, name: &str) -> VertexId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Returns `true` if the graph contains a vertex with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Add a link between `a` and `b`, or overwrite the cost if the link already exists. Both
    /// vertices must already be part of the graph.
    pub fn update_link(&mut self, a: &str, b: &str, cost: LinkCost) -> Result<(), TopologyError> {
        let a_id = self.vertex_id(a).ok_or_else(|| TopologyError::NodeNotFound(a.to_string()))?;
        let b_id = self.vertex_id(b).ok_or_else(|| TopologyError::NodeNotFound(b.to_string()))?;
        if a_id == b_id {
            return Err(TopologyError::SelfLoop(a.to_string()));
        }
        self.update_link_by_id(a_id, b_id, cost);
        Ok(())
    }

    /// Add or overwrite a link between two known, distinct vertices.
    pub(crate) fn update_link_by_id(&mut self, a: VertexId, b: VertexId, cost: LinkCost) {
        debug_assert_ne!(a, b);
        self.graph.update_edge(a, b, cost);
    }

    /// Returns the names of all direct neighbors of a vertex together with the link cost, sorted
    /// by name.
    pub fn neighbors(&self, name: &str) -> Result<Vec<(&str, LinkCost)>, TopologyError> {
        let id = self.vertex_id(name).ok_or_else(|| TopologyError::NodeNotFound(name.to_string()))?;
        let mut result: Vec<(&str, LinkCost)> =
            self.adjacent(id).map(|(n, cost)| (self.name_of(n), cost)).collect();
        result.sort();
        Ok(result)
    }

    /// Returns the cost of the link between `a` and `b`.
    pub fn link_cost(&self, a: &str, b: &str) -> Result<LinkCost, TopologyError> {
        let not_found = || TopologyError::LinkNotFound(a.to_string(), b.to_string());
        let a_id = self.vertex_id(a).ok_or_else(not_found)?;
        let b_id = self.vertex_id(b).ok_or_else(not_found)?;
        self.graph
            .find_edge(a_id, b_id)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
            .ok_or_else(not_found)
    }

    /// Iterator over all vertex names, in the order in which they were added.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |id| self.graph[id].as_str())
    }

    /// All links of the graph, in the order in which they were added.
    pub fn links(&self) -> Vec<Link> {
        self.graph
            .edge_references()
            .map(|e| Link::new(self.name_of(e.source()), self.name_of(e.target()), *e.weight()))
            .collect()
    }

    /// Number of vertices in the graph
    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links in the graph
    pub fn num_links(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub(crate) fn name_of(&self, id: VertexId) -> &str {
        self.graph[id].as_str()
    }

    /// Iterator over all neighbors of a vertex together with the link cost.
    pub(crate) fn adjacent(&self, id: VertexId) -> impl Iterator<Item = (VertexId, LinkCost)> + '_ {
        self.graph.edges(id).map(move |e| {
            // undirected edges may be stored in either direction
            let other = if e.source() == id { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }
}
