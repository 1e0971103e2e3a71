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

//! # Fabric topology
//!
//! This module owns the nodes of the fabric and the graph connecting them, and contains the
//! builder for the canonical spine-leaf (Clos) fabric.

use crate::fabric::graph::FabricGraph;
use crate::fabric::types::{Link, LinkCost, Node, Role, TopologyError, DEFAULT_LINK_COST};

use log::*;
use serde::Serialize;
use std::collections::HashMap;

/// Serializable snapshot of the topology. Nodes are stored in the order in which they were added
/// to the fabric, links in the iteration order of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologySnapshot {
    /// All nodes of the fabric
    pub nodes: Vec<Node>,
    /// All links of the fabric
    pub links: Vec<Link>,
}

/// # Fabric
///
/// The fabric is the physical (underlay) network: a set of uniquely named nodes and the weighted
/// undirected graph over these names. Every link references two registered nodes, and the edge
/// set of the graph is exactly the set of links.
///
/// ```rust
/// use fabricsim::fabric::Fabric;
///
/// let fabric = Fabric::new().build_spine_leaf(2, 3);
/// assert_eq!(fabric.num_nodes(), 5);
/// assert_eq!(fabric.link_cost("S1", "L3"), Ok(10));
/// assert!(fabric.link_cost("L1", "L2").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fabric {
    graph: FabricGraph,
    nodes: HashMap<String, Node>,
}

impl Fabric {
    /// Generate an empty fabric
    pub fn new() -> Self {
        Self { graph: FabricGraph::new(), nodes: HashMap::new() }
    }

    /// Generate the canonical spine-leaf fabric. See [`Fabric::build_spine_leaf`].
    pub fn spine_leaf(spines: usize, leaves: usize) -> Self {
        Self::new().build_spine_leaf(spines, leaves)
    }

    /// Add a node to the fabric. A node with the same name is replaced, but keeps its position in
    /// the node order.
    pub fn add_node(&mut self, node: Node) {
        self.graph.add_vertex(node.name());
        if let Some(old) = self.nodes.insert(node.name().to_string(), node) {
            debug!("Replaced node {} ({})", old.name(), old.role());
        }
    }

    /// Add an undirected link between `a` and `b`, or overwrite its cost if it already exists.
    /// Both nodes must be added beforehand.
    pub fn add_link(&mut self, a: &str, b: &str, cost: LinkCost) -> Result<(), TopologyError> {
        for name in [a, b].iter() {
            if !self.nodes.contains_key(*name) {
                return Err(TopologyError::NodeNotFound(name.to_string()));
            }
        }
        self.graph.update_link(a, b, cost)
    }

    /// Add a link with the default cost of `10`.
    pub fn add_link_default(&mut self, a: &str, b: &str) -> Result<(), TopologyError> {
        self.add_link(a, b, DEFAULT_LINK_COST)
    }

    /// Add the given link record.
    pub fn add_link_record(&mut self, link: &Link) -> Result<(), TopologyError> {
        self.add_link(&link.a, &link.b, link.cost)
    }

    /// # Spine-Leaf builder
    ///
    /// Adds `spines` spine nodes `S1, S2, ...` and `leaves` leaf nodes `L1, L2, ...`, and
    /// connects every spine with every leaf using a link of cost `10`. Spines are indexed
    /// `1..=spines` and leaves `spines+1..=spines+leaves`. The index determines the loopback
    /// address `10.255.0.<idx>`, and, for leaves only, the tunnel endpoint address
    /// `10.0.0.<idx>`. There are no links between two spines or between two leaves.
    pub fn build_spine_leaf(mut self, spines: usize, leaves: usize) -> Self {
        info!("Building spine-leaf fabric with {} spines and {} leaves", spines, leaves);

        let spine_ids = (1..=spines)
            .map(|i| {
                let name = format!("S{}", i);
                self.add_node(Node::new(name.as_str(), Role::Spine, loopback_ip(i)));
                self.graph.add_vertex(&name)
            })
            .collect::<Vec<_>>();

        let leaf_ids = (1..=leaves)
            .map(|i| {
                let idx = spines + i;
                let name = format!("L{}", i);
                let node = Node::new(name.as_str(), Role::Leaf, loopback_ip(idx));
                self.add_node(node.with_vtep_ip(vtep_ip(idx)));
                self.graph.add_vertex(&name)
            })
            .collect::<Vec<_>>();

        for spine in spine_ids.iter() {
            for leaf in leaf_ids.iter() {
                self.graph.update_link_by_id(*spine, *leaf, DEFAULT_LINK_COST);
            }
        }

        self
    }

    /// Returns the names of all nodes directly linked to `name`, sorted by name.
    pub fn neighbors(&self, name: &str) -> Result<Vec<String>, TopologyError> {
        Ok(self.graph.neighbors(name)?.into_iter().map(|(n, _)| n.to_string()).collect())
    }

    /// Returns the cost of the link between `a` and `b`.
    pub fn link_cost(&self, a: &str, b: &str) -> Result<LinkCost, TopologyError> {
        self.graph.link_cost(a, b)
    }

    /// Returns a reference to the node, or `None` if it does not exist.
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Iterator over all nodes, in the order in which they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.vertices().filter_map(move |name| self.nodes.get(name))
    }

    /// Iterator over all nodes with the given role, in the order in which they were added.
    pub fn nodes_with_role(&self, role: Role) -> impl Iterator<Item = &Node> + '_ {
        self.nodes().filter(move |n| n.role() == role)
    }

    /// Returns the number of nodes in the fabric
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of links in the fabric
    pub fn num_links(&self) -> usize {
        self.graph.num_links()
    }

    /// Returns a reference to the graph of the fabric, used for computing the routing tables.
    pub fn graph(&self) -> &FabricGraph {
        &self.graph
    }

    /// Create a serializable snapshot of the fabric.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot { nodes: self.nodes().cloned().collect(), links: self.graph.links() }
    }
}

fn loopback_ip(idx: usize) -> String {
    format!("10.255.0.{}", idx)
}

fn vtep_ip(idx: usize) -> String {
    format!("10.0.0.{}", idx)
}
