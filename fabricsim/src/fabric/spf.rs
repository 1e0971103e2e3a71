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

//! # Shortest Path First
//!
//! Computes the routing tables of the fabric using Dijkstra's algorithm over the
//! [`FabricGraph`](crate::fabric::FabricGraph).
//!
//! ## Next hop selection
//!
//! The cost of a route is always the minimum total cost of any path to the destination. If there
//! exist multiple shortest paths, the next hop is the smallest (by name) first hop of all
//! shortest paths. To achieve this, every vertex is labeled with the pair `(cost, first_hop)`,
//! and labels are compared lexicographically. Since the first hop does not change when a path is
//! extended, Dijkstra's algorithm stays correct for this label, and the resulting tables are
//! independent of the iteration order of the graph.

use crate::fabric::graph::{FabricGraph, VertexId};
use crate::fabric::types::PathCost;

use log::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};
use std::panic;
use std::sync::Arc;
use std::thread;

/// Entry of a routing table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route {
    /// Neighbor to which packets for the destination are forwarded
    #[serde(rename = "nexthop")]
    pub next_hop: String,
    /// Total cost to reach the destination
    pub cost: PathCost,
}

impl Route {
    /// Create a new route entry
    pub fn new(next_hop: impl Into<String>, cost: PathCost) -> Self {
        Self { next_hop: next_hop.into(), cost }
    }
}

/// Routing table of a single node, mapping the destination name to the route. The node itself is
/// never contained in its own table.
pub type RoutingTable = BTreeMap<String, Route>;

/// Routing tables of all nodes, indexed by the name of the source node.
pub type RoutingTables = BTreeMap<String, RoutingTable>;

/// Label of a vertex during the computation: total cost and first hop on the path.
type Label<'a> = (PathCost, Option<&'a str>);

/// Compute the routing table of `source`.
///
/// Every destination reachable from `source` appears in the table, except `source` itself.
/// Unreachable destinations are not part of the table. If `source` is not part of the graph, the
/// table is empty.
pub fn single_source_routes(graph: &FabricGraph, source: &str) -> RoutingTable {
    let source_id = match graph.vertex_id(source) {
        Some(id) => id,
        None => {
            debug!("Source {} is not part of the graph", source);
            return RoutingTable::new();
        }
    };

    let mut labels: HashMap<VertexId, Label<'_>> = HashMap::new();
    let mut done: HashSet<VertexId> = HashSet::new();
    let mut heap: BinaryHeap<Reverse<(PathCost, Option<&str>, VertexId)>> = BinaryHeap::new();

    labels.insert(source_id, (0, None));
    heap.push(Reverse((0, None, source_id)));

    while let Some(Reverse((cost, first_hop, current))) = heap.pop() {
        if !done.insert(current) {
            // stale entry
            continue;
        }
        for (neighbor, link_cost) in graph.adjacent(current) {
            if done.contains(&neighbor) {
                continue;
            }
            let candidate: Label<'_> = (
                cost + PathCost::from(link_cost),
                first_hop.or_else(|| Some(graph.name_of(neighbor))),
            );
            let improves = match labels.get(&neighbor) {
                Some(known) => candidate < *known,
                None => true,
            };
            if improves {
                labels.insert(neighbor, candidate);
                heap.push(Reverse((candidate.0, candidate.1, neighbor)));
            }
        }
    }

    let table: RoutingTable = labels
        .into_iter()
        .filter(|(id, _)| *id != source_id)
        .filter_map(|(id, (cost, first_hop))| {
            first_hop.map(|hop| (graph.name_of(id).to_string(), Route::new(hop, cost)))
        })
        .collect();

    trace!("Routing table of {} has {} entries", source, table.len());
    table
}

/// Compute the routing tables of all nodes in the graph. Every table is computed independently.
pub fn all_routes(graph: &FabricGraph) -> RoutingTables {
    debug!("Computing routing tables for {} nodes", graph.num_vertices());
    graph
        .vertices()
        .map(|source| (source.to_string(), single_source_routes(graph, source)))
        .collect()
}

/// # Compute all routing tables on multiple threads
///
/// The sources are split into `n_threads` chunks (by default the number of CPUs), and every
/// chunk is computed on its own thread. All threads read the same graph. The result is identical
/// to [`all_routes`].
pub fn all_routes_parallel(graph: &FabricGraph, n_threads: Option<usize>) -> RoutingTables {
    let sources: Vec<String> = graph.vertices().map(String::from).collect();
    if sources.is_empty() {
        return RoutingTables::new();
    }

    let n_threads = n_threads.unwrap_or_else(num_cpus::get).max(1).min(sources.len());
    let chunk_size = (sources.len() + n_threads - 1) / n_threads;
    info!("Computing routing tables for {} nodes on {} threads", sources.len(), n_threads);

    let shared = Arc::new(graph.clone());
    let handles = sources
        .chunks(chunk_size)
        .map(|chunk| {
            let g = Arc::clone(&shared);
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|source| {
                        let table = single_source_routes(&g, &source);
                        (source, table)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let mut tables = RoutingTables::new();
    for handle in handles {
        match handle.join() {
            Ok(partial) => tables.extend(partial),
            Err(cause) => panic::resume_unwind(cause),
        }
    }
    tables
}

/// Reconstruct the path from `source` to `destination` by following the next hops of the routing
/// tables. The path starts with `source` and ends with `destination`. Returns `None` if the
/// destination is not reachable, or if the tables contain a forwarding loop.
pub fn route_path(tables: &RoutingTables, source: &str, destination: &str) -> Option<Vec<String>> {
    tables.get(source)?;
    let mut path = vec![source.to_string()];
    let mut current = source;
    while current != destination {
        if path.len() > tables.len() {
            warn!("Forwarding loop detected: {}", path.join(" => "));
            return None;
        }
        let route = tables.get(current)?.get(destination)?;
        path.push(route.next_hop.clone());
        current = route.next_hop.as_str();
    }
    Some(path)
}
