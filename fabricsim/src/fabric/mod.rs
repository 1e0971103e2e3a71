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

#![deny(missing_docs, missing_debug_implementations)]

//! # Fabric
//!
//! The underlay of the simulation: nodes, weighted links, and the shortest-path routing tables
//! computed over them.
//!
//! ## Example usage
//!
//! The following example builds a small fabric by hand, with a cheap path `A - B - C` and an
//! expensive direct link `A - C`, and computes the routing tables of all nodes.
//!
//! ```rust
//! use fabricsim::fabric::{all_routes, Fabric, Node, Role, Route};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut fabric = Fabric::new();
//!     fabric.add_node(Node::new("A", Role::Leaf, "10.255.0.1"));
//!     fabric.add_node(Node::new("B", Role::Spine, "10.255.0.2"));
//!     fabric.add_node(Node::new("C", Role::Leaf, "10.255.0.3"));
//!
//!     fabric.add_link("A", "B", 1)?;
//!     fabric.add_link("B", "C", 1)?;
//!     fabric.add_link("A", "C", 5)?;
//!
//!     let tables = all_routes(fabric.graph());
//!     assert_eq!(tables["A"]["C"], Route::new("B", 2));
//!     assert_eq!(tables["C"]["B"], Route::new("B", 1));
//!     assert!(!tables["A"].contains_key("A"));
//!
//!     Ok(())
//! }
//! ```

pub(crate) mod graph;
pub mod spf;
pub(crate) mod topology;
pub(crate) mod types;

pub use graph::FabricGraph;
pub use spf::{
    all_routes, all_routes_parallel, route_path, single_source_routes, Route, RoutingTable,
    RoutingTables,
};
pub use topology::{Fabric, TopologySnapshot};
pub use types::{Link, LinkCost, Node, PathCost, Role, TopologyError, DEFAULT_LINK_COST};
