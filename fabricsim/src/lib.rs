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

#![deny(missing_docs)]

//! # Fabricsim: Underlay Routing and Overlay Tunnel Simulation
//! This is a library for simulating a spine-leaf data center fabric at a conceptual level. It
//! computes the shortest-path routing tables of the underlay (like an OSPF router would), and
//! models a VXLAN overlay on top of the leaves, enumerating the tunnels between the endpoints of
//! each virtual segment.
//!
//! No packets are sent, and no protocol state machine is simulated. Everything is a
//! deterministic computation over a static snapshot of the topology.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Fabric`](fabric)**: The underlay. Nodes and weighted links are stored in a
//!   [`Fabric`](fabric::Fabric), which can build the canonical spine-leaf topology. The
//!   [`spf`](fabric::spf) module computes the routing table of every node using Dijkstra's
//!   algorithm.
//!
//! - **[`Overlay`](overlay)**: Tunnel endpoints and virtual segments, managed by the
//!   [`OverlayRegistry`](overlay::OverlayRegistry), which enumerates the tunnels of a segment and
//!   describes the encapsulation of a payload.
//!
//! - **[`Simulation`](simulate)**: Combines both parts into a single
//!   [`Simulation`](simulate::Simulation) result.
//!
//! - **[`Report`](report)**: Renders the result as JSON resources or as an HTML dashboard, and
//!   **[`Printer`](printer)** formats it for humans.
//!
//! ## Usage
//!
//! ```
//! use fabricsim::simulate::{simulate, SimulationConfig};
//! use fabricsim::report::{render_resource, Resource};
//! use fabricsim::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let sim = simulate(&SimulationConfig { spines: 4, leaves: 8, ..Default::default() })?;
//!
//!     // every leaf reaches every other leaf via one spine
//!     assert_eq!(sim.routes["L1"]["L8"].cost, 20);
//!     assert_eq!(sim.route_path("L1", "L8").map(|p| p.len()), Some(3));
//!
//!     // full mesh of tunnels between the 8 leaves
//!     assert_eq!(sim.overlay.tunnels.len(), 28);
//!
//!     println!("{}", render_resource(&sim, Resource::Routes)?);
//!     Ok(())
//! }
//! ```

mod error;
pub mod fabric;
pub mod overlay;
pub mod printer;
pub mod report;
pub mod simulate;
mod test;

pub use error::Error;
