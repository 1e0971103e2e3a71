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

//! # Simulation
//!
//! Runs the whole pipeline: build the spine-leaf fabric, compute the routing tables of every
//! node, build the overlay on the leaf endpoints, enumerate the tunnels, and describe one example
//! encapsulation. Every call builds everything from scratch.

use crate::fabric::{
    all_routes, all_routes_parallel, route_path, Fabric, Node, Role, RoutingTable, RoutingTables,
    TopologySnapshot,
};
use crate::overlay::{Encapsulation, OverlayRegistry, SegmentId};
use crate::Error;

use log::*;
use serde::Serialize;
use std::collections::HashSet;

/// Id of the segment created by the default simulation
pub const DEFAULT_SEGMENT_ID: SegmentId = SegmentId(10010);
/// Name of the segment created by the default simulation
pub const DEFAULT_SEGMENT_NAME: &str = "customers-A";
/// Payload description used for the example encapsulation
pub const DEFAULT_PAYLOAD: &str = "L2 frame: MAC A -> MAC B";

/// Virtual segment to be created by the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Id of the segment
    pub id: SegmentId,
    /// Display name of the segment
    pub name: String,
    /// Names of the leaves attached to the segment. If `None`, every leaf is attached.
    pub members: Option<Vec<String>>,
}

impl SegmentConfig {
    /// Segment containing all leaves of the fabric
    pub fn all_leaves(id: SegmentId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), members: None }
    }

    /// Segment containing only the given leaves
    pub fn with_members<S: Into<String>>(
        id: SegmentId,
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        Self { id, name: name.into(), members: Some(members.into_iter().map(Into::into).collect()) }
    }
}

/// Parameters of the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of spine nodes
    pub spines: usize,
    /// Number of leaf nodes
    pub leaves: usize,
    /// Segments of the overlay. Tunnels and the example encapsulation are computed for the first
    /// segment.
    pub segments: Vec<SegmentConfig>,
    /// Payload description of the example encapsulation
    pub payload: String,
    /// Compute the routing tables on multiple threads
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spines: 2,
            leaves: 3,
            segments: vec![SegmentConfig::all_leaves(DEFAULT_SEGMENT_ID, DEFAULT_SEGMENT_NAME)],
            payload: DEFAULT_PAYLOAD.to_string(),
            parallel: false,
        }
    }
}

/// State of the overlay, as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    /// All segments and endpoints
    #[serde(flatten)]
    pub registry: OverlayRegistry,
    /// Tunnels of the primary segment
    pub tunnels: Vec<(String, String)>,
    /// Encapsulation along the first tunnel, if there is any tunnel.
    #[serde(rename = "sample_encapsulation")]
    pub example_encapsulation: Option<Encapsulation>,
}

/// # Simulation result
///
/// The serialized form contains the three resources `topology`, `routes` and `overlay`. All of
/// them are derived from the same fabric and overlay.
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Snapshot of the fabric
    pub topology: TopologySnapshot,
    /// Routing tables of all nodes
    pub routes: RoutingTables,
    /// State of the overlay
    pub overlay: OverlayState,
    #[serde(skip)]
    fabric: Fabric,
}

impl Simulation {
    /// Returns the fabric the simulation was computed on.
    pub fn fabric(&self) -> &Fabric {
        &self.fabric
    }

    /// Returns the node together with its routing table.
    pub fn node_routes(&self, name: &str) -> Option<(&Node, &RoutingTable)> {
        Some((self.fabric.get_node(name)?, self.routes.get(name)?))
    }

    /// Returns the path from `source` to `destination` (both included) in the underlay.
    pub fn route_path(&self, source: &str, destination: &str) -> Option<Vec<String>> {
        route_path(&self.routes, source, destination)
    }
}

/// Run the simulation with the default parameters: 2 spines, 3 leaves, and every leaf attached
/// to segment `10010`.
pub fn simulate_default() -> Result<Simulation, Error> {
    simulate(&SimulationConfig::default())
}

/// # Run the simulation
///
/// ```rust
/// use fabricsim::simulate::{simulate, SimulationConfig};
///
/// fn main() -> Result<(), fabricsim::Error> {
///     let sim = simulate(&SimulationConfig::default())?;
///     assert_eq!(sim.routes["L1"]["L2"].cost, 20);
///     assert_eq!(sim.overlay.tunnels.len(), 3);
///     assert!(sim.overlay.example_encapsulation.is_some());
///     Ok(())
/// }
/// ```
pub fn simulate(config: &SimulationConfig) -> Result<Simulation, Error> {
    check_config(config)?;

    // build the underlay
    let fabric = Fabric::spine_leaf(config.spines, config.leaves);

    // compute all routing tables
    let routes = if config.parallel {
        all_routes_parallel(fabric.graph(), None)
    } else {
        all_routes(fabric.graph())
    };
    info!("Computed routing tables for {} nodes", routes.len());

    // build the overlay on top of the leaves
    let registry = build_overlay(&fabric, &config.segments)?;

    let (tunnels, example_encapsulation) = match config.segments.first() {
        Some(primary) => {
            let tunnels = registry.tunnels_for_segment(primary.id);
            let encapsulation = match tunnels.first() {
                Some((src, dst)) => {
                    Some(registry.encapsulate_between(src, dst, primary.id, &config.payload)?)
                }
                None => None,
            };
            (tunnels, encapsulation)
        }
        None => (Vec::new(), None),
    };
    info!("Found {} tunnels", tunnels.len());

    Ok(Simulation {
        topology: fabric.snapshot(),
        routes,
        overlay: OverlayState { registry, tunnels, example_encapsulation },
        fabric,
    })
}

/// Create all segments and attach the leaves with a tunnel endpoint address.
fn build_overlay(fabric: &Fabric, segments: &[SegmentConfig]) -> Result<OverlayRegistry, Error> {
    let mut registry = OverlayRegistry::new();

    for segment in segments {
        registry.add_segment(segment.id, segment.name.as_str());

        let members: Vec<&Node> = match &segment.members {
            None => fabric.nodes_with_role(Role::Leaf).collect(),
            Some(names) => names
                .iter()
                .filter_map(|name| match fabric.get_node(name) {
                    Some(node) if node.role() == Role::Leaf => Some(node),
                    Some(node) => {
                        warn!("Skip {} in segment {}: node is a {}", name, segment.id, node.role());
                        None
                    }
                    None => {
                        warn!("Skip {} in segment {}: node does not exist", name, segment.id);
                        None
                    }
                })
                .collect(),
        };

        for node in members {
            match node.vtep_ip() {
                Some(address) => registry.attach_endpoint(node.name(), address, &[segment.id])?,
                None => warn!("Skip {} in segment {}: no tunnel endpoint", node.name(), segment.id),
            }
        }
    }

    Ok(registry)
}

fn check_config(config: &SimulationConfig) -> Result<(), Error> {
    let mut seen: HashSet<SegmentId> = HashSet::new();
    for segment in config.segments.iter() {
        if !seen.insert(segment.id) {
            return Err(Error::InvalidConfig(format!("segment {} is defined twice", segment.id)));
        }
    }
    Ok(())
}
