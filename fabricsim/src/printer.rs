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

//! # Helper (printer) functions for the simulation
//! Module containing helper functions to get formatted strings and print information about the
//! fabric and the overlay.

use crate::fabric::{RoutingTable, TopologySnapshot};
use crate::overlay::{Encapsulation, OverlayRegistry, SegmentId};
use crate::simulate::Simulation;

/// Get a vector of strings, which represent the routing table. Each `String` in the vector
/// represents one destination, formatted as `<destination> via <next hop> (cost: <cost>)`.
pub fn routing_table(table: &RoutingTable) -> Vec<String> {
    table
        .iter()
        .map(|(destination, route)| {
            format!("{} via {} (cost: {})", destination, route.next_hop, route.cost)
        })
        .collect()
}

/// Print the routing table of a node.
pub fn print_routing_table(source: &str, table: &RoutingTable) {
    println!("Routing table for {}", source);
    for line in routing_table(table) {
        println!("  {}", line);
    }
    println!();
}

/// Returns a formatted string for a tunnel
pub fn tunnel(src: &str, dst: &str, segment: SegmentId) -> String {
    format!("{} <=> {} (VNI {})", src, dst, segment)
}

/// Returns the formatted lines of all segments of the overlay, each followed by its tunnels.
pub fn overlay(registry: &OverlayRegistry) -> Vec<String> {
    let mut result = Vec::new();
    for segment in registry.segments() {
        result.push(format!(
            "VNI {} ({}): {}",
            segment.id(),
            segment.name(),
            segment.members().iter().cloned().collect::<Vec<_>>().join(", ")
        ));
        for (src, dst) in registry.tunnels_for_segment(segment.id()) {
            result.push(format!("  {}", tunnel(&src, &dst, segment.id())));
        }
    }
    result
}

/// Returns a formatted string for an encapsulation record.
pub fn encapsulation(encap: &Encapsulation) -> String {
    format!(
        "{}: [{}] [{}] [{}] [{}]",
        encap.description,
        encap.outer_ip_header,
        encap.outer_udp_header,
        encap.vxlan_header,
        encap.payload
    )
}

/// Returns one line per node and one line per link of the topology.
pub fn topology(snapshot: &TopologySnapshot) -> Vec<String> {
    snapshot
        .nodes
        .iter()
        .map(|n| match n.vtep_ip() {
            Some(vtep) => {
                format!("{} ({}): loopback {}, vtep {}", n.name(), n.role(), n.loopback(), vtep)
            }
            None => format!("{} ({}): loopback {}", n.name(), n.role(), n.loopback()),
        })
        .chain(snapshot.links.iter().map(|l| format!("{} <-> {} (cost: {})", l.a, l.b, l.cost)))
        .collect()
}

/// Print the whole simulation result in a human-readable form.
pub fn print_simulation(sim: &Simulation) {
    println!("Topology");
    for line in topology(&sim.topology) {
        println!("  {}", line);
    }
    println!();
    for (source, table) in sim.routes.iter() {
        print_routing_table(source, table);
    }
    println!("Overlay");
    for line in overlay(&sim.overlay.registry) {
        println!("  {}", line);
    }
    if let Some(encap) = sim.overlay.example_encapsulation.as_ref() {
        println!();
        println!("{}", encapsulation(encap));
    }
}
