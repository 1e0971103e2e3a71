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

//! Module containing all type definitions of the fabric

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Link cost (metric) used by the shortest-path computation
pub type LinkCost = u32;

/// Total cost of a path. Wider than [`LinkCost`], so the sum of link costs along any path is exact.
pub type PathCost = u64;

/// Cost of a link that is added without an explicit metric.
pub const DEFAULT_LINK_COST: LinkCost = 10;

/// Role of a node inside the fabric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Spine switch, connected to every leaf
    Spine,
    /// Leaf switch (top of rack), usually carrying a tunnel endpoint
    Leaf,
    /// End host
    Host,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spine => write!(f, "spine"),
            Self::Leaf => write!(f, "leaf"),
            Self::Host => write!(f, "host"),
        }
    }
}

/// # Network Node
///
/// A node only carries the static facts of the topology. The routing table of a node is computed
/// separately (see [`spf`](crate::fabric::spf)) and joined with the node by the
/// [simulation](crate::simulate::Simulation::node_routes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique name of the node
    name: String,
    /// Role of the node
    role: Role,
    /// Loopback address (informational only)
    loopback: String,
    /// Address of the tunnel endpoint, if the node can terminate overlay tunnels
    vtep_ip: Option<String>,
}

impl Node {
    /// Create a new node without a tunnel endpoint address.
    pub fn new(name: impl Into<String>, role: Role, loopback: impl Into<String>) -> Self {
        Self { name: name.into(), role, loopback: loopback.into(), vtep_ip: None }
    }

    /// Set the tunnel endpoint address of the node.
    pub fn with_vtep_ip(mut self, vtep_ip: impl Into<String>) -> Self {
        self.vtep_ip = Some(vtep_ip.into());
        self
    }

    /// Return the name of the node
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Return the role of the node
    pub fn role(&self) -> Role {
        self.role
    }

    /// Return the loopback address of the node
    pub fn loopback(&self) -> &str {
        self.loopback.as_ref()
    }

    /// Return the tunnel endpoint address, or `None` if the node cannot terminate tunnels.
    pub fn vtep_ip(&self) -> Option<&str> {
        self.vtep_ip.as_deref()
    }
}

/// Undirected link between two nodes. The cost is the same in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// First endpoint
    pub a: String,
    /// Second endpoint
    pub b: String,
    /// Metric of the link
    pub cost: LinkCost,
}

impl Link {
    /// Create a new link
    pub fn new(a: impl Into<String>, b: impl Into<String>, cost: LinkCost) -> Self {
        Self { a: a.into(), b: b.into(), cost }
    }

    /// Create a new link with [`DEFAULT_LINK_COST`].
    pub fn with_default_cost(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, DEFAULT_LINK_COST)
    }
}

/// Topology Errors
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TopologyError {
    /// Node is not present in the topology
    #[error("Node was not found in topology: {0}")]
    NodeNotFound(String),
    /// Two nodes are not adjacent
    #[error("Link does not exist: {0} <-> {1}")]
    LinkNotFound(String, String),
    /// A link must connect two different nodes
    #[error("Link cannot connect node {0} to itself")]
    SelfLoop(String),
}
