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

//! Module containing all type definitions of the overlay

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// UDP destination port of VXLAN encapsulated packets.
pub const VXLAN_UDP_PORT: u16 = 4789;

/// Virtual segment identifier (VNI)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SegmentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// # Tunnel Endpoint (VTEP)
///
/// A tunnel endpoint is identified by the name of the node it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelEndpoint {
    #[serde(skip)]
    name: String,
    #[serde(rename = "ip")]
    address: String,
    #[serde(rename = "vnis")]
    segments: BTreeSet<SegmentId>,
}

impl TunnelEndpoint {
    pub(crate) fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into(), segments: BTreeSet::new() }
    }

    /// Name of the node owning the endpoint
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Address of the endpoint
    pub fn address(&self) -> &str {
        self.address.as_ref()
    }

    /// Identifiers of all segments the endpoint participates in, in ascending order.
    pub fn segments(&self) -> &BTreeSet<SegmentId> {
        &self.segments
    }

    /// Update the address. Returns the old address if it has changed.
    pub(crate) fn set_address(&mut self, address: &str) -> Option<String> {
        if self.address == address {
            None
        } else {
            Some(std::mem::replace(&mut self.address, address.to_string()))
        }
    }

    pub(crate) fn join(&mut self, segment: SegmentId) -> bool {
        self.segments.insert(segment)
    }
}

/// # Virtual Segment (VNI)
///
/// A virtual segment groups several tunnel endpoints into one logical layer 2 network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualSegment {
    #[serde(skip)]
    id: SegmentId,
    name: String,
    members: BTreeSet<String>,
}

impl VirtualSegment {
    pub(crate) fn new(id: SegmentId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), members: BTreeSet::new() }
    }

    /// Identifier of the segment
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Display name of the segment
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Names of all member endpoints, in ascending order.
    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    pub(crate) fn add_member(&mut self, endpoint: &str) -> bool {
        self.members.insert(endpoint.to_string())
    }
}

/// # Encapsulation record
///
/// Human-readable description of how a payload is wrapped when it is sent through the tunnel
/// between two endpoints. No packet is actually built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encapsulation {
    /// Fixed tag
    pub description: String,
    /// Description of the encapsulated payload
    pub payload: String,
    /// VXLAN header, containing the segment id
    pub vxlan_header: String,
    /// Outer UDP header
    pub outer_udp_header: String,
    /// Outer IP header, containing the addresses of both endpoints
    pub outer_ip_header: String,
}

impl Encapsulation {
    /// Describe the encapsulation of `payload` sent from endpoint `src` to endpoint `dst` within
    /// the given segment.
    pub fn new(
        src: &TunnelEndpoint,
        dst: &TunnelEndpoint,
        segment: SegmentId,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            description: String::from("VXLAN Encapsulation"),
            payload: payload.into(),
            vxlan_header: format!("VNI {}", segment),
            outer_udp_header: format!("UDP Port {}", VXLAN_UDP_PORT),
            outer_ip_header: format!("src={}, dst={}", src.address(), dst.address()),
        }
    }
}

/// Overlay Errors
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum OverlayError {
    /// The segment was not created before
    #[error("Virtual segment {0} does not exist")]
    SegmentNotFound(SegmentId),
    /// The endpoint was never attached
    #[error("Tunnel endpoint {0} does not exist")]
    EndpointNotFound(String),
}
