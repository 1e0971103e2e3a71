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

//! # Overlay
//!
//! VXLAN-like overlay on top of the fabric. Tunnel endpoints (VTEPs) are grouped into virtual
//! segments (VNIs). Every pair of endpoints sharing a segment forms a (potential) tunnel, so the
//! tunnels of a segment are a full mesh over its members.
//!
//! Segments must be created with [`OverlayRegistry::add_segment`] before endpoints can be
//! attached to them. [`OverlayRegistry::attach_endpoint_or_create`] performs both steps at once,
//! naming new segments `VNI-<id>`.

pub(crate) mod registry;
pub(crate) mod types;

pub use registry::OverlayRegistry;
pub use types::{
    Encapsulation, OverlayError, SegmentId, TunnelEndpoint, VirtualSegment, VXLAN_UDP_PORT,
};
