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

//! # Overlay registry
//!
//! The registry owns all virtual segments and tunnel endpoints. An endpoint is a member of a
//! segment if and only if the segment id is part of the segment set of the endpoint. Every
//! mutating function keeps both sides consistent.

use crate::overlay::types::{
    Encapsulation, OverlayError, SegmentId, TunnelEndpoint, VirtualSegment,
};

use itertools::Itertools;
use log::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// # Overlay Registry
///
/// ```rust
/// use fabricsim::overlay::{OverlayRegistry, SegmentId};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let vni = SegmentId(10010);
///     let mut overlay = OverlayRegistry::new();
///     overlay.add_segment(vni, "customers-A");
///
///     overlay.attach_endpoint("L1", "10.0.0.3", &[vni])?;
///     overlay.attach_endpoint("L2", "10.0.0.4", &[vni])?;
///     overlay.attach_endpoint("L3", "10.0.0.5", &[vni])?;
///
///     assert_eq!(overlay.tunnels_for_segment(vni).len(), 3);
///
///     // attaching to an unknown segment fails
///     assert!(overlay.attach_endpoint("L4", "10.0.0.6", &[SegmentId(20)]).is_err());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayRegistry {
    #[serde(rename = "vnis")]
    segments: BTreeMap<SegmentId, VirtualSegment>,
    #[serde(rename = "vteps")]
    endpoints: BTreeMap<String, TunnelEndpoint>,
}

impl OverlayRegistry {
    /// Generate an empty registry
    pub fn new() -> Self {
        Self { segments: BTreeMap::new(), endpoints: BTreeMap::new() }
    }

    /// Create the segment if it does not exist yet. If it already exists, neither its name nor
    /// its members are changed.
    pub fn add_segment(&mut self, id: SegmentId, name: impl Into<String>) {
        if self.segments.contains_key(&id) {
            trace!("Segment {} already exists", id);
            return;
        }
        let segment = VirtualSegment::new(id, name);
        debug!("Created segment {} ({})", id, segment.name());
        self.segments.insert(id, segment);
    }

    /// Attach the endpoint of `node` with the given address to all segments in `segment_ids`. The
    /// endpoint is created if it does not exist, and its address is updated otherwise.
    ///
    /// All segments must already exist. If any of them does not, the error
    /// [`OverlayError::SegmentNotFound`] is returned, and the registry is left unchanged.
    pub fn attach_endpoint(
        &mut self,
        node: &str,
        address: &str,
        segment_ids: &[SegmentId],
    ) -> Result<(), OverlayError> {
        if let Some(missing) = segment_ids.iter().find(|id| !self.segments.contains_key(*id)) {
            return Err(OverlayError::SegmentNotFound(*missing));
        }
        self.join_segments(node, address, segment_ids);
        Ok(())
    }

    /// Attach the endpoint like [`OverlayRegistry::attach_endpoint`], but create every missing
    /// segment first, using the name `VNI-<id>`.
    pub fn attach_endpoint_or_create(
        &mut self,
        node: &str,
        address: &str,
        segment_ids: &[SegmentId],
    ) {
        for id in segment_ids {
            self.add_segment(*id, format!("VNI-{}", id));
        }
        self.join_segments(node, address, segment_ids);
    }

    /// Create or update the endpoint and add it to every existing segment in `segment_ids`.
    fn join_segments(&mut self, node: &str, address: &str, segment_ids: &[SegmentId]) {
        let endpoint = self
            .endpoints
            .entry(node.to_string())
            .or_insert_with(|| TunnelEndpoint::new(node, address));
        if let Some(old) = endpoint.set_address(address) {
            debug!("Tunnel endpoint {} moved from {} to {}", node, old, address);
        }

        for id in segment_ids {
            if let Some(segment) = self.segments.get_mut(id) {
                endpoint.join(*id);
                if segment.add_member(node) {
                    debug!("Attached {} ({}) to segment {}", node, address, id);
                }
            }
        }
    }

    /// Returns all tunnels of the segment, which are all pairs `(a, b)` of distinct members with
    /// `a < b`. The pairs are sorted. If the segment does not exist or has less than two members,
    /// the result is empty.
    pub fn tunnels_for_segment(&self, id: SegmentId) -> Vec<(String, String)> {
        match self.segments.get(&id) {
            Some(segment) => segment
                .members()
                .iter()
                .tuple_combinations()
                .map(|(a, b)| (a.clone(), b.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the tunnels of every segment.
    pub fn all_tunnels(&self) -> BTreeMap<SegmentId, Vec<(String, String)>> {
        self.segments.keys().map(|id| (*id, self.tunnels_for_segment(*id))).collect()
    }

    /// Describe the encapsulation of `payload` sent from `src` to `dst` in the given segment.
    pub fn encapsulate(
        &self,
        src: &TunnelEndpoint,
        dst: &TunnelEndpoint,
        segment: SegmentId,
        payload: &str,
    ) -> Encapsulation {
        Encapsulation::new(src, dst, segment, payload)
    }

    /// Describe the encapsulation between the two endpoints with the given names.
    pub fn encapsulate_between(
        &self,
        src: &str,
        dst: &str,
        segment: SegmentId,
        payload: &str,
    ) -> Result<Encapsulation, OverlayError> {
        let src_endpoint =
            self.get_endpoint(src).ok_or_else(|| OverlayError::EndpointNotFound(src.into()))?;
        let dst_endpoint =
            self.get_endpoint(dst).ok_or_else(|| OverlayError::EndpointNotFound(dst.into()))?;
        Ok(self.encapsulate(src_endpoint, dst_endpoint, segment, payload))
    }

    /// Returns the endpoint with the given name, or `None` if it does not exist.
    pub fn get_endpoint(&self, name: &str) -> Option<&TunnelEndpoint> {
        self.endpoints.get(name)
    }

    /// Returns the segment with the given id, or `None` if it does not exist.
    pub fn get_segment(&self, id: SegmentId) -> Option<&VirtualSegment> {
        self.segments.get(&id)
    }

    /// Names of all endpoints, sorted
    pub fn list_endpoints(&self) -> Vec<String> {
        self.endpoints.keys().cloned().collect()
    }

    /// Ids of all segments, sorted
    pub fn list_segments(&self) -> Vec<SegmentId> {
        self.segments.keys().copied().collect()
    }

    /// Iterator over all endpoints, sorted by name
    pub fn endpoints(&self) -> impl Iterator<Item = &TunnelEndpoint> + '_ {
        self.endpoints.values()
    }

    /// Iterator over all segments, sorted by id
    pub fn segments(&self) -> impl Iterator<Item = &VirtualSegment> + '_ {
        self.segments.values()
    }
}
