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

//! Module containing all error types

use crate::fabric::TopologyError;
use crate::overlay::OverlayError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the fabric
    #[error("Topology Error: {0}")]
    TopologyError(#[from] TopologyError),
    /// Error propagated from the overlay
    #[error("Overlay Error: {0}")]
    OverlayError(#[from] OverlayError),
    /// The simulation parameters are inconsistent
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),
    /// The result cannot be serialized
    #[error("Serialization Error: {0}")]
    SerializationError(#[from] serde_json::Error),
    /// Writing the result failed
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}
