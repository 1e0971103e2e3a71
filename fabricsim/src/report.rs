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

//! # Report
//!
//! Renders a [`Simulation`] for the presentation layer: the three read-only JSON resources
//! (`topology`, `routes` and `overlay`), the whole result as one JSON document, and an HTML
//! dashboard embedding all three resources. Everything is rendered from the same `Simulation`,
//! so the resources always describe the same fabric and overlay.

use crate::simulate::Simulation;
use crate::Error;

use std::fmt;

/// JSON resource of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Nodes and links of the fabric
    Topology,
    /// Routing tables of all nodes
    Routes,
    /// Segments, endpoints, tunnels and the example encapsulation
    Overlay,
}

impl Resource {
    /// All resources, in the order they appear on the dashboard.
    pub const ALL: [Resource; 3] = [Resource::Topology, Resource::Routes, Resource::Overlay];

    /// Path under which the resource is served.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Topology => "/api/topology",
            Self::Routes => "/api/routes",
            Self::Overlay => "/api/vxlan",
        }
    }

    /// Title of the resource on the dashboard.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Topology => "Topology",
            Self::Routes => "Routing Tables",
            Self::Overlay => "VXLAN Details",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology => write!(f, "topology"),
            Self::Routes => write!(f, "routes"),
            Self::Overlay => write!(f, "overlay"),
        }
    }
}

/// Render a single resource as indented JSON.
pub fn render_resource(sim: &Simulation, resource: Resource) -> Result<String, Error> {
    Ok(match resource {
        Resource::Topology => serde_json::to_string_pretty(&sim.topology)?,
        Resource::Routes => serde_json::to_string_pretty(&sim.routes)?,
        Resource::Overlay => serde_json::to_string_pretty(&sim.overlay)?,
    })
}

/// Render the whole simulation as indented JSON.
pub fn render_all(sim: &Simulation) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(sim)?)
}

/// Render the HTML dashboard, embedding all three resources.
pub fn render_dashboard(sim: &Simulation) -> Result<String, Error> {
    let mut html = String::from(DASHBOARD_HEAD);

    html.push_str("  <nav>\n");
    for resource in Resource::ALL.iter() {
        html.push_str(&format!(
            "    <a href=\"{}\" target=\"_blank\">API: {}</a>\n",
            resource.path(),
            resource.title()
        ));
    }
    html.push_str("  </nav>\n");

    for resource in Resource::ALL.iter() {
        html.push_str(&format!(
            "  <h2>{}</h2>\n  <pre id=\"{}\">{}</pre>\n",
            resource.title(),
            resource,
            escape_html(&render_resource(sim, *resource)?)
        ));
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

static DASHBOARD_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>VXLAN+OSPF Simulator</title>
  <style>
    body { font-family: sans-serif; margin: 0; padding: 2em; background: #f9f9f9; color: #333; }
    h2 { border-bottom: 2px solid #eee; padding-bottom: 5px; }
    pre { background: #fff; border: 1px solid #ddd; padding: 1em; border-radius: 5px; }
    nav a { margin-right: 1em; text-decoration: none; color: #007bff; }
  </style>
</head>
<body>
  <h1>VXLAN+OSPF Network Simulator</h1>
"#;
