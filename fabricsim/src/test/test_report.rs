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

//! Test the JSON resources, the HTML dashboard and the printer.

use crate::overlay::SegmentId;
use crate::printer;
use crate::report::{render_all, render_dashboard, render_resource, Resource};
use crate::simulate::{simulate_default, Simulation};
use lazy_static::lazy_static;
use serde_json::{json, Value};

lazy_static! {
    static ref SIM: Simulation = simulate_default().unwrap();
}

fn resource(r: Resource) -> Value {
    serde_json::from_str(&render_resource(&SIM, r).unwrap()).unwrap()
}

#[test]
fn test_resource_names() {
    assert_eq!(Resource::Topology.to_string(), "topology");
    assert_eq!(Resource::Routes.to_string(), "routes");
    assert_eq!(Resource::Overlay.to_string(), "overlay");
    assert_eq!(Resource::Overlay.path(), "/api/vxlan");
}

#[test]
fn test_all_contains_resources() {
    let all: Value = serde_json::from_str(&render_all(&SIM).unwrap()).unwrap();
    for r in Resource::ALL.iter() {
        assert_eq!(all[r.to_string()], resource(*r));
    }
    assert_eq!(all.as_object().unwrap().len(), 3);
}

#[test]
fn test_topology_resource() {
    let topology = resource(Resource::Topology);
    assert_eq!(topology["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(topology["links"].as_array().unwrap().len(), 6);
    assert_eq!(
        topology["nodes"][2],
        json!({"name": "L1", "role": "leaf", "loopback": "10.255.0.3", "vtep_ip": "10.0.0.3"})
    );
    assert_eq!(topology["links"][0], json!({"a": "S1", "b": "L1", "cost": 10}));
}

#[test]
fn test_routes_resource() {
    let routes = resource(Resource::Routes);
    assert_eq!(routes["L1"]["L2"], json!({"nexthop": "S1", "cost": 20}));
    assert_eq!(routes["S2"]["L3"], json!({"nexthop": "L3", "cost": 10}));
    assert!(routes["L1"].get("L1").is_none());
}

#[test]
fn test_overlay_resource() {
    let overlay = resource(Resource::Overlay);
    assert_eq!(overlay["vnis"]["10010"]["members"], json!(["L1", "L2", "L3"]));
    assert_eq!(overlay["vteps"]["L3"], json!({"ip": "10.0.0.5", "vnis": [10010]}));
    assert_eq!(overlay["tunnels"], json!([["L1", "L2"], ["L1", "L3"], ["L2", "L3"]]));
    assert_eq!(
        overlay["sample_encapsulation"],
        json!({
            "description": "VXLAN Encapsulation",
            "payload": "L2 frame: MAC A -> MAC B",
            "vxlan_header": "VNI 10010",
            "outer_udp_header": "UDP Port 4789",
            "outer_ip_header": "src=10.0.0.3, dst=10.0.0.4"
        })
    );
}

#[test]
fn test_dashboard() {
    let html = render_dashboard(&SIM).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    for r in Resource::ALL.iter() {
        assert!(html.contains(&format!("<pre id=\"{}\">", r)));
        assert!(html.contains(&format!("href=\"{}\"", r.path())));
        assert!(html.contains(r.title()));
    }
    // the payload is escaped
    assert!(html.contains("MAC A -&gt; MAC B"));
    assert!(!html.contains("MAC A -> MAC B"));
}

#[test]
fn test_printer() {
    assert_eq!(
        printer::routing_table(&SIM.routes["L1"]),
        vec![
            "L2 via S1 (cost: 20)",
            "L3 via S1 (cost: 20)",
            "S1 via S1 (cost: 10)",
            "S2 via S2 (cost: 10)",
        ]
    );
    assert_eq!(printer::tunnel("L1", "L2", SegmentId(10010)), "L1 <=> L2 (VNI 10010)");
    assert_eq!(
        printer::overlay(&SIM.overlay.registry),
        vec![
            "VNI 10010 (customers-A): L1, L2, L3",
            "  L1 <=> L2 (VNI 10010)",
            "  L1 <=> L3 (VNI 10010)",
            "  L2 <=> L3 (VNI 10010)",
        ]
    );

    let topology = printer::topology(&SIM.topology);
    assert_eq!(topology.len(), 11);
    assert_eq!(topology[0], "S1 (spine): loopback 10.255.0.1");
    assert_eq!(topology[2], "L1 (leaf): loopback 10.255.0.3, vtep 10.0.0.3");
    assert_eq!(topology[5], "S1 <-> L1 (cost: 10)");

    let encap = SIM.overlay.example_encapsulation.as_ref().unwrap();
    assert_eq!(
        printer::encapsulation(encap),
        "VXLAN Encapsulation: [src=10.0.0.3, dst=10.0.0.4] [UDP Port 4789] [VNI 10010] \
         [L2 frame: MAC A -> MAC B]"
    );
}
