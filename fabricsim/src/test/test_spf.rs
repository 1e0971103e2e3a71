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

//! Test the shortest path computation and the next hop selection.

use crate::fabric::{
    all_routes, all_routes_parallel, route_path, single_source_routes, Fabric, LinkCost, Node,
    PathCost, Role, Route, RoutingTable, RoutingTables,
};
use itertools::iproduct;
use maplit::btreemap;

fn node(name: &str) -> Node {
    Node::new(name, Role::Spine, "10.255.255.255")
}

/// # Test fabric
///
/// ```text
/// A --1-- B
/// |       |
/// 4       1
/// |       |
/// D --1-- C       E
/// ```
fn get_test_fabric() -> Fabric {
    let mut fabric = Fabric::new();
    for name in ["A", "B", "C", "D", "E"].iter() {
        fabric.add_node(node(name));
    }
    fabric.add_link("A", "B", 1).unwrap();
    fabric.add_link("B", "C", 1).unwrap();
    fabric.add_link("C", "D", 1).unwrap();
    fabric.add_link("A", "D", 4).unwrap();
    fabric
}

#[test]
fn test_single_source() {
    let fabric = get_test_fabric();

    let expected: RoutingTable = btreemap! {
        "B".to_string() => Route::new("B", 1),
        "C".to_string() => Route::new("B", 2),
        "D".to_string() => Route::new("B", 3),
    };
    assert_eq!(single_source_routes(fabric.graph(), "A"), expected);

    let expected: RoutingTable = btreemap! {
        "A".to_string() => Route::new("C", 3),
        "B".to_string() => Route::new("C", 2),
        "C".to_string() => Route::new("C", 1),
    };
    assert_eq!(single_source_routes(fabric.graph(), "D"), expected);
}

#[test]
fn test_unreachable() {
    let fabric = get_test_fabric();
    let tables = all_routes(fabric.graph());

    assert_eq!(tables.len(), 5);
    assert!(tables["E"].is_empty());
    for source in ["A", "B", "C", "D"].iter() {
        assert!(!tables[*source].contains_key("E"));
        assert_eq!(tables[*source].len(), 3);
    }
}

#[test]
fn test_unknown_source() {
    let fabric = get_test_fabric();
    assert!(single_source_routes(fabric.graph(), "X").is_empty());
}

#[test]
fn test_source_not_in_own_table() {
    let fabric = Fabric::spine_leaf(3, 4);
    for (source, table) in all_routes(fabric.graph()) {
        assert!(!table.contains_key(&source));
        assert_eq!(table.len(), 6);
    }
}

#[test]
fn test_spine_leaf_routes() {
    let fabric = Fabric::spine_leaf(2, 3);
    let tables = all_routes(fabric.graph());

    let expected: RoutingTable = btreemap! {
        "S1".to_string() => Route::new("S1", 10),
        "S2".to_string() => Route::new("S2", 10),
        "L2".to_string() => Route::new("S1", 20),
        "L3".to_string() => Route::new("S1", 20),
    };
    assert_eq!(tables["L1"], expected);

    let expected: RoutingTable = btreemap! {
        "L1".to_string() => Route::new("L1", 10),
        "L2".to_string() => Route::new("L2", 10),
        "L3".to_string() => Route::new("L3", 10),
        "S2".to_string() => Route::new("L1", 20),
    };
    assert_eq!(tables["S1"], expected);
}

#[test]
fn test_spine_leaf_costs() {
    for (spines, leaves) in iproduct!(1..4, 2..5) {
        let fabric = Fabric::spine_leaf(spines, leaves);
        let tables = all_routes(fabric.graph());

        for (a, b) in iproduct!(1..=leaves, 1..=leaves) {
            if a == b {
                continue;
            }
            let src = format!("L{}", a);
            let dst = format!("L{}", b);
            assert_eq!(tables[&src][&dst].cost, 20);
            assert_eq!(tables[&src][&dst].cost, tables[&dst][&src].cost);
            assert_eq!(tables[&src][&dst].next_hop, "S1");
        }
        for (s, l) in iproduct!(1..=spines, 1..=leaves) {
            let spine = format!("S{}", s);
            let leaf = format!("L{}", l);
            assert_eq!(tables[&leaf][&spine], Route::new(spine.as_str(), 10));
            assert_eq!(tables[&spine][&leaf], Route::new(leaf.as_str(), 10));
        }
    }
}

#[test]
fn test_tie_break_independent_of_order() {
    // two equal paths A -> B -> D and A -> C -> D, with C added before B
    let mut fabric = Fabric::new();
    for name in ["D", "C", "A", "B"].iter() {
        fabric.add_node(node(name));
    }
    fabric.add_link("D", "C", 1).unwrap();
    fabric.add_link("A", "C", 1).unwrap();
    fabric.add_link("D", "B", 1).unwrap();
    fabric.add_link("A", "B", 1).unwrap();

    let tables = all_routes(fabric.graph());
    assert_eq!(tables["A"]["D"], Route::new("B", 2));
    assert_eq!(tables["D"]["A"], Route::new("B", 2));
    assert_eq!(tables["B"]["C"], Route::new("A", 2));
    assert_eq!(tables["C"]["B"], Route::new("A", 2));
}

#[test]
fn test_parallel() {
    let fabric = Fabric::spine_leaf(4, 9);
    let expected = all_routes(fabric.graph());

    assert_eq!(all_routes_parallel(fabric.graph(), None), expected);
    for n_threads in 1..6 {
        assert_eq!(all_routes_parallel(fabric.graph(), Some(n_threads)), expected);
    }
    // more threads than nodes
    assert_eq!(all_routes_parallel(fabric.graph(), Some(100)), expected);
    assert_eq!(all_routes_parallel(Fabric::new().graph(), Some(4)), RoutingTables::new());
}

#[test]
fn test_route_path() {
    let fabric = get_test_fabric();
    let tables = all_routes(fabric.graph());

    assert_eq!(
        route_path(&tables, "A", "D"),
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()])
    );
    assert_eq!(route_path(&tables, "A", "A"), Some(vec!["A".to_string()]));
    assert_eq!(route_path(&tables, "A", "E"), None);
    assert_eq!(route_path(&tables, "X", "A"), None);

    let fabric = Fabric::spine_leaf(2, 3);
    let tables = all_routes(fabric.graph());
    assert_eq!(
        route_path(&tables, "L1", "L2"),
        Some(vec!["L1".to_string(), "S1".to_string(), "L2".to_string()])
    );
}

#[test]
fn test_route_path_loop() {
    let tables: RoutingTables = btreemap! {
        "A".to_string() => btreemap! { "C".to_string() => Route::new("B", 2) },
        "B".to_string() => btreemap! { "C".to_string() => Route::new("A", 2) },
    };
    assert_eq!(route_path(&tables, "A", "C"), None);
}

#[test]
fn test_large_link_costs() {
    let mut fabric = Fabric::new();
    for name in ["A", "B", "C"].iter() {
        fabric.add_node(node(name));
    }
    fabric.add_link("A", "B", LinkCost::MAX).unwrap();
    fabric.add_link("B", "C", 5).unwrap();

    // the path cost exceeds the range of a single link cost
    let expected = PathCost::from(LinkCost::MAX) + 5;
    let tables = all_routes(fabric.graph());
    assert_eq!(tables["A"]["C"], Route::new("B", expected));
    assert_eq!(tables["C"]["A"], Route::new("B", expected));

    // the direct link is strictly cheaper than the path via B
    fabric.add_link("A", "C", LinkCost::MAX).unwrap();
    let tables = all_routes(fabric.graph());
    assert_eq!(tables["A"]["C"], Route::new("C", PathCost::from(LinkCost::MAX)));
    assert_eq!(tables["A"]["B"], Route::new("B", PathCost::from(LinkCost::MAX)));
}
