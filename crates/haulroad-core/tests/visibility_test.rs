use haulroad_core::layout::geom::{Point, planar_distance, point};
use haulroad_core::layout::{Algorithm, Node, ZigZagOptions, layout};
use haulroad_core::{
    Catalog, Metric, Progress, ProximityTrigger, VisibilityState, point_at_progress,
};
use std::collections::BTreeSet;

fn catalog() -> Catalog {
    Catalog::from_json_str(
        r#"{
            "First": ["Intro"],
            "Node1": ["Rust", "Go"],
            "Node2": [],
            "Node3": [{ "name": "Talks", "descriptions": ["Conference talks"] }],
            "Last": ["Contact"]
        }"#,
    )
    .unwrap()
}

fn nodes_and_path(c: &Catalog) -> (Vec<Node>, Vec<Point>) {
    let ids: Vec<&str> = c.ids().collect();
    let l = layout(&ids, &Algorithm::ZigZag(ZigZagOptions::default())).unwrap();
    (l.nodes, l.path)
}

#[test]
fn reveal_happens_iff_the_marker_came_within_threshold() {
    let c = catalog();
    let (nodes, path) = nodes_and_path(&c);
    let trigger = ProximityTrigger::new(0.5, Metric::Planar).unwrap();
    let mut state = VisibilityState::new();
    let mut expected = BTreeSet::new();

    let steps = 4000;
    for i in 0..=steps {
        let marker = point_at_progress(&path, Progress::new(i as f64 / steps as f64));
        for n in &nodes {
            if planar_distance(marker, n.position()) < 0.5 {
                expected.insert(n.id.clone());
            }
        }
        trigger.observe(&mut state, marker, &nodes, &c);
        let revealed: BTreeSet<String> = state.revealed_nodes().map(str::to_string).collect();
        assert_eq!(revealed, expected, "mismatch at step {i}");
    }

    // Every node sits on the road, so a full sweep reveals all of them in road order.
    let order: Vec<&str> = state.revealed_nodes().collect();
    assert_eq!(order, ["First", "Node1", "Node2", "Node3", "Last"]);
    assert_eq!(state.leaf_count(), 5);
    assert!(state.is_leaf_revealed("Node3", "Talks"));
}

#[test]
fn revealed_sets_only_grow_and_never_repeat() {
    let c = catalog();
    let (nodes, path) = nodes_and_path(&c);
    let trigger = ProximityTrigger::default();
    let mut state = VisibilityState::new();

    let mut seen = BTreeSet::new();
    let mut prev = 0;
    // Back and forth over the road.
    for i in (0..=200).chain((0..=200).rev()).chain(0..=200) {
        let marker = point_at_progress(&path, Progress::new(i as f64 / 200.0));
        for reveal in trigger.observe(&mut state, marker, &nodes, &c) {
            assert!(seen.insert(reveal.node.clone()), "{} revealed twice", reveal.node);
        }
        assert!(state.node_count() >= prev);
        prev = state.node_count();
    }
    assert_eq!(state.revealed_leaves().count(), state.leaf_count());
}

#[test]
fn simultaneous_nodes_are_all_revealed() {
    let c = Catalog::from_json_str(r#"{ "a": ["x"], "b": ["y"], "c": [] }"#).unwrap();
    let nodes = vec![
        Node::at("a", point(0.0, 0.0, 0.0)),
        Node::at("b", point(0.2, 0.0, 0.0)),
        Node::at("c", point(5.0, 0.0, 0.0)),
    ];
    let mut state = VisibilityState::new();
    let out = ProximityTrigger::default().observe(&mut state, point(0.1, 0.0, 0.0), &nodes, &c);
    let names: Vec<&str> = out.iter().map(|r| r.node.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(out[1].leaves, ["y"]);
}

#[test]
fn planar_metric_ignores_marker_elevation() {
    let c = Catalog::from_json_str(r#"{ "a": [], "b": [] }"#).unwrap();
    let nodes = vec![
        Node::at("a", point(0.0, 0.0, 0.0)),
        Node::at("b", point(9.0, 0.0, 0.0)),
    ];
    let lifted = point(0.0, 3.0, 0.0);

    let mut planar = VisibilityState::new();
    ProximityTrigger::new(0.5, Metric::Planar)
        .unwrap()
        .observe(&mut planar, lifted, &nodes, &c);
    assert!(planar.is_node_revealed("a"));

    let mut spatial = VisibilityState::new();
    ProximityTrigger::new(0.5, Metric::Spatial)
        .unwrap()
        .observe(&mut spatial, lifted, &nodes, &c);
    assert!(!spatial.is_node_revealed("a"));
}

#[test]
fn threshold_is_strict() {
    let c = Catalog::from_json_str(r#"{ "a": [], "b": [] }"#).unwrap();
    let nodes = vec![
        Node::at("a", point(0.0, 0.0, 0.0)),
        Node::at("b", point(9.0, 0.0, 0.0)),
    ];
    let mut state = VisibilityState::new();
    let out = ProximityTrigger::default().observe(&mut state, point(0.5, 0.0, 0.0), &nodes, &c);
    assert!(out.is_empty());
}
