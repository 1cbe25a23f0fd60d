use haulroad_core::config::AlgorithmKind;
use haulroad_core::{
    Catalog, Progress, Route, ScrollMetrics, Tour, TourConfig, TourSettings, Traversal,
};

fn catalog() -> Catalog {
    Catalog::from_yaml_str(
        r#"
About:
  - name: Bio
    links:
      - text: Résumé
        url: https://example.com/resume.pdf
Projects:
  - name: haulroad
    descriptions: [Road layout engine]
    links:
      - beforeText: "Source: "
        text: GitHub
        url: https://github.com/example/haulroad
      - text: Docs
        url: https://docs.rs/haulroad-core
  - Sketches
Contact:
  - Email
"#,
    )
    .unwrap()
}

fn metrics(progress: f64) -> ScrollMetrics {
    ScrollMetrics::new(progress * 1000.0, 2000.0, 1000.0)
}

#[test]
fn nodes_follow_catalog_order() {
    let tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    let ids: Vec<&str> = tour.layout().ids().collect();
    assert_eq!(ids, ["About", "Projects", "Contact"]);
}

#[test]
fn scroll_events_are_ignored_while_detached() {
    let mut tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    assert!(!tour.is_attached());
    assert!(!tour.on_scroll(metrics(0.5)));
    assert_eq!(tour.progress(), Progress::START);

    tour.attach();
    assert!(tour.on_scroll(metrics(0.5)));
    assert!(!tour.on_scroll(metrics(0.5)));
    assert_eq!(tour.progress().get(), 0.5);

    tour.detach();
    assert!(!tour.on_scroll(metrics(1.0)));
    assert_eq!(tour.progress().get(), 0.5);
}

#[test]
fn full_scroll_reveals_everything_once() {
    let mut tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    tour.attach();

    let mut reveals = Vec::new();
    for i in 0..=1000 {
        tour.on_scroll(metrics(i as f64 / 1000.0));
        let frame = tour.tick();
        reveals.extend(frame.newly_revealed.into_iter().map(|r| r.node));
    }
    assert_eq!(reveals, ["About", "Projects", "Contact"]);

    let frame = tour.tick();
    assert!(frame.newly_revealed.is_empty());
    assert_eq!(frame.revealed_nodes, ["About", "Projects", "Contact"]);
    assert_eq!(frame.progress, Progress::END);
    assert_eq!(tour.visibility().leaf_count(), 4);
}

#[test]
fn leaves_open_their_first_link_once_revealed() {
    let mut tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    assert!(tour.activate_leaf("Projects", "haulroad").is_none());

    tour.set_progress(Progress::END);
    tour.tick();
    // Jumping straight to the end of the lead-out passes no node.
    assert!(tour.activate_leaf("Projects", "haulroad").is_none());

    tour.reset();
    for i in 0..=500 {
        tour.set_progress(Progress::new(i as f64 / 500.0));
        tour.tick();
    }
    let url = tour.activate_leaf("Projects", "haulroad").unwrap();
    assert_eq!(url.as_str(), "https://github.com/example/haulroad");
    assert!(tour.activate_leaf("Projects", "Sketches").is_none());
    assert!(tour.activate_leaf("Projects", "missing").is_none());
}

#[test]
fn hidden_leaves_stay_hidden_when_labels_collide() {
    let catalog = Catalog::from_json_str(
        r#"{
            "A-B": ["C"],
            "A": [{ "name": "B-C", "links": [{ "text": "x", "url": "https://example.com/x" }] }],
            "Z": []
        }"#,
    )
    .unwrap();
    let mut tour = Tour::new(catalog, &TourSettings::default()).unwrap();

    // Only the first node, at the end of the lead-in.
    tour.set_progress(Progress::new(3.5 / 22.5));
    assert_eq!(tour.tick().revealed_nodes, ["A-B"]);
    assert!(tour.activate_leaf("A", "B-C").is_none());

    let mut later = Vec::new();
    for i in 0..=500 {
        tour.set_progress(Progress::new(i as f64 / 500.0));
        later.extend(tour.tick().newly_revealed);
    }
    let a = later.iter().find(|r| r.node == "A").unwrap();
    assert_eq!(a.leaves, ["B-C"]);
    let url = tour.activate_leaf("A", "B-C").unwrap();
    assert_eq!(url.as_str(), "https://example.com/x");
}

#[test]
fn reset_clears_reveals_and_progress() {
    let mut tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    // The first node sits at the end of the 3.5 long lead-in; the road is 22.5 long.
    tour.set_progress(Progress::new(3.5 / 22.5));
    assert_eq!(tour.tick().revealed_nodes, ["About"]);
    assert!((tour.route().length() - 22.5).abs() < 1e-9);

    tour.reset();
    assert_eq!(tour.visibility().node_count(), 0);
    assert_eq!(tour.progress(), Progress::START);
}

#[test]
fn pose_faces_along_the_lead_in() {
    let mut tour = Tour::new(catalog(), &TourSettings::default()).unwrap();
    let pose = tour.tick().pose;
    assert_eq!(pose.facing.z, 1.0);
    assert!((pose.render_position.y - pose.position.y - 0.2).abs() < 1e-12);
}

#[test]
fn leaf_fans_use_the_configured_radius() {
    let mut cfg = TourConfig::default();
    cfg.apply_override("layout.leafRadius=2").unwrap();
    let tour = Tour::new(catalog(), &cfg.resolve().unwrap()).unwrap();

    let node = tour.layout().node("Projects").unwrap().position();
    let fan = tour.leaf_positions("Projects").unwrap();
    assert_eq!(fan.len(), 2);
    for p in &fan {
        assert!(((*p - node).length() - 2.0).abs() < 1e-12);
    }
    assert!(tour.leaf_positions("Nowhere").is_none());
}

#[test]
fn every_algorithm_and_strategy_builds_a_tour() {
    for algorithm in [
        AlgorithmKind::ZigZag,
        AlgorithmKind::Orthogonal,
        AlgorithmKind::Meander,
        AlgorithmKind::CurveFit,
    ] {
        for strategy in [Traversal::Polyline, Traversal::CatmullRom] {
            let mut settings = TourSettings::default();
            settings.layout.algorithm = algorithm;
            settings.traversal.strategy = strategy;
            let mut tour = Tour::new(catalog(), &settings).unwrap();
            tour.set_progress(Progress::END);
            let frame = tour.tick();
            assert!(frame.pose.position.x.is_finite() && frame.pose.position.z.is_finite());
            assert!(tour.route().length() > 0.0);
        }
    }
}

#[test]
fn full_sweep_reveals_every_node_for_every_algorithm_and_strategy() {
    let catalog = Catalog::from_json_str(
        r#"{ "First": [], "N1": [], "N2": [], "N3": [], "N4": [], "N5": [], "Last": [] }"#,
    )
    .unwrap();
    let mut expected = vec!["First", "Last", "N1", "N2", "N3", "N4", "N5"];
    expected.sort_unstable();

    for algorithm in [
        AlgorithmKind::ZigZag,
        AlgorithmKind::Orthogonal,
        AlgorithmKind::Meander,
        AlgorithmKind::CurveFit,
    ] {
        for strategy in [Traversal::Polyline, Traversal::CatmullRom] {
            let mut settings = TourSettings::default();
            settings.layout.algorithm = algorithm;
            settings.traversal.strategy = strategy;
            let mut tour = Tour::new(catalog.clone(), &settings).unwrap();
            for i in 0..=4000 {
                tour.set_progress(Progress::new(i as f64 / 4000.0));
                tour.tick();
            }
            let mut revealed: Vec<&str> = tour.visibility().revealed_nodes().collect();
            revealed.sort_unstable();
            assert_eq!(revealed, expected, "{algorithm:?} with {strategy:?}");
        }
    }
}

#[test]
fn tours_can_move_across_threads() {
    fn assert_send<T: Send>() {}
    assert_send::<Tour>();
}

#[test]
fn invalid_layout_options_fail_tour_construction() {
    let mut settings = TourSettings::default();
    settings.layout.zig_zag.step = 0.0;
    let err = Tour::new(catalog(), &settings).unwrap_err();
    assert!(matches!(err, haulroad_core::Error::Layout(_)), "{err}");
}
