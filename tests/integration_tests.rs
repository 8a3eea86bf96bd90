use coverplan::{Config, HubClass, PlanWarning, Planner, Site};

#[test]
fn test_close_hub_pair_classified_urban() {
    // ~1.1 km apart with a 1-NN average: well under the 2500 m threshold.
    let hubs = vec![Site::new("a", 0.0, 0.0), Site::new("b", 0.0, 0.01)];
    let planner = Planner::new(Config::default().with_knn(1)).unwrap();

    let outcome = planner.run(&hubs, &[], &[]).unwrap();
    assert_eq!(outcome.classification.get(0), Some(HubClass::Urban));
    assert_eq!(outcome.classification.get(1), Some(HubClass::Urban));
    assert_eq!(outcome.stats.urban_hubs, 2);
    assert_eq!(outcome.stats.rural_hubs, 0);
}

#[test]
fn test_colocated_satellites_need_one_buffer() {
    // Three satellites at hub "core"'s center; the second hub is far away
    // and covers nothing, so one rural 7.5 km buffer covers 3/3.
    let hubs = vec![Site::new("core", 0.0, 0.0), Site::new("remote", 2.0, 2.0)];
    let satellites = vec![
        Site::new("s1", 0.0, 0.0),
        Site::new("s2", 0.0, 0.0),
        Site::new("s3", 0.0, 0.0),
    ];
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &[]).unwrap();
    assert_eq!(outcome.classification.get(0), Some(HubClass::Rural));

    assert_eq!(outcome.selection.buffers.len(), 1);
    let buffer = &outcome.selection.buffers[0];
    assert_eq!(buffer.hub, 0);
    assert_eq!(buffer.radius_m, 7500.0);
    assert_eq!(buffer.new_coverage, 3);
    assert_eq!(outcome.stats.covered_satellites, 3);
    assert_eq!(outcome.stats.coverage_pct, 100.0);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_disjoint_hubs_are_both_selected() {
    // Two hubs ~222 km apart, each with 5 satellites of its own.
    let hubs = vec![Site::new("west", 0.0, 0.0), Site::new("east", 0.0, 2.0)];
    let mut satellites = Vec::new();
    for i in 0..5 {
        satellites.push(Site::new(format!("w{}", i), 0.0, 0.001 * i as f64));
    }
    for i in 0..5 {
        satellites.push(Site::new(format!("e{}", i), 0.0, 2.0 + 0.001 * i as f64));
    }
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &[]).unwrap();
    assert_eq!(outcome.selection.buffers.len(), 2);
    assert_eq!(
        outcome
            .selection
            .buffers
            .iter()
            .map(|b| b.new_coverage)
            .sum::<usize>(),
        10
    );
    assert_eq!(outcome.stats.covered_satellites, 10);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_identical_coverage_selects_one_hub() {
    // Two hubs ~1 km apart covering the same 5 satellites: the runner-up
    // adds zero new coverage and is skipped.
    let hubs = vec![Site::new("a", 0.0, 0.0), Site::new("b", 0.0, 0.009)];
    let satellites: Vec<Site> = (0..5)
        .map(|i| Site::new(format!("s{}", i), 0.0, 0.002 + 0.001 * i as f64))
        .collect();
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &[]).unwrap();
    assert_eq!(outcome.selection.buffers.len(), 1);
    assert_eq!(outcome.stats.covered_satellites, 5);
    assert!(outcome.selection.target_met());
}

#[test]
fn test_join_records_follow_selection() {
    let hubs = vec![Site::new("west", 0.0, 0.0), Site::new("east", 0.0, 2.0)];
    let satellites = vec![
        Site::new("w-sat", 0.0, 0.01),
        Site::new("e-sat-1", 0.0, 2.0),
        Site::new("e-sat-2", 0.0, 2.01),
    ];
    let institutions = vec![
        Site::new("w-inst", 0.01, 0.0),
        Site::new("far-inst", 5.0, 5.0),
    ];
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &institutions).unwrap();
    assert_eq!(outcome.join.len(), outcome.selection.buffers.len());

    for (buffer, record) in outcome.selection.buffers.iter().zip(&outcome.join) {
        assert_eq!(record.hub_id, hubs[buffer.hub].id);
        assert_eq!(record.radius_km, buffer.radius_m / 1000.0);
        assert_eq!(record.satellite_count, record.satellites_inside.len());
        assert_eq!(record.institution_count, record.institutions_inside.len());
    }

    // The east buffer covers both east satellites; the west one covers the
    // west satellite and the west institution.
    let east = outcome
        .join
        .iter()
        .find(|r| r.hub_id == "east")
        .expect("east hub selected");
    assert_eq!(east.satellites_inside, vec!["e-sat-1", "e-sat-2"]);
    assert!(east.institutions_inside.is_empty());

    let west = outcome
        .join
        .iter()
        .find(|r| r.hub_id == "west")
        .expect("west hub selected");
    assert_eq!(west.satellites_inside, vec!["w-sat"]);
    assert_eq!(west.institutions_inside, vec!["w-inst"]);

    assert_eq!(outcome.stats.satellites_in_buffers, 3);
    assert_eq!(outcome.stats.institutions_in_buffers, 1);
}

#[test]
fn test_under_target_run_reports_warning_not_error() {
    // One reachable satellite, four out of reach of any hub.
    let hubs = vec![Site::new("a", 0.0, 0.0), Site::new("b", 0.0, 0.05)];
    let mut satellites = vec![Site::new("near", 0.0, 0.001)];
    for i in 0..4 {
        satellites.push(Site::new(format!("far{}", i), 3.0 + i as f64, 3.0));
    }
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &[]).unwrap();
    assert_eq!(outcome.stats.covered_satellites, 1);
    assert_eq!(outcome.stats.target_satellites, 5);
    assert!(
        outcome
            .warnings
            .contains(&PlanWarning::CoverageTargetUnmet {
                covered: 1,
                target: 5
            })
    );
}

#[test]
fn test_reduction_percentage() {
    // Ten hubs in a tight line all covering the same satellites: one buffer
    // should suffice, a 90% reduction.
    let hubs: Vec<Site> = (0..10)
        .map(|i| Site::new(format!("h{}", i), 0.0, 0.001 * i as f64))
        .collect();
    let satellites: Vec<Site> = (0..6)
        .map(|i| Site::new(format!("s{}", i), 0.001, 0.001 * i as f64))
        .collect();
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let outcome = planner.run(&hubs, &satellites, &[]).unwrap();
    assert_eq!(outcome.selection.buffers.len(), 1);
    assert!((outcome.stats.reduction_pct - 90.0).abs() < 1e-9);
}

#[test]
fn test_pipeline_is_deterministic() {
    // Identical inputs and configuration must yield byte-identical output.
    let hubs: Vec<Site> = (0..20)
        .map(|i| {
            Site::new(
                format!("hub{}", i),
                40.0 + (i % 5) as f64 * 0.021,
                -74.0 + (i / 5) as f64 * 0.017,
            )
        })
        .collect();
    let satellites: Vec<Site> = (0..60)
        .map(|i| {
            Site::new(
                format!("sat{}", i),
                40.0 + (i % 12) as f64 * 0.009,
                -74.0 + (i / 12) as f64 * 0.013,
            )
        })
        .collect();
    let institutions: Vec<Site> = (0..10)
        .map(|i| Site::new(format!("inst{}", i), 40.02 + (i as f64) * 0.01, -73.99))
        .collect();

    let planner = Planner::with_defaults();
    let first = planner.run(&hubs, &satellites, &institutions).unwrap();
    let second = planner.run(&hubs, &satellites, &institutions).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_payload_is_carried_but_ignored() {
    let hubs = vec![
        Site::with_payload("a", 0.0, 0.0, &b"staff=12"[..]),
        Site::new("b", 0.0, 0.01),
    ];
    let satellites = vec![Site::with_payload("s", 0.0, 0.001, &b"students=300"[..])];
    let planner = Planner::new(Config::default().with_min_coverage_target(1.0)).unwrap();

    let with_payload = planner.run(&hubs, &satellites, &[]).unwrap();

    let bare_hubs = vec![Site::new("a", 0.0, 0.0), Site::new("b", 0.0, 0.01)];
    let bare_satellites = vec![Site::new("s", 0.0, 0.001)];
    let bare = planner.run(&bare_hubs, &bare_satellites, &[]).unwrap();

    assert_eq!(with_payload.selection.buffers.len(), 1);
    assert_eq!(with_payload.selection, bare.selection);
    assert_eq!(with_payload.stats, bare.stats);
}
