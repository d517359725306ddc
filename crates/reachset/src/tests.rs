//! End-to-end runs of the pipeline over a few steps.

use crate::error::{OracleQueryError, ReachError};
use crate::prelude::*;

fn config(num_threads: usize) -> Configuration {
    let mut c = Configuration::default();
    c.vehicle = VehicleConfig {
        v_lon_min: 0.0,
        v_lon_max: 10.0,
        v_lat_min: -2.0,
        v_lat_max: 2.0,
        a_lon_min: -3.0,
        a_lon_max: 3.0,
        a_lat_min: -1.0,
        a_lat_max: 1.0,
    };
    c.planning.dt = 0.5;
    c.planning.steps_computation = 4;
    c.planning.v_lon_initial = 5.0;
    c.planning.uncertainty_p_lon = 0.1;
    c.planning.uncertainty_p_lat = 0.1;
    c.planning.uncertainty_v_lon = 0.1;
    c.planning.uncertainty_v_lat = 0.1;
    c.reachable_set.size_grid = 0.2;
    c.reachable_set.size_grid_2nd = 0.1;
    c.reachable_set.radius_terminal_split = 0.3;
    c.reachable_set.num_threads = num_threads;
    c
}

fn computed(config: Configuration, oracle: ObstacleOracle) -> ReachableSet<ObstacleOracle> {
    let mut set = ReachableSet::new(config, oracle).unwrap();
    set.compute_all().unwrap();
    set
}

fn rects_at(set: &ReachableSet<ObstacleOracle>, step: usize) -> Vec<Rect> {
    set.reachable_set_at_step(step)
        .iter()
        .map(ReachNode::position_rectangle)
        .collect()
}

#[test]
fn free_space_run_links_every_node() {
    let set = computed(config(2), ObstacleOracle::new());
    assert_eq!(set.max_evaluated_step(), Some(4));
    assert_eq!(set.steps_computed(), &[0, 1, 2, 3, 4]);
    for step in 1..=4 {
        let nodes = set.reachable_set_at_step(step);
        assert!(!nodes.is_empty(), "step {step} has no node");
        assert!(set.area_of_reachable_set(step) > 0.0);
        for (index, node) in nodes.iter().enumerate() {
            assert_eq!(node.node_ref(), NodeRef::new(step, index));
            assert!(!node.parents.is_empty());
            for parent in &node.parents {
                assert_eq!(parent.time_step, step - 1);
                let children = set.successors(*parent);
                assert!(children.iter().any(|c| c.node_ref() == node.node_ref()));
            }
            assert_eq!(set.predecessors(node.node_ref()).len(), node.parents.len());
        }
    }
}

#[test]
fn drivable_area_covers_propagated_positions() {
    let set = computed(config(2), ObstacleOracle::new());
    for step in 1..=4 {
        let area = set.drivable_area_at_step(step);
        for b in set.propagated_base_sets_at_step(step) {
            let r = b.position_rectangle();
            let center = (0.5 * (r.lon_min + r.lon_max), 0.5 * (r.lat_min + r.lat_max));
            assert!(area.iter().any(|d| {
                d.lon_min <= center.0
                    && center.0 <= d.lon_max
                    && d.lat_min <= center.1
                    && center.1 <= d.lat_max
            }));
        }
    }
}

#[test]
fn nodes_avoid_obstacles() {
    let obstacle = Rect::new(4.0, -0.5, 5.0, 0.5);
    let oracle = ObstacleOracle::new().with_static(obstacle);
    let set = computed(config(2), oracle);
    // the second repartition snaps outward by less than one 0.1 cell
    let core = Rect::new(4.101, -0.399, 4.899, 0.399);
    for step in 1..=4 {
        for rect in rects_at(&set, step) {
            assert!(!rect.overlaps(&core), "step {step}: {rect:?}");
        }
    }
    // the free run reaches into the obstacle region
    let free = computed(config(2), ObstacleOracle::new());
    assert!((1..=4).any(|s| rects_at(&free, s).iter().any(|r| r.overlaps(&obstacle))));
}

#[test]
fn exactly_known_initial_state() {
    let mut c = config(2);
    c.planning.uncertainty_p_lon = 0.0;
    c.planning.uncertainty_p_lat = 0.0;
    c.planning.uncertainty_v_lon = 0.0;
    c.planning.uncertainty_v_lat = 0.0;
    let set = computed(c, ObstacleOracle::new());
    let root = &set.reachable_set_at_step(0)[0];
    assert_eq!(root.polygon_lon.vertices().len(), 1);
    assert_eq!(root.position_rectangle(), Rect::new(0.0, 0.0, 0.0, 0.0));
    for step in 1..=4 {
        let nodes = set.reachable_set_at_step(step);
        assert!(!nodes.is_empty(), "step {step} has no node");
        assert!(set.area_of_reachable_set(step) > 0.0);
    }
}

#[test]
fn initial_segment_in_one_axis() {
    let mut c = config(1);
    c.planning.uncertainty_v_lat = 0.0;
    let set = computed(c, ObstacleOracle::new());
    assert_eq!(set.reachable_set_at_step(0)[0].polygon_lat.vertices().len(), 2);
    assert!(!set.reachable_set_at_step(4).is_empty());
}

#[test]
fn pinned_lateral_velocity_keeps_the_set() {
    let mut c = config(2);
    c.vehicle.v_lat_min = 0.0;
    c.vehicle.v_lat_max = 0.0;
    let set = computed(c, ObstacleOracle::new());
    for step in 1..=4 {
        let nodes = set.reachable_set_at_step(step);
        assert!(!nodes.is_empty(), "step {step} has no node");
        for node in nodes {
            assert!(node.polygon_lat.is_degenerate());
            assert_eq!((node.v_lat_min(), node.v_lat_max()), (0.0, 0.0));
            assert!(node.p_lat_max() > node.p_lat_min());
            assert!(!node.parents.is_empty());
        }
    }
    // never wider than the unpinned run, up to one snapping cell
    let free = computed(config(2), ObstacleOracle::new());
    for step in 1..=4 {
        let lat_extent = |set: &ReachableSet<ObstacleOracle>| {
            let rects = rects_at(set, step);
            let lo = rects.iter().map(|r| r.lat_min).fold(f64::INFINITY, f64::min);
            let hi = rects.iter().map(|r| r.lat_max).fold(f64::NEG_INFINITY, f64::max);
            hi - lo
        };
        assert!(lat_extent(&set) <= lat_extent(&free) + 0.2);
    }
}

#[test]
fn blocked_start_empties_the_horizon() {
    let oracle = ObstacleOracle::new().with_static(Rect::new(-100.0, -100.0, 100.0, 100.0));
    let set = computed(config(1), oracle);
    assert_eq!(set.max_evaluated_step(), Some(4));
    for step in 1..=4 {
        assert!(set.reachable_set_at_step(step).is_empty());
        assert!(set.drivable_area_at_step(step).is_empty());
        assert_eq!(set.area_of_reachable_set(step), 0.0);
    }
    // the root is still there
    assert_eq!(set.reachable_set_at_step(0).len(), 1);
}

#[test]
fn oracle_failure_aborts_the_run() {
    let mut set = ReachableSet::new(config(2), ObstacleOracle::new().with_horizon(2)).unwrap();
    let err = set.compute(1, 4).unwrap_err();
    assert_eq!(
        err,
        ReachError::Oracle(OracleQueryError::StepOutOfHorizon { step: 3 })
    );
    assert_eq!(set.max_evaluated_step(), Some(2));
}

#[test]
fn steps_must_follow_computed_ones() {
    let mut set = ReachableSet::new(config(1), ObstacleOracle::new()).unwrap();
    assert!(matches!(
        set.compute(3, 4),
        Err(ReachError::Configuration(_))
    ));
    assert!(matches!(
        set.compute(2, 1),
        Err(ReachError::Configuration(_))
    ));
    assert!(set.drivable_area_at_step(3).is_empty());
}

#[test]
fn result_does_not_depend_on_worker_count() {
    let oracle = ObstacleOracle::new()
        .with_static(Rect::new(4.0, -0.5, 5.0, 0.5))
        .with_dynamic(2, Rect::new(5.0, 0.4, 6.0, 1.0));
    let one = computed(config(1), oracle.clone());
    let four = computed(config(4), oracle);
    for step in 0..=4 {
        assert_eq!(rects_at(&one, step), rects_at(&four, step));
        assert_eq!(one.drivable_area_at_step(step), four.drivable_area_at_step(step));
    }
}

#[test]
fn rasterized_oracle_regime_is_consistent() {
    // rasterizes to [4, 5] x [-0.5, 0.5], more than one snapping cell around the outline
    let exact = ObstacleOracle::new().with_static(Rect::new(4.2, -0.35, 4.8, 0.35));
    let raster = exact.rasterized(0.5);
    let set = computed(config(2), raster);
    for step in 1..=4 {
        for rect in rects_at(&set, step) {
            assert!(!exact.collides(step, &to_aabb(&rect)).unwrap());
        }
    }
}

#[test]
fn semantic_mode_labels_nodes() {
    let mut c = config(2);
    c.reachable_set.mode = ComputationMode::Semantic;
    c.semantic.propositions = vec![
        RegionProposition::new("anywhere", Rect::new(-50.0, -50.0, 50.0, 50.0), RegionRelation::Within),
        RegionProposition::new("left", Rect::new(-50.0, 0.0, 50.0, 50.0), RegionRelation::Overlaps),
        RegionProposition::new("far_away", Rect::new(100.0, 100.0, 101.0, 101.0), RegionRelation::Overlaps),
    ];
    let set = computed(c, ObstacleOracle::new());
    assert!(set.reachable_set_at_step(0)[0].propositions.contains("anywhere"));
    for step in 1..=4 {
        let nodes = set.reachable_set_at_step(step);
        assert!(!nodes.is_empty());
        for node in nodes {
            assert!(node.propositions.contains("anywhere"));
            assert!(!node.propositions.contains("far_away"));
            assert_eq!(
                node.propositions.contains("left"),
                node.position_rectangle().lat_max > 0.0
            );
            assert!(!node.parents.is_empty());
        }
    }
}

#[test]
fn pruning_keeps_only_nodes_reaching_the_end() {
    let obstacle = Rect::new(4.0, -0.5, 5.0, 0.5);
    let mut c = config(2);
    c.reachable_set.prune_nodes_not_reaching_final_step = true;
    let set = computed(c, ObstacleOracle::new().with_static(obstacle));
    let last = set.max_evaluated_step().unwrap();
    for step in 0..last {
        for node in set.reachable_set_at_step(step) {
            assert!(!set.successors(node.node_ref()).is_empty());
        }
    }
    for step in 1..=last {
        for (index, node) in set.reachable_set_at_step(step).iter().enumerate() {
            assert_eq!(node.id, index);
            for parent in &node.parents {
                assert!(set.node(*parent).is_some());
            }
        }
    }
}
