//! Per-step reachability computation.
//!
//! `ReachabilityAnalysis` owns everything that stays fixed for a run (the
//! validated configuration, the oracle, both zero-state polygons, the worker
//! pool) and exposes the two halves of a step:
//! - drivable area: propagate → project → repartition → collision split →
//!   repartition;
//! - reachable set: adapt base sets to the drivable area → build nodes.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ComputationMode, Configuration};
use crate::error::ReachResult;
use crate::geom2::{ReachPolygon, Rect};
use crate::graph::{build_reachable_set_nodes, NodeStrategy, Proposition, ReachNode};
use crate::ops::{
    adapt_base_sets_to_drivable_area, check_collision_and_split_rectangles,
    create_repartitioned_rectangles, create_zero_state_polygon,
    project_base_sets_to_position_domain, propagate_polygon, PropagatedBaseSet,
};
use crate::oracle::CollisionOracle;
use crate::parallel::Parallelism;

pub struct ReachabilityAnalysis<O> {
    config: Configuration,
    oracle: O,
    parallelism: Parallelism,
    polygon_zero_state_lon: ReachPolygon,
    polygon_zero_state_lat: ReachPolygon,
    propositions: Vec<Arc<dyn Proposition>>,
}

impl<O: CollisionOracle> ReachabilityAnalysis<O> {
    /// Validates `config` and prepares the zero-state polygons and the pool.
    pub fn new(config: Configuration, oracle: O) -> ReachResult<Self> {
        config.validate()?;
        let dt = config.planning.dt;
        let v = &config.vehicle;
        let polygon_zero_state_lon = create_zero_state_polygon(dt, v.a_lon_min, v.a_lon_max)?;
        let polygon_zero_state_lat = create_zero_state_polygon(dt, v.a_lat_min, v.a_lat_max)?;
        let parallelism = Parallelism::new(config.reachable_set.num_threads)?;
        let propositions = config
            .semantic
            .propositions
            .iter()
            .map(|p| Arc::new(p.clone()) as Arc<dyn Proposition>)
            .collect();
        Ok(Self {
            config,
            oracle,
            parallelism,
            polygon_zero_state_lon,
            polygon_zero_state_lat,
            propositions,
        })
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn polygon_zero_state_lon(&self) -> &ReachPolygon {
        &self.polygon_zero_state_lon
    }

    pub fn polygon_zero_state_lat(&self) -> &ReachPolygon {
        &self.polygon_zero_state_lat
    }

    /// Position box of the initial state.
    pub fn initial_drivable_area(&self) -> Vec<Rect> {
        vec![self.config.initial_position_rectangle()]
    }

    /// Single root node at the configured start step.
    ///
    /// Zero uncertainties give a point or segment root; the first propagation
    /// restores full dimension.
    pub fn initial_reachable_set(&self) -> ReachResult<Vec<ReachNode>> {
        let (lon, lat) = self.config.initial_polygon_bounds();
        let mut node = ReachNode::new(
            ReachPolygon::from_points_degenerate(&lon.corners())?,
            ReachPolygon::from_points_degenerate(&lat.corners())?,
            self.config.planning.step_start,
        );
        if self.config.reachable_set.mode == ComputationMode::Semantic {
            node.propositions = self
                .propositions
                .iter()
                .filter(|p| p.holds(&node))
                .map(|p| p.name().to_string())
                .collect();
        }
        Ok(vec![node])
    }

    /// Propagate every node by one step; nodes whose propagation leaves the
    /// velocity bounds are dropped.
    pub fn propagate_reachable_set(&self, nodes: &[ReachNode]) -> Vec<PropagatedBaseSet> {
        let dt = self.config.planning.dt;
        let v = &self.config.vehicle;
        self.parallelism
            .map(nodes, |node| {
                let lon = propagate_polygon(
                    &node.polygon_lon,
                    &self.polygon_zero_state_lon,
                    dt,
                    v.v_lon_min,
                    v.v_lon_max,
                );
                let lat = propagate_polygon(
                    &node.polygon_lat,
                    &self.polygon_zero_state_lat,
                    dt,
                    v.v_lat_min,
                    v.v_lat_max,
                );
                match (lon, lat) {
                    (Ok(polygon_lon), Ok(polygon_lat)) => Some(PropagatedBaseSet {
                        polygon_lon,
                        polygon_lat,
                        source: node.node_ref(),
                    }),
                    (Err(err), _) | (_, Err(err)) => {
                        debug!(node = ?node.node_ref(), %err, "propagation left no reachable state");
                        None
                    }
                }
            })
            .into_iter()
            .flatten()
            .collect()
    }

    /// Drivable area at `step` and the propagated base sets it was built from.
    ///
    /// Oracle failures abort the step.
    pub fn compute_drivable_area_at_step(
        &self,
        step: usize,
        previous_nodes: &[ReachNode],
    ) -> ReachResult<(Vec<Rect>, Vec<PropagatedBaseSet>)> {
        let propagated = self.propagate_reachable_set(previous_nodes);
        if propagated.is_empty() {
            debug!(step, "nothing to propagate");
            return Ok((Vec::new(), propagated));
        }

        let rs = &self.config.reachable_set;
        let projected = project_base_sets_to_position_domain(&propagated);
        let repartitioned = create_repartitioned_rectangles(&projected, rs.size_grid);
        let collision_free = check_collision_and_split_rectangles(
            step,
            &self.oracle,
            &repartitioned,
            rs.radius_terminal_split,
            &self.parallelism,
        )?;
        let drivable = create_repartitioned_rectangles(&collision_free, rs.size_grid_2nd);
        debug!(
            step,
            propagated = propagated.len(),
            rectangles = repartitioned.len(),
            collision_free = collision_free.len(),
            drivable = drivable.len(),
            "drivable area"
        );
        Ok((drivable, propagated))
    }

    /// Nodes at `step` from the propagated base sets and the drivable area.
    pub fn compute_reachable_set_at_step(
        &self,
        step: usize,
        base_sets_propagated: &[PropagatedBaseSet],
        drivable_area: &[Rect],
    ) -> Vec<ReachNode> {
        if drivable_area.is_empty() || base_sets_propagated.is_empty() {
            return Vec::new();
        }
        let adapted =
            adapt_base_sets_to_drivable_area(drivable_area, base_sets_propagated, &self.parallelism);
        let strategy = match self.config.reachable_set.mode {
            ComputationMode::Continuous => NodeStrategy::Continuous,
            ComputationMode::Semantic => NodeStrategy::Semantic(&self.propositions),
        };
        let nodes = build_reachable_set_nodes(
            step,
            &adapted,
            base_sets_propagated,
            strategy,
            &self.parallelism,
        );
        debug!(step, adapted = adapted.len(), nodes = nodes.len(), "reachable set");
        nodes
    }
}
