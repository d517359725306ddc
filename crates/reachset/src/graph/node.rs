//! Reachable-set nodes and their construction from adapted base sets.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::proposition::Proposition;
use crate::geom2::{ReachPolygon, Rect};
use crate::ops::{position_rectangle, AdaptedBaseSet, PropagatedBaseSet};
use crate::parallel::Parallelism;

/// Arena handle: node `index` in the node list of `time_step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub time_step: usize,
    pub index: usize,
}

impl NodeRef {
    #[inline]
    pub const fn new(time_step: usize, index: usize) -> Self {
        Self { time_step, index }
    }
}

/// Reachable states of one cell at one time step.
///
/// `polygon_lon` and `polygon_lat` live in the (position, velocity) plane of
/// their axis. `id` equals the node's index in its step's arena.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachNode {
    pub polygon_lon: ReachPolygon,
    pub polygon_lat: ReachPolygon,
    pub time_step: usize,
    pub id: usize,
    /// Predecessors in the previous step, ascending and unique.
    pub parents: Vec<NodeRef>,
    /// Names of the propositions that hold (semantic mode).
    pub propositions: BTreeSet<String>,
}

impl ReachNode {
    pub fn new(polygon_lon: ReachPolygon, polygon_lat: ReachPolygon, time_step: usize) -> Self {
        Self {
            polygon_lon,
            polygon_lat,
            time_step,
            id: 0,
            parents: Vec::new(),
            propositions: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.time_step, self.id)
    }

    /// `(lon p-range) × (lat p-range)`.
    #[inline]
    pub fn position_rectangle(&self) -> Rect {
        position_rectangle(&self.polygon_lon, &self.polygon_lat)
    }

    pub fn p_lon_min(&self) -> f64 {
        self.polygon_lon.bounds().x_min
    }

    pub fn p_lon_max(&self) -> f64 {
        self.polygon_lon.bounds().x_max
    }

    pub fn v_lon_min(&self) -> f64 {
        self.polygon_lon.bounds().y_min
    }

    pub fn v_lon_max(&self) -> f64 {
        self.polygon_lon.bounds().y_max
    }

    pub fn p_lat_min(&self) -> f64 {
        self.polygon_lat.bounds().x_min
    }

    pub fn p_lat_max(&self) -> f64 {
        self.polygon_lat.bounds().x_max
    }

    pub fn v_lat_min(&self) -> f64 {
        self.polygon_lat.bounds().y_min
    }

    pub fn v_lat_max(&self) -> f64 {
        self.polygon_lat.bounds().y_max
    }
}

/// How nodes are annotated after construction.
#[derive(Clone, Copy)]
pub enum NodeStrategy<'a> {
    /// Predecessor links only.
    Continuous,
    /// Predecessor links plus the names of the holding propositions.
    Semantic(&'a [Arc<dyn Proposition>]),
}

impl std::fmt::Debug for NodeStrategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continuous => f.write_str("Continuous"),
            Self::Semantic(props) => {
                let names: Vec<&str> = props.iter().map(|p| p.name()).collect();
                f.debug_tuple("Semantic").field(&names).finish()
            }
        }
    }
}

/// One node per adapted base set, ids `0..n` in input order.
///
/// Parents are the source nodes of the propagated base sets that contributed
/// to each adapted set.
pub fn build_reachable_set_nodes(
    time_step: usize,
    base_sets_adapted: &[AdaptedBaseSet],
    base_sets_propagated: &[PropagatedBaseSet],
    strategy: NodeStrategy<'_>,
    parallelism: &Parallelism,
) -> Vec<ReachNode> {
    let mut nodes = parallelism.map(base_sets_adapted, |adapted| {
        let mut node = ReachNode::new(
            adapted.polygon_lon.clone(),
            adapted.polygon_lat.clone(),
            time_step,
        );
        let mut parents: Vec<NodeRef> = adapted
            .sources
            .iter()
            .filter_map(|&idx| base_sets_propagated.get(idx).map(|b| b.source))
            .collect();
        parents.sort_unstable();
        parents.dedup();
        node.parents = parents;
        if let NodeStrategy::Semantic(propositions) = strategy {
            node.propositions = propositions
                .iter()
                .filter(|p| p.holds(&node))
                .map(|p| p.name().to_string())
                .collect();
        }
        node
    });
    for (id, node) in nodes.iter_mut().enumerate() {
        node.id = id;
    }
    nodes
}

/// Continuous-mode node construction.
pub fn create_reachable_set_nodes_continuous(
    time_step: usize,
    base_sets_adapted: &[AdaptedBaseSet],
    base_sets_propagated: &[PropagatedBaseSet],
    parallelism: &Parallelism,
) -> Vec<ReachNode> {
    build_reachable_set_nodes(
        time_step,
        base_sets_adapted,
        base_sets_propagated,
        NodeStrategy::Continuous,
        parallelism,
    )
}

/// Semantic-mode node construction.
pub fn create_reachable_set_nodes_semantic(
    time_step: usize,
    base_sets_adapted: &[AdaptedBaseSet],
    base_sets_propagated: &[PropagatedBaseSet],
    propositions: &[Arc<dyn Proposition>],
    parallelism: &Parallelism,
) -> Vec<ReachNode> {
    build_reachable_set_nodes(
        time_step,
        base_sets_adapted,
        base_sets_propagated,
        NodeStrategy::Semantic(propositions),
        parallelism,
    )
}
