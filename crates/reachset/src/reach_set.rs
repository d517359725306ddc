//! Reachable-set container over the whole horizon.
//!
//! Stores, per computed step, the drivable area, the propagated base sets and
//! the node arena, plus a successor index derived from the nodes' parent
//! links. Steps are computed strictly in order; step `t + 1` reads the nodes
//! of step `t`.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::analysis::ReachabilityAnalysis;
use crate::config::Configuration;
use crate::error::{ConfigurationError, ReachResult};
use crate::geom2::Rect;
use crate::graph::{NodeRef, ReachNode};
use crate::ops::PropagatedBaseSet;
use crate::oracle::CollisionOracle;

pub struct ReachableSet<O> {
    analysis: ReachabilityAnalysis<O>,
    drivable_area: BTreeMap<usize, Vec<Rect>>,
    base_sets_propagated: BTreeMap<usize, Vec<PropagatedBaseSet>>,
    reachable_set: BTreeMap<usize, Vec<ReachNode>>,
    successors: BTreeMap<NodeRef, Vec<NodeRef>>,
    steps_computed: Vec<usize>,
}

impl<O: CollisionOracle> ReachableSet<O> {
    /// New container holding the initial drivable area and root node.
    pub fn new(config: Configuration, oracle: O) -> ReachResult<Self> {
        let analysis = ReachabilityAnalysis::new(config, oracle)?;
        let step_start = analysis.config().planning.step_start;
        let mut set = Self {
            drivable_area: BTreeMap::new(),
            base_sets_propagated: BTreeMap::new(),
            reachable_set: BTreeMap::new(),
            successors: BTreeMap::new(),
            steps_computed: vec![step_start],
            analysis,
        };
        set.drivable_area
            .insert(step_start, set.analysis.initial_drivable_area());
        set.reachable_set
            .insert(step_start, set.analysis.initial_reachable_set()?);
        set.base_sets_propagated.insert(step_start, Vec::new());
        Ok(set)
    }

    pub fn analysis(&self) -> &ReachabilityAnalysis<O> {
        &self.analysis
    }

    /// Every configured step after the start step.
    pub fn compute_all(&mut self) -> ReachResult<()> {
        let config = self.analysis.config();
        let (start, end) = (config.planning.step_start + 1, config.step_end());
        self.compute(start, end)
    }

    /// Steps `step_start..=step_end`; the step before `step_start` must be
    /// computed already.
    ///
    /// Once a step has no node, the remaining steps are recorded empty.
    pub fn compute(&mut self, step_start: usize, step_end: usize) -> ReachResult<()> {
        let previous_known = step_start
            .checked_sub(1)
            .is_some_and(|prev| self.reachable_set.contains_key(&prev));
        if step_start > step_end || !previous_known {
            return Err(ConfigurationError::InvalidStepRange {
                start: step_start,
                end: step_end,
            }
            .into());
        }
        self.discard_from(step_start);
        info!(step_start, step_end, "computing reachable sets");

        for step in step_start..=step_end {
            let previous = self
                .reachable_set
                .get(&(step - 1))
                .map(Vec::as_slice)
                .unwrap_or_default();
            let (drivable, propagated, nodes) = if previous.is_empty() {
                (Vec::new(), Vec::new(), Vec::new())
            } else {
                let (drivable, propagated) =
                    self.analysis.compute_drivable_area_at_step(step, previous)?;
                let nodes = self
                    .analysis
                    .compute_reachable_set_at_step(step, &propagated, &drivable);
                (drivable, propagated, nodes)
            };
            if nodes.is_empty() && !previous.is_empty() {
                info!(step, "reachable set became empty");
            }
            self.record_step(step, drivable, propagated, nodes);
        }

        if self
            .analysis
            .config()
            .reachable_set
            .prune_nodes_not_reaching_final_step
        {
            self.prune_nodes_not_reaching_final_step();
        }
        info!(
            steps = self.steps_computed.len(),
            nodes = self.reachable_set.values().map(Vec::len).sum::<usize>(),
            "reachable set computation finished"
        );
        Ok(())
    }

    /// Forget `step` and everything after it.
    fn discard_from(&mut self, step: usize) {
        self.drivable_area.retain(|&s, _| s < step);
        self.base_sets_propagated.retain(|&s, _| s < step);
        self.reachable_set.retain(|&s, _| s < step);
        self.steps_computed.retain(|&s| s < step);
        self.successors.retain(|parent, children| {
            children.retain(|c| c.time_step < step);
            parent.time_step < step && !children.is_empty()
        });
    }

    fn record_step(
        &mut self,
        step: usize,
        drivable: Vec<Rect>,
        propagated: Vec<PropagatedBaseSet>,
        nodes: Vec<ReachNode>,
    ) {
        for node in &nodes {
            for parent in &node.parents {
                self.successors
                    .entry(*parent)
                    .or_default()
                    .push(node.node_ref());
            }
        }
        self.drivable_area.insert(step, drivable);
        self.base_sets_propagated.insert(step, propagated);
        self.reachable_set.insert(step, nodes);
        if let Err(pos) = self.steps_computed.binary_search(&step) {
            self.steps_computed.insert(pos, step);
        }
    }

    /// Drivable area at `step`, empty (with a warning) if not computed.
    pub fn drivable_area_at_step(&self, step: usize) -> &[Rect] {
        match self.drivable_area.get(&step) {
            Some(area) => area,
            None => {
                warn!(step, "drivable area not computed for this step");
                &[]
            }
        }
    }

    /// Nodes at `step`, empty (with a warning) if not computed.
    pub fn reachable_set_at_step(&self, step: usize) -> &[ReachNode] {
        match self.reachable_set.get(&step) {
            Some(nodes) => nodes,
            None => {
                warn!(step, "reachable set not computed for this step");
                &[]
            }
        }
    }

    /// Propagated base sets at `step`, empty (with a warning) if not computed.
    pub fn propagated_base_sets_at_step(&self, step: usize) -> &[PropagatedBaseSet] {
        match self.base_sets_propagated.get(&step) {
            Some(sets) => sets,
            None => {
                warn!(step, "propagated base sets not computed for this step");
                &[]
            }
        }
    }

    pub fn node(&self, node: NodeRef) -> Option<&ReachNode> {
        self.reachable_set.get(&node.time_step)?.get(node.index)
    }

    pub fn predecessors(&self, node: NodeRef) -> Vec<&ReachNode> {
        self.node(node)
            .map(|n| n.parents.iter().filter_map(|p| self.node(*p)).collect())
            .unwrap_or_default()
    }

    pub fn successors(&self, node: NodeRef) -> Vec<&ReachNode> {
        self.successors
            .get(&node)
            .map(|children| children.iter().filter_map(|c| self.node(*c)).collect())
            .unwrap_or_default()
    }

    /// Sum of the nodes' position-rectangle areas at `step`.
    pub fn area_of_reachable_set(&self, step: usize) -> f64 {
        self.reachable_set_at_step(step)
            .iter()
            .map(|n| n.position_rectangle().area())
            .sum()
    }

    pub fn max_evaluated_step(&self) -> Option<usize> {
        self.steps_computed.last().copied()
    }

    pub fn steps_computed(&self) -> &[usize] {
        &self.steps_computed
    }

    /// Drop nodes from which the last computed step is not reachable.
    ///
    /// Walks backward from the second-to-last step, keeps only nodes that
    /// some node of the following step lists as a parent, re-indexes the
    /// survivors and rewrites the links that point at them.
    pub fn prune_nodes_not_reaching_final_step(&mut self) {
        let steps = self.steps_computed.clone();
        let mut removed = 0usize;
        for pair in steps.windows(2).rev() {
            let (step, next) = (pair[0], pair[1]);
            let referenced: BTreeSet<NodeRef> = self
                .reachable_set
                .get(&next)
                .into_iter()
                .flatten()
                .flat_map(|n| n.parents.iter().copied())
                .collect();

            let nodes = self.reachable_set.remove(&step).unwrap_or_default();
            let before = nodes.len();
            let mut remap: BTreeMap<NodeRef, NodeRef> = BTreeMap::new();
            let kept: Vec<ReachNode> = nodes
                .into_iter()
                .filter(|n| referenced.contains(&n.node_ref()))
                .enumerate()
                .map(|(index, mut n)| {
                    remap.insert(n.node_ref(), NodeRef::new(step, index));
                    n.id = index;
                    n
                })
                .collect();
            removed += before - kept.len();
            self.reachable_set.insert(step, kept);

            if let Some(children) = self.reachable_set.get_mut(&next) {
                for child in children {
                    child.parents = child
                        .parents
                        .iter()
                        .filter_map(|p| remap.get(p).copied())
                        .collect();
                }
            }
            if let Some(sets) = self.base_sets_propagated.get_mut(&next) {
                sets.retain_mut(|set| match remap.get(&set.source) {
                    Some(&source) => {
                        set.source = source;
                        true
                    }
                    None => false,
                });
            }
        }

        self.successors.clear();
        for nodes in self.reachable_set.values() {
            for node in nodes {
                for parent in &node.parents {
                    self.successors
                        .entry(*parent)
                        .or_default()
                        .push(node.node_ref());
                }
            }
        }
        info!(removed, "pruned nodes not reaching the final step");
    }
}
