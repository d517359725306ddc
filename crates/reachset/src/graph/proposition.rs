//! Propositions evaluated on nodes in semantic mode.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::node::ReachNode;
use crate::geom2::Rect;

/// Named predicate over a node. Must be pure: evaluations run concurrently.
pub trait Proposition: Debug + Send + Sync {
    fn name(&self) -> &str;
    fn holds(&self, node: &ReachNode) -> bool;
}

/// How a node's position rectangle relates to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRelation {
    /// Non-zero-area intersection.
    Overlaps,
    /// Entirely inside (closed).
    Within,
}

/// Proposition tied to a position-domain region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionProposition {
    pub name: String,
    pub region: Rect,
    pub relation: RegionRelation,
}

impl RegionProposition {
    pub fn new(name: impl Into<String>, region: Rect, relation: RegionRelation) -> Self {
        Self {
            name: name.into(),
            region,
            relation,
        }
    }
}

impl Proposition for RegionProposition {
    fn name(&self) -> &str {
        &self.name
    }

    fn holds(&self, node: &ReachNode) -> bool {
        let rect = node.position_rectangle();
        match self.relation {
            RegionRelation::Overlaps => self.region.overlaps(&rect),
            RegionRelation::Within => self.region.contains_rect(&rect),
        }
    }
}
