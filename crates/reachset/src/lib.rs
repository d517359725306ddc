//! Reachable sets of a point-mass vehicle under interval dynamics.
//!
//! Each time step propagates the (position, velocity) polygons of every node,
//! projects them to position rectangles, carves out collisions through a
//! `CollisionOracle`, and rebuilds nodes on the resulting drivable area,
//! linked to their predecessors.
//!
//! Layout
//! - `geom2`: convex polygons (vertex and half-plane form) and rectangles.
//! - `ops`: the per-step pipeline operations, pure given their inputs.
//! - `graph`: nodes, arena handles, propositions.
//! - `analysis`, `reach_set`: the driver and the container over the horizon.
//!
//! Logging goes through `tracing`; installing a subscriber is up to the caller.

pub mod analysis;
pub mod config;
pub mod error;
pub mod geom2;
pub mod graph;
pub mod ops;
pub mod oracle;
pub mod parallel;
pub mod reach_set;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use analysis::ReachabilityAnalysis;
pub use config::{ComputationMode, Configuration};
pub use error::{ConfigurationError, GeometryError, OracleQueryError, ReachError, ReachResult};
pub use reach_set::ReachableSet;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::analysis::ReachabilityAnalysis;
    pub use crate::config::{
        ComputationMode, Configuration, PlanningConfig, ReachableSetConfig, SemanticConfig,
        VehicleConfig,
    };
    pub use crate::error::{ReachError, ReachResult};
    pub use crate::geom2::{ReachPolygon, Rect};
    pub use crate::graph::{NodeRef, Proposition, ReachNode, RegionProposition, RegionRelation};
    pub use crate::oracle::{from_aabb, to_aabb, Aabb, CollisionOracle, ObstacleOracle};
    pub use crate::reach_set::ReachableSet;
    pub use nalgebra::Vector2 as Vec2;
}

#[cfg(test)]
mod tests;
