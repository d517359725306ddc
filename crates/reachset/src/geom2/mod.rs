//! 2D geometry for the reachability pipeline.
//!
//! Purpose
//! - `Poly2`: ordered H-representation with a deque half-plane intersection,
//!   used where a polygon is naturally given by constraints.
//! - `ReachPolygon`: immutable convex polygon in vertex form, used for the
//!   (position, velocity) base sets and all clipping during propagation.
//! - `Rect`: axis-aligned position rectangle with exact equality.
//!
//! Code cross-refs: `ops::propagate` (zero-state polygon), `ops::adapt`
//! (clipping base sets to drivable-area cells).

mod cfg;
mod ordered;
mod polygon;
mod rect;
mod types;
mod util;

pub use ordered::{HalfspaceIntersection, Poly2};
pub use polygon::ReachPolygon;
pub use rect::Rect;
pub use types::{Bounds2, Hs2};

#[cfg(test)]
mod tests;
