//! Tolerance defaults for 2D geometry (internal).
//!
//! Policy
//! - Fixed constants. The pipeline works in metres and metres per second, so
//!   values are tuned for O(1)–O(1e3) magnitudes.

/// Feasibility epsilon used by `Hs2::satisfies_eps` and polygon membership.
pub(crate) const FEAS_EPS: f64 = 1e-9;
/// Minimum area for a polygon to count as non-degenerate.
pub(crate) const AREA_EPS: f64 = 1e-9;
/// Vertices closer than this are merged by the hull.
pub(crate) const DEDUP_EPS: f64 = 1e-12;
/// Determinant threshold for line intersections.
pub(crate) const DET_EPS: f64 = 1e-12;
/// Unit normals closer than this count as the same direction.
pub(crate) const PARALLEL_EPS: f64 = 1e-9;
/// Extra slack when checking the vertices of a half-plane intersection.
pub(crate) const VERIFY_SLACK: f64 = 1e-7;
