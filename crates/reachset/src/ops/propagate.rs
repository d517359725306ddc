//! Interval dynamics propagation of (position, velocity) polygons.
//!
//! Each axis is a double integrator `p' = v, v' = a` with `a ∈ [a_min, a_max]`.
//! One step of duration `dt` maps an admissible polygon `Ω` to
//! `(A Ω) ⊕ Z`, clipped to the velocity strip, where `A = [[1, dt], [0, 1]]`
//! is the zero-input response and `Z` the zero-state polygon.

use nalgebra::Matrix2;

use crate::error::GeometryResult;
use crate::geom2::{Hs2, Poly2, ReachPolygon, Rect};

use super::base_set::PropagatedBaseSet;

/// Switching fractions at which the bang-bang envelope tangents are taken.
pub const SWITCHING_FRACTIONS: [f64; 3] = [0.0, 0.5, 1.0];

/// Half-plane coefficients `(A, B, C)` for `A·p + B·v <= C`.
pub type HalfspaceCoefficients = (f64, f64, f64);

/// Zero-state polygon: states reachable from the origin within `dt`.
///
/// The bounding box of the extreme positions and velocities is cut by the
/// upper and lower envelope tangents at every fraction in
/// [`SWITCHING_FRACTIONS`]. For `a_min < 0 < a_max` the result is a hexagon.
pub fn create_zero_state_polygon(dt: f64, a_min: f64, a_max: f64) -> GeometryResult<ReachPolygon> {
    let b = create_bounding_box(dt, a_min, a_max)?.bounds();
    let mut hpoly = Poly2::from_box(b.x_min, b.y_min, b.x_max, b.y_max);
    for gamma in SWITCHING_FRACTIONS {
        let (upper, lower) = compute_halfspace_coefficients(dt, a_min, a_max, gamma);
        hpoly.insert_halfspace(Hs2::from_coefficients(upper.0, upper.1, upper.2));
        hpoly.insert_halfspace(Hs2::from_coefficients(lower.0, lower.1, lower.2));
    }
    ReachPolygon::from_hpoly(&hpoly)
}

/// Box spanned by the absolute min/max reachable position and velocity.
pub fn create_bounding_box(dt: f64, a_min: f64, a_max: f64) -> GeometryResult<ReachPolygon> {
    let p_min = 0.5 * a_min * dt * dt;
    let p_max = 0.5 * a_max * dt * dt;
    let v_min = a_min * dt;
    let v_max = a_max * dt;
    ReachPolygon::from_rectangle(p_min, v_min, p_max, v_max)
}

/// Envelope tangents at switching fraction `gamma`.
///
/// Upper envelope: `a_min` for `gamma·dt`, then `a_max` for the rest.
/// Lower envelope: `a_max` first, then `a_min`. Both trajectories have
/// tangent direction `(dt - τ, 1)` in the (p, v) plane at switching time
/// `τ = gamma·dt`; the returned triples are the supporting half-planes
/// through the trajectory end points.
pub fn compute_halfspace_coefficients(
    dt: f64,
    a_min: f64,
    a_max: f64,
    gamma: f64,
) -> (HalfspaceCoefficients, HalfspaceCoefficients) {
    let tau = gamma * dt;
    let rest = dt - tau;

    let (p_upper, v_upper) = two_phase_end_state(a_min, a_max, tau, rest);
    let (p_lower, v_lower) = two_phase_end_state(a_max, a_min, tau, rest);

    // -p + rest·v <= C  (at most this much velocity for a given position)
    let upper = (-1.0, rest, -p_upper + rest * v_upper);
    //  p - rest·v <= C
    let lower = (1.0, -rest, p_lower - rest * v_lower);
    (upper, lower)
}

/// End state from rest at the origin: `a_first` for `t_first`, then `a_second` for `t_second`.
#[inline]
fn two_phase_end_state(a_first: f64, a_second: f64, t_first: f64, t_second: f64) -> (f64, f64) {
    let v_switch = a_first * t_first;
    let p_switch = 0.5 * a_first * t_first * t_first;
    let v = v_switch + a_second * t_second;
    let p = p_switch + v_switch * t_second + 0.5 * a_second * t_second * t_second;
    (p, v)
}

/// One propagation step of `polygon` under the dynamics, clipped to `[v_min, v_max]`.
///
/// Fails with `GeometryError` when nothing of the propagated set lies inside
/// the velocity strip. A set saturating the strip (`v_min == v_max`, or only
/// touching a bound) comes back as a segment or a point.
pub fn propagate_polygon(
    polygon: &ReachPolygon,
    polygon_zero_state: &ReachPolygon,
    dt: f64,
    v_min: f64,
    v_max: f64,
) -> GeometryResult<ReachPolygon> {
    let zero_input = Matrix2::new(1.0, dt, 0.0, 1.0);
    polygon
        .linear_map(&zero_input)?
        .minkowski_sum(polygon_zero_state)?
        .clip_y(v_min, v_max)
}

/// Position rectangles `(lon p-range) × (lat p-range)` of the propagated base sets.
pub fn project_base_sets_to_position_domain(base_sets: &[PropagatedBaseSet]) -> Vec<Rect> {
    base_sets.iter().map(|b| b.position_rectangle()).collect()
}
