//! Convex polygon in vertex representation (`ReachPolygon`).
//!
//! Purpose
//! - Admissible-state polygons over (position, velocity) of one axis, and
//!   position rectangles during drivable-area reconstruction.
//! - Immutable: every operation returns a new polygon built through the
//!   convex hull, so vertex order (CCW) and convexity hold by construction.
//!
//! Failure policy
//! - Operations on a full-dimensional polygon that would leave fewer than
//!   three distinct vertices or a (numerically) zero area return
//!   `GeometryError`. Callers in the pipeline treat that as "no reachable
//!   state in this branch".
//! - A point or a segment is a valid polygon when built explicitly through
//!   `from_points_degenerate` or `clip_y`: an exactly known state, or a set
//!   pressed against a velocity bound. Operations on such a polygon keep
//!   accepting degenerate results.

use nalgebra::{Matrix2, Vector2};

use super::cfg::{AREA_EPS, FEAS_EPS};
use super::ordered::{HalfspaceIntersection, Poly2};
use super::types::{Bounds2, Hs2};
use super::util::{convex_hull, cross, signed_area};
use crate::error::{GeometryError, GeometryResult};

/// Convex polygon with counter-clockwise vertices; see the module docs for
/// when it may be a point or a segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachPolygon {
    vertices: Vec<Vector2<f64>>,
    bounds: Bounds2,
}

impl ReachPolygon {
    /// Convex hull of `points`; fails unless it has a non-zero area.
    pub fn from_points(points: &[Vector2<f64>]) -> GeometryResult<Self> {
        Self::hull(points, false)
    }

    /// Convex hull of `points`, which may be a single point or a segment.
    pub fn from_points_degenerate(points: &[Vector2<f64>]) -> GeometryResult<Self> {
        Self::hull(points, true)
    }

    fn hull(points: &[Vector2<f64>], allow_degenerate: bool) -> GeometryResult<Self> {
        let hull = convex_hull(points);
        let bounds = Bounds2::of_points(&hull).ok_or(GeometryError::Empty)?;
        if !allow_degenerate {
            if hull.len() < 3 {
                return Err(GeometryError::TooFewVertices { count: hull.len() });
            }
            let area = signed_area(&hull);
            if area < AREA_EPS {
                return Err(GeometryError::Degenerate { area });
            }
        }
        Ok(Self {
            vertices: hull,
            bounds,
        })
    }

    /// Rebuild from `points`, as degenerate as `self` may be.
    fn derived(&self, points: &[Vector2<f64>]) -> GeometryResult<Self> {
        Self::hull(points, self.is_degenerate())
    }

    /// Axis-aligned rectangle; the corners may be given in any order.
    pub fn from_rectangle(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> GeometryResult<Self> {
        Self::from_points(&[
            Vector2::new(x_min, y_min),
            Vector2::new(x_max, y_min),
            Vector2::new(x_max, y_max),
            Vector2::new(x_min, y_max),
        ])
    }

    /// Vertices of a bounded half-plane intersection.
    pub fn from_hpoly(poly: &Poly2) -> GeometryResult<Self> {
        match poly.halfspace_intersection_eps(FEAS_EPS) {
            HalfspaceIntersection::Bounded(verts) => Self::from_points(&verts),
            HalfspaceIntersection::Empty => Err(GeometryError::Empty),
            HalfspaceIntersection::Unbounded => Err(GeometryError::Unbounded),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    #[inline]
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// A point, a segment, or a sliver below the area tolerance.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.area() < AREA_EPS
    }

    /// Membership with slack `eps` (positive enlarges).
    pub fn contains(&self, p: Vector2<f64>, eps: f64) -> bool {
        let m = self.vertices.len();
        match self.vertices[..] {
            [a] => return (p - a).norm() <= eps,
            [a, b] => return distance_to_segment(p, a, b) <= eps,
            _ => {}
        }
        (0..m).all(|k| {
            let a = self.vertices[k];
            let b = self.vertices[(k + 1) % m];
            // cross/|ab| is the signed distance of p to edge ab (positive inside)
            cross(a, b, p) >= -eps * (b - a).norm()
        })
    }

    /// True when `vertex` coincides with one of the vertices up to `tol`.
    pub fn has_vertex(&self, vertex: Vector2<f64>, tol: f64) -> bool {
        self.vertices.iter().any(|v| (v - vertex).norm() <= tol)
    }

    /// Clip to the half-plane `a·x + b·y <= c` (Sutherland–Hodgman, one edge).
    pub fn intersect_halfspace(&self, a: f64, b: f64, c: f64) -> GeometryResult<Self> {
        self.intersect(&Hs2::from_coefficients(a, b, c))
    }

    /// Clip to a closed half-plane.
    pub fn intersect(&self, h: &Hs2) -> GeometryResult<Self> {
        let out = self.clipped_vertices(h)?;
        self.derived(&out)
    }

    /// Part with `y` in `[y_min, y_max]`.
    ///
    /// A thin strip or one touching the polygon only at its boundary leaves a
    /// segment or a point, which is kept.
    pub fn clip_y(&self, y_min: f64, y_max: f64) -> GeometryResult<Self> {
        let below = clip_to_level(&self.vertices, y_max, 1.0);
        let inside = clip_to_level(&below, y_min, -1.0);
        if inside.is_empty() {
            return Err(GeometryError::Empty);
        }
        Self::from_points_degenerate(&inside)
    }

    /// Sutherland–Hodgman against one half-plane.
    fn clipped_vertices(&self, h: &Hs2) -> GeometryResult<Vec<Vector2<f64>>> {
        let m = self.vertices.len();
        let mut out: Vec<Vector2<f64>> = Vec::with_capacity(m + 1);
        for k in 0..m {
            let p = self.vertices[k];
            let q = self.vertices[(k + 1) % m];
            let fp = h.residual(p);
            let fq = h.residual(q);
            if fp <= 0.0 {
                out.push(p);
            }
            if (fp < 0.0 && fq > 0.0) || (fp > 0.0 && fq < 0.0) {
                let t = fp / (fp - fq);
                out.push(p + (q - p) * t);
            }
        }
        if out.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(out)
    }

    /// Image under the linear map `x ↦ M x`.
    pub fn linear_map(&self, m: &Matrix2<f64>) -> GeometryResult<Self> {
        let mapped: Vec<_> = self.vertices.iter().map(|v| m * v).collect();
        self.derived(&mapped)
    }

    /// Minkowski sum `self ⊕ other` (hull of pairwise vertex sums).
    pub fn minkowski_sum(&self, other: &ReachPolygon) -> GeometryResult<Self> {
        let mut sums = Vec::with_capacity(self.vertices.len() * other.vertices.len());
        for a in &self.vertices {
            for b in &other.vertices {
                sums.push(a + b);
            }
        }
        Self::hull(&sums, self.is_degenerate() && other.is_degenerate())
    }

    /// Convex hull of the union of several polygons' vertices.
    ///
    /// Degenerate only when every input is; a full-dimensional input makes
    /// the hull full-dimensional.
    pub fn hull_of<'a, I>(polygons: I) -> GeometryResult<Self>
    where
        I: IntoIterator<Item = &'a ReachPolygon>,
    {
        let points: Vec<_> = polygons
            .into_iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect();
        Self::from_points_degenerate(&points)
    }
}

/// Keep the side `side·(y - level) <= 0` of a vertex ring. Crossing points
/// are placed exactly on `y = level`, so clipping to `level` from both sides
/// leaves a segment instead of losing it to rounding.
fn clip_to_level(ring: &[Vector2<f64>], level: f64, side: f64) -> Vec<Vector2<f64>> {
    let m = ring.len();
    let mut out = Vec::with_capacity(m + 1);
    for k in 0..m {
        let p = ring[k];
        let q = ring[(k + 1) % m];
        let fp = side * (p.y - level);
        let fq = side * (q.y - level);
        if fp <= 0.0 {
            out.push(p);
        }
        if (fp < 0.0 && fq > 0.0) || (fp > 0.0 && fq < 0.0) {
            let t = (level - p.y) / (q.y - p.y);
            out.push(Vector2::new(p.x + (q.x - p.x) * t, level));
        }
    }
    out
}

fn distance_to_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
