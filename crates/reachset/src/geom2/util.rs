use nalgebra::Vector2;

use super::cfg::DEDUP_EPS;

#[inline]
pub(crate) fn angle_of(n: Vector2<f64>) -> f64 {
    n.y.atan2(n.x)
}

#[inline]
pub(crate) fn canonicalize_unit(n: Vector2<f64>, c: f64) -> Option<(Vector2<f64>, f64)> {
    let norm = n.norm();
    if !(norm.is_finite()) || norm <= 0.0 {
        return None;
    }
    Some((n / norm, c / norm))
}

/// Monotone-chain convex hull, counter-clockwise.
///
/// Non-finite and (near-)duplicate points are dropped, collinear points do
/// not become vertices. Degenerate input yields fewer than three points.
pub(crate) fn convex_hull(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts: Vec<_> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < DEDUP_EPS);
    if pts.len() < 3 {
        return pts;
    }
    let mut hull = chain(pts.iter());
    hull.extend(chain(pts.iter().rev()));
    hull
}

/// One side of the hull; the last point is left for the other side.
fn chain<'a>(points: impl Iterator<Item = &'a Vector2<f64>>) -> Vec<Vector2<f64>> {
    let mut side: Vec<Vector2<f64>> = Vec::new();
    for &p in points {
        while let [.., a, b] = side[..] {
            if cross(a, b, p) > 0.0 {
                break;
            }
            side.pop();
        }
        side.push(p);
    }
    side.pop();
    side
}

#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Shoelace area of a CCW vertex loop (negative for CW input).
pub(crate) fn signed_area(vertices: &[Vector2<f64>]) -> f64 {
    let m = vertices.len();
    if m < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for k in 0..m {
        let p = vertices[k];
        let q = vertices[(k + 1) % m];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice
}
