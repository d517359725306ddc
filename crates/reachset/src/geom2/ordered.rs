//! Half-plane representation with angle-ordered constraints (`Poly2`).
//!
//! Used where a polygon is naturally a set of cuts, most importantly the
//! zero-state polygon (a box cut by the bang-bang envelope tangents).
//!
//! Invariants
//! - Unit normals.
//! - Sorted by normal angle `atan2(n.y, n.x)`.
//! - One constraint per direction: a parallel insert tightens `c` instead of
//!   adding a row.
//!
//! With these, the intersection is a single deque sweep over the rows.

use std::collections::VecDeque;

use nalgebra::Vector2;

use super::cfg::{DET_EPS, PARALLEL_EPS, VERIFY_SLACK};
use super::types::Hs2;
use super::util::{angle_of, canonicalize_unit};

#[derive(Clone, Debug, Default)]
pub struct Poly2 {
    pub hs: Vec<Hs2>,
}

impl Poly2 {
    /// Axis-aligned box `[x_min, x_max] × [y_min, y_max]`.
    pub fn from_box(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        let mut p = Self::default();
        for (a, b, c) in [
            (1.0, 0.0, x_max),
            (-1.0, 0.0, -x_min),
            (0.0, 1.0, y_max),
            (0.0, -1.0, -y_min),
        ] {
            p.insert_halfspace(Hs2::from_coefficients(a, b, c));
        }
        p
    }

    /// Add a cut, keeping the row order. Zero normals are ignored.
    pub fn insert_halfspace(&mut self, h: Hs2) {
        let Some((n, c)) = canonicalize_unit(h.n, h.c) else {
            return;
        };
        let key = angle_of(n);
        let at = self.hs.partition_point(|row| angle_of(row.n) <= key);
        let neighbours = [at.checked_sub(1), (at < self.hs.len()).then_some(at)];
        for k in neighbours.into_iter().flatten() {
            if (self.hs[k].n - n).norm() < PARALLEL_EPS {
                self.hs[k].c = self.hs[k].c.min(c);
                return;
            }
        }
        self.hs.insert(at, Hs2::new(n, c));
    }

    /// Intersection of all rows, each relaxed by `eps` (`c → c + eps`).
    ///
    /// Where more than two lines meet, the bounded vertex list repeats that
    /// point; `ReachPolygon::from_hpoly` merges the copies.
    pub fn halfspace_intersection_eps(&self, eps: f64) -> HalfspaceIntersection {
        intersect_sorted(&self.hs, eps)
    }

    #[inline]
    pub fn halfspace_intersection(&self) -> HalfspaceIntersection {
        self.halfspace_intersection_eps(0.0)
    }
}

#[derive(Clone, Debug)]
pub enum HalfspaceIntersection {
    Empty,
    Unbounded,
    Bounded(Vec<Vector2<f64>>),
}

impl HalfspaceIntersection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, HalfspaceIntersection::Empty)
    }
}

fn intersect_sorted(hs: &[Hs2], eps: f64) -> HalfspaceIntersection {
    if hs.is_empty() {
        return HalfspaceIntersection::Unbounded;
    }
    if has_contradicting_pair(hs, eps) {
        return HalfspaceIntersection::Empty;
    }

    // the corner of rows a and b exists and lies inside h
    let corner_kept =
        |h: &Hs2, a: usize, b: usize| meet(&hs[a], &hs[b]).is_some_and(|p| h.satisfies_eps(p, eps));

    let mut ring: VecDeque<usize> = VecDeque::with_capacity(hs.len());
    for (i, h) in hs.iter().enumerate() {
        while ring.len() >= 2 && !corner_kept(h, ring[ring.len() - 2], ring[ring.len() - 1]) {
            ring.pop_back();
        }
        while ring.len() >= 2 && !corner_kept(h, ring[0], ring[1]) {
            ring.pop_front();
        }
        ring.push_back(i);
    }
    // close the ring: the ends must respect each other
    while ring.len() >= 3 && !corner_kept(&hs[ring[0]], ring[ring.len() - 2], ring[ring.len() - 1])
    {
        ring.pop_back();
    }
    while ring.len() >= 3 && !corner_kept(&hs[ring[ring.len() - 1]], ring[0], ring[1]) {
        ring.pop_front();
    }
    if ring.len() < 3 {
        return HalfspaceIntersection::Unbounded;
    }

    let m = ring.len();
    let mut vertices = Vec::with_capacity(m);
    for k in 0..m {
        match meet(&hs[ring[k]], &hs[ring[(k + 1) % m]]) {
            Some(p) => vertices.push(p),
            None => return HalfspaceIntersection::Unbounded,
        }
    }

    // the sweep alone does not prove feasibility
    let tol = eps.max(0.0) + VERIFY_SLACK;
    if vertices
        .iter()
        .all(|&p| hs.iter().all(|h| h.satisfies_eps(p, tol)))
    {
        HalfspaceIntersection::Bounded(vertices)
    } else {
        HalfspaceIntersection::Empty
    }
}

/// Opposite rows `n·x <= c1`, `-n·x <= c2` leave nothing when `-c2 > c1`.
fn has_contradicting_pair(hs: &[Hs2], eps: f64) -> bool {
    hs.iter().enumerate().any(|(i, a)| {
        hs[i + 1..]
            .iter()
            .any(|b| (a.n + b.n).norm() < PARALLEL_EPS && -b.c > a.c + eps)
    })
}

/// Intersection point of the two boundary lines (Cramer's rule).
fn meet(h1: &Hs2, h2: &Hs2) -> Option<Vector2<f64>> {
    let det = h1.n.x * h2.n.y - h1.n.y * h2.n.x;
    if det.abs() < DET_EPS {
        return None;
    }
    Some(Vector2::new(
        (h1.c * h2.n.y - h1.n.y * h2.c) / det,
        (h1.n.x * h2.c - h1.c * h2.n.x) / det,
    ))
}
