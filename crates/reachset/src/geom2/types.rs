//! Basic 2D types shared by the H- and V-representations.
//!
//! - `Hs2`: closed half-plane `n·x <= c` with helper predicates.
//! - `Bounds2`: axis-aligned extent of a polygon over its two axes.

use nalgebra::Vector2;

/// Closed half-plane `n · x <= c` (no normalization required here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Half-plane `a·x + b·y <= c` from raw coefficients.
    #[inline]
    pub fn from_coefficients(a: f64, b: f64, c: f64) -> Self {
        Self::new(Vector2::new(a, b), c)
    }

    /// Signed residual `n·p - c`; non-positive inside.
    #[inline]
    pub fn residual(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }

    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }
}

/// Axis-aligned extent over the two polygon axes.
///
/// For (position, velocity) polygons `x` is position and `y` is velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds2 {
    /// Tight bounds of a point set; `None` for an empty slice.
    pub fn of_points(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        for p in &points[1..] {
            b.x_min = b.x_min.min(p.x);
            b.y_min = b.y_min.min(p.y);
            b.x_max = b.x_max.max(p.x);
            b.y_max = b.y_max.max(p.y);
        }
        Some(b)
    }
}
