//! Collision oracle boundary.
//!
//! The pipeline only asks "does this axis-aligned box collide at step t?".
//! Building the obstacle field (coordinate transforms, inflation by the
//! vehicle footprint, rasterization of raw outlines) happens elsewhere; this
//! module defines the query trait, the oracle-native box type with its two
//! conversion functions, and `ObstacleOracle`, a box-based oracle with static
//! and per-step obstacles.

use std::collections::BTreeMap;

use nalgebra::Vector2;

use crate::error::OracleQueryError;
use crate::geom2::Rect;

/// Read-only collision query, safe for concurrent calls.
pub trait CollisionOracle: Sync {
    /// True when `aabb` intersects an obstacle (with non-zero area) at `step`.
    fn collides(&self, step: usize, aabb: &Aabb) -> Result<bool, OracleQueryError>;
}

impl<T: CollisionOracle + ?Sized> CollisionOracle for &T {
    #[inline]
    fn collides(&self, step: usize, aabb: &Aabb) -> Result<bool, OracleQueryError> {
        (**self).collides(step, aabb)
    }
}

/// Oracle-native axis-aligned box: center and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vector2<f64>,
    pub r_x: f64,
    pub r_y: f64,
}

impl Aabb {
    #[inline]
    pub fn new(center: Vector2<f64>, r_x: f64, r_y: f64) -> Self {
        Self { center, r_x, r_y }
    }

    #[inline]
    pub fn min(&self) -> Vector2<f64> {
        Vector2::new(self.center.x - self.r_x, self.center.y - self.r_y)
    }

    #[inline]
    pub fn max(&self) -> Vector2<f64> {
        Vector2::new(self.center.x + self.r_x, self.center.y + self.r_y)
    }

    /// Squared length of the diagonal.
    #[inline]
    pub fn diagonal_squared(&self) -> f64 {
        4.0 * self.r_x * self.r_x + 4.0 * self.r_y * self.r_y
    }

    /// Interior overlap; touching boxes do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.r_x + other.r_x
            && (self.center.y - other.center.y).abs() < self.r_y + other.r_y
    }
}

/// Rectangle → oracle box.
#[inline]
pub fn to_aabb(rect: &Rect) -> Aabb {
    Aabb::new(
        Vector2::new(
            0.5 * (rect.lon_min + rect.lon_max),
            0.5 * (rect.lat_min + rect.lat_max),
        ),
        0.5 * (rect.lon_max - rect.lon_min),
        0.5 * (rect.lat_max - rect.lat_min),
    )
}

/// Oracle box → rectangle.
#[inline]
pub fn from_aabb(aabb: &Aabb) -> Rect {
    let lo = aabb.min();
    let hi = aabb.max();
    Rect::new(lo.x, lo.y, hi.x, hi.y)
}

/// Obstacle field made of boxes: static ones plus dynamic ones per step.
///
/// A configured horizon bounds the steps that may be queried; without one,
/// every step is answered from the static obstacles and whatever dynamic
/// obstacles were registered for it.
#[derive(Clone, Debug, Default)]
pub struct ObstacleOracle {
    static_obstacles: Vec<Aabb>,
    dynamic_obstacles: BTreeMap<usize, Vec<Aabb>>,
    horizon: Option<usize>,
}

impl ObstacleOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static obstacle present at all steps.
    pub fn with_static(mut self, rect: Rect) -> Self {
        self.static_obstacles.push(to_aabb(&rect));
        self
    }

    /// Obstacle present at `step` only.
    pub fn with_dynamic(mut self, step: usize, rect: Rect) -> Self {
        self.dynamic_obstacles
            .entry(step)
            .or_default()
            .push(to_aabb(&rect));
        self
    }

    /// Last step the oracle is able to answer for.
    pub fn with_horizon(mut self, last_step: usize) -> Self {
        self.horizon = Some(last_step);
        self
    }

    pub fn horizon(&self) -> Option<usize> {
        self.horizon
    }

    /// The same obstacle field, split into cells of a regular grid.
    ///
    /// Each obstacle is replaced by the grid cells (size `cell`, anchored at
    /// the origin) it overlaps. The covered area grows to whole cells, so
    /// queries become coarser but never miss an obstacle.
    pub fn rasterized(&self, cell: f64) -> Self {
        let raster = |boxes: &[Aabb]| -> Vec<Aabb> {
            let mut cells: Vec<(i64, i64)> = Vec::new();
            for b in boxes {
                let lo = b.min();
                let hi = b.max();
                let i0 = (lo.x / cell).floor() as i64;
                let j0 = (lo.y / cell).floor() as i64;
                let i1 = (hi.x / cell).ceil() as i64;
                let j1 = (hi.y / cell).ceil() as i64;
                for i in i0..i1 {
                    for j in j0..j1 {
                        cells.push((i, j));
                    }
                }
            }
            cells.sort_unstable();
            cells.dedup();
            cells
                .into_iter()
                .map(|(i, j)| {
                    let r = Rect::new(
                        i as f64 * cell,
                        j as f64 * cell,
                        (i + 1) as f64 * cell,
                        (j + 1) as f64 * cell,
                    );
                    to_aabb(&r)
                })
                .collect()
        };
        Self {
            static_obstacles: raster(&self.static_obstacles),
            dynamic_obstacles: self
                .dynamic_obstacles
                .iter()
                .map(|(&step, boxes)| (step, raster(boxes)))
                .collect(),
            horizon: self.horizon,
        }
    }

    /// Number of obstacle boxes relevant at `step`.
    pub fn obstacle_count(&self, step: usize) -> usize {
        self.static_obstacles.len() + self.dynamic_obstacles.get(&step).map_or(0, Vec::len)
    }
}

impl CollisionOracle for ObstacleOracle {
    fn collides(&self, step: usize, aabb: &Aabb) -> Result<bool, OracleQueryError> {
        if self.horizon.is_some_and(|h| step > h) {
            return Err(OracleQueryError::StepOutOfHorizon { step });
        }
        if self.static_obstacles.iter().any(|o| o.intersects(aabb)) {
            return Ok(true);
        }
        Ok(self
            .dynamic_obstacles
            .get(&step)
            .is_some_and(|boxes| boxes.iter().any(|o| o.intersects(aabb))))
    }
}
