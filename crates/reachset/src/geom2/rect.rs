//! Axis-aligned position rectangle (`Rect`).
//!
//! Working representation of the position domain during discretization,
//! collision splitting and repartitioning. Equality is exact on all four
//! bounds; grid-snapped rectangles compare reliably.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::polygon::ReachPolygon;
use crate::error::GeometryResult;

/// Box `[lon_min, lon_max] × [lat_min, lat_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl Rect {
    #[inline]
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// No interior.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.lon_max > self.lon_min && self.lat_max > self.lat_min)
    }

    /// Non-zero-area intersection. Rectangles sharing only an edge or a
    /// corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.lon_min < other.lon_max
            && self.lon_max > other.lon_min
            && self.lat_min < other.lat_max
            && self.lat_max > other.lat_min
    }

    /// Closed containment of another rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.lon_min <= other.lon_min
            && self.lat_min <= other.lat_min
            && self.lon_max >= other.lon_max
            && self.lat_max >= other.lat_max
    }

    /// Intersection with non-zero area, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect::new(
            self.lon_min.max(other.lon_min),
            self.lat_min.max(other.lat_min),
            self.lon_max.min(other.lon_max),
            self.lat_max.min(other.lat_max),
        ))
    }

    /// Corners counter-clockwise from `(lon_min, lat_min)`.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            Vector2::new(self.lon_min, self.lat_min),
            Vector2::new(self.lon_max, self.lat_min),
            Vector2::new(self.lon_max, self.lat_max),
            Vector2::new(self.lon_min, self.lat_max),
        ]
    }

    pub fn to_polygon(&self) -> GeometryResult<ReachPolygon> {
        ReachPolygon::from_rectangle(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
    }

    /// Bounding rectangle of a polygon whose axes are (lon, lat).
    pub fn from_polygon_bounds(polygon: &ReachPolygon) -> Rect {
        let b = polygon.bounds();
        Rect::new(b.x_min, b.y_min, b.x_max, b.y_max)
    }
}
