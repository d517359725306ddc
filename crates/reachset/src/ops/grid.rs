//! Grid discretization of rectangle batches.
//!
//! Rectangles are mapped to integer cell coordinates relative to a common
//! origin so that set operations (repartitioning) can compare bounds exactly.
//! Bounds snap outward: minima to the floor, maxima to the ceiling of the
//! grid quotient, which is first rounded to [`QUOTIENT_DECIMALS`] decimals so
//! that bounds lying on a grid line up to float noise stay on it.

use crate::geom2::Rect;

/// Decimals kept from the grid quotient before snapping.
pub const QUOTIENT_DECIMALS: i32 = 5;

/// Minimum lon and minimum lat over all rectangles (`(0, 0)` for none).
pub fn compute_minimum_positions_of_rectangles(rects: &[Rect]) -> (f64, f64) {
    if rects.is_empty() {
        return (0.0, 0.0);
    }
    rects.iter().fold((f64::INFINITY, f64::INFINITY), |(lon, lat), r| {
        (lon.min(r.lon_min), lat.min(r.lat_min))
    })
}

/// Snap rectangles onto the grid; bounds become integral cell indices.
pub fn discretize_rectangles(rects: &[Rect], origin: (f64, f64), size_grid: f64) -> Vec<Rect> {
    let (lon0, lat0) = origin;
    rects
        .iter()
        .map(|r| {
            Rect::new(
                grid_quotient(r.lon_min - lon0, size_grid).floor(),
                grid_quotient(r.lat_min - lat0, size_grid).floor(),
                grid_quotient(r.lon_max - lon0, size_grid).ceil(),
                grid_quotient(r.lat_max - lat0, size_grid).ceil(),
            )
        })
        .collect()
}

/// Inverse of [`discretize_rectangles`]: `origin + index·size_grid`.
pub fn undiscretize_rectangles(rects: &[Rect], origin: (f64, f64), size_grid: f64) -> Vec<Rect> {
    let (lon0, lat0) = origin;
    rects
        .iter()
        .map(|r| {
            Rect::new(
                lon0 + r.lon_min * size_grid,
                lat0 + r.lat_min * size_grid,
                lon0 + r.lon_max * size_grid,
                lat0 + r.lat_max * size_grid,
            )
        })
        .collect()
}

/// `offset / size_grid` rounded half away from zero to `QUOTIENT_DECIMALS` decimals.
#[inline]
fn grid_quotient(offset: f64, size_grid: f64) -> f64 {
    let scale = 10f64.powi(QUOTIENT_DECIMALS);
    (offset / size_grid * scale).round() / scale
}
