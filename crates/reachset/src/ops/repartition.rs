//! Repartitioning of rectangle batches into a non-overlapping cover.
//!
//! Sweep over the distinct longitudinal bounds. Within each slab between two
//! consecutive bounds the lateral intervals of the covering rectangles are
//! merged; an interval that persists across slabs extends one output
//! rectangle, and it is closed as soon as the next slab no longer carries
//! exactly that interval. The result covers the same area without overlap
//! and is a fixed point of the sweep.

use super::grid::{
    compute_minimum_positions_of_rectangles, discretize_rectangles, undiscretize_rectangles,
};
use crate::geom2::Rect;

/// Grid-snapped repartition: discretize, repartition, undiscretize.
pub fn create_repartitioned_rectangles(rects: &[Rect], size_grid: f64) -> Vec<Rect> {
    if rects.is_empty() {
        return Vec::new();
    }
    let origin = compute_minimum_positions_of_rectangles(rects);
    let discrete = discretize_rectangles(rects, origin, size_grid);
    let merged = repartition_rectangle(&discrete);
    undiscretize_rectangles(&merged, origin, size_grid)
}

/// Non-overlapping cover of the union of `rects`, sorted by lower corner.
pub fn repartition_rectangle(rects: &[Rect]) -> Vec<Rect> {
    let rects: Vec<Rect> = rects.iter().copied().filter(|r| !r.is_empty()).collect();
    if rects.is_empty() {
        return Vec::new();
    }

    let mut xs: Vec<f64> = rects.iter().flat_map(|r| [r.lon_min, r.lon_max]).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let mut out = Vec::new();
    // (lat interval, lon where it opened)
    let mut open: Vec<((f64, f64), f64)> = Vec::new();

    for slab in xs.windows(2) {
        let (x0, x1) = (slab[0], slab[1]);
        let intervals = merged_lat_intervals(&rects, x0, x1);

        open.retain(|&(iv, start)| {
            let persists = intervals.contains(&iv);
            if !persists {
                out.push(Rect::new(start, iv.0, x0, iv.1));
            }
            persists
        });
        for iv in intervals {
            if !open.iter().any(|&(o, _)| o == iv) {
                open.push((iv, x0));
            }
        }
    }

    if let Some(&x_end) = xs.last() {
        out.extend(
            open.into_iter()
                .map(|(iv, start)| Rect::new(start, iv.0, x_end, iv.1)),
        );
    }

    out.sort_by(|a, b| {
        a.lon_min
            .total_cmp(&b.lon_min)
            .then(a.lat_min.total_cmp(&b.lat_min))
    });
    out
}

/// Union of the lateral extents of all rectangles spanning `[x0, x1]`.
fn merged_lat_intervals(rects: &[Rect], x0: f64, x1: f64) -> Vec<(f64, f64)> {
    let mut spans: Vec<(f64, f64)> = rects
        .iter()
        .filter(|r| r.lon_min <= x0 && r.lon_max >= x1)
        .map(|r| (r.lat_min, r.lat_max))
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (lo, hi) in spans {
        match merged.last_mut() {
            Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}
