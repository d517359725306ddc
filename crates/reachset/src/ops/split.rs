//! Collision splitting of position rectangles.
//!
//! A colliding rectangle is bisected along its longer side until every piece
//! is collision-free or its diagonal falls below the terminal radius, in which
//! case the piece is considered covered by the obstacle and dropped. Pieces
//! below [`MIN_SPLIT_DIAGONAL`] are dropped the same way whatever the radius,
//! so the refinement ends even for a zero radius. The
//! refinement uses an explicit worklist, so depth is bounded by memory rather
//! than by the call stack.

use crate::error::OracleQueryError;
use crate::geom2::Rect;
use crate::oracle::{to_aabb, CollisionOracle};
use crate::parallel::Parallelism;

/// Smallest diagonal (m) of a piece that is still bisected.
pub const MIN_SPLIT_DIAGONAL: f64 = 1e-3;

/// Collision-free pieces of every rectangle in `rects` at `time_step`.
///
/// Output order follows input order; the pieces of one input stay together.
pub fn check_collision_and_split_rectangles<O>(
    time_step: usize,
    oracle: &O,
    rects: &[Rect],
    radius_terminal_split: f64,
    parallelism: &Parallelism,
) -> Result<Vec<Rect>, OracleQueryError>
where
    O: CollisionOracle + ?Sized,
{
    let radius_terminal_squared = radius_terminal_split * radius_terminal_split;
    parallelism.try_flat_map_indexed(rects, |_, rect| {
        create_collision_free_rectangles(oracle, time_step, rect, radius_terminal_squared)
    })
}

/// Collision-free pieces of one rectangle.
pub fn create_collision_free_rectangles<O>(
    oracle: &O,
    time_step: usize,
    rect: &Rect,
    radius_terminal_squared: f64,
) -> Result<Vec<Rect>, OracleQueryError>
where
    O: CollisionOracle + ?Sized,
{
    let limit = radius_terminal_squared.max(MIN_SPLIT_DIAGONAL * MIN_SPLIT_DIAGONAL);
    let mut free = Vec::new();
    let mut worklist = vec![*rect];
    while let Some(current) = worklist.pop() {
        let aabb = to_aabb(&current);
        if !oracle.collides(time_step, &aabb)? {
            free.push(current);
            continue;
        }
        if aabb.diagonal_squared() < limit {
            continue;
        }
        let (first, second) = split_rectangle_into_two(&current);
        // second is pushed first so the pieces come out low-to-high
        worklist.push(second);
        worklist.push(first);
    }
    Ok(free)
}

/// Bisect along the longer side; ties bisect the longitudinal side.
pub fn split_rectangle_into_two(rect: &Rect) -> (Rect, Rect) {
    if rect.width() >= rect.height() {
        let mid = 0.5 * (rect.lon_min + rect.lon_max);
        (
            Rect::new(rect.lon_min, rect.lat_min, mid, rect.lat_max),
            Rect::new(mid, rect.lat_min, rect.lon_max, rect.lat_max),
        )
    } else {
        let mid = 0.5 * (rect.lat_min + rect.lat_max);
        (
            Rect::new(rect.lon_min, rect.lat_min, rect.lon_max, mid),
            Rect::new(rect.lon_min, mid, rect.lon_max, rect.lat_max),
        )
    }
}
