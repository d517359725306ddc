//! Adaptation of propagated base sets to drivable-area cells.
//!
//! For a cell `[lon_min, lon_max] × [lat_min, lat_max]`, every overlapping
//! base set is clipped to the cell's position range on each axis (velocity
//! stays unconstrained). The adapted set is the convex hull of all clipped
//! pieces, per axis.

use tracing::debug;

use super::adjacency::create_adjacency_map;
use super::base_set::{AdaptedBaseSet, PropagatedBaseSet};
use super::propagate::project_base_sets_to_position_domain;
use crate::error::{GeometryError, GeometryResult};
use crate::geom2::{ReachPolygon, Rect};
use crate::parallel::Parallelism;

/// One adapted base set per reachable cell of `drivable_area`.
///
/// Cells without an overlapping base set, or whose clipped pieces are all
/// degenerate, are dropped. Output order follows `drivable_area`.
pub fn adapt_base_sets_to_drivable_area(
    drivable_area: &[Rect],
    base_sets_propagated: &[PropagatedBaseSet],
    parallelism: &Parallelism,
) -> Vec<AdaptedBaseSet> {
    let projected = project_base_sets_to_position_domain(base_sets_propagated);
    let jobs: Vec<(Rect, Vec<usize>)> = create_adjacency_map(drivable_area, &projected)
        .into_iter()
        .map(|(i, adjacent)| (drivable_area[i], adjacent))
        .collect();

    parallelism
        .map(&jobs, |(cell, adjacent)| {
            match adapt_base_set_to_drivable_area(cell, base_sets_propagated, adjacent) {
                Ok(adapted) => Some(adapted),
                Err(err) => {
                    debug!(?cell, %err, "dropping drivable cell");
                    None
                }
            }
        })
        .into_iter()
        .flatten()
        .collect()
}

/// Restrict the adjacent base sets to `cell` and merge them.
pub fn adapt_base_set_to_drivable_area(
    cell: &Rect,
    base_sets: &[PropagatedBaseSet],
    adjacent: &[usize],
) -> GeometryResult<AdaptedBaseSet> {
    let mut pieces_lon = Vec::new();
    let mut pieces_lat = Vec::new();
    let mut sources = Vec::new();

    for &idx in adjacent {
        let Some(base_set) = base_sets.get(idx) else {
            continue;
        };
        let clipped = clip_to_position_range(&base_set.polygon_lon, cell.lon_min, cell.lon_max)
            .and_then(|lon| {
                clip_to_position_range(&base_set.polygon_lat, cell.lat_min, cell.lat_max)
                    .map(|lat| (lon, lat))
            });
        if let Ok((lon, lat)) = clipped {
            pieces_lon.push(lon);
            pieces_lat.push(lat);
            sources.push(idx);
        }
    }

    if sources.is_empty() {
        return Err(GeometryError::Empty);
    }
    Ok(AdaptedBaseSet {
        polygon_lon: ReachPolygon::hull_of(&pieces_lon)?,
        polygon_lat: ReachPolygon::hull_of(&pieces_lat)?,
        sources,
    })
}

/// Part of a (position, velocity) polygon with position in `[p_min, p_max]`.
fn clip_to_position_range(
    polygon: &ReachPolygon,
    p_min: f64,
    p_max: f64,
) -> GeometryResult<ReachPolygon> {
    polygon
        .intersect_halfspace(1.0, 0.0, p_max)?
        .intersect_halfspace(-1.0, 0.0, -p_min)
}
