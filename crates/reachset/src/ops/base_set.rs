//! Base sets: (longitudinal, lateral) polygon pairs between pipeline stages.

use crate::geom2::{ReachPolygon, Rect};
use crate::graph::NodeRef;

/// A node of the previous step after one propagation step.
#[derive(Clone, Debug, PartialEq)]
pub struct PropagatedBaseSet {
    pub polygon_lon: ReachPolygon,
    pub polygon_lat: ReachPolygon,
    /// Node the set was propagated from.
    pub source: NodeRef,
}

impl PropagatedBaseSet {
    /// Projection onto the position domain.
    pub fn position_rectangle(&self) -> Rect {
        position_rectangle(&self.polygon_lon, &self.polygon_lat)
    }
}

/// Base set restricted to one drivable-area cell.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptedBaseSet {
    pub polygon_lon: ReachPolygon,
    pub polygon_lat: ReachPolygon,
    /// Indices into the propagated base sets that contributed, ascending.
    pub sources: Vec<usize>,
}

impl AdaptedBaseSet {
    pub fn position_rectangle(&self) -> Rect {
        position_rectangle(&self.polygon_lon, &self.polygon_lat)
    }
}

#[inline]
pub(crate) fn position_rectangle(polygon_lon: &ReachPolygon, polygon_lat: &ReachPolygon) -> Rect {
    let lon = polygon_lon.bounds();
    let lat = polygon_lat.bounds();
    Rect::new(lon.x_min, lat.x_min, lon.x_max, lat.x_max)
}
