//! Overlap relation between two rectangle batches.

use std::collections::BTreeMap;

use crate::geom2::Rect;

/// For each `i` in `rects_a`, the ascending indices `j` of `rects_b` that
/// overlap it with non-zero area. Indices without any overlap are absent.
pub fn create_adjacency_map(rects_a: &[Rect], rects_b: &[Rect]) -> BTreeMap<usize, Vec<usize>> {
    let mut map = BTreeMap::new();
    for (i, a) in rects_a.iter().enumerate() {
        let adjacent: Vec<usize> = rects_b
            .iter()
            .enumerate()
            .filter(|(_, b)| a.overlaps(b))
            .map(|(j, _)| j)
            .collect();
        if !adjacent.is_empty() {
            map.insert(i, adjacent);
        }
    }
    map
}
