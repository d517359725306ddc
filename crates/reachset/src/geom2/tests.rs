use super::*;
use crate::error::GeometryError;
use nalgebra::{matrix, vector, Vector2};

fn unit_box() -> ReachPolygon {
    ReachPolygon::from_rectangle(0.0, 0.0, 1.0, 1.0).unwrap()
}

#[test]
fn strict_emptiness_detects_contradiction() {
    // x <= 0 and x >= 1 -> empty
    let mut p = Poly2::default();
    p.insert_halfspace(Hs2::new(vector![1.0, 0.0], 0.0));
    p.insert_halfspace(Hs2::new(vector![-1.0, 0.0], -1.0));
    p.insert_halfspace(Hs2::new(vector![0.0, 1.0], 1.0));
    p.insert_halfspace(Hs2::new(vector![0.0, -1.0], 0.0));
    assert!(p.halfspace_intersection().is_empty());

    let q = Poly2::from_box(0.0, 0.0, 1.0, 1.0);
    match q.halfspace_intersection() {
        HalfspaceIntersection::Bounded(verts) => assert_eq!(verts.len(), 4),
        other => panic!("expected bounded, got {other:?}"),
    }
}

#[test]
fn open_strip_is_unbounded() {
    let mut p = Poly2::default();
    p.insert_halfspace(Hs2::new(vector![0.0, 1.0], 1.0));
    p.insert_halfspace(Hs2::new(vector![0.0, -1.0], 1.0));
    assert!(matches!(
        ReachPolygon::from_hpoly(&p),
        Err(GeometryError::Unbounded)
    ));
}

#[test]
fn parallel_cuts_are_coalesced() {
    let mut p = Poly2::from_box(-1.0, -1.0, 1.0, 1.0);
    p.insert_halfspace(Hs2::new(vector![2.0, 0.0], 1.0)); // x <= 0.5
    p.insert_halfspace(Hs2::new(vector![1.0, 0.0], 3.0)); // looser, dropped
    assert_eq!(p.hs.len(), 4);
    let poly = ReachPolygon::from_hpoly(&p).unwrap();
    assert!((poly.bounds().x_max - 0.5).abs() < 1e-12);
}

#[test]
fn hull_orders_ccw_and_drops_interior_points() {
    let points = vec![
        Vector2::new(1.0, 1.0),
        Vector2::new(0.0, 0.0),
        Vector2::new(0.5, 0.5),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(0.0, 0.0),
    ];
    let p = ReachPolygon::from_points(&points).unwrap();
    assert_eq!(p.vertices().len(), 4);
    assert!((p.area() - 1.0).abs() < 1e-12);
    assert!(!p.has_vertex(Vector2::new(0.5, 0.5), 1e-12));
}

#[test]
fn collinear_points_are_degenerate() {
    let points = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(2.0, 2.0),
    ];
    assert!(matches!(
        ReachPolygon::from_points(&points),
        Err(GeometryError::TooFewVertices { count: 2 })
    ));
    assert!(matches!(
        ReachPolygon::from_points(&[]),
        Err(GeometryError::Empty)
    ));
}

#[test]
fn points_and_segments_when_allowed() {
    let point = ReachPolygon::from_points_degenerate(&[vector![1.0, 2.0]; 3]).unwrap();
    assert_eq!(point.vertices().len(), 1);
    assert!(point.is_degenerate());
    assert!(point.contains(vector![1.0, 2.0], 0.0));
    assert!(!point.contains(vector![1.0, 2.1], 0.05));

    let segment = ReachPolygon::from_points_degenerate(&[
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![2.0, 2.0],
    ])
    .unwrap();
    assert_eq!(segment.vertices().len(), 2);
    assert!(segment.contains(vector![0.5, 0.5], 1e-12));
    assert!(!segment.contains(vector![3.0, 3.0], 0.5));
    assert!(!segment.contains(vector![1.0, 0.0], 0.5));

    assert!(!unit_box().is_degenerate());
    assert!(matches!(
        ReachPolygon::from_points_degenerate(&[]),
        Err(GeometryError::Empty)
    ));
}

#[test]
fn degenerate_inputs_stay_allowed_downstream() {
    let segment =
        ReachPolygon::from_points_degenerate(&[vector![0.0, 0.0], vector![2.0, 0.0]]).unwrap();
    let cut = segment.intersect_halfspace(1.0, 0.0, 1.0).unwrap();
    assert_eq!(cut.bounds().x_max, 1.0);
    let sheared = segment.linear_map(&matrix![1.0, 2.0; 0.0, 1.0]).unwrap();
    assert!(sheared.is_degenerate());
    // a full-dimensional operand restores the area
    let grown = segment.minkowski_sum(&unit_box()).unwrap();
    assert!((grown.area() - 3.0).abs() < 1e-12);
    let merged = ReachPolygon::hull_of([&segment, &cut]).unwrap();
    assert!(merged.is_degenerate());
    assert!((ReachPolygon::hull_of([&segment, &unit_box()]).unwrap().area() - 1.5).abs() < 1e-12);
}

#[test]
fn strip_clip_keeps_boundary_contact() {
    let p = unit_box();
    let inner = p.clip_y(0.25, 0.75).unwrap();
    assert!((inner.area() - 0.5).abs() < 1e-12);

    let edge = p.clip_y(1.0, 3.0).unwrap();
    assert!(edge.is_degenerate());
    assert_eq!((edge.bounds().y_min, edge.bounds().y_max), (1.0, 1.0));

    let tilted = ReachPolygon::from_points(&[
        vector![0.0, 0.0],
        vector![3.0, 0.3],
        vector![1.0, 0.9],
    ])
    .unwrap();
    let level = tilted.clip_y(0.7, 0.7).unwrap();
    assert_eq!((level.bounds().y_min, level.bounds().y_max), (0.7, 0.7));
    assert!(level.bounds().x_max > level.bounds().x_min);

    let corner = tilted.clip_y(0.9, 2.0).unwrap();
    assert_eq!(corner.vertices().len(), 1);
    assert!(matches!(p.clip_y(1.5, 2.0), Err(GeometryError::Empty)));
}

#[test]
fn clipping_keeps_inside_part() {
    let p = unit_box().intersect_halfspace(1.0, 0.0, 0.25).unwrap();
    let b = p.bounds();
    assert_eq!((b.x_min, b.y_min, b.x_max, b.y_max), (0.0, 0.0, 0.25, 1.0));
    assert!((p.area() - 0.25).abs() < 1e-12);

    // diagonal cut x + y <= 1 leaves the lower-left triangle
    let t = unit_box().intersect_halfspace(1.0, 1.0, 1.0).unwrap();
    assert_eq!(t.vertices().len(), 3);
    assert!((t.area() - 0.5).abs() < 1e-12);
}

#[test]
fn clipping_away_everything_fails() {
    assert!(matches!(
        unit_box().intersect_halfspace(1.0, 0.0, -1.0),
        Err(GeometryError::Empty)
    ));
    // touching only along the edge x = 0
    assert!(unit_box().intersect_halfspace(1.0, 0.0, 0.0).is_err());
}

#[test]
fn shear_and_minkowski() {
    let shear = matrix![1.0, 2.0; 0.0, 1.0];
    let p = unit_box().linear_map(&shear).unwrap();
    assert!(p.has_vertex(vector![3.0, 1.0], 1e-12));
    assert!((p.area() - 1.0).abs() < 1e-12);

    let s = unit_box().minkowski_sum(&unit_box()).unwrap();
    let b = s.bounds();
    assert_eq!((b.x_min, b.y_min, b.x_max, b.y_max), (0.0, 0.0, 2.0, 2.0));
    assert!((s.area() - 4.0).abs() < 1e-12);
}

#[test]
fn membership_respects_eps() {
    let p = unit_box();
    assert!(p.contains(vector![0.5, 0.5], 0.0));
    assert!(p.contains(vector![1.0, 1.0], 1e-12));
    assert!(!p.contains(vector![1.1, 0.5], 1e-9));
    assert!(p.contains(vector![1.1, 0.5], 0.2));
}

#[test]
fn rect_overlap_excludes_touching() {
    let a = Rect::new(0.0, 0.0, 1.0, 1.0);
    let b = Rect::new(1.0, 0.0, 2.0, 1.0);
    let c = Rect::new(0.5, 0.5, 1.5, 1.5);
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c) && c.overlaps(&b));
    assert_eq!(a.intersection(&c), Some(Rect::new(0.5, 0.5, 1.0, 1.0)));
    assert_eq!(a.intersection(&b), None);
    assert!(Rect::new(0.0, 0.0, 0.0, 1.0).is_empty());
}

#[test]
fn rect_polygon_bounds_roundtrip() {
    let r = Rect::new(-2.0, 1.0, 3.5, 4.0);
    let p = r.to_polygon().unwrap();
    assert_eq!(Rect::from_polygon_bounds(&p), r);
    assert!((p.area() - r.area()).abs() < 1e-12);
}
