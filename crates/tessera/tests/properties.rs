//! Property tests for intersection symmetry, clip containment and joining.

use proptest::prelude::*;

use tessera::chain::chain_segments;
use tessera::clip::{clip_primitive, clip_segment_to_convex, convex_polygon_edges, point_in_convex_polygon};
use tessera::{
    CirclePrimitive, Fragment, LinePrimitive, Point, Primitive, Style, TileConfig, intersections, tile_polygon,
};

fn coord() -> impl Strategy<Value = f64> {
    -40.0f64..40.0
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn line() -> impl Strategy<Value = Primitive> {
    (point(), point()).prop_map(|(a, b)| LinePrimitive::new("l", a, b, &Style::default()).into())
}

fn circle() -> impl Strategy<Value = Primitive> {
    (point(), 1.0f64..30.0).prop_map(|(c, r)| CirclePrimitive::new("c", c, r, &Style::default()).into())
}

fn primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![line(), circle()]
}

fn tile() -> impl Strategy<Value = TileConfig> {
    prop_oneof![
        (5.0f64..30.0).prop_map(TileConfig::square),
        (5.0f64..30.0).prop_map(TileConfig::hex),
    ]
}

/// Containment with room for crossings found just past a polygon corner.
fn inside_loosely(p: Point, edges: &[tessera::ConvexEdge]) -> bool {
    edges.iter().all(|e| e.signed_distance(p) >= -1e-3)
}

fn same_points(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.iter().any(|q| p.distance(*q) < 1e-6))
}

proptest! {
    #[test]
    fn intersections_ignore_order(a in primitive(), b in primitive()) {
        let forward = intersections(&[a.clone(), b.clone()]);
        let backward = intersections(&[b, a]);
        prop_assert!(same_points(&forward, &backward), "{:?} vs {:?}", forward, backward);
    }

    #[test]
    fn clipped_lines_stay_inside(tile in tile(), a in point(), b in point()) {
        let edges = convex_polygon_edges(&tile_polygon(&tile));
        if let Some((p, q)) = clip_segment_to_convex(a, b, &edges) {
            prop_assert!(point_in_convex_polygon(p, &edges), "start {:?} outside", p);
            prop_assert!(point_in_convex_polygon(q, &edges), "end {:?} outside", q);
            prop_assert!(p.distance(q) <= a.distance(b) + 1e-9);
        }
    }

    #[test]
    fn clipped_circles_stay_inside(tile in tile(), c in circle()) {
        let edges = convex_polygon_edges(&tile_polygon(&tile));
        for fragment in clip_primitive(&c, &edges) {
            match fragment {
                Fragment::Arc(f) => {
                    let a0 = f.start.angle_from(f.center);
                    let mid_angle = if f.clockwise { a0 + f.delta() / 2.0 } else { a0 - f.delta() / 2.0 };
                    let mid = f.center + Point::from_angle(mid_angle) * f.radius;
                    prop_assert!(point_in_convex_polygon(mid, &edges), "arc midpoint {:?} outside", mid);
                    prop_assert!(inside_loosely(f.start, &edges), "arc start {:?} outside", f.start);
                    prop_assert!(inside_loosely(f.end, &edges), "arc end {:?} outside", f.end);
                }
                Fragment::Circle(f) => {
                    let east = f.center + Point::new(f.radius, 0.0);
                    prop_assert!(point_in_convex_polygon(east, &edges));
                }
                Fragment::Line(_) => prop_assert!(false, "circle clipped into a line"),
            }
        }
    }

    #[test]
    fn joining_uses_every_segment_once(
        raw in prop::collection::vec(((0i32..5, 0i32..5), (0i32..5, 0i32..5)), 0..20)
    ) {
        let segments: Vec<(Point, Point)> = raw
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|((ax, ay), (bx, by))| {
                (Point::new(ax as f64, ay as f64), Point::new(bx as f64, by as f64))
            })
            .collect();
        let chains = chain_segments(&segments);
        let used: usize = chains.iter().map(|c| c.len() - 1).sum();
        prop_assert_eq!(used, segments.len());
        prop_assert!(chains.len() <= segments.len());
    }
}
