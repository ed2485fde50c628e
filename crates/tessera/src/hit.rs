//! Hit testing: which primitive is under the cursor.

use crate::arc::{ARC_SWEEP_TOLERANCE, arc_radius, is_point_on_arc_sweep};
use crate::geometry::{Point, distance_to_segment};
use crate::primitive::Primitive;

/// Distance from `point` to a primitive's stroke.
///
/// Lines use point-to-segment distance, circles the radial gap. Arcs use
/// the radial gap when the point is on the sweep, otherwise the distance to
/// the nearer endpoint.
pub fn hit_distance(point: Point, primitive: &Primitive) -> f64 {
    match primitive {
        Primitive::Line(l) => distance_to_segment(point, l.a, l.b),
        Primitive::Circle(c) => (point.distance(c.center) - c.radius).abs(),
        Primitive::Arc(a) => {
            if is_point_on_arc_sweep(point, a, ARC_SWEEP_TOLERANCE) {
                (point.distance(a.center) - arc_radius(a)).abs()
            } else {
                point.distance(a.start).min(point.distance(a.end))
            }
        }
    }
}

/// Nearest primitive within `tolerance`. Ties go to the later (topmost)
/// primitive.
pub fn hit_test_primitive<'a>(point: Point, primitives: &'a [Primitive], tolerance: f64) -> Option<&'a Primitive> {
    let mut best: Option<(f64, &Primitive)> = None;
    for primitive in primitives {
        let d = hit_distance(point, primitive);
        if d <= tolerance && best.is_none_or(|(bd, _)| d <= bd) {
            best = Some((d, primitive));
        }
    }
    best.map(|(_, p)| p)
}
