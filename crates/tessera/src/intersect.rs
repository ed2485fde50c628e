//! Pairwise intersections between lines, circles and arcs.
//!
//! Arcs are intersected as their full supporting circle and the results
//! filtered back onto the sweep. Every routine returns an empty `Vec` for
//! degenerate input (zero-length lines, coincident centres, parallel lines).

use crate::arc::{ARC_SWEEP_TOLERANCE, arc_radius, is_point_on_arc_sweep};
use crate::geometry::{EPSILON, Point, dedupe_points};
use crate::primitive::{ArcPrimitive, Primitive};

// ============================================================================
// CORE ROUTINES
// ============================================================================

/// Intersection of segments `a1..a2` and `b1..b2`.
///
/// Both segment parameters must fall within `[-EPSILON, 1 + EPSILON]`;
/// parallel segments (|cross| < EPSILON) never intersect.
pub fn line_line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.cross(s);
    if denom.abs() < EPSILON {
        return None;
    }

    let qp = b1 - a1;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;

    let in_range = |v: f64| (-EPSILON..=1.0 + EPSILON).contains(&v);
    if in_range(t) && in_range(u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Parameters along `a..b` where the line meets the circle, unfiltered.
///
/// One root for a tangent (|discriminant| < EPSILON), two for a secant.
pub(crate) fn line_circle_parameters(a: Point, b: Point, center: Point, radius: f64) -> Vec<f64> {
    let d = b - a;
    let f = a - center;
    let qa = d.dot(d);
    if qa < EPSILON {
        return Vec::new();
    }
    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - radius * radius;
    let disc = qb * qb - 4.0 * qa * qc;

    if disc.abs() < EPSILON {
        vec![-qb / (2.0 * qa)]
    } else if disc < 0.0 {
        Vec::new()
    } else {
        let root = disc.sqrt();
        vec![(-qb - root) / (2.0 * qa), (-qb + root) / (2.0 * qa)]
    }
}

/// Points where segment `a..b` meets the circle.
pub fn line_circle_intersection(a: Point, b: Point, center: Point, radius: f64) -> Vec<Point> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let d = b - a;
    line_circle_parameters(a, b, center, radius)
        .into_iter()
        .filter(|t| (-EPSILON..=1.0 + EPSILON).contains(t))
        .map(|t| a + d * t)
        .collect()
}

/// Radical-line intersection of two circles.
///
/// Empty when the circles are apart, nested without touching, or share a
/// centre; one point when tangent.
pub fn circle_circle_intersection(c1: Point, r1: f64, c2: Point, r2: f64) -> Vec<Point> {
    if r1 <= 0.0 || r2 <= 0.0 {
        return Vec::new();
    }
    let delta = c2 - c1;
    let d = delta.length();
    if d < EPSILON || d > r1 + r2 + EPSILON || d < (r1 - r2).abs() - EPSILON {
        return Vec::new();
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let mid = c1 + delta * (a / d);

    if h < EPSILON {
        return vec![mid];
    }

    let perp = Point::new(-delta.y, delta.x) * (h / d);
    vec![mid + perp, mid - perp]
}

fn on_arc(points: Vec<Point>, arc: &ArcPrimitive) -> Vec<Point> {
    points
        .into_iter()
        .filter(|p| is_point_on_arc_sweep(*p, arc, ARC_SWEEP_TOLERANCE))
        .collect()
}

/// Intersection points between two primitives of any kind.
pub fn intersect_pair(first: &Primitive, second: &Primitive) -> Vec<Point> {
    use Primitive::*;

    match (first, second) {
        (Line(a), Line(b)) => line_line_intersection(a.a, a.b, b.a, b.b).into_iter().collect(),
        (Line(l), Circle(c)) | (Circle(c), Line(l)) => {
            line_circle_intersection(l.a, l.b, c.center, c.radius)
        }
        (Circle(a), Circle(b)) => circle_circle_intersection(a.center, a.radius, b.center, b.radius),
        (Line(l), Arc(arc)) | (Arc(arc), Line(l)) => on_arc(
            line_circle_intersection(l.a, l.b, arc.center, arc_radius(arc)),
            arc,
        ),
        (Circle(c), Arc(arc)) | (Arc(arc), Circle(c)) => on_arc(
            circle_circle_intersection(c.center, c.radius, arc.center, arc_radius(arc)),
            arc,
        ),
        (Arc(a), Arc(b)) => {
            let points = circle_circle_intersection(a.center, arc_radius(a), b.center, arc_radius(b));
            on_arc(on_arc(points, a), b)
        }
    }
}

/// All pairwise intersection points of a primitive set, deduplicated by
/// [`crate::geometry::point_key`].
pub fn intersections(primitives: &[Primitive]) -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..primitives.len() {
        for j in (i + 1)..primitives.len() {
            points.extend(intersect_pair(&primitives[i], &primitives[j]));
        }
    }
    dedupe_points(points)
}

// ============================================================================
// TESTS
// ============================================================================
