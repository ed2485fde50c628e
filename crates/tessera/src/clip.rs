//! Clipping primitives against a convex tile cell.
//!
//! This is the HOT PATH of export: every primitive is clipped once per
//! pattern cell per neighbour offset. Both tile shapes are convex, so the
//! cell is described by its edges and their inward normals and containment
//! is a half-plane test per edge.
//!
//! - lines: Liang–Barsky parametric clip
//! - circles: split at boundary crossings, keep gaps whose midpoint is inside
//! - arcs: the same, in travel coordinates along the arc's own sweep

use std::f64::consts::{PI, TAU};

use crate::arc::{arc_radius, resolve_arc_sweep};
use crate::fragment::{ArcFragment, CircleFragment, Fragment, LineFragment};
use crate::geometry::{EPSILON, Point, normalize_angle, signed_area_of_points};
use crate::intersect::line_circle_parameters;
use crate::primitive::{ArcPrimitive, CirclePrimitive, LinePrimitive, Primitive, Style};

/// Two crossing angles closer than this are the same crossing (a polygon
/// corner hit by both of its edges).
const ANGLE_EPSILON: f64 = 1e-7;

/// One edge of a convex polygon with its unit inward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexEdge {
    pub a: Point,
    pub b: Point,
    pub inward_normal: Point,
}

impl ConvexEdge {
    /// Signed distance from the edge line, positive on the inside.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        (p - self.a).dot(self.inward_normal)
    }
}

// ============================================================================
// POLYGON EDGES & CONTAINMENT
// ============================================================================

/// Edges of a convex polygon, normals pointing inward whatever the winding.
///
/// Zero-length edges (repeated vertices) are skipped.
pub fn convex_polygon_edges(polygon: &[Point]) -> Vec<ConvexEdge> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let positive = signed_area_of_points(polygon) > 0.0;
    let mut edges = Vec::with_capacity(n);

    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let e = b - a;
        let len = e.length();
        if len < EPSILON {
            continue;
        }
        let left = Point::new(-e.y / len, e.x / len);
        let inward_normal = if positive { left } else { -left };
        edges.push(ConvexEdge { a, b, inward_normal });
    }

    edges
}

/// Half-plane containment against every edge; points on the boundary count
/// as inside.
#[inline]
pub fn point_in_convex_polygon(point: Point, edges: &[ConvexEdge]) -> bool {
    !edges.is_empty() && edges.iter().all(|e| e.signed_distance(point) >= -EPSILON)
}

// ============================================================================
// LINE CLIPPING (Liang–Barsky)
// ============================================================================

/// Clip segment `a..b` to the polygon, returning the surviving sub-segment.
///
/// An edge parallel to the segment rejects it outright when the segment is
/// outside that half-plane and is otherwise ignored. Results shorter than
/// `EPSILON` (a corner touch) are dropped.
pub fn clip_segment_to_convex(a: Point, b: Point, edges: &[ConvexEdge]) -> Option<(Point, Point)> {
    let d = b - a;
    let len = d.length();
    if len < EPSILON || edges.is_empty() {
        return None;
    }

    let mut t_enter: f64 = 0.0;
    let mut t_exit: f64 = 1.0;

    for edge in edges {
        let num = edge.signed_distance(a);
        let den = d.dot(edge.inward_normal);

        if den.abs() < EPSILON {
            if num < -EPSILON {
                return None;
            }
            continue;
        }

        let t = -num / den;
        if den > 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }

        if t_enter > t_exit {
            return None;
        }
    }

    if (t_exit - t_enter) * len <= EPSILON {
        return None;
    }

    // untouched ends are returned bit-for-bit
    let start = if t_enter <= 0.0 { a } else { a + d * t_enter };
    let end = if t_exit >= 1.0 { b } else { a + d * t_exit };
    Some((start, end))
}

pub fn clip_line(line: &LinePrimitive, edges: &[ConvexEdge]) -> Vec<Fragment> {
    match clip_segment_to_convex(line.a, line.b, edges) {
        Some((a, b)) => vec![Fragment::Line(LineFragment {
            a,
            b,
            style: Style::new(line.color.clone(), line.stroke_width),
        })],
        None => Vec::new(),
    }
}

// ============================================================================
// CIRCLE & ARC CLIPPING
// ============================================================================

/// Angles in `[0, 2*PI)` where the circle crosses the polygon boundary,
/// sorted and deduplicated.
fn boundary_angles(center: Point, radius: f64, edges: &[ConvexEdge]) -> Vec<f64> {
    let mut angles: Vec<f64> = Vec::new();

    for edge in edges {
        let d = edge.b - edge.a;
        for t in line_circle_parameters(edge.a, edge.b, center, radius) {
            if !(-EPSILON..=1.0 + EPSILON).contains(&t) {
                continue;
            }
            let p = edge.a + d * t;
            angles.push(normalize_angle(p.angle_from(center)));
        }
    }

    angles.sort_by(|a, b| a.total_cmp(b));
    angles.dedup_by(|later, earlier| (*later - *earlier).abs() < ANGLE_EPSILON);

    // first and last may be the same crossing seen from either side of 0
    if angles.len() > 1 && angles[0] + TAU - angles[angles.len() - 1] < ANGLE_EPSILON {
        angles.pop();
    }

    angles
}

#[inline]
fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    center + Point::from_angle(angle) * radius
}

/// Merge consecutive kept intervals. Input intervals must be contiguous and
/// increasing.
fn merge_runs(intervals: impl IntoIterator<Item = (f64, f64, bool)>) -> Vec<(f64, f64)> {
    let mut runs: Vec<(f64, f64)> = Vec::new();
    let mut open: Option<(f64, f64)> = None;

    for (t0, t1, keep) in intervals {
        if keep {
            open = Some(match open {
                Some((s, _)) => (s, t1),
                None => (t0, t1),
            });
        } else if let Some(run) = open.take() {
            runs.push(run);
        }
    }
    if let Some(run) = open {
        runs.push(run);
    }

    runs
}

/// Clip a full circle. No crossings means entirely inside (kept whole) or
/// entirely outside; otherwise the inside gaps become arcs, or a circle
/// again when every gap is inside (tangent from within).
pub fn clip_circle(circle: &CirclePrimitive, edges: &[ConvexEdge]) -> Vec<Fragment> {
    let (center, radius) = (circle.center, circle.radius);
    if radius < EPSILON || edges.is_empty() {
        return Vec::new();
    }
    let style = Style::new(circle.color.clone(), circle.stroke_width);
    let whole = || vec![Fragment::Circle(CircleFragment { center, radius, style: style.clone() })];

    let angles = boundary_angles(center, radius, edges);
    if angles.is_empty() {
        return if point_in_convex_polygon(point_at(center, radius, 0.0), edges) {
            whole()
        } else {
            Vec::new()
        };
    }

    let n = angles.len();
    let gap = |k: usize| {
        let a0 = angles[k];
        let a1 = if k + 1 < n { angles[k + 1] } else { angles[0] + TAU };
        (a0, a1)
    };
    let inside: Vec<bool> = (0..n)
        .map(|k| {
            let (a0, a1) = gap(k);
            point_in_convex_polygon(point_at(center, radius, (a0 + a1) / 2.0), edges)
        })
        .collect();

    if inside.iter().all(|&keep| keep) {
        return whole();
    }

    // walk the gaps once around, starting just after an outside gap so that
    // no kept run straddles the starting point
    let first_out = inside.iter().position(|&keep| !keep).unwrap_or(0);
    let walk = (first_out + 1..first_out + 1 + n).map(|idx| {
        let k = idx % n;
        let base = if idx >= n { TAU } else { 0.0 };
        let (a0, a1) = gap(k);
        (a0 + base, a1 + base, inside[k])
    });

    merge_runs(walk)
        .into_iter()
        .map(|(a0, a1)| {
            Fragment::Arc(ArcFragment {
                center,
                radius,
                start: point_at(center, radius, a0),
                end: point_at(center, radius, a1),
                clockwise: true,
                large_arc: a1 - a0 > PI,
                style: style.clone(),
            })
        })
        .collect()
}

/// Clip an arc along its own sweep, splitting wherever it crosses the
/// boundary and keeping the pieces whose midpoint is inside.
pub fn clip_arc(arc: &ArcPrimitive, edges: &[ConvexEdge]) -> Vec<Fragment> {
    let radius = arc_radius(arc);
    let sweep = resolve_arc_sweep(arc);
    if radius < EPSILON || sweep.delta < ANGLE_EPSILON || edges.is_empty() {
        return Vec::new();
    }
    let center = arc.center;
    let style = Style::new(arc.color.clone(), arc.stroke_width);

    let mut breaks: Vec<f64> = boundary_angles(center, radius, edges)
        .into_iter()
        .map(|angle| sweep.travel_to(angle))
        .filter(|t| *t > ANGLE_EPSILON && *t < sweep.delta - ANGLE_EPSILON)
        .collect();
    breaks.sort_by(|a, b| a.total_cmp(b));
    breaks.insert(0, 0.0);
    breaks.push(sweep.delta);

    let intervals = breaks.windows(2).map(|w| {
        let mid = sweep.angle_at((w[0] + w[1]) / 2.0);
        (w[0], w[1], point_in_convex_polygon(point_at(center, radius, mid), edges))
    });

    let end_on_radius = (arc.end.distance(center) - radius).abs() < EPSILON;

    merge_runs(intervals)
        .into_iter()
        .map(|(t0, t1)| {
            let start = if t0 == 0.0 { arc.start } else { point_at(center, radius, sweep.angle_at(t0)) };
            let end = if t1 == sweep.delta && end_on_radius && sweep.delta < TAU - EPSILON {
                arc.end
            } else {
                point_at(center, radius, sweep.angle_at(t1))
            };
            Fragment::Arc(ArcFragment {
                center,
                radius,
                start,
                end,
                clockwise: sweep.clockwise,
                large_arc: t1 - t0 > PI,
                style: style.clone(),
            })
        })
        .collect()
}

/// Clip any primitive to the polygon described by `edges`.
pub fn clip_primitive(primitive: &Primitive, edges: &[ConvexEdge]) -> Vec<Fragment> {
    match primitive {
        Primitive::Line(l) => clip_line(l, edges),
        Primitive::Circle(c) => clip_circle(c, edges),
        Primitive::Arc(a) => clip_arc(a, edges),
    }
}

/// Clip many primitives to one convex polygon.
pub fn clip_primitives_to_polygon(primitives: &[Primitive], polygon: &[Point]) -> Vec<Fragment> {
    let edges = convex_polygon_edges(polygon);
    primitives
        .iter()
        .flat_map(|p| clip_primitive(p, &edges))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
