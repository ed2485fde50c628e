//! Snapping - resolve a raw cursor position to nearby geometry.
//!
//! Candidate lists are rebuilt from the primitive set on every call; nothing
//! is cached between pointer events. Callers resolve in this order:
//!
//! 1. endpoint / vertex snap ([`get_snap_point`])
//! 2. pass-through snap while drawing a line ([`get_line_pass_through_snap`]),
//!    optionally refined onto a segment ([`get_directional_snap_on_segments`])
//! 3. free projection onto a segment ([`get_snap_point_on_segments`])
//! 4. the raw point
//!
//! [`resolve_point_snap`] and [`resolve_line_end_snap`] wrap that order.

use std::collections::HashSet;

use crate::arc::arc_midpoint;
use crate::geometry::{EPSILON, Point, Segment, closest_point_on_segment, dedupe_points};
use crate::intersect::intersections;
use crate::primitive::Primitive;
use crate::tile::{TileConfig, seed_snap_points, tile_polygon};

/// Pass-through candidates must sit strictly inside the drawn segment body.
/// Hits near either end are left to endpoint snapping.
const PASS_THROUGH_MIN_FRACTION: f64 = 0.05;
const PASS_THROUGH_MAX_FRACTION: f64 = 0.98;

/// Gathered candidates for one snapping pass.
#[derive(Debug, Clone, Default)]
pub struct SnapTargets {
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
}

impl SnapTargets {
    pub fn gather(primitives: &[Primitive], tile: &TileConfig) -> Self {
        Self {
            points: gather_snap_points(primitives, tile),
            segments: gather_snap_segments(primitives, tile),
        }
    }
}

/// Which rule produced a snapped point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// A gathered point (endpoint, centre, intersection, seed).
    Point,
    /// Line end rotated so the line passes through a gathered point.
    PassThrough,
    /// Pass-through direction kept, end moved onto a segment.
    DirectionalSegment,
    /// Projection onto the nearest segment.
    Segment,
    /// Nothing in range, the raw point is returned.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub kind: SnapKind,
}

/// A pass-through snap: the adjusted end, and the point it now passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassThroughSnap {
    pub end: Point,
    pub through: Point,
}

// ============================================================================
// GATHERING
// ============================================================================

/// Every point a cursor may snap to.
///
/// Line endpoints and midpoints, circle and arc centres, arc start/end/mid,
/// all pairwise intersections, then the tile seeds. Deduplicated by point key.
pub fn gather_snap_points(primitives: &[Primitive], tile: &TileConfig) -> Vec<Point> {
    let mut points = Vec::new();

    for primitive in primitives {
        match primitive {
            Primitive::Line(line) => {
                points.push(line.a);
                points.push(line.b);
                points.push(line.midpoint());
            }
            Primitive::Circle(circle) => points.push(circle.center),
            Primitive::Arc(arc) => {
                points.push(arc.center);
                points.push(arc.start);
                points.push(arc.end);
                points.push(arc_midpoint(arc));
            }
        }
    }

    points.extend(intersections(primitives));
    points.extend(seed_snap_points(tile));

    dedupe_points(points)
}

/// Every drawn line plus every tile edge, deduplicated regardless of
/// direction.
pub fn gather_snap_segments(primitives: &[Primitive], tile: &TileConfig) -> Vec<Segment> {
    let polygon = tile_polygon(tile);
    let n = polygon.len();

    let lines = primitives.iter().filter_map(|p| match p {
        Primitive::Line(line) => Some(Segment::new(line.a, line.b)),
        _ => None,
    });
    let edges = (0..n).map(|i| Segment::new(polygon[i], polygon[(i + 1) % n]));

    let mut seen = HashSet::new();
    lines.chain(edges).filter(|s| seen.insert(s.key())).collect()
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Nearest candidate within `tolerance` (inclusive).
pub fn get_snap_point(raw: Point, points: &[Point], tolerance: f64) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for p in points {
        let d = raw.distance(*p);
        if d <= tolerance && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, *p));
        }
    }
    best.map(|(_, p)| p)
}

/// Nearest point on any segment within `tolerance`.
pub fn get_snap_point_on_segments(raw: Point, segments: &[Segment], tolerance: f64) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for segment in segments {
        let p = closest_point_on_segment(raw, segment.a, segment.b);
        let d = raw.distance(p);
        if d <= tolerance && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, p));
        }
    }
    best.map(|(_, p)| p)
}

/// Rotate a line being drawn from `start` so it passes exactly through a
/// nearby candidate point, keeping its length.
///
/// Only candidates whose projection lands in the open body of the segment
/// (travel fraction in `(0.05, 0.98)`) and whose perpendicular distance is
/// within `tolerance` are considered; the closest one wins.
pub fn get_line_pass_through_snap(
    start: Point,
    raw_end: Point,
    points: &[Point],
    tolerance: f64,
) -> Option<PassThroughSnap> {
    let dir = raw_end - start;
    let len = dir.length();
    if len < EPSILON {
        return None;
    }
    let unit = dir * (1.0 / len);

    let mut best: Option<(f64, Point)> = None;
    for p in points {
        let rel = *p - start;
        let fraction = rel.dot(unit) / len;
        if fraction <= PASS_THROUGH_MIN_FRACTION || fraction >= PASS_THROUGH_MAX_FRACTION {
            continue;
        }
        let perp = unit.cross(rel).abs();
        if perp <= tolerance && best.is_none_or(|(bd, _)| perp < bd) {
            best = Some((perp, *p));
        }
    }

    let (_, through) = best?;
    let to_through = through - start;
    let through_len = to_through.length();
    if through_len < EPSILON {
        return None;
    }
    Some(PassThroughSnap {
        end: start + to_through * (len / through_len),
        through,
    })
}

/// Where the ray `start -> direction_end` crosses a segment, accepted only
/// within `tolerance` of the raw end. The crossing closest to `raw_end` wins.
pub fn get_directional_snap_on_segments(
    start: Point,
    direction_end: Point,
    raw_end: Point,
    segments: &[Segment],
    tolerance: f64,
) -> Option<Point> {
    let dir = direction_end - start;
    if dir.length() < EPSILON {
        return None;
    }

    let mut best: Option<(f64, Point)> = None;
    for segment in segments {
        let s = segment.b - segment.a;
        let denom = dir.cross(s);
        if denom.abs() < EPSILON {
            continue;
        }
        let qp = segment.a - start;
        let t = qp.cross(s) / denom;
        let u = qp.cross(dir) / denom;
        if t <= EPSILON || !(-EPSILON..=1.0 + EPSILON).contains(&u) {
            continue;
        }

        let hit = start + dir * t;
        let d = hit.distance(raw_end);
        if d <= tolerance && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, hit));
        }
    }
    best.map(|(_, p)| p)
}

/// Snap a free point (vertex drag, circle centre): point, then segment, then raw.
pub fn resolve_point_snap(raw: Point, targets: &SnapTargets, tolerance: f64) -> SnapResult {
    if let Some(point) = get_snap_point(raw, &targets.points, tolerance) {
        return SnapResult { point, kind: SnapKind::Point };
    }
    if let Some(point) = get_snap_point_on_segments(raw, &targets.segments, tolerance) {
        return SnapResult { point, kind: SnapKind::Segment };
    }
    SnapResult { point: raw, kind: SnapKind::None }
}

/// Snap the free end of a line being drawn from `start`.
pub fn resolve_line_end_snap(
    start: Point,
    raw_end: Point,
    targets: &SnapTargets,
    tolerance: f64,
) -> SnapResult {
    if let Some(point) = get_snap_point(raw_end, &targets.points, tolerance) {
        return SnapResult { point, kind: SnapKind::Point };
    }

    if let Some(pass) = get_line_pass_through_snap(start, raw_end, &targets.points, tolerance) {
        if let Some(point) =
            get_directional_snap_on_segments(start, pass.end, raw_end, &targets.segments, tolerance)
        {
            return SnapResult { point, kind: SnapKind::DirectionalSegment };
        }
        return SnapResult { point: pass.end, kind: SnapKind::PassThrough };
    }

    if let Some(point) = get_snap_point_on_segments(raw_end, &targets.segments, tolerance) {
        return SnapResult { point, kind: SnapKind::Segment };
    }
    SnapResult { point: raw_end, kind: SnapKind::None }
}

// ============================================================================
// TESTS
// ============================================================================
