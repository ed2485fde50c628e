//! Arc utilities.
//!
//! Arcs are stored as `(center, start, end, clockwise, large_arc)`. The
//! angular sweep is derived on demand:
//!
//! - `clockwise` names the direction of the minor arc (as recomputed by
//!   [`normalize_arc`]),
//! - `large_arc` swaps to the complementary sweep, which runs the opposite
//!   way around.
//!
//! "Clockwise" is screen clockwise in SVG coordinates, i.e. increasing
//! `atan2` angle.

use std::f64::consts::TAU;

use crate::geometry::{EPSILON, Point, format_number, normalize_angle};
use crate::primitive::ArcPrimitive;

/// Angular tolerance used when filtering intersection points onto an arc.
pub const ARC_SWEEP_TOLERANCE: f64 = 1e-4;

/// The sweep an arc actually traces from its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    /// Angle of the start point around the centre.
    pub start_angle: f64,
    /// Direction of travel (true = increasing angle).
    pub clockwise: bool,
    /// Angular travel in radians, in `[0, 2*PI]`.
    pub delta: f64,
}

impl ArcSweep {
    /// Angle reached after travelling `t` radians along the sweep.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        if self.clockwise { self.start_angle + t } else { self.start_angle - t }
    }

    /// Travel from the start angle to `angle` in the sweep direction, in
    /// `[0, 2*PI)`.
    #[inline]
    pub fn travel_to(&self, angle: f64) -> f64 {
        if self.clockwise {
            normalize_angle(angle - self.start_angle)
        } else {
            normalize_angle(self.start_angle - angle)
        }
    }
}

/// Radius of the arc, measured to its start point.
#[inline]
pub fn arc_radius(arc: &ArcPrimitive) -> f64 {
    arc.center.distance(arc.start)
}

/// Move `point` radially onto the circle of `radius` around `center`.
///
/// A point sitting on the centre has no direction; it goes to angle 0.
pub fn project_point_to_circle(point: Point, center: Point, radius: f64) -> Point {
    let dir = point - center;
    let len = dir.length();
    if len < EPSILON {
        return center + Point::new(radius, 0.0);
    }
    center + dir * (radius / len)
}

/// True when clockwise travel from `start` to `end` is the shorter way
/// (ties go to clockwise).
pub fn is_clockwise_minor_arc(center: Point, start: Point, end: Point) -> bool {
    let a0 = start.angle_from(center);
    let a1 = end.angle_from(center);
    let cw_travel = normalize_angle(a1 - a0);
    let ccw_travel = normalize_angle(a0 - a1);
    cw_travel <= ccw_travel
}

/// Re-project both endpoints onto the larger of the two stored radii and
/// recompute `clockwise` as the minor-arc direction. `large_arc` is kept.
pub fn normalize_arc(arc: &ArcPrimitive) -> ArcPrimitive {
    let radius = arc
        .center
        .distance(arc.start)
        .max(arc.center.distance(arc.end));
    if radius < EPSILON {
        return arc.clone();
    }

    let start = project_point_to_circle(arc.start, arc.center, radius);
    let end = project_point_to_circle(arc.end, arc.center, radius);

    ArcPrimitive {
        start,
        end,
        clockwise: is_clockwise_minor_arc(arc.center, start, end),
        ..arc.clone()
    }
}

/// Resolve the traced sweep from the stored flags.
pub fn resolve_arc_sweep(arc: &ArcPrimitive) -> ArcSweep {
    let start_angle = arc.start.angle_from(arc.center);
    let end_angle = arc.end.angle_from(arc.center);
    let minor_delta = if arc.clockwise {
        normalize_angle(end_angle - start_angle)
    } else {
        normalize_angle(start_angle - end_angle)
    };

    if arc.large_arc {
        ArcSweep { start_angle, clockwise: !arc.clockwise, delta: TAU - minor_delta }
    } else {
        ArcSweep { start_angle, clockwise: arc.clockwise, delta: minor_delta }
    }
}

/// True when the angular travel from the arc start to `point` lies within
/// `[-epsilon, delta + epsilon]`.
pub fn is_point_on_arc_sweep(point: Point, arc: &ArcPrimitive, epsilon: f64) -> bool {
    let sweep = resolve_arc_sweep(arc);
    let mut travel = sweep.travel_to(point.angle_from(arc.center));
    // just behind the start reads as almost a full turn
    if travel > TAU - epsilon {
        travel -= TAU;
    }
    travel >= -epsilon && travel <= sweep.delta + epsilon
}

/// Point halfway along the traced sweep.
pub fn arc_midpoint(arc: &ArcPrimitive) -> Point {
    let sweep = resolve_arc_sweep(arc);
    arc.center + Point::from_angle(sweep.angle_at(sweep.delta / 2.0)) * arc_radius(arc)
}

/// Hit test for arcs: on the radius and on the sweep, or close to either
/// endpoint regardless of radius.
pub fn is_point_near_arc(point: Point, arc: &ArcPrimitive, tolerance: f64) -> bool {
    let radial = (point.distance(arc.center) - arc_radius(arc)).abs();
    if radial <= tolerance && is_point_on_arc_sweep(point, arc, ARC_SWEEP_TOLERANCE) {
        return true;
    }
    point.distance(arc.start) <= tolerance || point.distance(arc.end) <= tolerance
}

/// SVG path data for a single arc, e.g. `M 5 0 A 5 5 0 0 1 0 5`.
///
/// A sweep of (nearly) a full turn is split into two half arcs.
pub fn arc_path_d(arc: &ArcPrimitive) -> String {
    let sweep = resolve_arc_sweep(arc);
    let radius = arc_radius(arc);
    let end = arc.center + Point::from_angle(sweep.angle_at(sweep.delta)) * radius;
    svg_arc_d(arc.center, radius, arc.start, end, sweep.delta, sweep.angle_at(sweep.delta / 2.0), sweep.clockwise)
}

/// Shared arc path writer for primitives and clipped fragments.
pub(crate) fn svg_arc_d(
    center: Point,
    radius: f64,
    start: Point,
    end: Point,
    delta: f64,
    mid_angle: f64,
    clockwise: bool,
) -> String {
    let r = format_number(radius);
    let sweep_flag = if clockwise { 1 } else { 0 };

    if delta >= TAU - EPSILON {
        let mid = center + Point::from_angle(mid_angle) * radius;
        return format!(
            "M {} {} A {} {} 0 0 {} {} {} A {} {} 0 0 {} {} {}",
            format_number(start.x),
            format_number(start.y),
            r, r, sweep_flag,
            format_number(mid.x),
            format_number(mid.y),
            r, r, sweep_flag,
            format_number(end.x),
            format_number(end.y),
        );
    }

    let large_flag = if delta > std::f64::consts::PI { 1 } else { 0 };
    format!(
        "M {} {} A {} {} 0 {} {} {} {}",
        format_number(start.x),
        format_number(start.y),
        r, r, large_flag, sweep_flag,
        format_number(end.x),
        format_number(end.y),
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Style;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn arc(start: Point, end: Point, clockwise: bool, large_arc: bool) -> ArcPrimitive {
        ArcPrimitive::new("a", Point::ORIGIN, start, end, clockwise, large_arc, &Style::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quarter_arc_is_clockwise_minor() {
        // (5,0) -> (0,5) is +90deg, clockwise on screen
        assert!(is_clockwise_minor_arc(Point::ORIGIN, Point::new(5.0, 0.0), Point::new(0.0, 5.0)));
        assert!(!is_clockwise_minor_arc(Point::ORIGIN, Point::new(0.0, 5.0), Point::new(5.0, 0.0)));
    }

    #[test]
    fn minor_sweep() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, false);
        let sweep = resolve_arc_sweep(&a);
        assert!(sweep.clockwise);
        assert!(close(sweep.delta, FRAC_PI_2));
    }

    #[test]
    fn large_arc_flips_direction() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, true);
        let sweep = resolve_arc_sweep(&a);
        assert!(!sweep.clockwise);
        assert!(close(sweep.delta, 1.5 * PI));
    }

    #[test]
    fn point_on_sweep() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, false);
        let inside = Point::from_angle(PI / 4.0) * 5.0;
        let outside = Point::from_angle(-PI / 4.0) * 5.0;
        assert!(is_point_on_arc_sweep(inside, &a, 1e-6));
        assert!(!is_point_on_arc_sweep(outside, &a, 1e-6));
        // endpoints themselves are on the sweep
        assert!(is_point_on_arc_sweep(Point::new(5.0, 0.0), &a, 1e-6));
        assert!(is_point_on_arc_sweep(Point::new(0.0, 5.0), &a, 1e-6));

        let major = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, true);
        assert!(!is_point_on_arc_sweep(inside, &major, 1e-6));
        assert!(is_point_on_arc_sweep(outside, &major, 1e-6));
    }

    #[test]
    fn midpoint_of_quarter() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, false);
        let mid = arc_midpoint(&a);
        let expected = Point::from_angle(PI / 4.0) * 5.0;
        assert!(mid.distance(expected) < 1e-9, "got {:?}", mid);
    }

    #[test]
    fn normalize_reprojects_and_recomputes_direction() {
        // end drifted to radius 4 and the stored direction is wrong
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 4.0), false, true);
        let n = normalize_arc(&a);
        assert!(close(n.end.distance(n.center), 5.0));
        assert!(n.end.distance(Point::new(0.0, 5.0)) < 1e-9);
        assert!(n.clockwise, "minor direction should be recomputed");
        assert!(n.large_arc, "large_arc flag is preserved");
    }

    #[test]
    fn normalize_degenerate_is_identity() {
        let a = arc(Point::ORIGIN, Point::ORIGIN, true, false);
        assert_eq!(normalize_arc(&a), a);
    }

    #[test]
    fn project_onto_circle() {
        let p = project_point_to_circle(Point::new(3.0, 4.0), Point::ORIGIN, 10.0);
        assert!(p.distance(Point::new(6.0, 8.0)) < 1e-9);
        let c = project_point_to_circle(Point::ORIGIN, Point::ORIGIN, 2.0);
        assert_eq!(c, Point::new(2.0, 0.0));
    }

    #[test]
    fn near_arc_checks_endpoints_off_radius() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, false);
        assert!(is_point_near_arc(Point::from_angle(PI / 3.0) * 5.2, &a, 0.5));
        assert!(!is_point_near_arc(Point::from_angle(PI) * 5.0, &a, 0.5));
        assert!(is_point_near_arc(Point::new(5.3, 0.1), &a, 0.5));
    }

    #[test]
    fn path_data_for_quarter() {
        let a = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, false);
        assert_eq!(arc_path_d(&a), "M 5 0 A 5 5 0 0 1 0 5");
        let major = arc(Point::new(5.0, 0.0), Point::new(0.0, 5.0), true, true);
        assert_eq!(arc_path_d(&major), "M 5 0 A 5 5 0 1 0 0 5");
    }

    #[test]
    fn full_turn_is_split() {
        let a = arc(Point::new(5.0, 0.0), Point::new(5.0, 0.0), true, true);
        let d = arc_path_d(&a);
        assert_eq!(d.matches('A').count(), 2, "full sweep needs two arc commands: {}", d);
    }
}
