//! Render fragments: the clipped, export-only pieces of primitives.
//!
//! Fragments carry their own style and are never written back to a
//! project. Arc fragments store the sweep they trace directly (SVG
//! semantics), unlike [`crate::primitive::ArcPrimitive`].

use std::collections::HashSet;

use crate::arc::svg_arc_d;
use crate::geometry::{EPSILON, KEY_PRECISION, Point, fixed, point_key};
use crate::primitive::Style;

#[derive(Debug, Clone, PartialEq)]
pub struct LineFragment {
    pub a: Point,
    pub b: Point,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleFragment {
    pub center: Point,
    pub radius: f64,
    pub style: Style,
}

/// A piece of a circle traced from `start` to `end`.
///
/// `clockwise` is the direction actually travelled and `large_arc` is set
/// when the travel exceeds half a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcFragment {
    pub center: Point,
    pub radius: f64,
    pub start: Point,
    pub end: Point,
    pub clockwise: bool,
    pub large_arc: bool,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Line(LineFragment),
    Circle(CircleFragment),
    Arc(ArcFragment),
}

impl Fragment {
    pub fn style(&self) -> &Style {
        match self {
            Fragment::Line(f) => &f.style,
            Fragment::Circle(f) => &f.style,
            Fragment::Arc(f) => &f.style,
        }
    }
}

impl ArcFragment {
    /// Angular travel from start to end in the fragment's direction.
    pub fn delta(&self) -> f64 {
        let a0 = self.start.angle_from(self.center);
        let a1 = self.end.angle_from(self.center);
        let travel = if self.clockwise {
            crate::geometry::normalize_angle(a1 - a0)
        } else {
            crate::geometry::normalize_angle(a0 - a1)
        };
        // coincident endpoints: full turn for a large arc, nothing otherwise
        if travel < EPSILON && self.large_arc { std::f64::consts::TAU } else { travel }
    }

    /// SVG path data for this fragment.
    pub fn path_d(&self) -> String {
        let delta = self.delta();
        let a0 = self.start.angle_from(self.center);
        let mid_angle = if self.clockwise { a0 + delta / 2.0 } else { a0 - delta / 2.0 };
        svg_arc_d(self.center, self.radius, self.start, self.end, delta, mid_angle, self.clockwise)
    }
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

fn ordered_pair(a: String, b: String) -> (String, String) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Order-independent identity of a fragment, including its style.
///
/// Lines ignore direction. Arcs are rewritten into their clockwise form, so
/// an arc and its reversed mirror (endpoints swapped, direction flipped)
/// share a key.
pub fn fragment_key(fragment: &Fragment) -> String {
    let style = fragment.style().key();
    match fragment {
        Fragment::Line(f) => {
            let (a, b) = ordered_pair(point_key(f.a), point_key(f.b));
            format!("line|{}|{}|{}", a, b, style)
        }
        Fragment::Circle(f) => format!(
            "circle|{}|{}|{}",
            point_key(f.center),
            fixed(f.radius, KEY_PRECISION),
            style
        ),
        Fragment::Arc(f) => {
            let (from, to) = if f.clockwise { (f.start, f.end) } else { (f.end, f.start) };
            format!(
                "arc|{}|{}|{}|{}|{}|{}",
                point_key(f.center),
                fixed(f.radius, KEY_PRECISION),
                point_key(from),
                point_key(to),
                f.large_arc,
                style
            )
        }
    }
}

/// Keep the first fragment of every distinct [`fragment_key`], in order.
pub fn dedupe_fragments(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut seen = HashSet::new();
    fragments
        .into_iter()
        .filter(|f| seen.insert(fragment_key(f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ax: f64, ay: f64, bx: f64, by: f64, color: &str) -> Fragment {
        Fragment::Line(LineFragment {
            a: Point::new(ax, ay),
            b: Point::new(bx, by),
            style: Style::new(color, 1.0),
        })
    }

    #[test]
    fn reversed_lines_collapse() {
        let out = dedupe_fragments(vec![
            line(0.0, 0.0, 10.0, 0.0, "#000"),
            line(10.0, 0.0, 0.0, 0.000_000_1, "#000"),
        ]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn style_separates_fragments() {
        let out = dedupe_fragments(vec![
            line(0.0, 0.0, 10.0, 0.0, "#000"),
            line(0.0, 0.0, 10.0, 0.0, "#f00"),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn mirrored_arcs_collapse() {
        let style = Style::default();
        let forward = Fragment::Arc(ArcFragment {
            center: Point::ORIGIN,
            radius: 5.0,
            start: Point::new(5.0, 0.0),
            end: Point::new(0.0, 5.0),
            clockwise: true,
            large_arc: false,
            style: style.clone(),
        });
        let mirrored = Fragment::Arc(ArcFragment {
            center: Point::ORIGIN,
            radius: 5.0,
            start: Point::new(0.0, 5.0),
            end: Point::new(5.0, 0.0),
            clockwise: false,
            large_arc: false,
            style: style.clone(),
        });
        let other_side = Fragment::Arc(ArcFragment {
            center: Point::ORIGIN,
            radius: 5.0,
            start: Point::new(0.0, 5.0),
            end: Point::new(5.0, 0.0),
            clockwise: true,
            large_arc: true,
            style,
        });
        assert_eq!(fragment_key(&forward), fragment_key(&mirrored));
        assert_eq!(dedupe_fragments(vec![forward, mirrored, other_side]).len(), 2);
    }

    #[test]
    fn circles_by_center_and_radius() {
        let c = |r: f64| {
            Fragment::Circle(CircleFragment { center: Point::new(1.0, 1.0), radius: r, style: Style::default() })
        };
        assert_eq!(dedupe_fragments(vec![c(2.0), c(2.000_000_01), c(3.0)]).len(), 2);
    }

    #[test]
    fn arc_fragment_delta() {
        let f = ArcFragment {
            center: Point::ORIGIN,
            radius: 5.0,
            start: Point::new(5.0, 0.0),
            end: Point::new(0.0, 5.0),
            clockwise: false,
            large_arc: true,
            style: Style::default(),
        };
        assert!((f.delta() - 1.5 * std::f64::consts::PI).abs() < 1e-9);
        assert_eq!(f.path_d(), "M 5 0 A 5 5 0 1 0 0 5");
    }
}
