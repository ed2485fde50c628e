//! Drawn primitives: lines, circles and arcs.
//!
//! Primitives are immutable values. An edit produces a new value with the
//! same `id`; nothing in this crate mutates a primitive in place.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, fixed};

/// Stroke style shared by primitives and the fragments clipped from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub color: String,
    pub stroke_width: f64,
}

impl Style {
    pub fn new(color: impl Into<String>, stroke_width: f64) -> Self {
        Self { color: color.into(), stroke_width }
    }

    /// Grouping key: colour plus quantized stroke width.
    pub fn key(&self) -> String {
        format!("{}|{}", self.color, fixed(self.stroke_width, 4))
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new("#000000", 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePrimitive {
    pub id: String,
    pub a: Point,
    pub b: Point,
    pub color: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CirclePrimitive {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub color: String,
    pub stroke_width: f64,
}

/// An arc stored by its endpoints rather than by angles.
///
/// `clockwise` is the direction of the minor arc from `start` to `end`
/// (after [`crate::arc::normalize_arc`]); `large_arc` selects the
/// complementary major arc, which runs the other way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcPrimitive {
    pub id: String,
    pub center: Point,
    pub start: Point,
    pub end: Point,
    pub clockwise: bool,
    pub large_arc: bool,
    pub color: String,
    pub stroke_width: f64,
}

/// One drawn object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Line(LinePrimitive),
    Circle(CirclePrimitive),
    Arc(ArcPrimitive),
}

/// Discriminant of a [`Primitive`], for counting and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Line,
    Circle,
    Arc,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Line => "line",
            PrimitiveKind::Circle => "circle",
            PrimitiveKind::Arc => "arc",
        }
    }
}

impl LinePrimitive {
    pub fn new(id: impl Into<String>, a: Point, b: Point, style: &Style) -> Self {
        Self {
            id: id.into(),
            a,
            b,
            color: style.color.clone(),
            stroke_width: style.stroke_width,
        }
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.a.midpoint(self.b)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }
}

impl CirclePrimitive {
    pub fn new(id: impl Into<String>, center: Point, radius: f64, style: &Style) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
            color: style.color.clone(),
            stroke_width: style.stroke_width,
        }
    }
}

impl ArcPrimitive {
    pub fn new(
        id: impl Into<String>,
        center: Point,
        start: Point,
        end: Point,
        clockwise: bool,
        large_arc: bool,
        style: &Style,
    ) -> Self {
        Self {
            id: id.into(),
            center,
            start,
            end,
            clockwise,
            large_arc,
            color: style.color.clone(),
            stroke_width: style.stroke_width,
        }
    }
}

impl Primitive {
    pub fn id(&self) -> &str {
        match self {
            Primitive::Line(l) => &l.id,
            Primitive::Circle(c) => &c.id,
            Primitive::Arc(a) => &a.id,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Line(_) => PrimitiveKind::Line,
            Primitive::Circle(_) => PrimitiveKind::Circle,
            Primitive::Arc(_) => PrimitiveKind::Arc,
        }
    }

    pub fn style(&self) -> Style {
        let (color, stroke_width) = match self {
            Primitive::Line(l) => (&l.color, l.stroke_width),
            Primitive::Circle(c) => (&c.color, c.stroke_width),
            Primitive::Arc(a) => (&a.color, a.stroke_width),
        };
        Style::new(color.clone(), stroke_width)
    }

    /// Every point-valued field, in declaration order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Primitive::Line(l) => vec![l.a, l.b],
            Primitive::Circle(c) => vec![c.center],
            Primitive::Arc(a) => vec![a.center, a.start, a.end],
        }
    }
}

impl From<LinePrimitive> for Primitive {
    fn from(line: LinePrimitive) -> Self {
        Primitive::Line(line)
    }
}

impl From<CirclePrimitive> for Primitive {
    fn from(circle: CirclePrimitive) -> Self {
        Primitive::Circle(circle)
    }
}

impl From<ArcPrimitive> for Primitive {
    fn from(arc: ArcPrimitive) -> Self {
        Primitive::Arc(arc)
    }
}
