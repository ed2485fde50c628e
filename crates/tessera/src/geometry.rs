//! Core geometry types for tessera.
//!
//! Everything here works in tile-local units with SVG orientation: x grows
//! to the right and y grows downward, so a positive angle from `atan2`
//! turns clockwise on screen.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance for degeneracy checks: zero-length vectors, parallel lines,
/// coincident circles, tangency.
pub const EPSILON: f64 = 1e-6;

/// Decimal places used for point keys and SVG number output.
pub const KEY_PRECISION: usize = 4;

/// A 2D point (or vector) with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment between two points.
///
/// Used for snap segments and tile edges. Drawn lines are
/// [`crate::primitive::LinePrimitive`], which also carry an id and style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D scalar cross product: `a.x * b.y - a.y * b.x`.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    /// Angle of the vector from `center` to this point, in `(-PI, PI]`.
    #[inline]
    pub fn angle_from(self, center: Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, k: f64) -> Point {
        self.scale(k)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.a.midpoint(self.b)
    }

    /// Key that is identical for a segment and its reversal.
    pub fn key(&self) -> String {
        let ka = point_key(self.a);
        let kb = point_key(self.b);
        if ka <= kb {
            format!("{}|{}", ka, kb)
        } else {
            format!("{}|{}", kb, ka)
        }
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

#[inline]
pub fn add(a: Point, b: Point) -> Point {
    a + b
}

#[inline]
pub fn subtract(a: Point, b: Point) -> Point {
    a - b
}

#[inline]
pub fn scale(p: Point, k: f64) -> Point {
    p.scale(k)
}

#[inline]
pub fn dot(a: Point, b: Point) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.cross(b)
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Clamp `v` into `[lo, hi]`.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Round `v` to `precision` decimal places, folding `-0` into `0`.
pub fn quantize(v: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let q = (v * factor).round() / factor;
    if q == 0.0 { 0.0 } else { q }
}

/// Fixed-precision string for `v`, stable across arithmetic paths that land
/// on the same value.
pub fn fixed(v: f64, precision: usize) -> String {
    format!("{:.*}", precision, quantize(v, precision))
}

/// Deduplication key for a point at [`KEY_PRECISION`] decimals.
///
/// Points computed through different routes (line-circle vs circle-circle,
/// say) that agree to the key precision collapse to the same key.
#[inline]
pub fn point_key(p: Point) -> String {
    point_key_with_precision(p, KEY_PRECISION)
}

pub fn point_key_with_precision(p: Point, precision: usize) -> String {
    format!("{},{}", fixed(p.x, precision), fixed(p.y, precision))
}

/// Shortest decimal form of `v` after quantizing: `10`, `-3.5`, `0.1235`.
pub fn format_number(v: f64) -> String {
    let s = fixed(v, KEY_PRECISION);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
    } else {
        s
    }
}

/// Keep the first point of every distinct [`point_key`], in input order.
pub fn dedupe_points(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let mut seen = std::collections::HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(point_key(*p)))
        .collect()
}

/// Closest point to `p` on segment `a..b` (clamped projection).
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < EPSILON {
        return a;
    }
    let t = clamp((p - a).dot(ab) / len_sq, 0.0, 1.0);
    a + ab * t
}

#[inline]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Normalize an angle into `[0, 2*PI)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let a = angle.rem_euclid(tau);
    if a >= tau { 0.0 } else { a }
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Positive for counter-clockwise winding in y-up coordinates (which reads
/// clockwise on an SVG canvas); negative for the opposite winding.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

// ============================================================================
// TESTS
// ============================================================================
