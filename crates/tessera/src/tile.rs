//! Tile geometry: the canonical polygon, its lattice, and fixed snap seeds.
//!
//! Both tile shapes are centred on the origin. The square has half-side
//! `size`; the pointy-top hexagon has circumradius `size` with a vertex
//! pointing up (negative y).

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Shape of the repeated tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileShape {
    #[default]
    Square,
    HexPointy,
}

impl TileShape {
    /// Get shape name as used in project files.
    pub fn name(&self) -> &'static str {
        match self {
            TileShape::Square => "square",
            TileShape::HexPointy => "hexPointy",
        }
    }

    /// Parse a shape name (case-insensitive, `hex` accepted as shorthand).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "square" => Some(TileShape::Square),
            "hexpointy" | "hex" | "hex-pointy" => Some(TileShape::HexPointy),
            _ => None,
        }
    }
}

/// The canonical tile every primitive is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    pub shape: TileShape,
    pub size: f64,
}

impl TileConfig {
    pub fn new(shape: TileShape, size: f64) -> Self {
        Self { shape, size }
    }

    pub fn square(size: f64) -> Self {
        Self::new(TileShape::Square, size)
    }

    pub fn hex(size: f64) -> Self {
        Self::new(TileShape::HexPointy, size)
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self::square(50.0)
    }
}

/// How many times the tile repeats in each lattice direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSize {
    pub columns: u32,
    pub rows: u32,
}

impl PatternSize {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of tile cells in the pattern.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl Default for PatternSize {
    fn default() -> Self {
        Self { columns: 1, rows: 1 }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

// ============================================================================
// TILE POLYGON & LATTICE
// ============================================================================

/// Vertices of the canonical tile polygon.
///
/// Square: `[(-s,-s), (s,-s), (s,s), (-s,s)]`.
/// Hex: six vertices at `-90° + i*60°`, radius `size`.
pub fn tile_polygon(tile: &TileConfig) -> Vec<Point> {
    let s = tile.size;
    match tile.shape {
        TileShape::Square => vec![
            Point::new(-s, -s),
            Point::new(s, -s),
            Point::new(s, s),
            Point::new(-s, s),
        ],
        TileShape::HexPointy => (0..6)
            .map(|i| {
                let angle = (-90.0 + i as f64 * 60.0).to_radians();
                Point::from_angle(angle) * s
            })
            .collect(),
    }
}

/// Lattice vectors `(u, v)` that translate the tile onto its neighbours.
pub fn tile_basis_vectors(tile: &TileConfig) -> (Point, Point) {
    let s = tile.size;
    match tile.shape {
        TileShape::Square => (Point::new(2.0 * s, 0.0), Point::new(0.0, 2.0 * s)),
        TileShape::HexPointy => {
            let w = 3f64.sqrt() * s;
            (Point::new(w, 0.0), Point::new(w / 2.0, 1.5 * s))
        }
    }
}

/// Snap targets present on an empty tile: vertices, edge midpoints, origin.
pub fn seed_snap_points(tile: &TileConfig) -> Vec<Point> {
    let polygon = tile_polygon(tile);
    let n = polygon.len();
    let mut points = polygon.clone();
    points.extend((0..n).map(|i| polygon[i].midpoint(polygon[(i + 1) % n])));
    points.push(Point::ORIGIN);
    points
}

/// The nine lattice offsets `i*u + j*v` for `i, j` in `{-1, 0, 1}`.
pub fn periodic_neighbor_offsets(tile: &TileConfig) -> Vec<Point> {
    let (u, v) = tile_basis_vectors(tile);
    let mut offsets = Vec::with_capacity(9);
    for j in -1..=1 {
        for i in -1..=1 {
            offsets.push(u * i as f64 + v * j as f64);
        }
    }
    offsets
}

/// Bounding box of a point set, `None` when empty.
pub fn polygon_bounds(points: &[Point]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some(Bounds { min_x, min_y, max_x, max_y })
}

/// Shift every point by `offset`.
pub fn translate_points(points: &[Point], offset: Point) -> Vec<Point> {
    points.iter().map(|p| *p + offset).collect()
}

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > point.y) != (yj > point.y))
            && (point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

// ============================================================================
// TESTS
// ============================================================================
