//! Translation and periodic replication of primitives.

use crate::geometry::Point;
use crate::primitive::{ArcPrimitive, CirclePrimitive, LinePrimitive, Primitive};
use crate::tile::{PatternSize, TileConfig, periodic_neighbor_offsets, tile_basis_vectors};

/// Shift every point-valued field by `offset`; kind, id and style are kept.
pub fn translate_primitive(primitive: &Primitive, offset: Point) -> Primitive {
    match primitive {
        Primitive::Line(l) => Primitive::Line(LinePrimitive {
            a: l.a + offset,
            b: l.b + offset,
            ..l.clone()
        }),
        Primitive::Circle(c) => Primitive::Circle(CirclePrimitive {
            center: c.center + offset,
            ..c.clone()
        }),
        Primitive::Arc(a) => Primitive::Arc(ArcPrimitive {
            center: a.center + offset,
            start: a.start + offset,
            end: a.end + offset,
            ..a.clone()
        }),
    }
}

/// Offsets `col*u + row*v` of every cell in the pattern, row-major.
pub fn pattern_cell_offsets(tile: &TileConfig, pattern: &PatternSize) -> Vec<Point> {
    let (u, v) = tile_basis_vectors(tile);
    let mut offsets = Vec::with_capacity(pattern.cell_count());
    for row in 0..pattern.rows {
        for col in 0..pattern.columns {
            offsets.push(u * col as f64 + v * row as f64);
        }
    }
    offsets
}

/// Naive (unclipped) periodic tiling: every primitive once per pattern cell.
pub fn replicate_pattern(primitives: &[Primitive], tile: &TileConfig, pattern: &PatternSize) -> Vec<Primitive> {
    pattern_cell_offsets(tile, pattern)
        .into_iter()
        .flat_map(|offset| primitives.iter().map(move |p| translate_primitive(p, offset)))
        .collect()
}

/// Every primitive translated by each of the nine neighbour offsets, so
/// geometry that leaves the tile through one edge reappears through the
/// opposite edge.
pub fn periodic_copies(primitives: &[Primitive], tile: &TileConfig) -> Vec<Primitive> {
    periodic_neighbor_offsets(tile)
        .into_iter()
        .flat_map(|offset| primitives.iter().map(move |p| translate_primitive(p, offset)))
        .collect()
}
