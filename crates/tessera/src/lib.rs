//! # tessera
//!
//! Geometry and seamless-tiling engine for repeating line patterns.
//!
//! Primitives (lines, circles, arcs) are drawn inside one canonical tile,
//! a square or a pointy-top hexagon. The tile repeats on a lattice; export
//! clips the periodic copies into every pattern cell, removes fragments
//! produced twice along shared edges, joins line fragments into long paths
//! and writes a self-contained SVG.
//!
//! Everything except [`project`] loading is infallible and pure: degenerate
//! geometry produces empty results rather than errors.

pub mod arc;
pub mod chain;
pub mod clip;
pub mod fragment;
pub mod geometry;
pub mod hit;
pub mod intersect;
pub mod primitive;
pub mod project;
pub mod snap;
pub mod svg;
pub mod tile;
pub mod transform;

// Re-export common types at crate root for convenience.
pub use arc::{
    ARC_SWEEP_TOLERANCE, ArcSweep, arc_midpoint, arc_path_d, arc_radius, is_clockwise_minor_arc,
    is_point_near_arc, is_point_on_arc_sweep, normalize_arc, project_point_to_circle, resolve_arc_sweep,
};
pub use chain::{Chain, ChainStats, StyledChain, chain_segments, join_line_fragments};
pub use clip::{ConvexEdge, clip_primitive, convex_polygon_edges, point_in_convex_polygon};
pub use fragment::{ArcFragment, CircleFragment, Fragment, LineFragment, dedupe_fragments, fragment_key};
pub use geometry::{EPSILON, Point, Segment, format_number, point_key};
pub use hit::hit_test_primitive;
pub use intersect::intersections;
pub use primitive::{ArcPrimitive, CirclePrimitive, LinePrimitive, Primitive, PrimitiveKind, Style};
pub use project::{Project, ProjectError};
pub use snap::{
    SnapKind, SnapResult, SnapTargets, gather_snap_points, gather_snap_segments, get_directional_snap_on_segments,
    get_line_pass_through_snap, get_snap_point, get_snap_point_on_segments, resolve_line_end_snap,
    resolve_point_snap,
};
pub use svg::{ExportElement, ExportOptions, ExportPlan, build_single_tile_svg, build_tiled_svg, plan_export};
pub use tile::{
    Bounds, PatternSize, TileConfig, TileShape, periodic_neighbor_offsets, point_in_polygon, polygon_bounds,
    seed_snap_points, tile_basis_vectors, tile_polygon, translate_points,
};
pub use transform::{periodic_copies, replicate_pattern, translate_primitive};
