//! SVG export - clip every pattern cell, dedupe, join, and write a document.
//!
//! Export never relies on SVG clip paths. Each cell is rendered together
//! with the nine periodic neighbour copies of the primitives, every copy is
//! cut to the cell polygon, and the surviving fragments are written out as
//! literal geometry. Output is pen-plotter friendly: same-style line
//! fragments are joined into as few `<path>` elements as possible.
//!
//! ## Pipeline
//!
//! 1. [`clip_pattern_fragments`]: cells x neighbour offsets x primitives
//! 2. [`dedupe_fragments`]: drop copies clipped identically by adjacent cells
//! 3. [`join_line_fragments`]: Euler walk per style
//! 4. [`render_svg`]: header, optional background, elements

use std::fmt::Write as _;

use quick_xml::escape::escape;
use tracing::debug;

use crate::chain::{ChainStats, StyledChain, join_line_fragments};
use crate::clip::{clip_primitive, convex_polygon_edges};
use crate::fragment::{ArcFragment, CircleFragment, Fragment, LineFragment, dedupe_fragments};
use crate::geometry::{Point, format_number};
use crate::primitive::Style;
use crate::project::Project;
use crate::tile::{Bounds, PatternSize, polygon_bounds, tile_polygon, translate_points};
use crate::transform::{pattern_cell_offsets, periodic_copies, translate_primitive};

/// Options for [`build_tiled_svg`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportOptions {
    /// How many cells to render.
    pub pattern: PatternSize,
    /// Fill colour for a background rect covering the document; none when unset.
    pub background: Option<String>,
}

impl ExportOptions {
    pub fn with_pattern(mut self, pattern: PatternSize) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// One element of the exported document, in output order.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportElement {
    /// Joined line fragments.
    Path(StyledChain),
    Arc(ArcFragment),
    Circle(CircleFragment),
}

/// Everything the export computes before any text is written.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub elements: Vec<ExportElement>,
    /// Union of every cell polygon; becomes the viewBox.
    pub bounds: Bounds,
    pub cell_count: usize,
    /// Fragments before cross-cell deduplication.
    pub raw_fragment_count: usize,
    pub fragment_count: usize,
    pub chain_stats: ChainStats,
}

impl ExportPlan {
    pub fn path_count(&self) -> usize {
        self.elements.iter().filter(|e| matches!(e, ExportElement::Path(_))).count()
    }

    pub fn arc_count(&self) -> usize {
        self.elements.iter().filter(|e| matches!(e, ExportElement::Arc(_))).count()
    }

    pub fn circle_count(&self) -> usize {
        self.elements.iter().filter(|e| matches!(e, ExportElement::Circle(_))).count()
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Bounds of all pattern cells, or an empty box at the origin for an empty
/// pattern.
pub fn pattern_bounds(project: &Project, pattern: &PatternSize) -> Bounds {
    let polygon = tile_polygon(&project.tile);
    pattern_cell_offsets(&project.tile, pattern)
        .into_iter()
        .filter_map(|offset| polygon_bounds(&translate_points(&polygon, offset)))
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 })
}

/// Clip the periodic copies of every primitive to every cell of the
/// pattern. The result still contains duplicates along shared edges.
pub fn clip_pattern_fragments(project: &Project, pattern: &PatternSize) -> Vec<Fragment> {
    let polygon = tile_polygon(&project.tile);
    let copies = periodic_copies(&project.primitives, &project.tile);
    let mut fragments = Vec::new();

    for offset in pattern_cell_offsets(&project.tile, pattern) {
        let edges = convex_polygon_edges(&translate_points(&polygon, offset));
        for copy in &copies {
            let placed = translate_primitive(copy, offset);
            fragments.extend(clip_primitive(&placed, &edges));
        }
    }

    fragments
}

/// Run the export pipeline without rendering.
pub fn plan_export(project: &Project, pattern: &PatternSize) -> ExportPlan {
    let raw = clip_pattern_fragments(project, pattern);
    let raw_fragment_count = raw.len();
    let fragments = dedupe_fragments(raw);
    let fragment_count = fragments.len();

    let lines: Vec<LineFragment> = fragments
        .iter()
        .filter_map(|f| match f {
            Fragment::Line(l) => Some(l.clone()),
            _ => None,
        })
        .collect();
    let chains = join_line_fragments(&lines);
    let chain_stats = ChainStats::from_chains(lines.len(), chains.iter().map(|c| &c.points));

    let mut elements: Vec<ExportElement> = chains.into_iter().map(ExportElement::Path).collect();
    for fragment in fragments {
        match fragment {
            Fragment::Line(_) => {}
            Fragment::Arc(a) => elements.push(ExportElement::Arc(a)),
            Fragment::Circle(c) => elements.push(ExportElement::Circle(c)),
        }
    }

    let cell_count = pattern.cell_count();
    debug!(
        cells = cell_count,
        raw_fragments = raw_fragment_count,
        fragments = fragment_count,
        paths = chain_stats.output_chains,
        elements = elements.len(),
        "planned export"
    );

    ExportPlan {
        elements,
        bounds: pattern_bounds(project, pattern),
        cell_count,
        raw_fragment_count,
        fragment_count,
        chain_stats,
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn stroke_attrs(style: &Style) -> String {
    format!(
        "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
        escape(style.color.as_str()),
        format_number(style.stroke_width)
    )
}

fn polyline_d(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{} {} {}", cmd, format_number(p.x), format_number(p.y));
    }
    d
}

/// Write a planned export as a standalone SVG document.
pub fn render_svg(plan: &ExportPlan, background: Option<&str>) -> String {
    let b = &plan.bounds;
    let (w, h) = (format_number(b.width()), format_number(b.height()));
    let (x, y) = (format_number(b.min_x), format_number(b.min_y));

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{x} {y} {w} {h}\">\n"
    );

    if let Some(color) = background {
        let _ = writeln!(
            svg,
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>",
            escape(color)
        );
    }

    for element in &plan.elements {
        match element {
            ExportElement::Path(chain) => {
                let _ = writeln!(
                    svg,
                    "  <path d=\"{}\" {} stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
                    polyline_d(&chain.points),
                    stroke_attrs(&chain.style)
                );
            }
            ExportElement::Arc(arc) => {
                let _ = writeln!(
                    svg,
                    "  <path d=\"{}\" {} stroke-linecap=\"round\"/>",
                    arc.path_d(),
                    stroke_attrs(&arc.style)
                );
            }
            ExportElement::Circle(c) => {
                let _ = writeln!(
                    svg,
                    "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
                    format_number(c.center.x),
                    format_number(c.center.y),
                    format_number(c.radius),
                    stroke_attrs(&c.style)
                );
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Export the project tiled over `options.pattern`.
pub fn build_tiled_svg(project: &Project, options: &ExportOptions) -> String {
    let plan = plan_export(project, &options.pattern);
    render_svg(&plan, options.background.as_deref())
}

/// Export a single tile cell (the tiled export with a 1x1 pattern).
pub fn build_single_tile_svg(project: &Project, background: Option<&str>) -> String {
    let options = ExportOptions {
        pattern: PatternSize::new(1, 1),
        background: background.map(str::to_string),
    };
    build_tiled_svg(project, &options)
}

// ============================================================================
// TESTS
// ============================================================================
