//! Line joining - merge clipped line fragments into continuous paths.
//!
//! Fragments that share endpoints (by rounded point key) are treated as
//! edges of a multigraph and walked Euler-style, so a line that was cut
//! at tile boundaries comes back out as a single polyline. Fewer paths
//! means fewer pen lifts and smaller SVG output.

use std::collections::HashMap;

use crate::fragment::LineFragment;
use crate::geometry::{Point, point_key};
use crate::primitive::Style;

/// A chain of connected points forming a polyline.
pub type Chain = Vec<Point>;

/// A joined polyline and the style shared by all of its segments.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledChain {
    pub points: Chain,
    pub style: Style,
}

/// Endpoint graph over a set of segments.
struct SegmentGraph {
    nodes: Vec<Point>,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl SegmentGraph {
    fn build(segments: &[(Point, Point)]) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut graph = SegmentGraph { nodes: Vec::new(), edges: Vec::new(), adjacency: Vec::new() };

        for &(a, b) in segments {
            let ia = graph.node(&mut index, a);
            let ib = graph.node(&mut index, b);
            if ia == ib {
                // degenerate after rounding
                continue;
            }
            let e = graph.edges.len();
            graph.edges.push((ia, ib));
            graph.adjacency[ia].push(e);
            graph.adjacency[ib].push(e);
        }

        graph
    }

    fn node(&mut self, index: &mut HashMap<String, usize>, p: Point) -> usize {
        *index.entry(point_key(p)).or_insert_with(|| {
            self.nodes.push(p);
            self.adjacency.push(Vec::new());
            self.nodes.len() - 1
        })
    }
}

/// Join segments into as few polylines as a greedy Euler walk finds.
///
/// # Algorithm
///
/// 1. Key every endpoint by its rounded coordinates; equal keys are one node
/// 2. Start at the first node with an odd number of unused edges, or failing
///    that any node with unused edges (closed loops)
/// 3. Follow unused edges until stuck, emitting the visited nodes
/// 4. Repeat until every edge is used
///
/// Node positions are the first point seen for each key.
pub fn chain_segments(segments: &[(Point, Point)]) -> Vec<Chain> {
    let graph = SegmentGraph::build(segments);
    let mut used = vec![false; graph.edges.len()];
    let mut remaining: Vec<usize> = graph.adjacency.iter().map(Vec::len).collect();
    // per-node scan position into its adjacency list
    let mut cursor = vec![0usize; graph.nodes.len()];

    let mut chains = Vec::new();

    loop {
        let start = remaining
            .iter()
            .position(|&d| d % 2 == 1)
            .or_else(|| remaining.iter().position(|&d| d > 0));
        let Some(start) = start else {
            break;
        };

        let mut walk = vec![start];
        let mut current = start;

        loop {
            let adjacent = &graph.adjacency[current];
            while cursor[current] < adjacent.len() && used[adjacent[cursor[current]]] {
                cursor[current] += 1;
            }
            let Some(&edge) = adjacent.get(cursor[current]) else {
                break;
            };

            used[edge] = true;
            let (a, b) = graph.edges[edge];
            remaining[a] -= 1;
            remaining[b] -= 1;
            current = if a == current { b } else { a };
            walk.push(current);
        }

        walk.dedup();
        if walk.len() >= 2 {
            chains.push(walk.into_iter().map(|i| graph.nodes[i]).collect());
        }
    }

    chains
}

/// Join line fragments per style, styles in order of first appearance.
pub fn join_line_fragments(fragments: &[LineFragment]) -> Vec<StyledChain> {
    let mut order: Vec<Style> = Vec::new();
    let mut groups: HashMap<String, Vec<(Point, Point)>> = HashMap::new();

    for f in fragments {
        let key = f.style.key();
        if !groups.contains_key(&key) {
            order.push(f.style.clone());
        }
        groups.entry(key).or_default().push((f.a, f.b));
    }

    let mut out = Vec::new();
    for style in order {
        let Some(segments) = groups.get(&style.key()) else {
            continue;
        };
        for points in chain_segments(segments) {
            out.push(StyledChain { points, style: style.clone() });
        }
    }
    out
}

/// Calculate statistics about chaining results.
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of input line segments
    pub input_lines: usize,
    /// Number of output chains
    pub output_chains: usize,
    /// Average chain length (points per chain)
    pub avg_chain_length: f64,
    /// Longest chain (points)
    pub max_chain_length: usize,
    /// Reduction ratio (1.0 - chains/lines)
    pub reduction_ratio: f64,
}

impl ChainStats {
    pub fn from_chains<'a>(input_count: usize, chains: impl IntoIterator<Item = &'a Chain>) -> Self {
        let lengths: Vec<usize> = chains.into_iter().map(Vec::len).collect();
        let output_chains = lengths.len();
        let total_points: usize = lengths.iter().sum();

        Self {
            input_lines: input_count,
            output_chains,
            avg_chain_length: if output_chains > 0 {
                total_points as f64 / output_chains as f64
            } else {
                0.0
            },
            max_chain_length: lengths.iter().copied().max().unwrap_or(0),
            reduction_ratio: if input_count > 0 {
                1.0 - (output_chains as f64 / input_count as f64)
            } else {
                0.0
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
