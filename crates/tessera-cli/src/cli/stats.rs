//! The `stats` command: a JSON report of what an export would contain.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use serde::Serialize;
use tessera::{ExportPlan, PatternSize, PrimitiveKind, Project, SnapTargets, intersections, plan_export};

use super::common::{load_project, parse_value, resolve_pattern};

#[derive(Serialize)]
struct JsonPattern {
    columns: u32,
    rows: u32,
}

#[derive(Serialize)]
struct JsonPrimitiveCounts {
    lines: usize,
    circles: usize,
    arcs: usize,
}

#[derive(Serialize)]
struct JsonFragmentCounts {
    raw: usize,
    deduplicated: usize,
}

#[derive(Serialize)]
struct JsonElementCounts {
    paths: usize,
    arcs: usize,
    circles: usize,
}

/// Chaining statistics for JSON output.
#[derive(Serialize)]
struct JsonChainStats {
    input_lines: usize,
    output_chains: usize,
    reduction_percent: f64,
    avg_chain_length: f64,
    max_chain_length: usize,
}

#[derive(Serialize)]
struct JsonReport {
    shape: &'static str,
    size: f64,
    pattern: JsonPattern,
    primitives: JsonPrimitiveCounts,
    intersections: usize,
    snap_points: usize,
    snap_segments: usize,
    fragments: JsonFragmentCounts,
    elements: JsonElementCounts,
    chain_stats: JsonChainStats,
}

fn build_report(project: &Project, pattern: PatternSize, plan: &ExportPlan) -> JsonReport {
    let count = |kind: PrimitiveKind| project.primitives.iter().filter(|p| p.kind() == kind).count();
    let targets = SnapTargets::gather(&project.primitives, &project.tile);
    let stats = &plan.chain_stats;

    JsonReport {
        shape: project.tile.shape.name(),
        size: project.tile.size,
        pattern: JsonPattern { columns: pattern.columns, rows: pattern.rows },
        primitives: JsonPrimitiveCounts {
            lines: count(PrimitiveKind::Line),
            circles: count(PrimitiveKind::Circle),
            arcs: count(PrimitiveKind::Arc),
        },
        intersections: intersections(&project.primitives).len(),
        snap_points: targets.points.len(),
        snap_segments: targets.segments.len(),
        fragments: JsonFragmentCounts { raw: plan.raw_fragment_count, deduplicated: plan.fragment_count },
        elements: JsonElementCounts {
            paths: plan.path_count(),
            arcs: plan.arc_count(),
            circles: plan.circle_count(),
        },
        chain_stats: JsonChainStats {
            input_lines: stats.input_lines,
            output_chains: stats.output_chains,
            reduction_percent: stats.reduction_ratio * 100.0,
            avg_chain_length: stats.avg_chain_length,
            max_chain_length: stats.max_chain_length,
        },
    }
}

/// Execute the stats command.
pub fn cmd_stats(args: &[String]) -> Result<()> {
    let mut project_path: Option<&str> = None;
    let mut columns: Option<u32> = None;
    let mut rows: Option<u32> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--columns" => columns = Some(parse_value(args, &mut i)?),
            "--rows" => rows = Some(parse_value(args, &mut i)?),
            other if other.starts_with('-') => bail!("unknown stats option: {}", other),
            other => project_path = Some(other),
        }
        i += 1;
    }

    let project_path = project_path.ok_or_else(|| anyhow!("stats needs a project file"))?;
    let project = load_project(Path::new(project_path))?;
    let pattern = resolve_pattern(&project, columns, rows)?;
    let plan = plan_export(&project, &pattern);

    let report = build_report(&project, pattern, &plan);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
