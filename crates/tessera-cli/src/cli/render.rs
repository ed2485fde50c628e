//! The `render` command: rasterise an export with resvg.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tessera::{ExportOptions, build_tiled_svg};
use tiny_skia::{Pixmap, Transform};

use super::common::{load_project, next_value, parse_value, resolve_pattern};

const DEFAULT_SCALE: f32 = 2.0;
const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<()> {
    let mut project_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut scale = DEFAULT_SCALE;
    let mut columns: Option<u32> = None;
    let mut rows: Option<u32> = None;
    let mut background = DEFAULT_BACKGROUND.to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output_path = Some(next_value(args, &mut i)?),
            "--scale" => scale = parse_value(args, &mut i)?,
            "--columns" => columns = Some(parse_value(args, &mut i)?),
            "--rows" => rows = Some(parse_value(args, &mut i)?),
            "--background" => background = next_value(args, &mut i)?.to_string(),
            other if other.starts_with('-') => bail!("unknown render option: {}", other),
            other => project_path = Some(other),
        }
        i += 1;
    }

    let project_path = project_path.ok_or_else(|| anyhow!("render needs a project file"))?;
    let output_path = output_path.ok_or_else(|| anyhow!("render needs -o <file.png>"))?;
    if !(scale.is_finite() && scale > 0.0) {
        bail!("--scale must be positive, got {}", scale);
    }

    let project = load_project(Path::new(project_path))?;
    let options = ExportOptions::default()
        .with_pattern(resolve_pattern(&project, columns, rows)?)
        .with_background(background);
    let svg = build_tiled_svg(&project, &options);

    let png = rasterize(&svg, scale)?;
    fs::write(output_path, png).with_context(|| format!("failed to write {}", output_path))?;
    eprintln!("Wrote {}", output_path);
    Ok(())
}

/// Render an SVG document to PNG bytes at `scale` pixels per unit.
pub fn rasterize(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).context("failed to parse exported SVG")?;

    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow!("cannot scale the document by {}", scale))?;
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("cannot allocate a {}x{} image", size.width(), size.height()))?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    tracing::debug!(width = size.width(), height = size.height(), "rasterised export");

    pixmap.encode_png().context("failed to encode PNG")
}
