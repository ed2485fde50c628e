//! The `export` command.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use tessera::{ExportOptions, build_single_tile_svg, build_tiled_svg};

use super::common::{load_project, next_value, parse_value, resolve_pattern, write_output};

/// Execute the export command.
pub fn cmd_export(args: &[String]) -> Result<()> {
    let mut project_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut columns: Option<u32> = None;
    let mut rows: Option<u32> = None;
    let mut single = false;
    let mut background: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output_path = Some(next_value(args, &mut i)?),
            "--columns" => columns = Some(parse_value(args, &mut i)?),
            "--rows" => rows = Some(parse_value(args, &mut i)?),
            "--single" => single = true,
            "--background" => background = Some(next_value(args, &mut i)?.to_string()),
            other if other.starts_with('-') => bail!("unknown export option: {}", other),
            other => project_path = Some(other),
        }
        i += 1;
    }

    let project_path = project_path.ok_or_else(|| anyhow!("export needs a project file"))?;
    let project = load_project(Path::new(project_path))?;
    eprintln!(
        "Loaded {} primitives ({} tile, size {})",
        project.primitives.len(),
        project.tile.shape.name(),
        project.tile.size
    );

    let svg = if single {
        build_single_tile_svg(&project, background.as_deref())
    } else {
        let mut options = ExportOptions::default().with_pattern(resolve_pattern(&project, columns, rows)?);
        if let Some(color) = background {
            options = options.with_background(color);
        }
        build_tiled_svg(&project, &options)
    };

    write_output(output_path, svg.as_bytes())
}
