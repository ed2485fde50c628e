//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tessera::{PatternSize, Project};

/// Load a project from JSON, or YAML for `.yaml`/`.yml` files.
pub fn load_project(path: &Path) -> Result<Project> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("yaml" | "yml")
    );

    let project = if is_yaml {
        let project: Project =
            serde_yaml::from_str(&text).with_context(|| format!("invalid project YAML in {}", path.display()))?;
        project.validate().with_context(|| format!("invalid project {}", path.display()))?;
        project
    } else {
        Project::from_json(&text).with_context(|| format!("invalid project {}", path.display()))?
    };

    tracing::debug!(
        path = %path.display(),
        shape = project.tile.shape.name(),
        primitives = project.primitives.len(),
        "loaded project"
    );
    Ok(project)
}

/// Take the value following flag `args[*i]`, advancing `i`.
pub fn next_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i).map(String::as_str).ok_or_else(|| anyhow!("{} expects a value", flag))
}

/// Parse the value following flag `args[*i]`.
pub fn parse_value<T>(args: &[String], i: &mut usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let flag = args[*i].clone();
    let raw = next_value(args, i)?;
    raw.parse().map_err(|e| anyhow!("invalid value '{}' for {}: {}", raw, flag, e))
}

/// Pattern size from `--columns`/`--rows`, falling back to the project's own.
pub fn resolve_pattern(project: &Project, columns: Option<u32>, rows: Option<u32>) -> Result<PatternSize> {
    let pattern = PatternSize::new(
        columns.unwrap_or(project.pattern.columns),
        rows.unwrap_or(project.pattern.rows),
    );
    if pattern.columns == 0 || pattern.rows == 0 {
        bail!("pattern must be at least 1x1, got {}x{}", pattern.columns, pattern.rows);
    }
    Ok(pattern)
}

/// Write to a file, or stdout when `path` is `None` or `-`.
pub fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content).context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path))?;
            eprintln!("Wrote {}", path);
        }
    }
    Ok(())
}
