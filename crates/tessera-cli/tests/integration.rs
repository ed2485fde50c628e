//! Integration tests for tessera CLI commands.
//!
//! These tests run the actual binary against the projects in test_assets/.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tessera"))
}

/// Path to a project fixture at the repository root.
fn asset(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path.push("test_assets");
    path.push(name);
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn path_count(svg: &str) -> usize {
    svg.matches("<path ").count()
}

#[test]
fn help_lists_commands() {
    let output = run(&["help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    for command in ["export", "render", "stats"] {
        assert!(stderr.contains(command), "usage should mention '{}'", command);
    }
}

#[test]
fn unknown_command_fails() {
    let output = run(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn export_to_stdout() {
    let project = asset("single_line.json");
    let output = run(&["export", project.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml"), "SVG expected on stdout");
    assert!(stdout.contains("d=\"M -20 0 L 20 0\""));
    assert!(!stdout.contains("clipPath"));
    assert_eq!(path_count(&stdout), 1);
}

#[test]
fn export_to_file_uses_saved_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("edge.svg");
    let project = asset("shared_edge.json");

    let output = run(&["export", project.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "nothing should go to stdout when writing a file");

    let svg = fs::read_to_string(&out).unwrap();
    assert_eq!(path_count(&svg), 3, "shared edge must be drawn once:\n{}", svg);
}

#[test]
fn export_single_and_overrides() {
    let project = asset("shared_edge.json");
    let path = project.to_str().unwrap();

    let single = run(&["export", path, "--single", "--background", "#eeeeee"]);
    assert!(single.status.success());
    let svg = String::from_utf8_lossy(&single.stdout);
    assert_eq!(path_count(&svg), 2, "left and right edges of one cell");
    assert!(svg.contains("fill=\"#eeeeee\""));

    let wide = run(&["export", path, "--columns", "4"]);
    assert!(wide.status.success());
    assert_eq!(path_count(&String::from_utf8_lossy(&wide.stdout)), 5);
}

#[test]
fn export_yaml_project() {
    let project = asset("hex_mixed.yaml");
    let output = run(&["export", project.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let svg = String::from_utf8_lossy(&output.stdout);
    assert!(svg.contains("#e63946"));
    assert!(svg.contains("<circle"), "the centred ring stays whole");
}

#[test]
fn invalid_project_is_rejected() {
    let project = asset("bad_radius.json");
    let output = run(&["export", project.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(stderr.contains("radius"), "{}", stderr);
}

#[test]
fn missing_project_is_rejected() {
    let output = run(&["export", "no/such/project.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn bad_flag_value_is_rejected() {
    let project = asset("single_line.json");
    let output = run(&["export", project.to_str().unwrap(), "--rows", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn stats_reports_pipeline_counts() {
    let project = asset("shared_edge.json");
    let output = run(&["stats", project.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stats should print JSON");
    assert_eq!(report["shape"], "square");
    assert_eq!(report["primitives"]["lines"], 1);
    assert_eq!(report["pattern"]["columns"], 2);
    assert_eq!(report["fragments"]["raw"], 4);
    assert_eq!(report["fragments"]["deduplicated"], 3);
    assert_eq!(report["elements"]["paths"], 3);
}

#[test]
fn render_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tile.png");
    let project = asset("single_line.json");

    let output = run(&["render", project.to_str().unwrap(), "-o", out.to_str().unwrap(), "--scale", "1"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn render_requires_output() {
    let project = asset("single_line.json");
    let output = run(&["render", project.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}
