//! tessera - export seamless tiled patterns
//!
//! Usage:
//!   tessera export <project> [options]    Write the tiled SVG
//!   tessera render <project> -o out.png   Rasterise the export
//!   tessera stats <project>               Print a JSON report

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

mod cli;

use cli::{cmd_export, cmd_render, cmd_stats};

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("tessera");

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    init_logging(verbose);

    let rest: Vec<String> = args
        .iter()
        .skip(2)
        .filter(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .cloned()
        .collect();

    let result = match args.get(1).map(String::as_str) {
        Some("export") => cmd_export(&rest),
        Some("render") => cmd_render(&rest),
        Some("stats") => cmd_stats(&rest),
        Some("help" | "--help" | "-h") => {
            print_usage(prog);
            return;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            process::exit(1);
        }
        None => {
            print_usage(prog);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with -v.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_usage(prog: &str) {
    eprintln!("tessera - seamless tiled pattern export");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} export <project> [options]", prog);
    eprintln!("  {} render <project> -o <out.png> [options]", prog);
    eprintln!("  {} stats <project> [--columns N] [--rows N]", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Project files are JSON, or YAML when named *.yaml / *.yml.");
    eprintln!();
    eprintln!("Export options:");
    eprintln!("  -o, --output <file>      Output file (- for stdout, default: stdout)");
    eprintln!("  --columns <n>            Pattern columns (default: from project)");
    eprintln!("  --rows <n>               Pattern rows (default: from project)");
    eprintln!("  --single                 Export one tile cell only");
    eprintln!("  --background <color>     Fill the document background");
    eprintln!();
    eprintln!("Render options:");
    eprintln!("  -o, --output <file>      PNG file to write (required)");
    eprintln!("  --scale <k>              Pixels per unit (default: 2)");
    eprintln!("  --columns, --rows        As for export");
    eprintln!("  --background <color>     Background colour (default: #ffffff)");
    eprintln!();
    eprintln!("Global options:");
    eprintln!("  -v, --verbose            Debug logging on stderr (RUST_LOG overrides)");
}
