//! Convert command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use brd2svg::{
    BoardOutline, ComposeConfig, Part, PlacementStrategy, compose, parse_board, MM_TO_MIL,
};

use super::resolver::ArtworkResolver;

const DEFAULT_SUBPARTS_DIR: &str = "subparts/breadboard";

/// Run summary in JSON output format.
#[derive(Serialize)]
struct JsonSummary {
    input: String,
    output: String,
    outline_points: usize,
    outline_wires: usize,
    skipped_wires: usize,
    components: usize,
    placed: usize,
    skipped: usize,
    width: f64,
    height: f64,
    warnings: Vec<String>,
}

/// Execute the convert command.
pub fn cmd_convert(args: &[String]) {
    let mut input_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut subparts_dir = DEFAULT_SUBPARTS_DIR;
    let mut scale = 1.0_f64;
    let mut margin = 0.0_f64;
    let mut strategy = PlacementStrategy::TransformAttr;
    let mut json_output = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--subparts" => {
                i += 1;
                if i < args.len() {
                    subparts_dir = &args[i];
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(&args[i]);
                }
            }
            "--scale" => {
                i += 1;
                if i < args.len() {
                    scale = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid scale factor: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--mm" => {
                scale = MM_TO_MIL;
            }
            "--margin" => {
                i += 1;
                if i < args.len() {
                    margin = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid margin: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--rewrite-coords" => {
                strategy = PlacementStrategy::RewriteCoords;
            }
            "--json" => {
                json_output = true;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            path if !path.starts_with('-') => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
            unknown => {
                eprintln!("Unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: board file required");
        print_usage();
        std::process::exit(1);
    });

    if !input_path.to_lowercase().ends_with(".brd") {
        eprintln!("Error: expected a .brd file, got '{}'", input_path);
        print_usage();
        std::process::exit(1);
    }

    let input = Path::new(input_path);
    let content = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading {}: {}", input_path, err);
            print_usage();
            std::process::exit(1);
        }
    };

    let board = match parse_board(&content) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Error parsing {}: {}", input_path, err);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Loaded {}: {} outline wires, {} components",
        input_path,
        board.segments.len(),
        board.components.len()
    );

    let outline = BoardOutline::from_segments(board.segments.clone());
    if outline.is_none() {
        eprintln!("No board outline found; using default canvas");
    }

    let mut resolver = ArtworkResolver::new(Path::new(subparts_dir));
    let parts: Vec<Part> = board
        .components
        .iter()
        .map(|component| Part {
            component: component.clone(),
            artwork: resolver.resolve(&component.package).cloned(),
        })
        .collect();

    let config = ComposeConfig { scale, margin, strategy };
    let composite = match compose(outline.as_ref(), &parts, &config) {
        Ok(composite) => composite,
        Err(err) => {
            eprintln!("Error assembling SVG: {}", err);
            std::process::exit(1);
        }
    };

    let output = match output_path {
        Some(path) => PathBuf::from(path),
        None => default_output_path(input),
    };

    if let Err(err) = fs::write(&output, &composite.svg) {
        eprintln!("Error writing {}: {}", output.display(), err);
        std::process::exit(1);
    }

    let mut warnings = board.warnings.clone();
    warnings.extend(composite.warnings.iter().cloned());

    if json_output {
        let summary = JsonSummary {
            input: input_path.to_string(),
            output: output.display().to_string(),
            outline_points: outline.as_ref().map_or(0, |o| o.points().len()),
            outline_wires: board.segments.len(),
            skipped_wires: board.skipped_wires,
            components: board.components.len(),
            placed: composite.placed.len(),
            skipped: composite.skipped.len(),
            width: composite.extents.width(),
            height: composite.extents.height(),
            warnings,
        };
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error serializing summary: {}", err);
                std::process::exit(1);
            }
        }
    } else {
        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }
        eprintln!(
            "Placed {} of {} components ({}x{} canvas)",
            composite.placed.len(),
            board.components.len(),
            composite.extents.width(),
            composite.extents.height()
        );
        eprintln!("Wrote: {}", output.display());
    }
}

/// Default output path: `<basename>-output.svg` alongside the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map_or_else(
        || "board".to_string(),
        |s| s.to_string_lossy().into_owned(),
    );
    input.with_file_name(format!("{}-output.svg", stem))
}

pub fn print_usage() {
    eprintln!("Usage: brd2svg <input.brd> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>   Output file (default: <input>-output.svg)");
    eprintln!("  --subparts <dir>      Artwork directory (default: {})", DEFAULT_SUBPARTS_DIR);
    eprintln!("  --scale <factor>      Source-unit to output-unit factor (default: 1)");
    eprintln!("  --mm                  Treat source units as mm (scale by {})", MM_TO_MIL);
    eprintln!("  --margin <n>          Canvas margin in output units (default: 0)");
    eprintln!("  --rewrite-coords      Bake placement into artwork coordinates");
    eprintln!("  --json                Print the run summary as JSON");
    eprintln!("  -h, --help            Show this help");
}

// ============================================================================
// TESTS
// ============================================================================
