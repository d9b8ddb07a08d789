//! Integration tests for the brd2svg CLI.
//!
//! These tests run the actual binary and verify end-to-end behavior. The
//! output lands alongside the input by default, so each test copies the
//! board fixture into its own scratch directory first.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy the demo board into a fresh scratch directory; returns the board path.
fn scratch_board(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("brd2svg-it-{}", test));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    let board = dir.join("demo.brd");
    fs::copy(fixtures_dir().join("demo.brd"), &board).expect("copy fixture");
    board
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_brd2svg"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_on_board(test: &str, extra: &[&str]) -> (PathBuf, Output) {
    let board = scratch_board(test);
    let subparts = fixtures_dir().join("subparts");
    let mut args = vec![board.to_str().unwrap().to_string()];
    args.push("--subparts".to_string());
    args.push(subparts.to_str().unwrap().to_string());
    args.extend(extra.iter().map(|s| s.to_string()));

    let output = Command::new(env!("CARGO_BIN_EXE_brd2svg"))
        .args(&args)
        .output()
        .expect("Failed to execute command");
    (board, output)
}

#[test]
fn converts_board_to_svg() {
    let (board, output) = run_on_board("convert", &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out_path = board.with_file_name("demo-output.svg");
    let svg = fs::read_to_string(&out_path).expect("output file written next to input");

    assert!(svg.contains("<?xml"), "Should have XML declaration");
    assert!(svg.contains("<svg"), "Should have SVG element");
    assert!(svg.contains(r#"id="breadboard""#), "Should have container group");
    assert!(svg.contains("</svg>"), "Should close SVG element");

    // Four outline wires, flipped into SVG space
    assert_eq!(svg.matches("<line").count(), 4);
    assert!(svg.contains(r#"viewBox="0 0 1000 500""#));
    assert!(svg.contains(r#"width="1in""#));
    assert!(svg.contains(r#"height="0.5in""#));
}

#[test]
fn places_components_with_transforms() {
    let (board, output) = run_on_board("transforms", &[]);
    assert!(output.status.success());

    let svg = fs::read_to_string(board.with_file_name("demo-output.svg")).unwrap();

    // R1 at (500, 250) in a 500-high board: y flips to 250
    assert!(svg.contains(r#"<g id="R1" transform="translate(500,250) rotate(0)">"#));
    // R2 at (200, 100): y flips to 400
    assert!(svg.contains(r#"<g id="R2" transform="translate(200,400) rotate(90)">"#));
    // Artwork embedded without its own root element
    assert!(svg.contains("<rect"));
    assert_eq!(svg.matches("<svg").count(), 1, "subpart <svg> roots must be stripped");
}

#[test]
fn missing_asset_warns_but_succeeds() {
    let (board, output) = run_on_board("missing-asset", &[]);
    assert!(output.status.success(), "missing artwork must not be fatal");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CAP_0603"), "Should warn about the missing package");

    let svg = fs::read_to_string(board.with_file_name("demo-output.svg")).unwrap();
    assert!(!svg.contains(r#"id="C1""#), "Unresolvable component must be skipped");
    assert!(svg.contains(r#"id="R1""#), "Other components still place");
}

#[test]
fn json_summary_is_parseable() {
    let (_, output) = run_on_board("json", &["--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: Value = serde_json::from_str(stdout.trim()).expect("valid JSON summary");

    assert_eq!(summary["outline_wires"], 4);
    assert_eq!(summary["outline_points"], 4);
    assert_eq!(summary["components"], 3);
    assert_eq!(summary["placed"], 2);
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["width"], 1000.0);
    assert_eq!(summary["height"], 500.0);
    assert!(summary["warnings"].as_array().unwrap().len() >= 1);
}

#[test]
fn output_flag_overrides_destination() {
    let board = scratch_board("output-flag");
    let dest = board.with_file_name("custom.svg");
    let subparts = fixtures_dir().join("subparts");

    let output = run(&[
        board.to_str().unwrap(),
        "--subparts",
        subparts.to_str().unwrap(),
        "-o",
        dest.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(dest.exists());
    assert!(!board.with_file_name("demo-output.svg").exists());
}

#[test]
fn rewrite_coords_drops_the_transform_for_unrotated_parts() {
    let (board, output) = run_on_board("rewrite", &["--rewrite-coords"]);
    assert!(output.status.success());

    let svg = fs::read_to_string(board.with_file_name("demo-output.svg")).unwrap();

    // R1 is R0: translation baked into coordinates, no transform attribute
    assert!(svg.contains(r#"<g id="R1">"#));
    assert!(svg.contains(r#"x="510.000""#), "rect x=10 shifted by anchor 500");
    // R2 is R90: falls back to the transform attribute
    assert!(svg.contains(r#"<g id="R2" transform="translate(200,400) rotate(90)">"#));
}

#[test]
fn rejects_non_brd_extension() {
    let output = run(&["board.txt"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Should print usage on bad extension");
}

#[test]
fn missing_file_is_an_error() {
    let output = run(&["no-such-board.brd"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Should print usage for an unreadable input path");
}

#[test]
fn help_shows_usage() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.contains("Usage"));
    assert!(combined.contains("--subparts"));
    assert!(combined.contains("--rewrite-coords"));
}
