//! Integration tests for the penscript CLI
//!
//! Launches the compiled binary against temporary glyph directories and
//! checks rendering output, catalog inspection, and error reporting.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("penscript");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

fn run_cli_command(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

/// Writes lowercase a-c glyph PNGs into a fresh temp directory.
fn setup_glyph_dir() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    for key in ['a', 'b', 'c'] {
        let img = RgbaImage::from_pixel(40, 60, Rgba([30, 30, 90, 200]));
        img.save(dir.path().join(format!("{key}.png")))
            .expect("Failed to write glyph PNG");
    }
    dir
}

fn assert_pdf_exists_and_valid(path: &Path) {
    assert!(path.exists(), "PDF file should exist: {}", path.display());
    let content = fs::read(path).expect("Failed to read PDF file");
    assert!(content.len() > 100, "PDF file should have content");
    assert!(
        content.starts_with(b"%PDF-"),
        "File should start with PDF header"
    );
}

#[test]
fn test_cli_render_with_text_flag() {
    let glyphs = setup_glyph_dir();
    let out_dir = tempdir().unwrap();
    let output_path = out_dir.path().join("note.pdf");

    let output = run_cli_command(&[
        "render",
        "--glyphs",
        glyphs.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--text",
        "abc cba",
    ])
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_pdf_exists_and_valid(&output_path);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rendered 1 page(s)"));
}

#[test]
fn test_cli_render_from_input_file() {
    let glyphs = setup_glyph_dir();
    let out_dir = tempdir().unwrap();
    let input_path = out_dir.path().join("input.txt");
    let output_path = out_dir.path().join("note.pdf");

    fs::write(&input_path, "ab\ncba abc").unwrap();

    let output = run_cli_command(&[
        "render",
        "--glyphs",
        glyphs.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--input",
        input_path.to_str().unwrap(),
    ])
    .unwrap();

    assert!(output.status.success());
    assert_pdf_exists_and_valid(&output_path);
}

#[test]
fn test_cli_render_with_layout_flags() {
    let glyphs = setup_glyph_dir();
    let out_dir = tempdir().unwrap();
    let output_path = out_dir.path().join("scaled.pdf");

    let output = run_cli_command(&[
        "render",
        "--glyphs",
        glyphs.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--text",
        "abc",
        "--font-size",
        "2.0",
        "--line-height",
        "120",
    ])
    .unwrap();

    assert!(output.status.success());
    assert_pdf_exists_and_valid(&output_path);
}

#[test]
fn test_cli_render_without_text_or_input_fails() {
    let glyphs = setup_glyph_dir();
    let out_dir = tempdir().unwrap();
    let output_path = out_dir.path().join("never.pdf");

    let output = run_cli_command(&[
        "render",
        "--glyphs",
        glyphs.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ])
    .unwrap();

    assert!(!output.status.success());
    assert!(!output_path.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--text") && stderr.contains("--input"));
}

#[test]
fn test_cli_render_missing_glyph_dir_fails() {
    let out_dir = tempdir().unwrap();
    let output_path = out_dir.path().join("never.pdf");
    let missing = out_dir.path().join("no-such-dir");

    let output = run_cli_command(&[
        "render",
        "--glyphs",
        missing.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--text",
        "abc",
    ])
    .unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load glyphs"));
}

#[test]
fn test_cli_glyphs_summary() {
    let glyphs = setup_glyph_dir();

    let output = run_cli_command(&["glyphs", glyphs.path().to_str().unwrap()]).unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Glyphs: 3"));
    assert!(stdout.contains("Max height: 60 px"));
    assert!(stdout.contains("Keys: abc"));
}

#[test]
fn test_cli_glyphs_empty_dir() {
    let dir = tempdir().unwrap();

    let output = run_cli_command(&["glyphs", dir.path().to_str().unwrap()]).unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No glyphs found"));
}

#[test]
fn test_cli_help() {
    let output = run_cli_command(&["--help"]).unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("glyphs"));
}
