#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

fn white_bg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_white-bg"))
        .args(args)
        .arg("--no-open")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn success_exits_zero_and_reports_output_once() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.png");
    RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]))
        .save(&input)
        .unwrap();

    let out = white_bg(&[arg(&input)]);
    assert!(out.status.success(), "{out:?}");

    let output = dir.path().join("logo_transparencia.png");
    assert!(output.exists());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("logo_transparencia.png").count(), 1, "{stderr}");
}

#[test]
fn undecodable_input_exits_one_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"not an image").unwrap();

    let out = white_bg(&[arg(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    assert_eq!(entries(dir.path()), vec!["broken.png".to_string()]);
}

#[test]
fn out_of_range_threshold_exits_one_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.png");
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))
        .save(&input)
        .unwrap();

    for threshold in ["-1", "256"] {
        let out = white_bg(&[arg(&input), "-t", threshold]);
        assert_eq!(out.status.code(), Some(1), "threshold {threshold}");
        assert!(String::from_utf8_lossy(&out.stderr).contains("out of range"));
    }
    assert_eq!(entries(dir.path()), vec!["logo.png".to_string()]);
}

#[test]
fn unwritable_output_exits_one() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.png");
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))
        .save(&input)
        .unwrap();
    let target = dir.path().join("missing").join("out.png");

    let out = white_bg(&[arg(&input), "-o", arg(&target)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(entries(dir.path()), vec!["logo.png".to_string()]);
}
