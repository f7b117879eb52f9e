//! End-to-end runs of the `toonify` binary.

use std::path::Path;
use std::process::{Command, Output};
use toon_core::RgbImage;

fn toonify(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toonify"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn toonify")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn portrait(path: &Path) {
    let image = RgbImage::from_fn(40, 30, |x, y| {
        if x < 20 {
            [200, 150, (y * 4) as u8]
        } else {
            [30, 60, 90]
        }
    });
    toon_io::write(path, &image).unwrap();
}

#[test]
fn missing_input_reports_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.jpg");
    let output = dir.path().join("out.jpg");

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--no-preview",
    ]);

    assert_eq!(result.status.code(), Some(1));
    assert!(stdout(&result).contains(&format!("Error: Could not read image at {}", input.display())));
    assert!(!output.exists());
}

#[test]
fn undecodable_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.jpg");
    std::fs::write(&input, b"this is not a jpeg").unwrap();
    let output = dir.path().join("out.png");

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--no-preview",
    ]);

    assert!(!result.status.success());
    assert!(stdout(&result).starts_with("Error: Could not read image at"));
    assert!(!output.exists());
}

#[test]
fn png_roundtrip_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cartoon.png");
    portrait(&input);

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--passes",
        "2",
        "--no-preview",
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(
        stdout(&result).trim(),
        format!("Success! Cartoonified image saved as: {}", output.display())
    );
    let cartoon = toon_io::read(&output).unwrap();
    assert_eq!(cartoon.dimensions(), (40, 30));
}

#[test]
fn jpeg_output_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cartoon.jpg");
    portrait(&input);
    std::fs::write(&output, b"stale").unwrap();

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--passes",
        "1",
        "--quality",
        "80",
        "--no-preview",
    ]);

    assert!(result.status.success());
    assert_eq!(toon_io::read(&output).unwrap().dimensions(), (40, 30));
}

#[test]
fn even_block_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cartoon.png");
    portrait(&input);

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--block-size",
        "8",
        "--no-preview",
    ]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("block size"));
    assert!(!output.exists());
}

#[test]
fn unknown_output_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cartoon.bmp");
    portrait(&input);

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--passes",
        "0",
        "--no-preview",
    ]);

    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn extreme_threshold_parameters_do_not_crash() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cartoon.png");
    portrait(&input);

    let result = toonify(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--passes",
        "0",
        "--block-size",
        "5001",
        "--threshold-c",
        "-1e10",
        "--no-preview",
    ]);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    // Every pixel falls below mean + 1e10, so the whole mask is edge
    let cartoon = toon_io::read(&output).unwrap();
    assert!(cartoon.data().iter().all(|&v| v == 0));
}
