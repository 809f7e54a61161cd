//! CLI integration tests for `svg2clip convert`, `sample` and `init`.
//!
//! Each test builds a frame directory in a temp dir and runs the binary
//! there, checking the exit status, the status line and the written file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};
use tempfile::TempDir;

const SUCCESS: &str = "Output file successfully generated";

/// Run svg2clip in `dir` and return (stdout, stderr, exit code).
fn run(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_svg2clip"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute svg2clip");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

/// Wrap path data in a traced-frame document.
fn frame(paths: &[&str]) -> String {
    let mut svg = String::from(
        "<?xml version=\"1.0\" standalone=\"no\"?>\n\
         <svg version=\"1.0\" xmlns=\"http://www.w3.org/2000/svg\"\n \
         width=\"1440.000000pt\" height=\"1080.000000pt\" viewBox=\"0 0 1440.000000 1080.000000\">\n\
         <g transform=\"translate(0.000000,1080.000000) scale(0.100000,-0.100000)\"\n\
         fill=\"#000000\" stroke=\"none\">\n",
    );
    for d in paths {
        svg.push_str(&format!("<path d=\"{}\"/>\n", d));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Three numbered frames in `dir/svgs`.
fn write_frames(dir: &Path) -> PathBuf {
    let svgs = dir.join("svgs");
    fs::create_dir_all(&svgs).unwrap();
    fs::write(
        svgs.join("0001.svg"),
        frame(&["M7200 5400 l200 0 l0 200 c50 50 100 50 150 0z", "M3000 3000 l-100 -100 -100 -100"]),
    )
    .unwrap();
    fs::write(svgs.join("0002.svg"), frame(&["M7250 5450 l200 0 m400 400 l10 10 10 10"])).unwrap();
    fs::write(svgs.join("0003.svg"), frame(&["M0 0 l7200 5400 l100 100"])).unwrap();
    svgs
}

fn digest(path: &Path) -> Vec<u8> {
    Sha256::digest(fs::read(path).unwrap()).to_vec()
}

#[test]
fn test_convert_default_script() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (stdout, stderr, code) = run(temp.path(), &["convert", "--last", "3", "--quiet"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.trim(), SUCCESS);

    let script = fs::read_to_string(temp.path().join("TraceClip.cs")).unwrap();
    assert!(script.starts_with("using MelonLoader;"));
    assert!(script.contains("int fps = 1024;"));
    assert!(script.contains("int eocMargin = 4;"));
}

#[test]
fn test_convert_anim_from_output_extension() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (stdout, _, code) =
        run(temp.path(), &["convert", "--last", "3", "--output", "clip.anim", "--fps", "60"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(SUCCESS));

    let clip = fs::read_to_string(temp.path().join("clip.anim")).unwrap();
    assert!(clip.starts_with("%YAML 1.1\n"));
    assert!(clip.contains("  m_SampleRate: 60\n"));
}

#[test]
fn test_convert_is_deterministic() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    for name in ["a.cs", "b.cs", "a.anim", "b.anim"] {
        let (_, stderr, code) = run(temp.path(), &["convert", "--last", "3", "-q", "-o", name]);
        assert_eq!(code, 0, "stderr: {}", stderr);
    }
    assert_eq!(digest(&temp.path().join("a.cs")), digest(&temp.path().join("b.cs")));
    assert_eq!(digest(&temp.path().join("a.anim")), digest(&temp.path().join("b.anim")));
}

#[test]
fn test_convert_unknown_command() {
    let temp = TempDir::new().unwrap();
    let svgs = write_frames(temp.path());
    fs::write(svgs.join("0002.svg"), frame(&["M7200 5400 Q10 10 20 20"])).unwrap();

    let (stdout, stderr, code) = run(temp.path(), &["convert", "--last", "3"]);
    assert_eq!(code, 4);
    assert!(!stdout.contains(SUCCESS));
    assert!(stdout.contains("Error: unknown SVG command"));
    assert!(stderr.contains("0002.svg"));
}

#[test]
fn test_convert_missing_frame() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (stdout, stderr, code) = run(temp.path(), &["convert", "--last", "4"]);
    assert_eq!(code, 2);
    assert!(stdout.contains("Error: failure to open SVG file"));
    assert!(stderr.contains("0004.svg"));
}

#[test]
fn test_convert_malformed_number() {
    let temp = TempDir::new().unwrap();
    let svgs = write_frames(temp.path());
    fs::write(svgs.join("0001.svg"), frame(&["M7200 5400 l1.2.3 4"])).unwrap();

    let (_, _, code) = run(temp.path(), &["convert", "--last", "1"]);
    assert_eq!(code, 5);
}

#[test]
fn test_convert_unknown_extension() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (stdout, _, code) = run(temp.path(), &["convert", "--last", "3", "--output", "clip.txt"]);
    assert_eq!(code, 3);
    assert!(stdout.contains("Error: unknown output file extension"));
    assert!(!temp.path().join("clip.txt").exists());
}

#[test]
fn test_convert_invalid_config() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());
    fs::write(temp.path().join("svg2clip.toml"), "[output]\nsample_rate = 0\n").unwrap();

    let (stdout, stderr, code) = run(temp.path(), &["convert", "--last", "3"]);
    assert_eq!(code, 6);
    assert!(stdout.contains("Error: invalid configuration"));
    assert!(stderr.contains("output.sample_rate"));
}

#[test]
fn test_convert_glob_pattern() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("frames");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("take1.svg"), frame(&["M7200 5400 l100 0"])).unwrap();
    fs::write(dir.join("take2.svg"), frame(&["M7300 5400 l100 0"])).unwrap();
    fs::write(dir.join("notes.txt"), "not a frame").unwrap();

    let (_, stderr, code) = run(
        temp.path(),
        &["convert", "--input-dir", "frames", "--pattern", "*.svg", "-o", "out.cs", "-q"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    let script = fs::read_to_string(temp.path().join("out.cs")).unwrap();
    assert!(script.contains("int vecLen = 12;"));
    assert!(script.contains("int[] eocIndices = {6};"));
}

#[test]
fn test_progress_goes_to_stderr() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (stdout, stderr, code) = run(temp.path(), &["convert", "--last", "3"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), SUCCESS);
    assert!(stderr.contains("Sampling 3 files"));
}

#[test]
fn test_warnings_printed_once() {
    let temp = TempDir::new().unwrap();
    let svgs = temp.path().join("svgs");
    fs::create_dir(&svgs).unwrap();
    fs::write(svgs.join("0001.svg"), frame(&[])).unwrap();

    for flags in [&[][..], &["--verbose"][..]] {
        let mut args = vec!["convert", "--last", "1"];
        args.extend_from_slice(flags);
        let (stdout, stderr, code) = run(temp.path(), &args);
        assert_eq!(code, 0, "stderr: {}", stderr);
        assert_eq!(stdout.trim(), SUCCESS);
        assert_eq!(stderr.matches("no <path> elements").count(), 1, "stderr: {}", stderr);
        assert_eq!(stderr.matches("no keyframes").count(), 1, "stderr: {}", stderr);
    }
}

#[test]
fn test_logs_without_color_when_piped() {
    let temp = TempDir::new().unwrap();
    write_frames(temp.path());

    let (_, stderr, code) = run(temp.path(), &["convert", "--last", "3", "--verbose"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("sampled"), "stderr: {}", stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {}", stderr);
}

#[test]
fn test_sample_json() {
    let temp = TempDir::new().unwrap();
    let svgs = write_frames(temp.path());

    let file = svgs.join("0002.svg");
    let (stdout, stderr, code) =
        run(temp.path(), &["sample", file.to_str().unwrap(), "--json", "--preset", "flat"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["sample_rate"], 60);
    assert_eq!(report["paths"], 1);
    // flat preset never inserts breaks
    assert_eq!(report["breaks"].as_array().unwrap().len(), 0);
    assert!(!report["points"].as_array().unwrap().is_empty());
}

#[test]
fn test_sample_table() {
    let temp = TempDir::new().unwrap();
    let svgs = write_frames(temp.path());

    let file = svgs.join("0001.svg");
    let (stdout, _, code) = run(temp.path(), &["sample", file.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("2 path(s)"));
    assert!(stdout.contains("<- break"));
}

#[test]
fn test_init_writes_config_once() {
    let temp = TempDir::new().unwrap();

    let (stdout, _, code) = run(temp.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created svg2clip.toml"));
    let written = fs::read_to_string(temp.path().join("svg2clip.toml")).unwrap();
    assert!(written.contains("preset = \"oscilloscope\""));

    let (_, stderr, code) = run(temp.path(), &["init"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--force"));

    let (_, _, code) = run(temp.path(), &["init", "--force"]);
    assert_eq!(code, 0);
}

#[test]
fn test_usage_error_exit_code() {
    let temp = TempDir::new().unwrap();
    let (_, _, code) = run(temp.path(), &["convert", "--first", "many"]);
    assert_eq!(code, 2);
}
