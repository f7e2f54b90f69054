//! CLI integration tests over generated WAV files.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const RATE: u32 = 16_000;

/// Write a mono 16-bit WAV with loud bursts at the given `(start, end)` times.
fn write_test_wav(path: &Path, total_secs: f64, bursts: &[(f64, f64)]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");

    let total = (total_secs * f64::from(RATE)) as usize;
    for i in 0..total {
        let t = i as f64 / f64::from(RATE);
        let loud = bursts.iter().any(|&(start, end)| t >= start && t < end);
        let sample = if loud { (0.8 * f64::from(i16::MAX)) as i16 } else { 0 };
        writer.write_sample(sample).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

fn vadcut() -> Command {
    cargo_bin_cmd!("vadcut")
}

fn setup_input(dir: &TempDir, bursts: &[(f64, f64)]) -> PathBuf {
    let input = dir.path().join("talk.wav");
    write_test_wav(&input, 5.0, bursts);
    input
}

#[test]
fn help_lists_subcommands() {
    vadcut()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn no_arguments_prints_help() {
    vadcut()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn analyze_writes_segment_list_and_clips() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[(2.0, 3.0)]);

    vadcut().arg(&input).arg("-q").assert().success();

    let out_dir = dir.path().join("talk_segments");
    let segments_json = out_dir.join("segments.json");
    assert!(segments_json.is_file());
    assert!(out_dir.join("segment_01.wav").is_file());
    assert!(!out_dir.join("segment_02.wav").exists());

    // The persisted list is a plain array of records with 2-decimal times.
    let content = std::fs::read_to_string(&segments_json).expect("read json");
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&content).expect("parse json");
    assert_eq!(records.len(), 1);
    let start = records[0]["start"].as_f64().expect("start");
    let end = records[0]["end"].as_f64().expect("end");
    assert!((start - 2.0).abs() < 0.05, "start {start}");
    assert!((end - 3.0).abs() < 0.05, "end {end}");
}

#[test]
fn detect_only_skips_clip_export() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[(2.0, 3.0)]);

    vadcut()
        .arg(&input)
        .args(["--detect-only", "-q"])
        .assert()
        .success();

    let out_dir = dir.path().join("talk_segments");
    assert!(out_dir.join("segments.json").is_file());
    assert!(!out_dir.join("segment_01.wav").exists());
}

#[test]
fn existing_clips_require_overwrite() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[(2.0, 3.0)]);

    vadcut().arg(&input).arg("-q").assert().success();

    // Second run refuses to clobber without --overwrite.
    vadcut()
        .arg(&input)
        .args(["-q", "--fail-fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));

    // And succeeds with it.
    vadcut()
        .arg(&input)
        .args(["-q", "--overwrite"])
        .assert()
        .success();
}

#[test]
fn silent_input_reports_degenerate_signal() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[]);

    vadcut()
        .arg(&input)
        .args(["-q", "--fail-fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("silent"));
}

#[test]
fn missing_input_fails() {
    vadcut().args(["missing.wav", "-q"]).assert().failure();
}

#[test]
fn split_reexports_clips_from_saved_list() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[(1.0, 2.0), (3.0, 4.0)]);

    vadcut().arg(&input).arg("-q").assert().success();

    let segments_json = dir.path().join("talk_segments").join("segments.json");
    let split_out = dir.path().join("resplit");

    vadcut()
        .args(["split", "--audio"])
        .arg(&input)
        .arg("--segments")
        .arg(&segments_json)
        .arg("--output-dir")
        .arg(&split_out)
        .arg("-q")
        .assert()
        .success();

    assert!(split_out.join("segment_01.wav").is_file());
    assert!(split_out.join("segment_02.wav").is_file());
}

#[test]
fn merge_gaps_flag_joins_nearby_bursts() {
    let dir = TempDir::new().expect("tempdir");
    let input = setup_input(&dir, &[(1.0, 1.4), (1.6, 2.0)]);

    vadcut()
        .arg(&input)
        .args(["-q", "--merge-gaps"])
        .assert()
        .success();

    let out_dir = dir.path().join("talk_segments");
    assert!(out_dir.join("segment_01.wav").is_file());
    assert!(!out_dir.join("segment_02.wav").exists());
}
