//! End-to-end CLI tests for configuration handling.
//!
//! These runs exercise everything up to (and excluding) the first FFmpeg
//! invocation, so they work on machines without ffmpeg installed.

use std::fs::File;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clipjoin() -> Command {
    Command::cargo_bin("clipjoin").expect("binary builds")
}

#[test]
fn missing_source_directory_is_fatal() {
    clipjoin()
        .args(["--path", "/no/such/folder"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("can NOT match the source folder"));
}

#[test]
fn unsupported_input_format_is_fatal() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--inputs_type", "exe"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"EXE\" is NOT supported for input"));
}

#[test]
fn unsupported_output_format_is_fatal() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--output_type", "docx"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "\"DOCX\" is NOT supported for output",
        ));
}

#[test]
fn unknown_preset_is_fatal() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--preset", "turbo"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "\"TURBO\" is NOT supported for preset type",
        ));
}

#[test]
fn crf_out_of_range_aborts_before_any_processing() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("20240101_090000.mov")).unwrap();

    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--crf", "52"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("out of CRF scale range"));

    // Fatal validation means no output folder was created.
    assert!(!dir.path().join("Joins").exists());
}

#[test]
fn non_numeric_crf_hits_the_sentinel_path() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--crf", "high"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "\"-1\" is out of CRF scale range",
        ));
}

#[test]
fn audio_quality_out_of_range_is_fatal() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--aq", "10.1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("out of audio quality range"));
}

#[test]
fn empty_source_directory_completes_with_summary() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("process exited in")
                .and(predicate::str::contains("0 joined, 0 failed")),
        );

    // No sessions, so no output folder either.
    assert!(!dir.path().join("Joins").exists());
}

#[test]
fn invalid_interval_falls_back_and_still_runs() {
    let dir = TempDir::new().unwrap();
    clipjoin()
        .arg("-p")
        .arg(dir.path())
        .args(["--interval", "soon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("process exited in"));
}

#[cfg(unix)]
#[test]
fn session_failures_do_not_abort_the_run() {
    use std::os::unix::fs::PermissionsExt;

    // Fake ffprobe/ffmpeg that always fail, so every join errors out.
    let bin = TempDir::new().unwrap();
    for tool in ["ffprobe", "ffmpeg"] {
        let path = bin.path().join(tool);
        std::fs::write(&path, "#!/bin/sh\nexit 1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let dir = TempDir::new().unwrap();
    // 30 minutes apart, so two sessions and two failing jobs.
    File::create(dir.path().join("20240101_090000.mov")).unwrap();
    File::create(dir.path().join("20240101_093000.mov")).unwrap();

    let path_env = format!(
        "{}:{}",
        bin.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );
    clipjoin()
        .env("PATH", path_env)
        .arg("-p")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("0 joined, 2 failed")
                .and(predicate::str::contains("process exited in")),
        );
}
