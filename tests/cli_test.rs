//! Tests for the `dietplan` binary.

#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn sample_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("config.toml")
}

/// Run the binary with an isolated home and cache directory.
fn dietplan(home: &Path, config: Option<&Path>, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dietplan"));
    cmd.args(args)
        .env("HOME", home)
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .env_remove("RUST_LOG");
    match config {
        Some(path) => cmd.env("DIETPLAN_CONFIG", path),
        None => cmd.env_remove("DIETPLAN_CONFIG"),
    };
    cmd.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn bmi_ignores_a_broken_config() {
    let home = tempfile::tempdir().unwrap();
    let broken = home.path().join("broken.toml");
    fs::write(&broken, "[assets\nmodel = ").unwrap();

    let output = dietplan(
        home.path(),
        Some(&broken),
        &["bmi", "--height", "170", "--weight", "65"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("BMI: 22.49 (Normal)"));
}

#[test]
fn recommend_still_prints_plan_when_session_cannot_be_saved() {
    let home = tempfile::tempdir().unwrap();
    let blocker = home.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let session = blocker.join("session.json");

    let output = dietplan(
        home.path(),
        Some(&sample_config()),
        &[
            "recommend",
            "--diet",
            "vegan",
            "--seed",
            "3",
            "--session",
            session.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Option 1: "));
    assert!(text.contains("Option 3: "));
    assert!(text.contains("Diet Type: Vegan"));
}

#[test]
fn recommend_remembers_previous_plan() {
    let home = tempfile::tempdir().unwrap();
    let session = home.path().join("session.json");
    let args = [
        "recommend",
        "--diet",
        "non-vegetarian",
        "--seed",
        "1",
        "--session",
        session.to_str().unwrap(),
    ];

    let first = dietplan(home.path(), Some(&sample_config()), &args);
    assert!(first.status.success());
    assert!(!stdout(&first).contains("Previous recommendations:"));

    let second = dietplan(home.path(), Some(&sample_config()), &args);
    assert!(stdout(&second).contains("Previous recommendations:"));
}

#[test]
fn version_includes_crate_version() {
    let home = tempfile::tempdir().unwrap();
    let output = dietplan(home.path(), None, &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
