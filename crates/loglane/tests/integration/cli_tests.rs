//! The `loglane` binary

use loglane::{ConfigLoader, LogConfig, LogFormat};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config = LogConfig {
        root_path: dir.path().to_path_buf(),
        file_name: "cli.log".into(),
        level: "warn".to_string(),
        format: LogFormat::Json,
        ..LogConfig::default()
    };
    let path = dir.path().join("loglane.toml");
    ConfigLoader::new().save_to_file(&config, &path).unwrap();
    path
}

fn loglane(config: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_loglane"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_emit_writes_one_record() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    let output = loglane(
        &config,
        &["emit", "--level", "error", "--message", "disk full", "--field", "user=a", "-f", "free=0"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let contents = fs::read_to_string(dir.path().join("cli.log")).unwrap();
    let record: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(record["_level"], "error");
    assert_eq!(record["_message"], "disk full");
    assert_eq!(record["user"], "a");
    assert_eq!(record["free"], "0");
}

#[test]
fn test_emit_below_threshold_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    let output = loglane(&config, &["emit", "--level", "info", "--message", "quiet"]);
    assert!(output.status.success());

    let written = fs::read_to_string(dir.path().join("cli.log")).unwrap_or_default();
    assert!(written.is_empty());
}

#[test]
fn test_emit_rejects_unknown_level_and_bad_field() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    let output = loglane(&config, &["emit", "--level", "loud", "--message", "x"]);
    assert!(!output.status.success());

    let output = loglane(&config, &["emit", "--message", "x", "--field", "novalue"]);
    assert!(!output.status.success());
}

#[test]
fn test_config_prints_effective_settings() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    let output = loglane(&config, &["config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("level = \"warn\""));
    assert!(stdout.contains("format = \"json\""));
    assert!(stdout.contains("# log file: "));
    assert!(stdout.contains("cli.log"));
}
