//! File loggers built from configuration

use crate::test_utils::captured_diagnostics;
use loglane_domain::{Field, Level, LogSink, RotationPolicy};
use loglane_infrastructure::config::{LogConfig, LogFormat};
use loglane_infrastructure::logger::Logger;
use loglane_infrastructure::sink::RotatingFileSink;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_config(dir: &TempDir, level: &str) -> LogConfig {
    LogConfig {
        root_path: dir.path().to_path_buf(),
        file_name: "app.log".into(),
        level: level.to_string(),
        rotation: RotationPolicy {
            max_size_bytes: 1024,
            max_backups: 2,
            ..RotationPolicy::default()
        },
        ..LogConfig::default()
    }
}

#[test]
fn test_warn_threshold_end_to_end() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::from_config(&file_config(&dir, "warn")).unwrap();

    logger.info("suppressed", []);
    logger.error("payment failed", [Field::new("user", "a")]);
    logger.shutdown().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);

    let columns: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(columns[1], "error");
    assert_eq!(columns[3], "payment failed");
    assert_eq!(columns[4], "user=a");
}

#[test]
fn test_json_format_from_config() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        format: LogFormat::Json,
        name: Some("billing".to_string()),
        caller: false,
        ..file_config(&dir, "debug")
    };
    let logger = Logger::from_config(&config).unwrap();

    logger.with([Field::new("user", "a")]).warn("retrying", [Field::new("attempt", 2)]);
    logger.shutdown().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let record: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(record["_level"], "warn");
    assert_eq!(record["_logger"], "billing");
    assert_eq!(record["_message"], "retrying");
    assert_eq!(record["user"], "a");
    assert_eq!(record["attempt"], 2);
    assert!(record.get("_caller").is_none());
}

#[test]
fn test_unrecognized_level_behaves_as_info() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::from_config(&file_config(&dir, "chatty")).unwrap();

    assert_eq!(logger.level(), Level::Info);
    logger.debug("dropped", []);
    logger.info("kept", []);
    logger.shutdown().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_logging_after_shutdown_reopens_file() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::from_config(&file_config(&dir, "debug")).unwrap();

    logger.info("before", []);
    logger.shutdown().unwrap();
    logger.info("after", []);
    logger.flush().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn test_non_blocking_config_delivers_on_shutdown() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        non_blocking: true,
        buffered_lines_limit: 1024,
        ..file_config(&dir, "debug")
    };
    let logger = Logger::from_config(&config).unwrap();

    for i in 0..20 {
        logger.info("queued", [Field::new("i", i)]);
    }
    logger.shutdown().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 20);
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut config = file_config(&dir, "debug");
    config.rotation.max_size_bytes = 0;

    assert!(Logger::from_config(&config).is_err());
}

#[test]
fn test_write_failures_are_reported_not_raised() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();
    let sink = RotatingFileSink::new(blocker.join("app.log"), RotationPolicy::default()).unwrap();
    let (diagnostics, output) = captured_diagnostics();
    let logger = Logger::builder(Arc::new(sink) as Arc<dyn LogSink>)
        .diagnostics(diagnostics)
        .build();

    logger.error("nowhere to go", []);

    assert!(output.contents().contains("dropped log record"));
}
