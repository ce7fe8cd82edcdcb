//! The process-wide logger
//!
//! The global logger can be set once per process, so its whole lifecycle is
//! exercised in a single test.

use loglane::{Level, LogConfig, RotationPolicy, fields, pairs};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_global_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        root_path: dir.path().to_path_buf(),
        file_name: "app.log".into(),
        level: "warn".to_string(),
        rotation: RotationPolicy {
            max_size_bytes: 1024,
            max_backups: 2,
            ..RotationPolicy::default()
        },
        ..LogConfig::default()
    };

    assert!(!loglane::is_initialized());
    let logger = loglane::init(&config).unwrap();
    assert!(loglane::is_initialized());
    assert_eq!(logger.level(), Level::Warn);

    loglane::info("suppressed", fields![]);
    loglane::error("payment failed", fields!["user" => "a"]);

    // A second init is refused and leaves the first logger in place.
    assert!(loglane::init(&LogConfig::default()).is_err());

    loglane::set_level(Level::Info);
    loglane::with(fields!["request" => 7]).info("accepted", fields![]);
    loglane::named("billing").warn("slow", fields!["ms" => 1200]);
    loglane::log_pairs(Level::Info, "paired", pairs!["k", "v"]);
    loglane::log(Level::Fatal, "fatal is only a severity", fields![]);
    loglane::flush().unwrap();
    loglane::shutdown().unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5);

    let first: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(first[1], "error");
    assert!(first[2].starts_with("integration/global_tests.rs:"));
    assert_eq!(first[3], "payment failed");
    assert_eq!(first[4], "user=a");

    assert!(lines[1].ends_with("\taccepted\trequest=7"));
    assert!(lines[2].contains("\tbilling\t"));
    assert!(lines[3].ends_with("\tpaired\tk=v"));
    assert!(lines[4].contains("\tfatal\t"));
}
