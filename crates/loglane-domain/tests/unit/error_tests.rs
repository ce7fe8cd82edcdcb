//! Unit tests for domain error types

use loglane_domain::Error;

#[test]
fn test_io_error() {
    let error = Error::io("disk full");
    match error {
        Error::Io { message, source } => {
            assert_eq!(message, "disk full");
            assert!(source.is_none());
        }
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_io_error_with_source() {
    let std_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = Error::io_with_source("Failed to open log file: denied", std_err);
    assert!(matches!(error, Error::Io { .. }));
    assert!(error.to_string().contains("denied"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_configuration_error_with_source() {
    let source = std::io::Error::other("bad toml");
    let error = Error::configuration_with_source("Failed to load", source);
    match &error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "Failed to load");
            assert!(source.is_some());
        }
        _ => panic!("Expected Configuration error"),
    }
    assert!(!matches!(error, Error::Io { .. }));
}

#[test]
fn test_record_too_large_display() {
    let error = Error::record_too_large(2048, 1024);
    assert_eq!(
        error.to_string(),
        "Record of 2048 bytes exceeds maximum file size of 1024 bytes"
    );
}

#[test]
fn test_sink_closed_error() {
    let error = Error::sink_closed("non-blocking sink");
    assert!(error.to_string().contains("non-blocking sink"));
}
