//! Rotation, pruning and compression of the rotating file sink

use crate::test_utils::{captured_diagnostics, line_of, plain_policy};
use flate2::read::GzDecoder;
use loglane_domain::{Error, LogSink, RotationPolicy};
use loglane_infrastructure::sink::RotatingFileSink;
use std::fs::{self, File};
use std::io::Read;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn backup_indices(sink: &RotatingFileSink) -> Vec<(usize, bool)> {
    sink.backups()
        .unwrap()
        .into_iter()
        .map(|b| (b.index, b.compressed))
        .collect()
}

fn gunzip(path: &std::path::Path) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(File::open(path).unwrap())
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn age(path: &std::path::Path, days: u64) {
    let when = SystemTime::now() - Duration::from_secs(days * 86_400);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when)
        .unwrap();
}

#[test]
fn test_first_write_creates_directory_and_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(1024, 2)).unwrap();
    assert!(!sink.is_open());

    sink.write(b"hello\n").unwrap();

    assert!(sink.is_open());
    assert_eq!(fs::read(&path).unwrap(), b"hello\n");
    assert_eq!(sink.size(), 6);
}

#[test]
fn test_overflowing_write_rotates_exactly_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(100, 5)).unwrap();

    let first = line_of('a', 60);
    let second = line_of('b', 60);
    sink.write(&first).unwrap();
    sink.write(&second).unwrap();

    assert_eq!(backup_indices(&sink), vec![(1, false)]);
    assert_eq!(fs::read(sink.backup_path(1, false)).unwrap(), first);
    assert_eq!(fs::read(&path).unwrap(), second);
    assert_eq!(sink.size(), 60);
}

#[test]
fn test_write_filling_file_exactly_does_not_rotate() {
    let dir = TempDir::new().unwrap();
    let sink = RotatingFileSink::new(dir.path().join("app.log"), plain_policy(100, 5)).unwrap();

    sink.write(&line_of('a', 40)).unwrap();
    sink.write(&line_of('b', 60)).unwrap();

    assert!(backup_indices(&sink).is_empty());
    assert_eq!(sink.size(), 100);
}

#[test]
fn test_existing_file_is_appended() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, b"previous\n").unwrap();
    let sink = RotatingFileSink::new(&path, plain_policy(100, 5)).unwrap();

    sink.write(b"next\n").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"previous\nnext\n");
    assert_eq!(sink.size(), 14);
}

#[test]
fn test_existing_full_file_rotates_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, line_of('x', 95)).unwrap();
    let sink = RotatingFileSink::new(&path, plain_policy(100, 5)).unwrap();

    sink.write(&line_of('y', 10)).unwrap();

    assert_eq!(backup_indices(&sink), vec![(1, false)]);
    assert_eq!(sink.size(), 10);
}

#[test]
fn test_record_larger_than_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(10, 5)).unwrap();

    let result = sink.write(&line_of('z', 11));

    assert!(matches!(
        result,
        Err(Error::RecordTooLarge { len: 11, max: 10 })
    ));
    assert!(!path.exists());
}

#[test]
fn test_backup_count_is_capped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(10, 2)).unwrap();

    for c in ['1', '2', '3', '4', '5'] {
        sink.write(&line_of(c, 10)).unwrap();
    }

    assert_eq!(backup_indices(&sink), vec![(1, false), (2, false)]);
    assert_eq!(fs::read(&path).unwrap(), line_of('5', 10));
    assert_eq!(fs::read(sink.backup_path(1, false)).unwrap(), line_of('4', 10));
    assert_eq!(fs::read(sink.backup_path(2, false)).unwrap(), line_of('3', 10));
}

#[test]
fn test_zero_backup_limit_keeps_everything() {
    let dir = TempDir::new().unwrap();
    let sink = RotatingFileSink::new(dir.path().join("app.log"), plain_policy(10, 0)).unwrap();

    for c in ['1', '2', '3', '4', '5'] {
        sink.write(&line_of(c, 10)).unwrap();
    }

    assert_eq!(backup_indices(&sink).len(), 4);
}

#[test]
fn test_old_backups_are_pruned_by_age() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let policy = RotationPolicy {
        max_size_bytes: 10,
        max_backups: 0,
        max_age_days: 1,
        compress: false,
    };
    let sink = RotatingFileSink::new(&path, policy).unwrap();

    sink.write(&line_of('a', 10)).unwrap();
    fs::write(sink.backup_path(1, false), b"stale one\n").unwrap();
    fs::write(sink.backup_path(2, false), b"stale two\n").unwrap();
    age(&sink.backup_path(1, false), 2);
    age(&sink.backup_path(2, false), 3);

    sink.write(&line_of('b', 10)).unwrap();

    assert_eq!(backup_indices(&sink), vec![(1, false)]);
    assert_eq!(fs::read(sink.backup_path(1, false)).unwrap(), line_of('a', 10));
}

#[test]
fn test_backups_are_compressed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let policy = RotationPolicy {
        compress: true,
        ..plain_policy(10, 3)
    };
    let sink = RotatingFileSink::new(&path, policy).unwrap();

    for c in ['1', '2', '3'] {
        sink.write(&line_of(c, 10)).unwrap();
    }

    assert_eq!(backup_indices(&sink), vec![(1, true), (2, true)]);
    assert_eq!(gunzip(&sink.backup_path(1, true)), line_of('2', 10));
    assert_eq!(gunzip(&sink.backup_path(2, true)), line_of('1', 10));
    assert_eq!(fs::read(&path).unwrap(), line_of('3', 10));
}

#[test]
fn test_leftover_plain_backups_are_compressed_on_rotation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let policy = RotationPolicy {
        compress: true,
        ..plain_policy(10, 5)
    };
    let sink = RotatingFileSink::new(&path, policy).unwrap();
    fs::write(sink.backup_path(1, false), b"left over\n").unwrap();

    sink.write(&line_of('a', 10)).unwrap();
    sink.write(&line_of('b', 10)).unwrap();

    assert_eq!(backup_indices(&sink), vec![(1, true), (2, true)]);
    assert_eq!(gunzip(&sink.backup_path(2, true)), b"left over\n");
}

#[test]
fn test_manual_rotate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(1024, 5)).unwrap();

    sink.write(b"before\n").unwrap();
    sink.rotate().unwrap();
    sink.write(b"after\n").unwrap();

    assert_eq!(fs::read(sink.backup_path(1, false)).unwrap(), b"before\n");
    assert_eq!(fs::read(&path).unwrap(), b"after\n");
}

#[test]
fn test_close_then_write_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(1024, 5)).unwrap();

    sink.write(b"one\n").unwrap();
    sink.close().unwrap();
    assert!(!sink.is_open());
    sink.write(b"two\n").unwrap();

    assert!(sink.is_open());
    assert_eq!(fs::read(&path).unwrap(), b"one\ntwo\n");
}

#[test]
fn test_unwritable_location_fails_write() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    let sink = RotatingFileSink::new(blocker.join("app.log"), plain_policy(1024, 5)).unwrap();

    let err = sink.write(b"lost\n").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!sink.is_open());
}

#[test]
fn test_write_recovers_once_location_is_usable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("logs");
    fs::write(&blocker, b"not a directory").unwrap();
    let path = blocker.join("app.log");
    let sink = RotatingFileSink::new(&path, plain_policy(1024, 5)).unwrap();

    assert!(sink.write(b"lost\n").is_err());
    fs::remove_file(&blocker).unwrap();
    sink.write(b"kept\n").unwrap();

    assert!(sink.is_open());
    assert_eq!(fs::read(&path).unwrap(), b"kept\n");
}

#[test]
fn test_prune_failure_is_reported_not_raised() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(dir.path().join("app.log.1"), b"one\n").unwrap();
    fs::write(dir.path().join("app.log.2"), b"two\n").unwrap();
    // A directory cannot be removed with remove_file.
    let stuck = dir.path().join("app.log.3");
    fs::create_dir(&stuck).unwrap();
    fs::write(stuck.join("keep"), b"x").unwrap();

    let (diagnostics, captured) = captured_diagnostics();
    let sink = RotatingFileSink::new(&path, plain_policy(10, 2))
        .unwrap()
        .with_diagnostics(diagnostics);

    sink.write(&line_of('a', 10)).unwrap();
    let result = sink.write(&line_of('b', 10));

    assert!(result.is_ok());
    assert_eq!(fs::read(&path).unwrap(), line_of('b', 10));
    assert!(captured.contents().contains("failed to remove log backup"));
    assert!(dir.path().join("app.log.4").is_dir());
}
