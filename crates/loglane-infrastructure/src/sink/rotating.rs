//! Size-based rotating file sink
//!
//! The active file lives at the configured path. When a write would push it
//! past `max_size_bytes`, the file is closed and renamed into a numbered
//! backup sequence next to it:
//!
//! ```text
//! app.log        active
//! app.log.1.gz   newest backup
//! app.log.2.gz
//! app.log.N.gz   oldest backup
//! ```
//!
//! Existing backups shift up by one on each rotation. Compression runs
//! synchronously before pruning, then backups past `max_backups` or older than
//! `max_age_days` are deleted. Pruning and compression failures are reported
//! through [`Diagnostics`] and never fail the write.
//!
//! All state sits behind one mutex: writers block while a rotation is in
//! flight and never interleave into a half-rotated file.

use super::compress::compress_file;
use crate::diagnostics::Diagnostics;
use crate::error_ext::ErrorContext;
use loglane_domain::constants::COMPRESSED_SUFFIX;
use loglane_domain::error::{Error, Result};
use loglane_domain::{LogSink, RotationPolicy};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

enum SinkState {
    Open { file: File, size: u64 },
    Closed,
}

/// A rotated backup found next to the active file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// Full path of the backup
    pub path: PathBuf,
    /// Position in the sequence, 1 is the newest
    pub index: usize,
    /// Whether the backup is gzip compressed
    pub compressed: bool,
    /// Last modification time, when the filesystem reports one
    pub modified: Option<SystemTime>,
}

/// Log file that rotates by size and prunes by count and age
pub struct RotatingFileSink {
    path: PathBuf,
    dir: PathBuf,
    base_name: String,
    policy: RotationPolicy,
    diagnostics: Diagnostics,
    state: Mutex<SinkState>,
}

impl RotatingFileSink {
    /// Create a sink for `path`. The file is opened on first write.
    pub fn new<P: Into<PathBuf>>(path: P, policy: RotationPolicy) -> Result<Self> {
        policy.validate()?;
        let path = path.into();
        let base_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Log path {} does not name a file",
                    path.display()
                ))
            })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path,
            dir,
            base_name,
            policy,
            diagnostics: Diagnostics::stderr(),
            state: Mutex::new(SinkState::Closed),
        })
    }

    /// Report pruning and compression failures to `diagnostics`
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Path of the active log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Bytes written to the active file, 0 while closed
    pub fn size(&self) -> u64 {
        match &*self.lock_state() {
            SinkState::Open { size, .. } => *size,
            SinkState::Closed => 0,
        }
    }

    /// Whether the active file is currently held open
    pub fn is_open(&self) -> bool {
        matches!(&*self.lock_state(), SinkState::Open { .. })
    }

    /// Rotate now, regardless of size
    pub fn rotate(&self) -> Result<()> {
        let mut state = self.lock_state();
        self.rotate_locked(&mut state)
    }

    /// Path of the backup at `index`
    pub fn backup_path(&self, index: usize, compressed: bool) -> PathBuf {
        let suffix = if compressed { COMPRESSED_SUFFIX } else { "" };
        self.dir
            .join(format!("{}.{}{}", self.base_name, index, suffix))
    }

    /// Backups on disk, newest first
    pub fn backups(&self) -> Result<Vec<BackupFile>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(Error::io_with_source(
                    format!("Failed to list {}", self.dir.display()),
                    err,
                ));
            }
        };

        let prefix = format!("{}.", self.base_name);
        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.io_context("Failed to read directory entry")?;
            let name = entry.file_name();
            let Some(rest) = name.to_str().and_then(|n| n.strip_prefix(prefix.as_str())) else {
                continue;
            };
            let (digits, compressed) = match rest.strip_suffix(COMPRESSED_SUFFIX) {
                Some(digits) => (digits, true),
                None => (rest, false),
            };
            let Some(index) = digits.parse::<usize>().ok().filter(|i| *i > 0) else {
                continue;
            };
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            backups.push(BackupFile {
                path: entry.path(),
                index,
                compressed,
                modified,
            });
        }

        backups.sort_by_key(|b| (b.index, b.compressed));
        Ok(backups)
    }

    fn lock_state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_existing_or_new(&self, state: &mut SinkState, write_len: u64) -> Result<()> {
        match fs::metadata(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.open_new(state),
            Err(err) => Err(Error::io_with_source(
                format!("Failed to stat log file {}", self.path.display()),
                err,
            )),
            Ok(meta) if meta.len() + write_len > self.policy.max_size_bytes => {
                self.rotate_locked(state)
            }
            Ok(_) => self.open_new(state),
        }
    }

    fn open_new(&self, state: &mut SinkState) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_io_context(|| format!("Failed to create log directory {}", self.dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_io_context(|| format!("Failed to open log file {}", self.path.display()))?;
        let size = file
            .metadata()
            .with_io_context(|| format!("Failed to stat log file {}", self.path.display()))?
            .len();
        *state = SinkState::Open { file, size };
        Ok(())
    }

    fn rotate_locked(&self, state: &mut SinkState) -> Result<()> {
        // Dropping the handle closes the file before it is renamed.
        *state = SinkState::Closed;

        if self.path.exists() {
            self.shift_backups()?;
            let first = self.backup_path(1, false);
            fs::rename(&self.path, &first).with_io_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    self.path.display(),
                    first.display()
                )
            })?;
        }

        self.mill();
        self.open_new(state)
    }

    fn shift_backups(&self) -> Result<()> {
        let mut backups = self.backups()?;
        backups.sort_by_key(|b| std::cmp::Reverse((b.index, b.compressed)));
        for backup in backups {
            let target = self.backup_path(backup.index + 1, backup.compressed);
            fs::rename(&backup.path, &target).with_io_context(|| {
                format!(
                    "Failed to shift backup {} to {}",
                    backup.path.display(),
                    target.display()
                )
            })?;
        }
        Ok(())
    }

    /// Compress pending backups, then prune. Best effort.
    fn mill(&self) {
        if self.policy.compress {
            self.compress_pending();
        }
        self.prune();
    }

    fn compress_pending(&self) {
        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(err) => {
                self.diagnostics.report("failed to list log backups", &err);
                return;
            }
        };

        for backup in backups.iter().filter(|b| !b.compressed) {
            let target = self.backup_path(backup.index, true);
            let result = if target.exists() {
                fs::remove_file(&backup.path).io_context("Failed to remove duplicate backup")
            } else {
                compress_file(&backup.path, &target)
            };
            if let Err(err) = result {
                self.diagnostics.report(
                    &format!("failed to compress log backup {}", backup.path.display()),
                    &err,
                );
            }
        }
    }

    fn prune(&self) {
        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(err) => {
                self.diagnostics.report("failed to list log backups", &err);
                return;
            }
        };

        let now = SystemTime::now();
        let limit = self.policy.backup_limit();
        let max_age = self.policy.max_age();

        for backup in backups {
            let over_count = limit.is_some_and(|limit| backup.index > limit);
            let too_old = match (max_age, backup.modified) {
                (Some(max_age), Some(modified)) => now
                    .duration_since(modified)
                    .is_ok_and(|age| age > max_age),
                _ => false,
            };
            if !(over_count || too_old) {
                continue;
            }
            if let Err(err) = fs::remove_file(&backup.path) {
                self.diagnostics.report(
                    &format!("failed to remove log backup {}", backup.path.display()),
                    &err,
                );
            }
        }
    }
}

impl LogSink for RotatingFileSink {
    fn write(&self, buf: &[u8]) -> Result<()> {
        let len = buf.len() as u64;
        let max = self.policy.max_size_bytes;
        if len > max {
            return Err(Error::record_too_large(len, max));
        }

        let mut state = self.lock_state();
        if matches!(&*state, SinkState::Closed) {
            self.open_existing_or_new(&mut state, len)?;
        }
        let overflows = matches!(&*state, SinkState::Open { size, .. } if *size + len > max);
        if overflows {
            self.rotate_locked(&mut state)?;
        }

        let result = match &mut *state {
            SinkState::Open { file, size } => file.write_all(buf).map(|()| *size += len),
            SinkState::Closed => return Err(Error::io("Log file is not open")),
        };
        if let Err(err) = result {
            // Size accounting is unknown after a partial write; re-stat on reopen.
            *state = SinkState::Closed;
            return Err(Error::io_with_source(
                format!("Failed to write log file {}", self.path.display()),
                err,
            ));
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match &mut *self.lock_state() {
            SinkState::Open { file, .. } => file
                .sync_data()
                .with_io_context(|| format!("Failed to sync log file {}", self.path.display())),
            SinkState::Closed => Ok(()),
        }
    }

    fn close(&self) -> Result<()> {
        let mut state = self.lock_state();
        let result = match &mut *state {
            SinkState::Open { file, .. } => file
                .sync_data()
                .with_io_context(|| format!("Failed to sync log file {}", self.path.display())),
            SinkState::Closed => Ok(()),
        };
        *state = SinkState::Closed;
        result
    }
}
