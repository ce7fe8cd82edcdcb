//! Gzip compression of rotated backups

use crate::error_ext::ErrorContext;
use flate2::Compression;
use flate2::write::GzEncoder;
use loglane_domain::error::Result;
use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

/// Compress `src` into `dst` and remove `src`.
///
/// The compressed file keeps the permissions and modification time of the
/// original, so age-based pruning still sees when the backup was last
/// written. A partially written `dst` is removed on failure.
pub fn compress_file(src: &Path, dst: &Path) -> Result<()> {
    let mut input = File::open(src)
        .with_io_context(|| format!("Failed to open {} for compression", src.display()))?;
    let metadata = input
        .metadata()
        .with_io_context(|| format!("Failed to stat {}", src.display()))?;

    if let Err(err) = write_gzip(&mut input, &metadata, dst) {
        let _ = fs::remove_file(dst);
        return Err(err);
    }
    drop(input);

    fs::remove_file(src)
        .with_io_context(|| format!("Failed to remove {} after compression", src.display()))
}

fn write_gzip(input: &mut File, metadata: &Metadata, dst: &Path) -> Result<()> {
    let output =
        File::create(dst).with_io_context(|| format!("Failed to create {}", dst.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(input, &mut encoder)
        .with_io_context(|| format!("Failed to compress into {}", dst.display()))?;
    let output = encoder
        .finish()
        .with_io_context(|| format!("Failed to finish {}", dst.display()))?;

    output
        .set_permissions(metadata.permissions())
        .with_io_context(|| format!("Failed to set permissions on {}", dst.display()))?;
    if let Ok(modified) = metadata.modified() {
        output
            .set_modified(modified)
            .with_io_context(|| format!("Failed to set mtime on {}", dst.display()))?;
    }
    output
        .sync_all()
        .with_io_context(|| format!("Failed to sync {}", dst.display()))
}
