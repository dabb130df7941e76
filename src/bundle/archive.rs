// src/bundle/archive.rs

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

/// Unpack a gzip'd tar archive into `target_dir`.
///
/// Entries that would land outside `target_dir` are skipped. Returns the
/// number of entries written.
pub fn unpack_archive(bytes: &[u8], target_dir: &Path) -> Result<usize> {
    let decoder = GzDecoder::new(Cursor::new(bytes));
    let mut archive = Archive::new(decoder);
    archive.set_preserve_permissions(true);

    let mut unpacked = 0;
    for entry in archive.entries().context("reading bundle archive")? {
        let mut entry = entry.context("reading bundle archive entry")?;
        let written = entry
            .unpack_in(target_dir)
            .with_context(|| format!("unpacking into {:?}", target_dir))?;
        if written {
            unpacked += 1;
        }
    }

    Ok(unpacked)
}
