// src/stage.rs

//! Directory staging: reset a working directory to an empty state before a
//! run so nothing from a previous build leaks into the next one.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, StagehandError};
use crate::fs::FileSystem;

/// Resets directories through a [`FileSystem`].
#[derive(Debug, Clone, Copy)]
pub struct DirectoryStager<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DirectoryStager<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Make sure `path` exists and is empty.
    ///
    /// Anything already at `path` (a directory tree or a stray file) is
    /// deleted first. This is destructive: prior contents are gone for good.
    pub fn ensure_empty(&self, path: &Path) -> Result<()> {
        if self.fs.exists(path) {
            if self.fs.is_dir(path) {
                let discarded = self
                    .fs
                    .read_dir(path)
                    .map_err(|source| filesystem_error(path, source))?
                    .len();
                debug!(path = %path.display(), discarded, "deleting existing directory");
                self.fs
                    .remove_dir_all(path)
                    .map_err(|source| filesystem_error(path, source))?;
            } else {
                debug!(path = %path.display(), "deleting file in place of directory");
                self.fs
                    .remove_file(path)
                    .map_err(|source| filesystem_error(path, source))?;
            }
        }

        self.fs
            .create_dir_all(path)
            .map_err(|source| filesystem_error(path, source))?;
        info!(path = %path.display(), "staged empty directory");

        Ok(())
    }
}

fn filesystem_error(path: &Path, source: anyhow::Error) -> StagehandError {
    StagehandError::Filesystem {
        path: path.to_path_buf(),
        source: source.into(),
    }
}
