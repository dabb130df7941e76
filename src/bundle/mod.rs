// src/bundle/mod.rs

//! Tool bundle acquisition.
//!
//! The orchestrator asks a [`BundleUpdater`] to populate the download
//! directory before the pre-processor runs. The production implementation,
//! [`HttpBundleUpdater`], downloads a gzip'd tar archive from the server and
//! unpacks it, retrying for a bounded amount of time.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

pub mod archive;
pub mod http;

pub use archive::unpack_archive;
pub use http::HttpBundleUpdater;

/// Trait abstracting how the tool bundle gets into the download directory.
pub trait BundleUpdater: Send + Sync {
    /// Fetch the bundle from `server_url` into `target_dir`.
    ///
    /// Returns `true` when a usable bundle is in place. On `false` the
    /// directory may hold partial contents.
    fn try_update<'a>(
        &'a self,
        server_url: &'a str,
        target_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}
