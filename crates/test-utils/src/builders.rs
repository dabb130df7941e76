#![allow(dead_code)]

use std::path::{Path, PathBuf};

use stagehand::config::{RawBundleSection, RawSettings, Settings};

/// Builder for `Settings` rooted in a test directory.
///
/// Directories default to `<root>/temp` and `<root>/download`; processor
/// paths and timeouts are left to the caller or the built-in defaults.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new(root: &Path) -> Self {
        Self {
            raw: RawSettings {
                server_url: Some("http://localhost:9000".to_string()),
                temp_directory: Some(root.join("temp")),
                download_directory: Some(root.join("download")),
                pre_processor_path: None,
                post_processor_path: None,
                pre_processor_timeout: Some("5s".to_string()),
                post_processor_timeout: Some("5s".to_string()),
                bundle: RawBundleSection {
                    path: None,
                    download_timeout: Some("1s".to_string()),
                    retry_pause: Some("50ms".to_string()),
                },
            },
        }
    }

    pub fn server_url(mut self, url: &str) -> Self {
        self.raw.server_url = Some(url.to_string());
        self
    }

    pub fn pre_processor(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.pre_processor_path = Some(path.into());
        self
    }

    pub fn post_processor(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.post_processor_path = Some(path.into());
        self
    }

    pub fn pre_processor_timeout(mut self, duration: &str) -> Self {
        self.raw.pre_processor_timeout = Some(duration.to_string());
        self
    }

    pub fn post_processor_timeout(mut self, duration: &str) -> Self {
        self.raw.post_processor_timeout = Some(duration.to_string());
        self
    }

    pub fn bundle_path(mut self, path: &str) -> Self {
        self.raw.bundle.path = Some(path.to_string());
        self
    }

    pub fn bundle_download_timeout(mut self, duration: &str) -> Self {
        self.raw.bundle.download_timeout = Some(duration.to_string());
        self
    }

    pub fn bundle_retry_pause(mut self, duration: &str) -> Self {
        self.raw.bundle.retry_pause = Some(duration.to_string());
        self
    }

    pub fn raw(self) -> RawSettings {
        self.raw
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}
