// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Settings as read from a TOML file.
///
/// ```toml
/// server_url = "https://ci.example.com"
/// temp_directory = "/var/tmp/stagehand"
/// pre_processor_timeout = "10m"
///
/// [bundle]
/// download_timeout = "2m"
/// retry_pause = "10s"
/// ```
///
/// Every key is optional; missing values are derived when the file is
/// converted into [`Settings`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub server_url: Option<String>,

    #[serde(default)]
    pub temp_directory: Option<PathBuf>,

    /// Defaults to `<temp_directory>/bin`.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Defaults to the pre-processor executable inside the download
    /// directory.
    #[serde(default)]
    pub pre_processor_path: Option<PathBuf>,

    #[serde(default)]
    pub post_processor_path: Option<PathBuf>,

    /// Duration string such as `"30s"` or `"5m"`.
    #[serde(default)]
    pub pre_processor_timeout: Option<String>,

    #[serde(default)]
    pub post_processor_timeout: Option<String>,

    #[serde(default)]
    pub bundle: RawBundleSection,
}

/// `[bundle]` section: where the tool bundle lives on the server and how
/// long to keep trying to fetch it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBundleSection {
    /// Server-relative path of the gzip'd tar archive.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub download_timeout: Option<String>,

    #[serde(default)]
    pub retry_pause: Option<String>,
}

/// Validated, fully resolved settings for one run.
///
/// Built via `Settings::try_from(RawSettings)`; all paths and the URL are
/// non-empty and all durations are at least one millisecond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Server base URL without a trailing slash.
    pub server_url: String,
    pub temp_directory: PathBuf,
    pub download_directory: PathBuf,
    pub pre_processor_path: PathBuf,
    pub post_processor_path: PathBuf,
    pub pre_processor_timeout: Duration,
    pub post_processor_timeout: Duration,
    pub bundle: BundleSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSettings {
    pub path: String,
    pub download_timeout: Duration,
    pub retry_pause: Duration,
}

impl Settings {
    pub const DEFAULT_SERVER_URL: &'static str = "http://localhost:9000";
    pub const DEFAULT_PROCESSOR_TIMEOUT: Duration = Duration::from_secs(5 * 60);
    pub const PRE_PROCESSOR_NAME: &'static str = "stagehand-preprocessor";
    pub const POST_PROCESSOR_NAME: &'static str = "stagehand-postprocessor";
}

impl BundleSettings {
    pub const DEFAULT_PATH: &'static str = "static/stagehand/bundle.tar.gz";
    pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_RETRY_PAUSE: Duration = Duration::from_secs(5);
}

/// Default temp directory: `.stagehand` under the OS temp dir.
pub fn default_temp_directory() -> PathBuf {
    std::env::temp_dir().join(".stagehand")
}

/// Executable file name with the platform suffix (`.exe` on Windows).
pub fn executable_name(stem: &str) -> String {
    format!("{stem}{}", std::env::consts::EXE_SUFFIX)
}
