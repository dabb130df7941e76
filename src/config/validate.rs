// src/config/validate.rs

use std::path::Path;
use std::time::Duration;

use crate::config::model::{
    BundleSettings, RawSettings, Settings, default_temp_directory, executable_name,
};
use crate::errors::{Result, StagehandError};

impl TryFrom<RawSettings> for Settings {
    type Error = StagehandError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let settings = resolve(raw)?;
        validate_settings(&settings)?;
        Ok(settings)
    }
}

/// Fill in derived defaults. Durations are parsed here so that malformed
/// strings surface as configuration errors.
fn resolve(raw: RawSettings) -> Result<Settings> {
    let server_url = raw
        .server_url
        .unwrap_or_else(|| Settings::DEFAULT_SERVER_URL.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string();

    let temp_directory = raw.temp_directory.unwrap_or_else(default_temp_directory);
    let download_directory = raw
        .download_directory
        .unwrap_or_else(|| temp_directory.join("bin"));
    let pre_processor_path = raw.pre_processor_path.unwrap_or_else(|| {
        download_directory.join(executable_name(Settings::PRE_PROCESSOR_NAME))
    });
    let post_processor_path = raw.post_processor_path.unwrap_or_else(|| {
        download_directory.join(executable_name(Settings::POST_PROCESSOR_NAME))
    });

    let pre_processor_timeout = duration_or(
        "pre_processor_timeout",
        raw.pre_processor_timeout.as_deref(),
        Settings::DEFAULT_PROCESSOR_TIMEOUT,
    )?;
    let post_processor_timeout = duration_or(
        "post_processor_timeout",
        raw.post_processor_timeout.as_deref(),
        Settings::DEFAULT_PROCESSOR_TIMEOUT,
    )?;

    let bundle = BundleSettings {
        path: raw
            .bundle
            .path
            .unwrap_or_else(|| BundleSettings::DEFAULT_PATH.to_string()),
        download_timeout: duration_or(
            "bundle.download_timeout",
            raw.bundle.download_timeout.as_deref(),
            BundleSettings::DEFAULT_DOWNLOAD_TIMEOUT,
        )?,
        retry_pause: duration_or(
            "bundle.retry_pause",
            raw.bundle.retry_pause.as_deref(),
            BundleSettings::DEFAULT_RETRY_PAUSE,
        )?,
    };

    Ok(Settings {
        server_url,
        temp_directory,
        download_directory,
        pre_processor_path,
        post_processor_path,
        pre_processor_timeout,
        post_processor_timeout,
        bundle,
    })
}

fn duration_or(key: &str, value: Option<&str>, default: Duration) -> Result<Duration> {
    match value {
        None => Ok(default),
        Some(s) => parse_duration(s)
            .map_err(|e| StagehandError::Config(format!("invalid `{key}`: {e}"))),
    }
}

fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_url(&settings.server_url)?;

    ensure_non_empty_path("temp_directory", &settings.temp_directory)?;
    ensure_non_empty_path("download_directory", &settings.download_directory)?;
    ensure_non_empty_path("pre_processor_path", &settings.pre_processor_path)?;
    ensure_non_empty_path("post_processor_path", &settings.post_processor_path)?;

    if settings.temp_directory == settings.download_directory {
        return Err(StagehandError::Config(format!(
            "`temp_directory` and `download_directory` must differ (both {:?})",
            settings.temp_directory
        )));
    }

    if settings.bundle.path.trim().is_empty() {
        return Err(StagehandError::Config(
            "`bundle.path` must not be empty".to_string(),
        ));
    }

    ensure_min_duration("pre_processor_timeout", settings.pre_processor_timeout)?;
    ensure_min_duration("post_processor_timeout", settings.post_processor_timeout)?;
    ensure_min_duration("bundle.download_timeout", settings.bundle.download_timeout)?;
    ensure_min_duration("bundle.retry_pause", settings.bundle.retry_pause)?;

    Ok(())
}

fn validate_server_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(StagehandError::Config(
            "`server_url` must not be empty".to_string(),
        ));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(StagehandError::Config(format!(
            "`server_url` must start with http:// or https:// (got '{url}')"
        )));
    }
    Ok(())
}

fn ensure_non_empty_path(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(StagehandError::Config(format!("`{key}` must not be empty")));
    }
    Ok(())
}

fn ensure_min_duration(key: &str, value: Duration) -> Result<()> {
    if value < Duration::from_millis(1) {
        return Err(StagehandError::Config(format!(
            "`{key}` must be at least 1ms (got {value:?})"
        )));
    }
    Ok(())
}

/// Parse a duration string like `"250ms"`, `"30s"`, `"5m"` or `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => scaled_secs(value, 60),
        "h" => scaled_secs(value, 60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}


fn scaled_secs(value: u64, factor: u64) -> std::result::Result<Duration, String> {
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration too large: {value} x {factor}s"))
}
