// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "STAGEHAND_CONFIG";

/// Settings file looked up in the working directory when
/// `STAGEHAND_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "Stagehand.toml";

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; defaults and validation are
/// applied by [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a settings file from path, resolve defaults and validate.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}

/// Resolve settings the way the binary does:
///
/// - `STAGEHAND_CONFIG` set: that file must exist and is loaded.
/// - otherwise `Stagehand.toml` in the working directory is loaded if
///   present, and built-in defaults are used if it is not.
pub fn load_from_env() -> Result<Settings> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            debug!(path = %path.display(), "loading settings from {CONFIG_ENV_VAR}");
            load_and_validate(path)
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                debug!(path = %path.display(), "loading settings from working directory");
                load_and_validate(path)
            } else {
                debug!("no settings file found; using defaults");
                Settings::try_from(RawSettings::default())
            }
        }
    }
}
