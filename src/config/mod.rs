// src/config/mod.rs

//! Settings loading and validation for stagehand.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Fill in derived defaults and validate invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, load_and_validate, load_from_env, load_from_path};
pub use model::{BundleSettings, RawBundleSection, RawSettings, Settings};
pub use validate::parse_duration;
