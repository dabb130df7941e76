// src/lib.rs

#[cfg(not(unix))]
compile_error!("stagehand supervises process groups and only builds for unix targets");

pub mod bundle;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod orchestrator;
pub mod retry;
pub mod stage;

use tracing::debug;

use crate::bundle::HttpBundleUpdater;
use crate::cli::CliArgs;
use crate::config::load_from_env;
use crate::errors::Result;
use crate::exec::OsProcessSupervisor;
use crate::fs::RealFileSystem;
use crate::orchestrator::Orchestrator;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading
/// - the real filesystem for directory staging
/// - the HTTP bundle updater
/// - the OS process supervisor
///
/// and returns the exit code the process should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let settings = load_from_env()?;
    debug!(?settings, "resolved settings");

    let fs = RealFileSystem;
    let bundle_updater = HttpBundleUpdater::new(&settings.bundle)?;
    let supervisor = OsProcessSupervisor::new();

    let orchestrator = Orchestrator::new(&settings, &fs, &bundle_updater, &supervisor);
    orchestrator.run(&args.args).await
}
