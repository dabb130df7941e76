// src/orchestrator.rs

//! Top-level control flow for one invocation.
//!
//! ```text
//! Start --(args present)--> PreProcess  --> Done
//!       --(no args)-------> PostProcess --> Done
//! ```
//!
//! Pre-process stages the temp and download directories, fetches the tool
//! bundle and runs the pre-processor with the forwarded arguments.
//! Post-process runs the post-processor with no arguments. Either way the
//! supervised process's exit code becomes the program's exit code.

use tracing::{error, info};

use crate::bundle::BundleUpdater;
use crate::config::Settings;
use crate::errors::{Result, StagehandError};
use crate::exec::{ProcessRequest, ProcessResult, ProcessSupervisor};
use crate::fs::FileSystem;
use crate::stage::DirectoryStager;

/// Exit code when the tool bundle could not be acquired.
pub const EXIT_ACQUISITION_FAILED: i32 = 1;

/// Exit code when a supervised process was killed on timeout.
pub const EXIT_TIMEOUT: i32 = 124;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    PreProcess,
    PostProcess,
}

impl RunMode {
    /// Any argument at all selects pre-process mode.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        if args.is_empty() {
            RunMode::PostProcess
        } else {
            RunMode::PreProcess
        }
    }
}

/// Wires settings and collaborators together for a single run.
pub struct Orchestrator<'a> {
    settings: &'a Settings,
    fs: &'a dyn FileSystem,
    bundle_updater: &'a dyn BundleUpdater,
    supervisor: &'a dyn ProcessSupervisor,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        settings: &'a Settings,
        fs: &'a dyn FileSystem,
        bundle_updater: &'a dyn BundleUpdater,
        supervisor: &'a dyn ProcessSupervisor,
    ) -> Self {
        Self {
            settings,
            fs,
            bundle_updater,
            supervisor,
        }
    }

    /// Run the mode selected by `args` and return the program's exit code.
    ///
    /// `Err` is reserved for faults that abort the run: bad configuration,
    /// staging failures and processes that cannot be launched.
    pub async fn run(&self, args: &[String]) -> Result<i32> {
        let mode = RunMode::from_args(args);
        info!(?mode, arg_count = args.len(), "selected run mode");

        match mode {
            RunMode::PreProcess => self.pre_process(args).await,
            RunMode::PostProcess => self.post_process().await,
        }
    }

    async fn pre_process(&self, args: &[String]) -> Result<i32> {
        let stager = DirectoryStager::new(self.fs);
        stager.ensure_empty(&self.settings.temp_directory)?;
        stager.ensure_empty(&self.settings.download_directory)?;

        let server_url = self.settings.server_url.as_str();
        if server_url.is_empty() {
            return Err(StagehandError::Config(
                "server URL is empty".to_string(),
            ));
        }
        info!(server_url, "using server");

        let updated = self
            .bundle_updater
            .try_update(server_url, &self.settings.download_directory)
            .await;
        if !updated {
            error!(
                server_url,
                "failed to acquire the tool bundle; the pre-processor will not run"
            );
            return Ok(EXIT_ACQUISITION_FAILED);
        }

        let request = ProcessRequest {
            program: self.settings.pre_processor_path.clone(),
            args: args.to_vec(),
            working_dir: self.settings.temp_directory.clone(),
            timeout: self.settings.pre_processor_timeout,
        };
        let result = self.supervisor.execute(&request).await?;
        Ok(exit_code_for(&request, result))
    }

    async fn post_process(&self) -> Result<i32> {
        let request = ProcessRequest {
            program: self.settings.post_processor_path.clone(),
            args: Vec::new(),
            working_dir: self.settings.temp_directory.clone(),
            timeout: self.settings.post_processor_timeout,
        };
        let result = self.supervisor.execute(&request).await?;
        Ok(exit_code_for(&request, result))
    }
}

/// Map a supervised process outcome to the program's exit code.
pub fn exit_code_for(request: &ProcessRequest, result: ProcessResult) -> i32 {
    if !result.completed {
        error!(
            program = %request.program.display(),
            timeout = ?request.timeout,
            exit_code = EXIT_TIMEOUT,
            "process was killed after exceeding its timeout"
        );
    }
    result.exit_code_or(EXIT_TIMEOUT)
}
