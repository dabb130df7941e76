// src/exec/supervisor.rs

//! Supervised execution of a single external process.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::time::Duration;

use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{Result, StagehandError};
use crate::exec::quote::quote_arguments;

/// Everything needed to launch one supervised process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub program: PathBuf,
    /// Passed as an argument vector, never through a shell.
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Duration,
}

/// Outcome of a supervised process.
///
/// `exit_code` is only meaningful when `completed` is true; a process killed
/// on timeout carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    pub completed: bool,
    pub exit_code: Option<i32>,
}

impl ProcessResult {
    pub fn exited(code: i32) -> Self {
        Self {
            completed: true,
            exit_code: Some(code),
        }
    }

    pub fn timed_out() -> Self {
        Self {
            completed: false,
            exit_code: None,
        }
    }

    /// The real exit code, or `fallback` when the process did not complete.
    pub fn exit_code_or(&self, fallback: i32) -> i32 {
        match (self.completed, self.exit_code) {
            (true, Some(code)) => code,
            _ => fallback,
        }
    }
}

/// Trait abstracting how supervised processes are run.
///
/// Production code uses [`OsProcessSupervisor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessSupervisor: Send + Sync {
    /// Launch the process and wait for it to exit or for the timeout.
    ///
    /// A timeout or a non-zero exit code is a normal `Ok` result. Only a
    /// failure to start the process at all is an error.
    fn execute<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>>;
}

/// Supervisor that spawns real OS processes with `tokio::process`.
///
/// stdin/stdout/stderr are inherited from the parent. The child leads its
/// own process group, so a timeout kill also takes down anything it spawned.
#[derive(Debug, Clone, Default)]
pub struct OsProcessSupervisor;

impl OsProcessSupervisor {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessSupervisor for OsProcessSupervisor {
    fn execute<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>> {
        Box::pin(run_supervised(request))
    }
}

async fn run_supervised(request: &ProcessRequest) -> Result<ProcessResult> {
    info!(
        program = %request.program.display(),
        args = %quote_arguments(&request.args),
        cwd = %request.working_dir.display(),
        timeout = ?request.timeout,
        "starting supervised process"
    );

    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args)
        .current_dir(&request.working_dir)
        .kill_on_drop(true);

    cmd.process_group(0);

    let mut child = cmd.spawn().map_err(|source| StagehandError::Launch {
        program: request.program.clone(),
        source,
    })?;

    let waited = tokio::time::timeout(request.timeout, child.wait()).await;

    match waited {
        Ok(status) => {
            let status = status?;
            let code = exit_code_of(status);
            info!(
                program = %request.program.display(),
                exit_code = code,
                success = status.success(),
                "supervised process exited"
            );
            Ok(ProcessResult::exited(code))
        }
        Err(_) => {
            warn!(
                program = %request.program.display(),
                timeout = ?request.timeout,
                "supervised process timed out; killing it"
            );
            terminate(&mut child).await;
            Ok(ProcessResult::timed_out())
        }
    }
}

/// Exit code of a finished process; `128 + signal` when it was killed by a
/// signal, `-1` if neither is available.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    status.signal().map(|signal| 128 + signal).unwrap_or(-1)
}

/// Kill the child and everything in its process group, then reap it.
async fn terminate(child: &mut Child) {
    // The child was spawned with process_group(0), so its pid is the pgid.
    if let Some(pid) = child.id() {
        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            warn!(pid, error = %e, "failed to kill process group");
        }
    }

    if let Err(e) = child.kill().await {
        debug!(error = %e, "killing supervised process after timeout");
    }
}
