use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use stagehand::bundle::BundleUpdater;
use stagehand::errors::{Result, StagehandError};
use stagehand::exec::{ProcessRequest, ProcessResult, ProcessSupervisor};

use crate::dir_entries;

/// One `try_update` call as seen by [`FakeBundleUpdater`].
#[derive(Debug, Clone)]
pub struct UpdateCall {
    pub server_url: String,
    pub target_dir: PathBuf,
    /// Entries of `target_dir` at the time of the call.
    pub target_entries: Vec<PathBuf>,
}

/// A fake bundle updater that:
/// - records every call
/// - answers with a fixed success flag.
#[derive(Debug, Clone)]
pub struct FakeBundleUpdater {
    succeed: bool,
    calls: Arc<Mutex<Vec<UpdateCall>>>,
}

impl FakeBundleUpdater {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<UpdateCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl BundleUpdater for FakeBundleUpdater {
    fn try_update<'a>(
        &'a self,
        server_url: &'a str,
        target_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(UpdateCall {
                server_url: server_url.to_string(),
                target_dir: target_dir.to_path_buf(),
                target_entries: dir_entries(target_dir),
            });
            self.succeed
        })
    }
}

/// One `execute` call as seen by [`FakeSupervisor`].
#[derive(Debug, Clone)]
pub struct Launch {
    pub request: ProcessRequest,
    pub working_dir_existed: bool,
    /// Entries of the working directory at launch time.
    pub working_dir_entries: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Respond(ProcessResult),
    FailToLaunch,
}

/// A fake supervisor that records launches and returns a canned result
/// without spawning anything.
#[derive(Debug, Clone)]
pub struct FakeSupervisor {
    behaviour: Behaviour,
    launches: Arc<Mutex<Vec<Launch>>>,
}

impl FakeSupervisor {
    pub fn exiting_with(code: i32) -> Self {
        Self::responding(ProcessResult::exited(code))
    }

    pub fn timing_out() -> Self {
        Self::responding(ProcessResult::timed_out())
    }

    pub fn failing_to_launch() -> Self {
        Self {
            behaviour: Behaviour::FailToLaunch,
            launches: Arc::default(),
        }
    }

    fn responding(result: ProcessResult) -> Self {
        Self {
            behaviour: Behaviour::Respond(result),
            launches: Arc::default(),
        }
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.lock().unwrap().clone()
    }
}

impl ProcessSupervisor for FakeSupervisor {
    fn execute<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>> {
        Box::pin(async move {
            self.launches.lock().unwrap().push(Launch {
                request: request.clone(),
                working_dir_existed: request.working_dir.is_dir(),
                working_dir_entries: dir_entries(&request.working_dir),
            });

            match self.behaviour {
                Behaviour::Respond(result) => Ok(result),
                Behaviour::FailToLaunch => Err(StagehandError::Launch {
                    program: request.program.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "fake launch failure"),
                }),
            }
        })
    }
}
