// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`supervisor`] defines the `ProcessSupervisor` trait and the
//!   `OsProcessSupervisor` used in production, which launches an executable,
//!   waits up to a timeout and kills the whole process group when the
//!   timeout wins.
//! - [`quote`] renders argument vectors as a quoted command line for logs.
//!
//! The orchestrator only talks to the trait, so tests can swap in a fake
//! supervisor that never spawns anything.

pub mod quote;
pub mod supervisor;

pub use quote::{quote_argument, quote_arguments};
pub use supervisor::{OsProcessSupervisor, ProcessRequest, ProcessResult, ProcessSupervisor};
