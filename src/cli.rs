// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! `stagehand` owns no flags of its own: every token on the command line is
//! forwarded to the pre-processor, and the mere presence of tokens selects
//! pre-process mode. Configuration and log level come from the environment
//! (`STAGEHAND_CONFIG`, `STAGEHAND_LOG`).

use clap::Parser;

/// Command-line arguments for `stagehand`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "stagehand",
    about = "Stage a build, fetch the tool bundle and run the pre/post-processors.",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Arguments forwarded verbatim to the pre-processor.
    ///
    /// When empty, the post-processor runs instead.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub args: Vec<String>,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
