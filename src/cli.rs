// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawConfigFile;

/// Command-line arguments for `nvr`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "nvr",
    version,
    about = "Build a second function for an alternate runtime and route selected paths to it.",
    long_about = None
)]
pub struct CliArgs {
    /// Route patterns served by the alternate-runtime function,
    /// e.g. `/api/legacy/(.*)`.
    #[arg(value_name = "ROUTE")]
    pub routes: Vec<String>,

    /// Runtime tag of the alternate function.
    ///
    /// If omitted, `NVR_RUNTIME`, the settings file or `nodejs18.x` is used.
    #[arg(long, value_name = "TAG")]
    pub runtime: Option<String>,

    /// Canonical build output directory.
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Command that runs the nested build.
    #[arg(long, value_name = "CMD")]
    pub build_command: Option<String>,

    /// Preset passed to the nested build via `NITRO_PRESET`.
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Path to a settings file (TOML).
    ///
    /// Default: `Nvr.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NVR_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate inputs and print the steps, but don't touch any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The settings this invocation overrides on the command line.
    pub fn overrides(&self) -> RawConfigFile {
        RawConfigFile {
            runtime: self.runtime.clone(),
            preset: self.preset.clone(),
            build_command: self.build_command.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::try_parse()`.
pub fn try_parse() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}
