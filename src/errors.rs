// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for usage errors (no route patterns given).
pub const EXIT_USAGE: i32 = 1;

/// Exit code for every failure that does not carry its own code.
pub const EXIT_INTERNAL: i32 = 2;

#[derive(Error, Debug)]
pub enum NvrError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("build command `{command}` failed with exit code {code}")]
    BuildFailed { command: String, code: i32 },

    #[error("build command `{command}` was terminated by a signal")]
    BuildTerminated { command: String },

    #[error("failed to spawn build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("incompatible deployment config at {path:?}: {reason}")]
    ConfigShape { path: PathBuf, reason: String },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("filesystem error: {0:#}")]
    Filesystem(#[from] anyhow::Error),
}

impl NvrError {
    /// Process exit code the binary should terminate with for this error.
    ///
    /// A failed build propagates the subprocess's own code so callers see
    /// the same status they would have seen running the build directly.
    pub fn exit_code(&self) -> i32 {
        match self {
            NvrError::Usage(_) => EXIT_USAGE,
            NvrError::BuildFailed { code, .. } if *code != 0 => *code,
            _ => EXIT_INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, NvrError>;
