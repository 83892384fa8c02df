// src/engine/mod.rs

//! Orchestration engine for nvr.
//!
//! The pure core ([`core`]) decides, from the explicit [`Mode`] and the
//! requested routes, whether anything should happen and which [`Step`]s make
//! up a run. The shell ([`orchestrator`]) performs those steps against a
//! [`FileSystem`](crate::fs::FileSystem) and a
//! [`BuildInvoker`](crate::build::BuildInvoker), rolling back on failure.

use std::fmt;
use std::path::PathBuf;

use crate::manifest::Route;
use crate::types::FunctionName;

/// Whether this process should orchestrate or stay out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fresh invocation: run the full merge.
    Cold,
    /// This process is the nested build started by a `Cold` run.
    Building,
}

impl Mode {
    /// Mode for a process that did (or did not) see the re-entrance marker.
    pub fn from_marker(marker_set: bool) -> Self {
        if marker_set { Mode::Building } else { Mode::Cold }
    }
}

/// What a completed invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nested invocation; nothing was done.
    Skipped,
    /// Steps were printed, nothing was done.
    DryRun,
    /// The alternate function was merged and `routes` now point at it.
    Merged {
        function: FunctionName,
        routes: Vec<Route>,
    },
}

/// One unit of work in a `Cold` run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Check the current manifest has a catch-all route.
    ValidateManifest { path: PathBuf },
    /// Copy the current output into staging.
    Snapshot { from: PathBuf, to: PathBuf },
    /// Run the nested build, overwriting the canonical output.
    Build { command: String, preset: String },
    /// Move the freshly built function into staging under its runtime name.
    Relocate { from: PathBuf, to: PathBuf },
    /// Insert the routes into the staged manifest.
    PatchManifest { path: PathBuf, routes: Vec<Route> },
    /// Replace the canonical output with staging.
    Promote {
        staging: PathBuf,
        canonical: PathBuf,
        retired: PathBuf,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::ValidateManifest { path } => write!(f, "validate {}", path.display()),
            Step::Snapshot { from, to } => {
                write!(f, "snapshot {} -> {}", from.display(), to.display())
            }
            Step::Build { command, preset } => {
                write!(f, "build `{command}` (NITRO_PRESET={preset}, NVR_RUNNING=1)")
            }
            Step::Relocate { from, to } => {
                write!(f, "relocate {} -> {}", from.display(), to.display())
            }
            Step::PatchManifest { path, routes } => {
                write!(f, "patch {} (+{} routes)", path.display(), routes.len())
            }
            Step::Promote {
                staging,
                canonical,
                retired,
            } => write!(
                f,
                "promote {} -> {} (via {})",
                staging.display(),
                canonical.display(),
                retired.display()
            ),
        }
    }
}

pub mod core;
pub mod orchestrator;

pub use self::core::{decide, plan, usage_message, Decision};
pub use orchestrator::Orchestrator;
