// src/engine/core.rs

//! Pure decision and planning logic.
//!
//! Nothing here touches the filesystem or spawns processes, so the mode
//! handling, usage validation and step ordering can be tested directly.

use crate::config::Settings;
use crate::engine::{Mode, Step};
use crate::errors::{NvrError, Result};
use crate::manifest::routes_for;
use crate::output::OutputLayout;
use crate::types::FunctionName;

/// Whether a run should go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Merge,
}

pub fn usage_message() -> String {
    "Usage: nvr <route> [route...]".to_string()
}

/// Decide what to do for `mode` and `routes`.
///
/// A nested build always skips, whatever it was passed. A cold run without
/// routes is a usage error.
pub fn decide(mode: Mode, routes: &[String]) -> Result<Decision> {
    match mode {
        Mode::Building => Ok(Decision::Skip),
        Mode::Cold if routes.is_empty() => Err(NvrError::Usage(usage_message())),
        Mode::Cold => Ok(Decision::Merge),
    }
}

/// Ordered steps of a cold run.
pub fn plan(settings: &Settings, build_command: &str, routes: &[String]) -> Vec<Step> {
    let layout = OutputLayout::new(&settings.output_dir);
    let function = settings.runtime.function_name();

    vec![
        Step::ValidateManifest {
            path: OutputLayout::manifest_path(layout.canonical()),
        },
        Step::Snapshot {
            from: layout.canonical().to_path_buf(),
            to: layout.staging().to_path_buf(),
        },
        Step::Build {
            command: build_command.to_string(),
            preset: settings.preset.clone(),
        },
        Step::Relocate {
            from: OutputLayout::function_path(layout.canonical(), &FunctionName::primary()),
            to: OutputLayout::function_path(layout.staging(), &function),
        },
        Step::PatchManifest {
            path: OutputLayout::manifest_path(layout.staging()),
            routes: routes_for(routes, &settings.runtime),
        },
        Step::Promote {
            staging: layout.staging().to_path_buf(),
            canonical: layout.canonical().to_path_buf(),
            retired: layout.retired().to_path_buf(),
        },
    ]
}
