// src/engine/orchestrator.rs

//! IO shell around the planning core.
//!
//! Runs the steps from [`plan`](crate::engine::core::plan) one at a time.
//! If a step fails after the snapshot exists, the untouched snapshot is
//! promoted back so the canonical output again holds the first build.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::build::{BuildEnv, BuildInvoker};
use crate::config::Settings;
use crate::engine::core::{decide, plan, Decision};
use crate::engine::{Mode, Outcome, Step};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::manifest;
use crate::output::{self, OutputLayout};

/// What has been done so far; drives rollback.
#[derive(Debug, Default)]
struct Progress {
    snapshot_started: bool,
    staged: bool,
    relocated: Option<PathBuf>,
    promoting: bool,
}

/// Sequences validate → snapshot → build → relocate → patch → promote.
#[derive(Debug)]
pub struct Orchestrator<F, B> {
    settings: Settings,
    layout: OutputLayout,
    fs: F,
    invoker: B,
}

impl<F, B> Orchestrator<F, B>
where
    F: FileSystem,
    B: BuildInvoker,
{
    pub fn new(settings: Settings, fs: F, invoker: B) -> Self {
        let layout = OutputLayout::new(&settings.output_dir);
        Self {
            settings,
            layout,
            fs,
            invoker,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Steps a cold run with `routes` would perform.
    pub fn plan(&self, routes: &[String]) -> Vec<Step> {
        plan(&self.settings, &self.invoker.describe(), routes)
    }

    /// Run for `mode`. A nested build returns [`Outcome::Skipped`] without
    /// touching anything; a cold run with no routes is a usage error.
    pub async fn run(&mut self, mode: Mode, routes: &[String]) -> Result<Outcome> {
        match decide(mode, routes)? {
            Decision::Skip => {
                info!("nested build detected; leaving output to the outer run");
                Ok(Outcome::Skipped)
            }
            Decision::Merge => self.merge(routes).await,
        }
    }

    /// Cold-run body of [`run`](Self::run), for callers that already hold a
    /// [`Decision::Merge`].
    pub async fn merge(&mut self, routes: &[String]) -> Result<Outcome> {
        let function = self.settings.runtime.function_name();
        info!(
            runtime = %self.settings.runtime,
            %function,
            routes = routes.len(),
            output = ?self.layout.canonical(),
            "merging alternate runtime function"
        );

        let mut progress = Progress::default();
        let mut inserted = Vec::new();

        for step in self.plan(routes) {
            debug!(%step, "running step");
            if let Err(err) = self.execute(&step, &mut progress).await {
                error!(%step, error = %err, "step failed");
                self.rollback(&progress);
                return Err(err);
            }
            if let Step::PatchManifest { routes, .. } = step {
                inserted = routes;
            }
        }

        info!(%function, routes = inserted.len(), "merged output promoted");
        Ok(Outcome::Merged {
            function,
            routes: inserted,
        })
    }

    async fn execute(&mut self, step: &Step, progress: &mut Progress) -> Result<()> {
        match step {
            Step::ValidateManifest { path } => manifest::validate(&self.fs, path),
            Step::Snapshot { from, to } => {
                progress.snapshot_started = true;
                output::snapshot(&self.fs, from, to)?;
                progress.staged = true;
                Ok(())
            }
            Step::Build { preset, .. } => self.invoker.invoke(&BuildEnv::new(preset.as_str())).await,
            Step::Relocate { from, to } => {
                output::relocate(&self.fs, from, to)?;
                progress.relocated = Some(to.clone());
                Ok(())
            }
            Step::PatchManifest { path, routes } => manifest::insert_routes(&self.fs, path, routes),
            Step::Promote {
                staging,
                canonical,
                retired,
            } => {
                progress.promoting = true;
                output::promote(&self.fs, staging, canonical, retired)
            }
        }
    }

    /// Undo what `progress` says was done. Failures here are logged; the
    /// caller still returns the original error.
    fn rollback(&self, progress: &Progress) {
        let staging = self.layout.staging();

        if progress.promoting {
            error!(
                ?staging,
                canonical = ?self.layout.canonical(),
                "promotion failed; merged output left in staging for manual recovery"
            );
            return;
        }

        if !progress.staged {
            if progress.snapshot_started && self.fs.exists(staging) {
                if let Err(err) = self.fs.remove_dir_all(staging) {
                    error!(?staging, error = %err, "failed to remove partial staging directory");
                }
            }
            return;
        }

        if let Some(bundle) = &progress.relocated {
            if let Err(err) = self.fs.remove_dir_all(bundle) {
                error!(?bundle, error = %err, "failed to remove relocated bundle; staging left in place");
                return;
            }
        }

        match output::promote(
            &self.fs,
            staging,
            self.layout.canonical(),
            self.layout.retired(),
        ) {
            Ok(()) => warn!(
                canonical = ?self.layout.canonical(),
                "rolled back to the previous build output"
            ),
            Err(err) => error!(?staging, error = %err, "rollback failed; previous output left in staging"),
        }
    }
}
