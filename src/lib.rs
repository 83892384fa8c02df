// src/lib.rs

pub mod build;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod types;

use tracing::{debug, info};

use crate::build::{BuildInvoker, CommandBuildInvoker};
use crate::cli::CliArgs;
use crate::config::{load_settings, EnvOverrides};
use crate::engine::{decide, Decision, Mode, Orchestrator, Outcome};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// The environment has already been captured in `env`; from here on the
/// re-entrance marker only travels as an explicit [`Mode`]. A nested
/// invocation returns before the settings file is even read.
pub async fn run(args: CliArgs, env: EnvOverrides) -> Result<Outcome> {
    if decide(Mode::from_marker(env.running), &args.routes)? == Decision::Skip {
        info!("nested build detected; leaving output to the outer run");
        return Ok(Outcome::Skipped);
    }

    let settings = load_settings(args.config.as_deref(), &env, args.overrides())?;
    let invoker = CommandBuildInvoker::new(settings.build_command.clone());
    let mut orchestrator = Orchestrator::new(settings, RealFileSystem, invoker);

    if args.dry_run {
        print_dry_run(&orchestrator, &args.routes);
        return Ok(Outcome::DryRun);
    }

    orchestrator.merge(&args.routes).await
}

/// Print the resolved settings and the steps a real run would take.
fn print_dry_run<F: FileSystem, B: BuildInvoker>(orchestrator: &Orchestrator<F, B>, routes: &[String]) {
    let settings = orchestrator.settings();
    println!("nvr dry-run");
    println!("  runtime = {}", settings.runtime);
    println!("  function = {}", settings.runtime.function_name());
    println!("  preset = {}", settings.preset);
    println!("  output_dir = {}", settings.output_dir.display());
    println!();

    println!("routes ({}):", routes.len());
    for route in routes {
        println!("  - {route}");
    }
    println!();

    println!("steps:");
    for (i, step) in orchestrator.plan(routes).iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }

    debug!("dry-run complete (no changes made)");
}
