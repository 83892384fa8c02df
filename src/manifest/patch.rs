// src/manifest/patch.rs

use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::manifest::model::{DeploymentConfig, Route};
use crate::types::RuntimeTag;

/// Check that the manifest at `path` has a `routes` array with a catch-all
/// entry, without modifying it.
pub fn validate(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    let config = DeploymentConfig::load(fs, path)?;
    let index = config.catch_all_index()?;
    debug!(?path, catch_all = index, "deployment config shape ok");
    Ok(())
}

/// Route every pattern to the function built for `runtime`.
///
/// New routes go directly before the catch-all, in the order given; every
/// other field of the document is written back unchanged. Nothing is
/// written if the catch-all cannot be found. Returns the routes inserted.
pub fn patch(
    fs: &dyn FileSystem,
    path: &Path,
    patterns: &[String],
    runtime: &RuntimeTag,
) -> Result<Vec<Route>> {
    let routes = routes_for(patterns, runtime);
    insert_routes(fs, path, &routes)?;
    debug!(%runtime, "routes target {}", runtime.function_name().route_dest());
    Ok(routes)
}

/// One route per pattern, all pointing at the function built for `runtime`.
pub fn routes_for(patterns: &[String], runtime: &RuntimeTag) -> Vec<Route> {
    let dest = runtime.function_name().route_dest();
    patterns
        .iter()
        .map(|src| Route {
            src: src.clone(),
            dest: dest.clone(),
        })
        .collect()
}

/// Insert prepared routes directly before the catch-all of the manifest at
/// `path` and write it back. Nothing is written on failure.
pub fn insert_routes(fs: &dyn FileSystem, path: &Path, routes: &[Route]) -> Result<()> {
    let mut config = DeploymentConfig::load(fs, path)?;
    let index = config.insert_before_catch_all(routes)?;
    config.save(fs)?;

    info!(
        ?path,
        inserted = routes.len(),
        at = index,
        "patched deployment routes"
    );
    Ok(())
}
