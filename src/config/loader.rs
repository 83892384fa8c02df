// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::env::EnvOverrides;
use crate::config::model::{RawConfigFile, Settings};
use crate::errors::Result;

/// Settings file looked up in the working directory when `--config` is not
/// given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "Nvr.toml";

/// Load a settings file from a given path.
///
/// This only performs TOML deserialization; defaults and validation happen
/// in [`load_settings`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Resolve the settings for this run.
///
/// Precedence, highest first: CLI flags (`cli`), environment (`env`), the
/// settings file, built-in defaults. An explicit `config_path` must exist;
/// the default [`DEFAULT_CONFIG_FILE`] is only read if present.
pub fn load_settings(
    config_path: Option<&Path>,
    env: &EnvOverrides,
    cli: RawConfigFile,
) -> Result<Settings> {
    let file = match config_path {
        Some(path) => load_from_path(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load_from_path(DEFAULT_CONFIG_FILE)?,
        None => RawConfigFile::default(),
    };

    let env_layer = RawConfigFile {
        runtime: env.runtime.clone(),
        ..Default::default()
    };

    let settings = Settings::try_from(file.overlay(env_layer).overlay(cli))?;
    debug!(?settings, "resolved settings");
    Ok(settings)
}
