// src/config/mod.rs

//! Settings for one `nvr` run.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Capture the environment toggles read at the process boundary (`env.rs`).
//! - Load the optional settings file and layer CLI / env overrides on top
//!   (`loader.rs`).
//! - Validate the merged result into [`Settings`] (`validate.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use env::EnvOverrides;
pub use loader::{load_from_path, load_settings, DEFAULT_CONFIG_FILE};
pub use model::{RawConfigFile, Settings, DEFAULT_BUILD_COMMAND, DEFAULT_PRESET};
