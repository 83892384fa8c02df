// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::RuntimeTag;

/// Build command run for the nested build.
pub const DEFAULT_BUILD_COMMAND: &str = "npm run build";

/// Preset the nested build is asked to target.
pub const DEFAULT_PRESET: &str = "vercel";

/// Settings as read from an optional `Nvr.toml`.
///
/// ```toml
/// runtime = "nodejs20.x"
/// preset = "vercel"
/// build_command = "pnpm build"
/// output_dir = ".vercel"
/// ```
///
/// Every key is optional. CLI flags and environment variables are layered on
/// top with [`RawConfigFile::overlay`] before validation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfigFile {
    pub runtime: Option<String>,
    pub preset: Option<String>,
    pub build_command: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl RawConfigFile {
    /// Values present in `higher` win over values in `self`.
    pub fn overlay(self, higher: RawConfigFile) -> RawConfigFile {
        RawConfigFile {
            runtime: higher.runtime.or(self.runtime),
            preset: higher.preset.or(self.preset),
            build_command: higher.build_command.or(self.build_command),
            output_dir: higher.output_dir.or(self.output_dir),
        }
    }
}

/// Validated settings for one run. Construct via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub runtime: RuntimeTag,
    pub preset: String,
    pub build_command: String,
    pub output_dir: PathBuf,
}
