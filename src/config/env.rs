// src/config/env.rs

//! Environment variables understood by `nvr`.
//!
//! Only the binary boundary reads the process environment; everything below
//! it receives an [`EnvOverrides`] value or an explicit mode.

/// Overrides the alternate runtime tag.
pub const RUNTIME_VAR: &str = "NVR_RUNTIME";

/// Re-entrance marker set on the nested build.
pub const RUNNING_VAR: &str = "NVR_RUNNING";

/// Value of [`RUNNING_VAR`] that marks a nested invocation.
pub const RUNNING_VALUE: &str = "1";

/// Preset selector passed to the build tool.
pub const PRESET_VAR: &str = "NITRO_PRESET";

/// Log level used when `--log-level` is not given.
pub const LOG_VAR: &str = "NVR_LOG";

/// Environment-derived inputs, captured once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// True when this process is the nested build started by another `nvr`.
    pub running: bool,
    /// Non-empty value of [`RUNTIME_VAR`].
    pub runtime: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            running: lookup(RUNNING_VAR).as_deref() == Some(RUNNING_VALUE),
            runtime: lookup(RUNTIME_VAR).filter(|s| !s.is_empty()),
        }
    }
}
