// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{RawConfigFile, Settings, DEFAULT_BUILD_COMMAND, DEFAULT_PRESET};
use crate::errors::{NvrError, Result};
use crate::output::layout::DEFAULT_OUTPUT_DIR;
use crate::types::RuntimeTag;

impl TryFrom<RawConfigFile> for Settings {
    type Error = NvrError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let runtime = match raw.runtime {
            Some(tag) => RuntimeTag::new(tag),
            None => RuntimeTag::default(),
        };

        let preset = non_blank("preset", raw.preset, DEFAULT_PRESET)?;
        let build_command = non_blank("build_command", raw.build_command, DEFAULT_BUILD_COMMAND)?;

        let output_dir = raw
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        if output_dir.as_os_str().is_empty() {
            return Err(NvrError::ConfigError(
                "output_dir must not be empty".to_string(),
            ));
        }
        if output_dir.file_name().is_none() {
            return Err(NvrError::ConfigError(format!(
                "output_dir {:?} must name a directory",
                output_dir
            )));
        }

        Ok(Settings {
            runtime,
            preset,
            build_command,
            output_dir,
        })
    }
}

fn non_blank(key: &str, value: Option<String>, default: &str) -> Result<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(NvrError::ConfigError(format!(
            "{key} must not be blank"
        ))),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_values() {
        let settings = Settings::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(settings.runtime.as_str(), "nodejs18.x");
        assert_eq!(settings.preset, "vercel");
        assert_eq!(settings.build_command, "npm run build");
        assert_eq!(settings.output_dir, PathBuf::from(".vercel"));
    }

    #[test]
    fn blank_build_command_is_rejected() {
        let raw = RawConfigFile {
            build_command: Some("   ".into()),
            ..Default::default()
        };
        match Settings::try_from(raw) {
            Err(NvrError::ConfigError(msg)) => assert!(msg.contains("build_command")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn parent_dir_output_is_rejected() {
        let raw = RawConfigFile {
            output_dir: Some(PathBuf::from("..")),
            ..Default::default()
        };
        assert!(matches!(
            Settings::try_from(raw),
            Err(NvrError::ConfigError(_))
        ));
    }
}
