#![allow(dead_code)]

use std::path::PathBuf;

pub use nvr_test_utils::init_tracing;

use nvr::config::{RawConfigFile, Settings};

/// Default settings with the canonical output rooted at `output_dir`.
pub fn settings_for(output_dir: impl Into<PathBuf>) -> Settings {
    Settings::try_from(RawConfigFile {
        output_dir: Some(output_dir.into()),
        ..Default::default()
    })
    .expect("default settings are valid")
}
