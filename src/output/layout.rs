// src/output/layout.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::FunctionName;

/// Default canonical output root written by the build tool.
pub const DEFAULT_OUTPUT_DIR: &str = ".vercel";

const STAGING_SUFFIX: &str = ".staging";
const RETIRED_SUFFIX: &str = ".bak";

/// Paths of the three output roots used during one run.
///
/// - `canonical`: where the build tool writes and the platform deploys from.
/// - `staging`: where the merged output is assembled.
/// - `retired`: where the stale canonical tree waits during promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    canonical: PathBuf,
    staging: PathBuf,
    retired: PathBuf,
}

impl OutputLayout {
    pub fn new(canonical: impl Into<PathBuf>) -> Self {
        let canonical = canonical.into();
        let staging = sibling_with_suffix(&canonical, STAGING_SUFFIX);
        let retired = sibling_with_suffix(&canonical, RETIRED_SUFFIX);
        Self {
            canonical,
            staging,
            retired,
        }
    }

    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    pub fn retired(&self) -> &Path {
        &self.retired
    }

    /// `<root>/output/functions/<name>.func`
    pub fn function_path(root: &Path, name: &FunctionName) -> PathBuf {
        root.join("output").join("functions").join(name.bundle_dir())
    }

    /// `<root>/output/config.json`
    pub fn manifest_path(root: &Path) -> PathBuf {
        root.join("output").join("config.json")
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(DEFAULT_OUTPUT_DIR));
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_siblings_of_canonical() {
        let layout = OutputLayout::new("/work/app/.vercel");
        assert_eq!(layout.staging(), Path::new("/work/app/.vercel.staging"));
        assert_eq!(layout.retired(), Path::new("/work/app/.vercel.bak"));
    }

    #[test]
    fn bundle_and_manifest_paths() {
        let root = Path::new(".vercel");
        assert_eq!(
            OutputLayout::function_path(root, &FunctionName::primary()),
            PathBuf::from(".vercel/output/functions/__nitro.func")
        );
        assert_eq!(
            OutputLayout::manifest_path(root),
            PathBuf::from(".vercel/output/config.json")
        );
    }
}
