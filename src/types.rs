// src/types.rs

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Runtime used for the alternate function when nothing else is configured.
pub const DEFAULT_RUNTIME: &str = "nodejs18.x";

/// Fixed prefix shared by every function bundle the build tool emits.
pub const FUNCTION_PREFIX: &str = "__nitro";

/// First character outside `[A-Za-z0-9_-]`.
static DISALLOWED_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static regex is valid"));

/// Tag naming an execution runtime variant, e.g. `nodejs18.x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeTag(String);

impl RuntimeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the function bundle that targets this runtime.
    pub fn function_name(&self) -> FunctionName {
        FunctionName::for_suffix(&self.0)
    }
}

impl Default for RuntimeTag {
    fn default() -> Self {
        Self(DEFAULT_RUNTIME.to_string())
    }
}

impl fmt::Display for RuntimeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a function bundle inside `output/functions/`.
///
/// The default bundle is just [`FUNCTION_PREFIX`]; runtime-qualified bundles
/// are `<prefix>-<suffix>`. Only the first disallowed character of the
/// suffix is stripped, matching the naming the deployed routes already use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    /// The bundle the build tool produces by default.
    pub fn primary() -> Self {
        Self(FUNCTION_PREFIX.to_string())
    }

    pub fn for_suffix(suffix: &str) -> Self {
        let suffix = DISALLOWED_CHAR.replace(suffix, "");
        if suffix.is_empty() {
            Self::primary()
        } else {
            Self(format!("{FUNCTION_PREFIX}-{suffix}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory name of the bundle, e.g. `__nitro-nodejs18x.func`.
    pub fn bundle_dir(&self) -> String {
        format!("{}.func", self.0)
    }

    /// Route destination that targets this function, e.g. `/__nitro`.
    pub fn route_dest(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runtime_strips_the_dot() {
        let name = RuntimeTag::default().function_name();
        assert_eq!(name.as_str(), "__nitro-nodejs18x");
        assert_eq!(name.route_dest(), "/__nitro-nodejs18x");
        assert_eq!(name.bundle_dir(), "__nitro-nodejs18x.func");
    }

    #[test]
    fn only_first_disallowed_character_is_removed() {
        assert_eq!(FunctionName::for_suffix("a.b.c").as_str(), "__nitro-ab.c");
        assert_eq!(FunctionName::for_suffix("node js!").as_str(), "__nitro-nodejs!");
    }

    #[test]
    fn word_characters_and_hyphens_are_kept() {
        assert_eq!(
            FunctionName::for_suffix("edge_v2-beta").as_str(),
            "__nitro-edge_v2-beta"
        );
    }

    #[test]
    fn empty_suffix_yields_prefix_only() {
        assert_eq!(FunctionName::for_suffix("").as_str(), FUNCTION_PREFIX);
        assert_eq!(FunctionName::for_suffix(".").as_str(), FUNCTION_PREFIX);
        assert_eq!(FunctionName::for_suffix("").bundle_dir(), "__nitro.func");
    }
}
