#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nvr::fs::FileSystem;
use nvr::output::OutputLayout;
use nvr::types::FunctionName;
use serde_json::{json, Value};

/// Builder for a build-output tree as the build tool would leave it:
/// `<root>/output/config.json` plus function bundles under
/// `<root>/output/functions/`.
pub struct OutputTreeBuilder {
    root: PathBuf,
    config: Value,
    bundles: Vec<(FunctionName, String)>,
    files: Vec<(PathBuf, String)>,
}

impl OutputTreeBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: default_config(),
            bundles: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Replace the manifest document.
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Add a bundle whose `index.mjs` contains `marker`.
    pub fn with_bundle(mut self, name: FunctionName, marker: &str) -> Self {
        self.bundles.push((name, marker.to_string()));
        self
    }

    /// Add the default `__nitro.func` bundle.
    pub fn with_primary_bundle(self, marker: &str) -> Self {
        self.with_bundle(FunctionName::primary(), marker)
    }

    /// Add an arbitrary file relative to `<root>/output`.
    pub fn with_file(mut self, rel: &str, contents: &str) -> Self {
        self.files.push((PathBuf::from(rel), contents.to_string()));
        self
    }

    /// Write the tree through any `FileSystem`.
    pub fn write_to(&self, fs: &dyn FileSystem) -> anyhow::Result<()> {
        let manifest = serde_json::to_string_pretty(&self.config)?;
        fs.write(&OutputLayout::manifest_path(&self.root), manifest.as_bytes())?;

        for (name, marker) in &self.bundles {
            let dir = OutputLayout::function_path(&self.root, name);
            fs.write(&dir.join("index.mjs"), marker.as_bytes())?;
            fs.write(&dir.join(".vc-config.json"), b"{\"handler\":\"index.mjs\"}")?;
        }
        for (rel, contents) in &self.files {
            fs.write(&self.root.join("output").join(rel), contents.as_bytes())?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// The manifest shape the build tool emits: a filesystem handler followed by
/// the catch-all, plus unrelated top-level fields.
pub fn default_config() -> Value {
    json!({
        "version": 3,
        "routes": [
            { "src": "/_nuxt/(.*)", "headers": { "cache-control": "public,max-age=31536000,immutable" }, "continue": true },
            { "handle": "filesystem" },
            { "src": "/(.*)", "dest": "/__nitro" }
        ],
        "overrides": {}
    })
}

/// Read `index.mjs` of a bundle, the marker written by the builder.
pub fn bundle_marker(fs: &dyn FileSystem, root: &Path, name: &FunctionName) -> anyhow::Result<String> {
    fs.read_to_string(&OutputLayout::function_path(root, name).join("index.mjs"))
}

/// Parse the manifest below `root`.
pub fn read_config(fs: &dyn FileSystem, root: &Path) -> anyhow::Result<Value> {
    let contents = fs.read_to_string(&OutputLayout::manifest_path(root))?;
    Ok(serde_json::from_str(&contents)?)
}
