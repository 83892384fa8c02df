// src/manifest/model.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{NvrError, Result};
use crate::fs::FileSystem;

/// `src` of the platform's default route.
pub const CATCH_ALL_SRC: &str = "/(.*)";

/// A route entry this tool writes. Existing entries may have other shapes
/// (e.g. `{"handle": "filesystem"}`) and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub src: String,
    pub dest: String,
}

/// The parsed manifest plus the path it was read from.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    path: PathBuf,
    document: Map<String, Value>,
}

impl DeploymentConfig {
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let contents = fs.read_to_string(path)?;
        Self::parse(path, &contents)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents).map_err(|source| NvrError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(shape_error(path, "top-level value is not an object")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw route entries in priority order.
    pub fn routes(&self) -> Result<&Vec<Value>> {
        match self.document.get("routes") {
            Some(Value::Array(routes)) => Ok(routes),
            Some(_) => Err(shape_error(&self.path, "`routes` is not an array")),
            None => Err(shape_error(&self.path, "missing `routes` array")),
        }
    }

    fn routes_mut(&mut self) -> Result<&mut Vec<Value>> {
        let path = self.path.clone();
        match self.document.get_mut("routes") {
            Some(Value::Array(routes)) => Ok(routes),
            Some(_) => Err(shape_error(&path, "`routes` is not an array")),
            None => Err(shape_error(&path, "missing `routes` array")),
        }
    }

    /// Index of the first catch-all route.
    pub fn catch_all_index(&self) -> Result<usize> {
        self.routes()?
            .iter()
            .position(|route| route.get("src").and_then(Value::as_str) == Some(CATCH_ALL_SRC))
            .ok_or_else(|| {
                shape_error(
                    &self.path,
                    "could not find the default route `/(.*)`; unsupported platform output version",
                )
            })
    }

    /// Insert `routes` directly before the catch-all, keeping their order.
    /// Returns the index the first new route landed at.
    pub fn insert_before_catch_all(&mut self, routes: &[Route]) -> Result<usize> {
        let index = self.catch_all_index()?;
        let values = routes
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|source| NvrError::Json {
                path: self.path.clone(),
                source,
            })?;

        let routes = self.routes_mut()?;
        let tail = routes.split_off(index);
        routes.extend(values);
        routes.extend(tail);
        Ok(index)
    }

    /// The whole document with 2-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document).map_err(|source| NvrError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the document back to its path.
    ///
    /// The contents go to a sibling temp file first and are renamed over the
    /// original, so readers never observe a half-written manifest.
    pub fn save(&self, fs: &dyn FileSystem) -> Result<()> {
        let json = self.to_pretty_json()?;
        let tmp = temp_path(&self.path);
        fs.write(&tmp, json.as_bytes())?;
        if let Err(err) = fs.rename(&tmp, &self.path) {
            let _ = fs.remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn shape_error(path: &Path, reason: &str) -> NvrError {
    NvrError::ConfigShape {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
