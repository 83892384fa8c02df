// src/manifest/mod.rs

//! Deployment manifest (`output/config.json`) handling.
//!
//! The manifest is treated as an opaque JSON object except for its
//! `routes` array. Key order of the whole document is preserved across a
//! load / save cycle (`serde_json` is built with `preserve_order`).

pub mod model;
pub mod patch;

pub use model::{DeploymentConfig, Route, CATCH_ALL_SRC};
pub use patch::{insert_routes, patch, routes_for, validate};
