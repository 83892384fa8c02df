// src/output/mod.rs

//! Build-output trees on disk.
//!
//! - [`layout`] knows where the build tool puts things (canonical root,
//!   function bundles, manifest) and derives the staging / retired roots.
//! - [`backup`] moves, snapshots and promotes whole trees.
//! - [`relocate`] moves a single function bundle between trees.

pub mod backup;
pub mod layout;
pub mod relocate;

pub use backup::{backup, move_tree, promote, restore, snapshot};
pub use layout::OutputLayout;
pub use relocate::relocate;
