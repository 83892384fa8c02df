// src/build/mod.rs

//! Nested build invocation.
//!
//! The orchestrator talks to a [`BuildInvoker`] instead of spawning the
//! build itself, so tests can swap in a fake that writes a canned output
//! tree. [`CommandBuildInvoker`] is the production implementation.

pub mod invoker;

pub use invoker::{BuildEnv, BuildInvoker, CommandBuildInvoker};
