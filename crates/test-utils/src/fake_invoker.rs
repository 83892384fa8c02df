use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use nvr::build::{BuildEnv, BuildInvoker};
use nvr::errors::{NvrError, Result};
use nvr::fs::FileSystem;

use crate::builders::OutputTreeBuilder;

/// A fake build invoker that:
/// - records the environment of every invocation
/// - replaces the canonical output with a canned tree (the "second build"),
///   or fails with a given exit code without touching anything.
pub struct FakeBuildInvoker<F> {
    fs: F,
    output: OutputTreeBuilder,
    fail_with: Option<i32>,
    calls: Arc<Mutex<Vec<BuildEnv>>>,
}

impl<F: FileSystem + Clone + 'static> FakeBuildInvoker<F> {
    pub fn new(fs: F, output: OutputTreeBuilder, calls: Arc<Mutex<Vec<BuildEnv>>>) -> Self {
        Self {
            fs,
            output,
            fail_with: None,
            calls,
        }
    }

    /// Make every invocation exit with `code`.
    pub fn failing(mut self, code: i32) -> Self {
        self.fail_with = Some(code);
        self
    }
}

impl<F: FileSystem + Clone + 'static> BuildInvoker for FakeBuildInvoker<F> {
    fn invoke(&mut self, env: &BuildEnv) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        {
            let mut guard = self.calls.lock().unwrap();
            guard.push(env.clone());
        }

        let result = match self.fail_with {
            Some(code) => Err(NvrError::BuildFailed {
                command: self.describe(),
                code,
            }),
            None => self.rebuild(),
        };

        Box::pin(async move { result })
    }

    fn describe(&self) -> String {
        "fake build".to_string()
    }
}

impl<F: FileSystem + Clone + 'static> FakeBuildInvoker<F> {
    /// The build tool wipes its output directory before writing a new one.
    fn rebuild(&self) -> Result<()> {
        let root = self.output.root();
        if self.fs.exists(root) {
            self.fs.remove_dir_all(root)?;
        }
        self.output.write_to(&self.fs)?;
        Ok(())
    }
}
