// src/build/invoker.rs

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::env::{PRESET_VAR, RUNNING_VALUE, RUNNING_VAR};
use crate::errors::{NvrError, Result};

/// Environment the nested build runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    /// Deployment preset selector passed to the build tool.
    pub preset: String,
}

impl BuildEnv {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
        }
    }

    /// Variables set on the child: the preset and the re-entrance guard.
    pub fn vars(&self) -> [(&'static str, String); 2] {
        [
            (PRESET_VAR, self.preset.clone()),
            (RUNNING_VAR, RUNNING_VALUE.to_string()),
        ]
    }
}

/// Trait abstracting how the nested build is run.
///
/// Production code uses [`CommandBuildInvoker`]; tests provide an
/// implementation that writes a fake build output instead of spawning a
/// process.
pub trait BuildInvoker: Send {
    /// Run the build to completion. A non-zero exit must surface as
    /// [`NvrError::BuildFailed`].
    fn invoke(&mut self, env: &BuildEnv) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Human-readable description used in logs and dry-run output.
    fn describe(&self) -> String;
}

/// Runs the build command through the platform shell with inherited stdio.
#[derive(Debug, Clone)]
pub struct CommandBuildInvoker {
    command: String,
    working_dir: Option<PathBuf>,
}

impl CommandBuildInvoker {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn shell_command(&self) -> Command {
        if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.command);
            c
        }
    }
}

impl BuildInvoker for CommandBuildInvoker {
    fn invoke(&mut self, env: &BuildEnv) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let mut cmd = self.shell_command();
        cmd.envs(env.vars())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        let command = self.command.clone();
        let preset = env.preset.clone();

        Box::pin(async move {
            info!(cmd = %command, %preset, "starting nested build");

            let status = cmd.status().await.map_err(|source| NvrError::BuildSpawn {
                command: command.clone(),
                source,
            })?;

            match status.code() {
                Some(0) => {
                    info!(cmd = %command, "nested build finished");
                    Ok(())
                }
                Some(code) => {
                    warn!(cmd = %command, exit_code = code, "nested build failed");
                    Err(NvrError::BuildFailed { command, code })
                }
                None => Err(NvrError::BuildTerminated { command }),
            }
        })
    }

    fn describe(&self) -> String {
        self.command.clone()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn child_sees_preset_and_guard() {
        let dir = tempdir().unwrap();
        let mut invoker = CommandBuildInvoker::new(
            "printf '%s %s' \"$NITRO_PRESET\" \"$NVR_RUNNING\" > env.txt",
        )
        .with_working_dir(dir.path());

        invoker.invoke(&BuildEnv::new("vercel")).await.unwrap();

        let seen = std::fs::read_to_string(dir.path().join("env.txt")).unwrap();
        assert_eq!(seen, "vercel 1");
    }

    #[tokio::test]
    async fn non_zero_exit_is_propagated() {
        let mut invoker = CommandBuildInvoker::new("exit 3");
        let err = invoker.invoke(&BuildEnv::new("vercel")).await.unwrap_err();

        match err {
            NvrError::BuildFailed { code, .. } => assert_eq!(code, 3),
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }
}
