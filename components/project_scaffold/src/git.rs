// components/project_scaffold/src/git.rs
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub const DEFAULT_BRANCH: &str = "main";
pub const INITIAL_COMMIT_MESSAGE: &str = "Add structure files";
pub const REMOTE_NAME: &str = "origin";

#[async_trait]
pub trait Vcs {
    /// Check that the version control tool can be run
    async fn check_available(&self) -> Result<()>;

    /// Create an empty repository in `dir` whose first branch is `branch`
    async fn init(&self, dir: &Path, branch: &str) -> Result<()>;

    async fn add(&self, dir: &Path, paths: &[PathBuf]) -> Result<()>;

    async fn commit(&self, dir: &Path, message: &str) -> Result<()>;

    async fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()>;

    async fn push(&self, dir: &Path, remote: &str, refspec: &str) -> Result<()>;
}

/// Runs the `git` command line tool
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, dir: &Path, args: Vec<OsString>) -> Result<()> {
        let command = format!(
            "{} {}",
            self.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        tracing::debug!("Running {} in {}", command, dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| ScaffoldError::command_failed(&command, e))?;

        if !output.status.success() {
            return Err(ScaffoldError::CommandExitCode {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

fn os_args<const N: usize>(args: [&str; N]) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

#[async_trait]
impl Vcs for GitCli {
    async fn check_available(&self) -> Result<()> {
        which::which(&self.program)
            .map(|_| ())
            .map_err(|_| ScaffoldError::GitNotFound(self.program.display().to_string()))
    }

    async fn init(&self, dir: &Path, branch: &str) -> Result<()> {
        self.run(dir, os_args(["init", "--quiet"])).await?;
        // Works on git versions that predate `init --initial-branch`
        let head = format!("refs/heads/{}", branch);
        self.run(dir, os_args(["symbolic-ref", "HEAD", head.as_str()])).await
    }

    async fn add(&self, dir: &Path, paths: &[PathBuf]) -> Result<()> {
        let mut args = os_args(["add", "--"]);
        args.extend(paths.iter().map(|p| p.as_os_str().to_owned()));
        self.run(dir, args).await
    }

    async fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.run(dir, os_args(["commit", "--quiet", "-m", message])).await
    }

    async fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()> {
        self.run(dir, os_args(["remote", "add", name, url])).await
    }

    async fn push(&self, dir: &Path, remote: &str, refspec: &str) -> Result<()> {
        self.run(dir, os_args(["push", remote, refspec])).await
    }
}
