// components/project_scaffold/src/plan.rs
//! Plan-then-apply scaffolding
//!
//! A [`ScaffoldPlan`] is computed up front from the project name and
//! options. Dry runs only render it; applying walks the same steps in order,
//! so what is previewed is exactly what gets executed.

use crate::error::{Result, ScaffoldError};
use crate::git::{Vcs, DEFAULT_BRANCH, INITIAL_COMMIT_MESSAGE, REMOTE_NAME};
use crate::layout;
use crate::types::{FileContents, GitOptions, ProjectName};
use std::fmt;
use std::path::{Path, PathBuf};

/// One unit of work; paths are relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldStep {
    CreateDir(PathBuf),
    WriteFile {
        path: PathBuf,
        contents: FileContents,
    },
    GitInit {
        branch: String,
    },
    GitAdd(Vec<PathBuf>),
    GitCommit(String),
    GitAddRemote {
        name: String,
        url: String,
    },
    GitPush {
        remote: String,
        refspec: String,
    },
}

impl ScaffoldStep {
    fn is_git(&self) -> bool {
        !matches!(
            self,
            ScaffoldStep::CreateDir(_) | ScaffoldStep::WriteFile { .. }
        )
    }
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldStep::CreateDir(path) => write!(f, "create directory {}/", path.display()),
            ScaffoldStep::WriteFile { path, contents } => match contents {
                FileContents::Empty => write!(f, "create empty file {}", path.display()),
                FileContents::Text(text) => {
                    write!(f, "write {} ({} bytes)", path.display(), text.len())
                }
                FileContents::CopyFrom(source) => {
                    write!(f, "copy {} to {}", source.display(), path.display())
                }
            },
            ScaffoldStep::GitInit { branch } => write!(f, "git init (branch {})", branch),
            ScaffoldStep::GitAdd(paths) => {
                let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "git add {}", paths.join(" "))
            }
            ScaffoldStep::GitCommit(message) => write!(f, "git commit -m \"{}\"", message),
            ScaffoldStep::GitAddRemote { name, url } => {
                write!(f, "git remote add {} {}", name, url)
            }
            ScaffoldStep::GitPush { remote, refspec } => write!(f, "git push {} {}", remote, refspec),
        }
    }
}

/// Ordered steps that create one project
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    root: PathBuf,
    steps: Vec<ScaffoldStep>,
}

/// What an applied plan did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub created_dirs: Vec<PathBuf>,
    pub written_files: Vec<PathBuf>,
    pub committed: Option<String>,
    pub pushed_to: Option<String>,
}

impl ScaffoldPlan {
    pub fn new(
        destination: &Path,
        name: &ProjectName,
        licence: FileContents,
        git: Option<&GitOptions>,
    ) -> Self {
        let root = destination.join(name.as_str());

        let mut steps: Vec<ScaffoldStep> = layout::DIRECTORIES
            .iter()
            .map(|dir| ScaffoldStep::CreateDir(PathBuf::from(dir)))
            .collect();

        steps.extend(
            layout::files(name, licence)
                .into_iter()
                .map(|(path, contents)| ScaffoldStep::WriteFile { path, contents }),
        );

        if let Some(git) = git {
            steps.push(ScaffoldStep::GitInit {
                branch: DEFAULT_BRANCH.to_string(),
            });
            steps.push(ScaffoldStep::GitAdd(
                layout::STAGED_PATHS.iter().map(PathBuf::from).collect(),
            ));
            steps.push(ScaffoldStep::GitCommit(INITIAL_COMMIT_MESSAGE.to_string()));

            if let Some(url) = &git.remote_url {
                steps.push(ScaffoldStep::GitAddRemote {
                    name: REMOTE_NAME.to_string(),
                    url: url.clone(),
                });
                steps.push(ScaffoldStep::GitPush {
                    remote: REMOTE_NAME.to_string(),
                    refspec: format!("{0}:{0}", DEFAULT_BRANCH),
                });
            }
        }

        Self { root, steps }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn steps(&self) -> &[ScaffoldStep] {
        &self.steps
    }

    pub fn uses_git(&self) -> bool {
        self.steps.iter().any(ScaffoldStep::is_git)
    }

    /// Fail if something already exists at the project root
    pub fn ensure_root_free(&self) -> Result<()> {
        if self.root.exists() {
            return Err(ScaffoldError::ProjectExists(self.root.clone()));
        }
        Ok(())
    }

    /// Execute every step in order
    ///
    /// Fails without touching disk if the project root already exists. A
    /// failing step aborts the run; earlier steps are not rolled back.
    pub async fn apply(&self, vcs: &(dyn Vcs + Send + Sync)) -> Result<ScaffoldReport> {
        self.ensure_root_free()?;
        if self.uses_git() {
            vcs.check_available().await?;
        }

        tracing::info!("Scaffolding project at {}", self.root.display());
        let mut report = ScaffoldReport {
            root: self.root.clone(),
            ..ScaffoldReport::default()
        };

        for step in &self.steps {
            tracing::debug!("{}", step);
            self.apply_step(step, vcs, &mut report).await?;
        }

        Ok(report)
    }

    async fn apply_step(
        &self,
        step: &ScaffoldStep,
        vcs: &(dyn Vcs + Send + Sync),
        report: &mut ScaffoldReport,
    ) -> Result<()> {
        let root = &self.root;
        match step {
            ScaffoldStep::CreateDir(dir) => {
                let path = root.join(dir);
                tokio::fs::create_dir_all(&path)
                    .await
                    .map_err(|e| ScaffoldError::io(format!("creating {}", path.display()), e))?;
                report.created_dirs.push(dir.clone());
            }
            ScaffoldStep::WriteFile { path, contents } => {
                let target = root.join(path);
                write_file(&target, contents).await?;
                report.written_files.push(path.clone());
            }
            ScaffoldStep::GitInit { branch } => vcs.init(root, branch).await?,
            ScaffoldStep::GitAdd(paths) => vcs.add(root, paths).await?,
            ScaffoldStep::GitCommit(message) => {
                vcs.commit(root, message).await?;
                report.committed = Some(message.clone());
            }
            ScaffoldStep::GitAddRemote { name, url } => vcs.add_remote(root, name, url).await?,
            ScaffoldStep::GitPush { remote, refspec } => {
                vcs.push(root, remote, refspec).await?;
                report.pushed_to = self.steps.iter().find_map(|s| match s {
                    ScaffoldStep::GitAddRemote { name, url } if name == remote => Some(url.clone()),
                    _ => None,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScaffoldPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan for {}:", self.root.display())?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {:>2}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

async fn write_file(target: &Path, contents: &FileContents) -> Result<()> {
    let context = |e| ScaffoldError::io(format!("writing {}", target.display()), e);
    match contents {
        FileContents::Empty => tokio::fs::write(target, b"").await.map_err(context),
        FileContents::Text(text) => tokio::fs::write(target, text).await.map_err(context),
        FileContents::CopyFrom(source) => tokio::fs::copy(source, target)
            .await
            .map(|_| ())
            .map_err(|e| {
                ScaffoldError::io(
                    format!("copying {} to {}", source.display(), target.display()),
                    e,
                )
            }),
    }
}
