// components/project_scaffold/src/lib.rs
//! Directory skeleton and git bootstrap for machine-learning projects

mod error;
mod git;
mod layout;
mod plan;
mod types;

use std::path::{Path, PathBuf};

pub use error::{Result, ScaffoldError};
pub use git::{GitCli, Vcs, DEFAULT_BRANCH, INITIAL_COMMIT_MESSAGE, REMOTE_NAME};
pub use layout::{resolve_licence, DEFAULT_LICENCE_PATH, DIRECTORIES, STAGED_PATHS};
pub use plan::{ScaffoldPlan, ScaffoldReport, ScaffoldStep};
pub use types::{ExecutionMode, FileContents, GitOptions, ProjectName};

/// Everything needed to scaffold one project
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub name: ProjectName,
    pub destination: PathBuf,
    /// Create `destination` when it does not exist
    pub create_destination: bool,
    /// Explicit licence file to copy
    pub licence: Option<PathBuf>,
    /// Directory searched for `scripts/LICENCE`
    pub licence_search_dir: PathBuf,
    pub git: Option<GitOptions>,
    pub mode: ExecutionMode,
}

/// Result of [`scaffold`]: the plan alone for dry runs, or what was done
#[derive(Debug)]
pub enum ScaffoldOutcome {
    Planned(ScaffoldPlan),
    Applied(ScaffoldReport),
}

/// Make sure the destination exists, creating it only when allowed
pub async fn validate_destination(
    destination: &Path,
    create_missing: bool,
    mode: ExecutionMode,
) -> Result<()> {
    if destination.exists() {
        return Ok(());
    }
    if !create_missing {
        return Err(ScaffoldError::DestinationMissing(destination.to_path_buf()));
    }

    match mode {
        ExecutionMode::DryRun => {
            tracing::info!("Would create destination {}", destination.display());
        }
        ExecutionMode::Apply => {
            tracing::info!("Creating destination {}", destination.display());
            tokio::fs::create_dir_all(destination).await.map_err(|e| {
                ScaffoldError::io(format!("creating {}", destination.display()), e)
            })?;
        }
    }
    Ok(())
}

/// Validate, plan and (unless dry-running) create the project
pub async fn scaffold(config: &ScaffoldConfig, vcs: &(dyn Vcs + Send + Sync)) -> Result<ScaffoldOutcome> {
    validate_destination(&config.destination, config.create_destination, config.mode).await?;

    let licence = resolve_licence(
        config.licence.as_deref(),
        &config.licence_search_dir,
        &config.name,
    )?;
    let plan = ScaffoldPlan::new(&config.destination, &config.name, licence, config.git.as_ref());

    match config.mode {
        ExecutionMode::DryRun => {
            plan.ensure_root_free()?;
            tracing::debug!("Planned {} steps for {}", plan.steps().len(), plan.root().display());
            Ok(ScaffoldOutcome::Planned(plan))
        }
        ExecutionMode::Apply => plan.apply(vcs).await.map(ScaffoldOutcome::Applied),
    }
}
