// components/project_scaffold/src/types.rs
use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::PathBuf;

/// Newtype for a project name that is safe to use as a single path component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason| ScaffoldError::InvalidName {
            name: name.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name cannot be '.' or '..'"));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(invalid("name cannot contain path separators"));
        }

        Ok(ProjectName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution mode for a scaffold plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Show what would be created without touching disk
    DryRun,
    /// Actually create the project
    Apply,
}

/// What goes into a file the scaffold creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Empty,
    Text(String),
    CopyFrom(PathBuf),
}

/// Git setup for a new project; absent means no repository is created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOptions {
    /// Remote to add as `origin` and push `main` to
    pub remote_url: Option<String>,
}
