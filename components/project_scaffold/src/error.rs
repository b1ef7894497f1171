//! Scaffolding error types
//!
//! Every filesystem and git failure carries the operation or command that
//! produced it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("destination '{}' doesn't exist (use -f to create it)", .0.display())]
    DestinationMissing(PathBuf),

    #[error("project directory '{}' already exists", .0.display())]
    ProjectExists(PathBuf),

    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("licence file '{}' not found", .0.display())]
    LicenceMissing(PathBuf),

    #[error("io error during {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git executable not found: {0}")]
    GitNotFound(String),

    #[error("command execution failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command returned non-zero exit code: {command}\nStderr: {stderr}")]
    CommandExitCode { command: String, stderr: String },
}

/// Helpers to attach context to IO and process errors
impl ScaffoldError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        ScaffoldError::CommandFailed {
            command: command.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
