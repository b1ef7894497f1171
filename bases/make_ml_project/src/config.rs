// bases/make_ml_project/src/config.rs
use crate::args::Args;
use project_scaffold::{ExecutionMode, GitOptions, ProjectName, ScaffoldConfig, ScaffoldError};
use std::path::{Path, PathBuf};

/// Scaffolder configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub scaffold: ScaffoldConfig,

    /// git executable used when the project gets a repository
    pub git: PathBuf,

    pub verbose: bool,
}

impl Config {
    /// Create configuration from CLI arguments
    ///
    /// `working_dir` is where `scripts/LICENCE` is looked up.
    pub fn from_args(args: Args, working_dir: &Path) -> Result<Self, ScaffoldError> {
        let name = ProjectName::new(args.name)?;

        let git = if args.without_git {
            None
        } else {
            Some(GitOptions {
                remote_url: args.github_url,
            })
        };

        let mode = if args.dry_run {
            ExecutionMode::DryRun
        } else {
            ExecutionMode::Apply
        };

        Ok(Self {
            scaffold: ScaffoldConfig {
                name,
                destination: args.destination,
                create_destination: args.force,
                licence: args.licence,
                licence_search_dir: working_dir.to_path_buf(),
                git,
                mode,
            },
            git: args.git,
            verbose: args.verbose,
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.scaffold.mode == ExecutionMode::DryRun
    }

    /// Default tracing filter for this binary and the scaffold component
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "make_ml_project=debug,project_scaffold=debug"
        } else {
            "make_ml_project=info,project_scaffold=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::error::ErrorKind;
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("make-ml-project").chain(args.iter().copied()))
    }

    fn config_from(args: &[&str]) -> Config {
        Config::from_args(parse(args).unwrap(), Path::new("/work")).unwrap()
    }

    #[test]
    fn defaults() {
        let config = config_from(&["--name", "sentiment"]);

        assert_eq!(config.scaffold.name.as_str(), "sentiment");
        assert_eq!(config.scaffold.destination, PathBuf::from("."));
        assert!(!config.scaffold.create_destination);
        assert_eq!(config.scaffold.licence, None);
        assert_eq!(config.scaffold.licence_search_dir, PathBuf::from("/work"));
        assert_eq!(config.scaffold.git, Some(GitOptions { remote_url: None }));
        assert_eq!(config.scaffold.mode, ExecutionMode::Apply);
        assert!(!config.is_dry_run());
    }

    #[test]
    fn short_flags() {
        let config = config_from(&[
            "-n", "vision", "-d", "projects", "-f", "-g", "git@github.com:me/vision.git",
        ]);

        assert_eq!(config.scaffold.destination, PathBuf::from("projects"));
        assert!(config.scaffold.create_destination);
        assert_eq!(
            config.scaffold.git,
            Some(GitOptions {
                remote_url: Some("git@github.com:me/vision.git".to_string())
            })
        );
    }

    #[test]
    fn underscore_aliases() {
        let config = config_from(&["-n", "vision", "--github_url", "https://github.com/me/v"]);
        assert!(config.scaffold.git.is_some());

        let config = config_from(&["-n", "vision", "--without_git"]);
        assert_eq!(config.scaffold.git, None);
    }

    #[test]
    fn without_git_skips_repository() {
        let config = config_from(&["-n", "vision", "--without-git"]);
        assert_eq!(config.scaffold.git, None);
    }

    #[test]
    fn remote_and_without_git_conflict() {
        let err = parse(&["-n", "v", "-g", "https://github.com/me/v", "--without-git"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn name_is_required() {
        let err = parse(&["-d", "projects"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn invalid_name_is_rejected() {
        let args = parse(&["-n", "a/b"]).unwrap();
        assert_matches!(
            Config::from_args(args, Path::new("/work")),
            Err(ScaffoldError::InvalidName { name, .. }) if name == "a/b"
        );
    }

    #[test]
    fn dry_run_and_verbose() {
        let config = config_from(&["-n", "vision", "--dry-run", "-v"]);

        assert!(config.is_dry_run());
        assert_eq!(config.log_filter(), "make_ml_project=debug,project_scaffold=debug");
    }
}
