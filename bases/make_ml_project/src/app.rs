// bases/make_ml_project/src/app.rs
use crate::config::Config;
use crate::output::OutputHandler;
use color_eyre::Result;
use project_scaffold::{scaffold, GitCli, ScaffoldOutcome};

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    pub async fn run(&self) -> Result<()> {
        if self.config.is_dry_run() {
            tracing::warn!("DRY RUN: nothing will be written");
        }

        let git = GitCli::new(&self.config.git);

        match scaffold(&self.config.scaffold, &git).await? {
            ScaffoldOutcome::Planned(plan) => self.output.print_plan(&plan),
            ScaffoldOutcome::Applied(report) => {
                self.output.print_report(&self.config.scaffold.name, &report)
            }
        }

        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
