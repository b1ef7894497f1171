// bases/make_ml_project/src/output.rs
use project_scaffold::{ProjectName, ScaffoldPlan, ScaffoldReport};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_plan(&self, plan: &ScaffoldPlan) {
        print!("{}", plan_text(plan));
    }

    pub fn print_report(&self, name: &ProjectName, report: &ScaffoldReport) {
        println!("Created project {} at {}", name, report.root.display());

        if self.verbose {
            for dir in &report.created_dirs {
                println!("  dir:  {}/", dir.display());
            }
            for file in &report.written_files {
                println!("  file: {}", file.display());
            }
        }

        if let Some(message) = &report.committed {
            println!("Committed \"{}\"", message);
        }
        if let Some(url) = &report.pushed_to {
            println!("Pushed to {}", url);
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

/// The only rendering of a dry run's plan
fn plan_text(plan: &ScaffoldPlan) -> String {
    format!("{}Dry run: no changes made\n", plan)
}
