// components/project_scaffold/src/layout.rs
//! Fixed directory skeleton of an ML project
//!
//! All paths are relative to the project root (`<destination>/<name>`).

use crate::error::{Result, ScaffoldError};
use crate::types::{FileContents, ProjectName};
use chrono::Datelike;
use std::path::{Path, PathBuf};

/// Directories in creation order; `src` is created with parents
pub const DIRECTORIES: [&str; 5] = ["src", "data", "models", "src/models", "src/data"];

pub const REQUIREMENTS: &str = "requirements.txt";
pub const GITIGNORE: &str = ".gitignore";
pub const LICENCE: &str = "LICENCE";
pub const README: &str = "README.md";
pub const PACKAGE_INIT: &str = "src/__init__.py";
pub const MODEL_MODULE: &str = "src/models/model.py";
pub const DATASET_MODULE: &str = "src/data/get_dataset.py";

/// Placeholders so git can track the otherwise empty data and model dirs
pub const KEEP_FILES: [&str; 2] = ["data/.gitkeep", "models/.gitkeep"];

/// Paths staged for the initial commit
pub const STAGED_PATHS: [&str; 9] = [
    REQUIREMENTS,
    LICENCE,
    README,
    GITIGNORE,
    PACKAGE_INIT,
    MODEL_MODULE,
    DATASET_MODULE,
    "models/",
    "data/",
];

/// Licence looked up relative to the working directory when none is given
pub const DEFAULT_LICENCE_PATH: &str = "scripts/LICENCE";

const MIT_TEMPLATE: &str = include_str!("../templates/LICENCE-MIT");

const GITIGNORE_CONTENTS: &str = "\
__pycache__/
*.py[cod]
.venv/
.ipynb_checkpoints/
.env
";

/// Files the scaffold writes, in creation order
pub fn files(name: &ProjectName, licence: FileContents) -> Vec<(PathBuf, FileContents)> {
    let mut files = vec![
        (PathBuf::from(REQUIREMENTS), FileContents::Empty),
        (
            PathBuf::from(GITIGNORE),
            FileContents::Text(GITIGNORE_CONTENTS.to_string()),
        ),
        (PathBuf::from(LICENCE), licence),
        (
            PathBuf::from(README),
            FileContents::Text(format!("# {}\n", name)),
        ),
        (PathBuf::from(PACKAGE_INIT), FileContents::Empty),
        (PathBuf::from(MODEL_MODULE), FileContents::Empty),
        (PathBuf::from(DATASET_MODULE), FileContents::Empty),
    ];
    files.extend(
        KEEP_FILES
            .iter()
            .map(|keep| (PathBuf::from(keep), FileContents::Empty)),
    );
    files
}

/// Decide where the LICENCE comes from
///
/// An explicit path must exist. Otherwise `scripts/LICENCE` under
/// `search_dir` is used if present, falling back to the bundled MIT text.
pub fn resolve_licence(
    explicit: Option<&Path>,
    search_dir: &Path,
    name: &ProjectName,
) -> Result<FileContents> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ScaffoldError::LicenceMissing(path.to_path_buf()));
        }
        return Ok(FileContents::CopyFrom(path.to_path_buf()));
    }

    let default = search_dir.join(DEFAULT_LICENCE_PATH);
    if default.is_file() {
        return Ok(FileContents::CopyFrom(default));
    }

    tracing::debug!(
        "No licence at {}, using bundled MIT licence",
        default.display()
    );
    Ok(FileContents::Text(mit_licence(name, chrono::Utc::now().year())))
}

fn mit_licence(name: &ProjectName, year: i32) -> String {
    MIT_TEMPLATE
        .replace("{year}", &year.to_string())
        .replace("{holder}", &format!("The {} authors", name))
}
