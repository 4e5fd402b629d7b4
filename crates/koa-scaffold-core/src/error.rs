//! Error taxonomy for the scaffolding pipeline
//!
//! Validation functions return structured results and never fail on their
//! own; orchestration code converts a failed validation into one of these
//! variants, which the binary's top-level handler formats and maps to exit
//! code 1.

use crate::naming::NameIssue;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid project name '{name}':\n{}", format_issues(issues))]
    NameValidation { name: String, issues: Vec<NameIssue> },

    #[error("failed to load config file {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid configuration:\n{}", errors.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    ConfigValidation { errors: Vec<String> },

    #[error("directory '{}' already exists (use --force to overwrite)", dir.display())]
    DirectoryConflict { dir: PathBuf },

    #[error("template '{name}' is not bundled with this CLI")]
    TemplateNotFound { name: String },

    #[error("'{command}' failed{}", match status {
        Some(code) => format!(" with exit code {code}"),
        None => String::new(),
    })]
    Install { command: String, status: Option<i32> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_issues(issues: &[NameIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {}", i.message))
        .collect::<Vec<_>>()
        .join("\n")
}
