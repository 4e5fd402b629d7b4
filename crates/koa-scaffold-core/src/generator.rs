//! Project generation
//!
//! Filesystem side of turning a resolved [`ProjectConfig`] into a populated
//! directory: conflict check, target preparation, git init, and the
//! next-steps summary. Side effects after the conflict check are not rolled
//! back on a later failure.

use crate::config::ProjectConfig;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

/// Outcome of a successful generation
#[derive(Debug)]
pub struct GeneratedProject {
    pub dir: PathBuf,
    pub copied_files: Vec<String>,
    pub installed: bool,
}

/// Resolve the target directory for a project name, relative to cwd
pub fn target_dir(config: &ProjectConfig) -> PathBuf {
    let current = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    current.join(config.dir_name())
}

/// Fail on an existing target unless `force` is set; with `force`, remove
/// and recreate. Must run before any other filesystem mutation.
pub async fn prepare_target(config: &ProjectConfig, force: bool) -> Result<PathBuf> {
    let dir = target_dir(config);

    if dir.exists() {
        if !force {
            return Err(ScaffoldError::DirectoryConflict { dir }.into());
        }
        fs::remove_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
    }

    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    Ok(dir)
}

pub(crate) async fn init_git(dir: &PathBuf) -> Result<()> {
    let status = tokio::process::Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(dir)
        .status()
        .await
        .context("Failed to run git")?;

    if !status.success() {
        anyhow::bail!("git init exited with {}", status.code().unwrap_or(-1));
    }
    Ok(())
}

/// The "next steps" lines shown after generation
pub fn next_steps(config: &ProjectConfig, generated: &GeneratedProject) -> Vec<String> {
    let mut steps = Vec::new();

    steps.push(format!("cd {}", config.dir_name()));

    if !generated.installed {
        steps.push(format!("{} install", config.package_manager.command()));
    }

    if let Some(db) = &config.database {
        steps.push(format!(
            "Start {} on {}:{} (see .env.example)",
            db.kind, db.host, db.port
        ));
    }

    if let Some(cache) = &config.cache {
        steps.push(format!(
            "Start redis on {}:{} (see .env.example)",
            cache.host, cache.port
        ));
    }

    steps.push(format!("{} dev", config.package_manager.run_prefix()));

    steps
}
