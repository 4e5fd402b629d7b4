//! Dependency installation via the configured package manager
//!
//! Runs `<pm> install` in the generated project, streaming output as it
//! arrives. A hung installer is killed after the timeout and reported with
//! the command to retry manually.

use crate::config::ProjectConfig;
use crate::error::ScaffoldError;
use anyhow::Result;
use colored::Colorize;
use std::process::Stdio;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for dependency installation (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Install the generated project's dependencies
pub async fn install_dependencies(config: &ProjectConfig, project_dir: &Path) -> Result<()> {
    let pm = config.package_manager.command();
    let cmd = format!("{pm} install");
    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    let mut child = TokioCommand::new(pm)
        .arg("install")
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ScaffoldError::Io)?;

    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let output_task = async {
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => {}
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                        }
                    }
                }
            }
        }
    };

    if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
        let _ = child.kill().await;
        println!();
        anyhow::bail!(
            "Installation timed out after {} seconds.\n\
             The registry may be unreachable. Please try again later or run manually:\n\
             cd {} && {}",
            INSTALL_TIMEOUT.as_secs(),
            project_dir.display(),
            cmd
        );
    }

    match timeout(Duration::from_secs(5), child.wait()).await {
        Ok(Ok(status)) => {
            println!();
            if status.success() {
                Ok(())
            } else {
                Err(ScaffoldError::Install {
                    command: cmd,
                    status: status.code(),
                }
                .into())
            }
        }
        Ok(Err(e)) => {
            anyhow::bail!("Failed to wait for installer: {}", e);
        }
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!(
                "Installer process hung. Please run manually:\ncd {} && {}",
                project_dir.display(),
                cmd
            );
        }
    }
}
