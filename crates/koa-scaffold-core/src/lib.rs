//! Koa Scaffold Core - Shared library for the create-koa CLI
//!
//! This library holds everything behind the `create-koa` binary: the
//! configuration model and its three-source priority resolver, project-name
//! validation, the bundled template store with feature-aware copying, local
//! tooling detection, dependency installation, and the generation workflow.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure logic** - name validation, configuration merging and
//!   validation, template classification
//! - **Layer 2: Generation** - template copying, package.json finalization,
//!   git init, dependency installation
//! - **Layer 3: CLI/TUI interface** - cliclack-based prompts and the create
//!   workflow (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use koa_scaffold_core::config::{resolve_config, validate_config, CreateOptions};
//!
//! let options = CreateOptions::default();
//! let config = resolve_config("my-app", &options, None)?;
//! let validation = validate_config(&config);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod naming;
pub mod runtime;
pub mod templates;

pub mod tui;

// Re-export main types for convenience
pub use config::{
    resolve_config, validate_config, CreateOptions, InteractiveAnswers, PackageManager,
    ProjectConfig, Template,
};
pub use error::ScaffoldError;
pub use naming::{suggest_valid_name, validate_project_name, NameValidation};
pub use templates::TemplateStore;

#[cfg(feature = "tui")]
pub use tui::run;
