//! Bundled templates: manifests, classification, copying, versioning
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest, FileFilters)
//! - The embedded template store
//! - Template copying with variant and feature filtering
//! - package.json dependency injection
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod package_json;
pub mod store;
pub mod version;

pub use copier::copy_template;
pub use manifest::{FileFilters, RootManifest, TemplateManifest};
pub use store::TemplateStore;
pub use version::check_update;
