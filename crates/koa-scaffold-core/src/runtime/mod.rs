//! Detection of local tooling and dependency installation

pub mod check;
pub mod installer;

pub use check::{check_node, check_package_manager, detect_all, RuntimeInfo};
pub use installer::install_dependencies;
