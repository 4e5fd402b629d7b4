//! Detection of Node.js and the package managers

use crate::config::PackageManager;
use std::process::Command;

/// Detection result for one tool
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if one package manager is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    match pm {
        PackageManager::Npm => probe("npm", "npm"),
        PackageManager::Yarn => probe("yarn", "yarn"),
        PackageManager::Pnpm => probe("pnpm", "pnpm"),
    }
}

/// Probe node and all package managers, for `info` output
pub fn detect_all() -> Vec<RuntimeInfo> {
    vec![
        check_node(),
        check_package_manager(PackageManager::Npm),
        check_package_manager(PackageManager::Yarn),
        check_package_manager(PackageManager::Pnpm),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_binary() {
        let info = probe("bogus", "definitely-not-a-real-binary-0xdead");
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_detect_all_covers_every_tool() {
        let infos = detect_all();
        let names: Vec<_> = infos.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Node.js", "npm", "yarn", "pnpm"]);
    }
}
