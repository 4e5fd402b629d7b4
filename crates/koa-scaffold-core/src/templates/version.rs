//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare the CLI version against a bundled template version.
/// Returns an advisory message when the CLI is older than the template
/// expects.
pub fn check_update(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = match Version::parse(cli_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let template_ver = match Version::parse(template_version) {
        Ok(v) => v,
        Err(_) => return None,
    };

    if cli_ver < template_ver {
        Some(format!(
            "This template was designed for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            template_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_update("0.1.0", "0.2.0", "cargo install create-koa --force");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_template() {
        let warning = check_update("0.1.0", "0.1.0", "cargo install create-koa --force");
        assert!(warning.is_none());
    }

    #[test]
    fn test_cli_newer_than_template() {
        let warning = check_update("0.2.0", "0.1.0", "cargo install create-koa --force");
        assert!(warning.is_none());
    }

    #[test]
    fn test_invalid_versions_skip_warning() {
        let warning = check_update("invalid", "0.1.0", "cargo install create-koa --force");
        assert!(warning.is_none());
    }
}
