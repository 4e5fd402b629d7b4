//! Config file loading
//!
//! The file extension selects the parser: `.json` or `.yaml`/`.yml`.
//! Anything else is rejected up front. Every failure surfaces as
//! [`ScaffoldError::ConfigParse`] carrying the underlying parser text.

use super::PartialProjectConfig;
use crate::error::ScaffoldError;
use std::path::Path;

/// Load and parse a config file into a partial fragment
pub fn load_config_file(path: &Path) -> Result<PartialProjectConfig, ScaffoldError> {
    let parse_err = |reason: String| ScaffoldError::ConfigParse {
        path: path.to_path_buf(),
        reason,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let format = match extension.as_deref() {
        Some("json") => Format::Json,
        Some("yaml") | Some("yml") => Format::Yaml,
        other => {
            return Err(parse_err(format!(
                "unsupported config file extension '{}' (expected .json, .yaml or .yml)",
                other.unwrap_or("")
            )))
        }
    };

    let text = std::fs::read_to_string(path).map_err(|e| parse_err(e.to_string()))?;

    match format {
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_err(e.to_string())),
        Format::Yaml => serde_yaml::from_str(&text).map_err(|e| parse_err(e.to_string())),
    }
}

enum Format {
    Json,
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseKind, PackageManager, Template};

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("create-koa-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let path = write_temp(
            "config.json",
            r#"{
                "template": "api",
                "packageManager": "yarn",
                "features": { "rateLimit": true },
                "database": { "type": "postgresql", "port": 5433 }
            }"#,
        );

        let fragment = load_config_file(&path).unwrap();
        assert_eq!(fragment.template, Some(Template::Api));
        assert_eq!(fragment.package_manager, Some(PackageManager::Yarn));
        assert_eq!(fragment.features.unwrap().rate_limit, Some(true));
        let db = fragment.database.unwrap();
        assert_eq!(db.kind, Some(DatabaseKind::Postgresql));
        assert_eq!(db.port, Some(5433));
    }

    #[test]
    fn test_load_yaml() {
        let path = write_temp(
            "config.yaml",
            "template: fullstack\ntypescript: false\nauthentication:\n  type: session\n",
        );

        let fragment = load_config_file(&path).unwrap();
        assert_eq!(fragment.template, Some(Template::Fullstack));
        assert_eq!(fragment.typescript, Some(false));
        assert!(fragment.authentication.is_some());
    }

    #[test]
    fn test_unset_fields_stay_unset() {
        let path = write_temp("sparse.yaml", "template: basic\n");
        let fragment = load_config_file(&path).unwrap();

        assert!(fragment.package_manager.is_none());
        assert!(fragment.typescript.is_none());
        assert!(fragment.features.is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let path = write_temp("config.toml", "template = \"basic\"\n");
        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config file extension"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_error_carries_parser_text() {
        let path = write_temp("broken.json", "{ not json");
        let err = load_config_file(&path).unwrap_err();
        let ScaffoldError::ConfigParse { reason, .. } = err else {
            panic!("expected ConfigParse");
        };
        assert!(!reason.is_empty());
    }

    #[test]
    fn test_unknown_enum_value_is_rejected_with_options() {
        let path = write_temp("bad-template.json", r#"{ "template": "deno" }"#);
        let err = load_config_file(&path).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("deno"));
        assert!(text.contains("expected one of"));
    }
}
