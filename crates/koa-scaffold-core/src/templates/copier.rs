//! Template file copying with variant and feature filtering

use super::manifest::{FileFilters, FileSubsystem, FileVariant};
use super::package_json;
use super::store::TemplateStore;
use crate::config::ProjectConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Copy the configured template into the target directory.
///
/// Files are filtered on two axes: the language variant follows the
/// `typescript` flag, and subsystem files follow the feature toggles or the
/// presence of their config block. `{{projectName}}` placeholders are
/// substituted, and package.json is finalized with the feature-implied
/// dependencies. Returns the copied paths.
pub async fn copy_template(
    store: &TemplateStore,
    config: &ProjectConfig,
    target_dir: &Path,
) -> Result<Vec<String>> {
    let manifest = store.manifest(config.template)?;
    let filters = store.filters_for(config.template)?;

    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for file_path in &manifest.files {
        if !should_include_file(file_path, &filters, config) {
            continue;
        }

        let target_path = target_dir.join(file_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = store.file(config.template, file_path)?;
        let rendered = render(file_path, content, config)?;
        fs::write(&target_path, rendered)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(file_path.clone());
    }

    Ok(copied_files)
}

/// Substitute placeholders; package.json additionally gets its dependency
/// set finalized from the resolved configuration
fn render(file_path: &str, content: &str, config: &ProjectConfig) -> Result<String> {
    let rendered = content.replace("{{projectName}}", &config.name);

    if file_path == "package.json" {
        let mut value: serde_json::Value = serde_json::from_str(&rendered)
            .context("Bundled package.json is not valid JSON")?;
        package_json::finalize(&mut value, config);
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        return Ok(out);
    }

    Ok(rendered)
}

/// Decide whether one template file applies under the resolved config
fn should_include_file(file_path: &str, filters: &FileFilters, config: &ProjectConfig) -> bool {
    let variant_ok = match filters.variant_for(file_path) {
        FileVariant::Any => true,
        FileVariant::TypeScript => config.typescript,
        FileVariant::JavaScript => !config.typescript,
    };
    if !variant_ok {
        return false;
    }

    match filters.subsystem_for(file_path) {
        None => true,
        Some(FileSubsystem::Swagger) => config.features.swagger,
        Some(FileSubsystem::RateLimit) => config.features.rate_limit,
        Some(FileSubsystem::Redis) => config.wants_redis(),
        Some(FileSubsystem::Database) => config.database.is_some(),
        // The bundled auth helpers are jwt token utilities; session auth
        // only needs the koa-session dependency
        Some(FileSubsystem::Auth) => config
            .auth
            .as_ref()
            .is_some_and(|a| a.kind == crate::config::AuthKind::Jwt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge::finish;
    use crate::config::{
        PartialAuthConfig, PartialDatabaseConfig, PartialFeatures, PartialProjectConfig,
    };

    fn filters() -> FileFilters {
        FileFilters {
            typescript: vec!["*.ts".to_string(), "tsconfig.json".to_string()],
            javascript: vec!["*.js".to_string()],
            swagger: vec!["swagger.*".to_string()],
            rate_limit: vec!["rate-limit.*".to_string()],
            redis: vec!["cache.*".to_string()],
            database: vec!["db.*".to_string()],
            auth: vec!["auth.*".to_string()],
        }
    }

    fn config(partial: PartialProjectConfig) -> ProjectConfig {
        finish("demo", partial)
    }

    #[test]
    fn test_variant_follows_typescript_flag() {
        let f = filters();
        let ts = config(PartialProjectConfig {
            typescript: Some(true),
            ..Default::default()
        });
        let js = config(PartialProjectConfig {
            typescript: Some(false),
            ..Default::default()
        });

        assert!(should_include_file("src/app.ts", &f, &ts));
        assert!(!should_include_file("src/app.js", &f, &ts));
        assert!(should_include_file("tsconfig.json", &f, &ts));

        assert!(should_include_file("src/app.js", &f, &js));
        assert!(!should_include_file("src/app.ts", &f, &js));
        assert!(!should_include_file("tsconfig.json", &f, &js));

        // Variant-neutral files always pass
        assert!(should_include_file("README.md", &f, &ts));
        assert!(should_include_file("README.md", &f, &js));
    }

    #[test]
    fn test_subsystem_files_follow_config_presence() {
        let f = filters();
        let bare = config(PartialProjectConfig::default());

        assert!(!should_include_file("src/db.ts", &f, &bare));
        assert!(!should_include_file("src/auth.ts", &f, &bare));
        assert!(!should_include_file("src/cache.ts", &f, &bare));

        let with_db = config(PartialProjectConfig {
            database: Some(PartialDatabaseConfig::default()),
            authentication: Some(PartialAuthConfig::default()),
            ..Default::default()
        });
        assert!(should_include_file("src/db.ts", &f, &with_db));
        assert!(should_include_file("src/auth.ts", &f, &with_db));
    }

    #[test]
    fn test_redis_files_follow_feature_or_cache_block() {
        let f = filters();
        let with_feature = config(PartialProjectConfig {
            features: Some(PartialFeatures {
                redis: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(should_include_file("src/cache.ts", &f, &with_feature));
    }

    #[test]
    fn test_feature_file_needs_both_axes() {
        let f = filters();
        let js_swagger = config(PartialProjectConfig {
            typescript: Some(false),
            features: Some(PartialFeatures {
                swagger: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(should_include_file("src/swagger.js", &f, &js_swagger));
        assert!(!should_include_file("src/swagger.ts", &f, &js_swagger));
    }

    #[test]
    fn test_render_substitutes_project_name() {
        let cfg = config(PartialProjectConfig::default());
        let out = render("README.md", "# {{projectName}}\n", &cfg).unwrap();
        assert_eq!(out, "# demo\n");
    }
}
