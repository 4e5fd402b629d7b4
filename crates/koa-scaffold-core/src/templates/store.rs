//! Bundled template store
//!
//! Templates ship inside the binary: manifests and file contents are
//! embedded at compile time and parsed once at startup. This keeps the
//! copy loop deterministic and the CLI usable offline.

use super::manifest::{FileFilters, RootManifest, TemplateManifest};
use crate::config::Template;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::collections::HashMap;

macro_rules! embedded {
    ($dir:literal : $($path:literal),+ $(,)?) => {
        &[$(($path, include_str!(concat!("../../templates/", $dir, "/", $path)))),+]
    };
}

const ROOT_MANIFEST: &str = include_str!("../../templates/template.yaml");

const BASIC_MANIFEST: &str = include_str!("../../templates/basic/template.yaml");
const BASIC_FILES: &[(&str, &str)] = embedded!("basic":
    "package.json",
    "README.md",
    ".gitignore",
    ".env.example",
    "tsconfig.json",
    "src/app.js",
    "src/app.ts",
    "src/db.js",
    "src/db.ts",
    "src/cache.js",
    "src/cache.ts",
    "src/auth.js",
    "src/auth.ts",
);

const API_MANIFEST: &str = include_str!("../../templates/api/template.yaml");
const API_FILES: &[(&str, &str)] = embedded!("api":
    "package.json",
    "README.md",
    ".gitignore",
    ".env.example",
    "tsconfig.json",
    "src/app.js",
    "src/app.ts",
    "src/routes/index.js",
    "src/routes/index.ts",
    "src/routes/users.js",
    "src/routes/users.ts",
    "src/middleware/error.js",
    "src/middleware/error.ts",
    "src/middleware/rate-limit.js",
    "src/middleware/rate-limit.ts",
    "src/swagger.js",
    "src/swagger.ts",
    "src/db.js",
    "src/db.ts",
    "src/cache.js",
    "src/cache.ts",
    "src/auth.js",
    "src/auth.ts",
);

const FULLSTACK_MANIFEST: &str = include_str!("../../templates/fullstack/template.yaml");
const FULLSTACK_FILES: &[(&str, &str)] = embedded!("fullstack":
    "package.json",
    "README.md",
    ".gitignore",
    ".env.example",
    "tsconfig.json",
    "public/index.html",
    "src/app.js",
    "src/app.ts",
    "src/routes/index.js",
    "src/routes/index.ts",
    "src/routes/users.js",
    "src/routes/users.ts",
    "src/routes/pages.js",
    "src/routes/pages.ts",
    "src/middleware/error.js",
    "src/middleware/error.ts",
    "src/middleware/rate-limit.js",
    "src/middleware/rate-limit.ts",
    "src/swagger.js",
    "src/swagger.ts",
    "src/db.js",
    "src/db.ts",
    "src/cache.js",
    "src/cache.ts",
    "src/auth.js",
    "src/auth.ts",
);

/// One parsed template with its embedded file contents
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub manifest: TemplateManifest,
    files: HashMap<&'static str, &'static str>,
}

/// Parsed view over the bundled templates
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: RootManifest,
    templates: HashMap<String, LoadedTemplate>,
}

impl TemplateStore {
    /// Parse the bundled manifests into a store
    pub fn bundled() -> Result<Self> {
        let root: RootManifest =
            serde_yaml::from_str(ROOT_MANIFEST).context("Failed to parse root manifest")?;

        let sources: &[(&str, &str, &[(&str, &str)])] = &[
            ("basic", BASIC_MANIFEST, BASIC_FILES),
            ("api", API_MANIFEST, API_FILES),
            ("fullstack", FULLSTACK_MANIFEST, FULLSTACK_FILES),
        ];

        let mut templates = HashMap::new();
        for (name, manifest_text, files) in sources {
            let manifest: TemplateManifest = serde_yaml::from_str(manifest_text)
                .with_context(|| format!("Failed to parse template '{name}' manifest"))?;
            templates.insert(
                name.to_string(),
                LoadedTemplate {
                    manifest,
                    files: files.iter().copied().collect(),
                },
            );
        }

        Ok(Self { root, templates })
    }

    /// Bundled template names, in manifest order
    pub fn names(&self) -> &[String] {
        &self.root.templates
    }

    fn loaded(&self, template: Template) -> Result<&LoadedTemplate, ScaffoldError> {
        self.templates
            .get(template.slug())
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                name: template.slug().to_string(),
            })
    }

    pub fn manifest(&self, template: Template) -> Result<&TemplateManifest, ScaffoldError> {
        Ok(&self.loaded(template)?.manifest)
    }

    pub fn manifest_by_name(&self, name: &str) -> Option<&TemplateManifest> {
        self.templates.get(name).map(|t| &t.manifest)
    }

    /// Root filters merged with the template's own additions
    pub fn filters_for(&self, template: Template) -> Result<FileFilters, ScaffoldError> {
        let loaded = self.loaded(template)?;
        let mut merged = self.root.file_filters.clone();
        merged.merge(&loaded.manifest.file_filters);
        Ok(merged)
    }

    /// Embedded content of one template file
    pub fn file(&self, template: Template, path: &str) -> Result<&'static str, ScaffoldError> {
        self.loaded(template)?
            .files
            .get(path)
            .copied()
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                name: format!("{}/{}", template.slug(), path),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_store_parses() {
        let store = TemplateStore::bundled().unwrap();
        assert_eq!(store.names(), &["basic", "api", "fullstack"]);
    }

    #[test]
    fn test_every_manifest_file_is_embedded() {
        let store = TemplateStore::bundled().unwrap();
        for template in [Template::Basic, Template::Api, Template::Fullstack] {
            let manifest = store.manifest(template).unwrap().clone();
            for file in &manifest.files {
                assert!(
                    store.file(template, file).is_ok(),
                    "template '{template}' lists '{file}' but it is not embedded"
                );
            }
        }
    }

    #[test]
    fn test_manifest_versions_are_semver() {
        let store = TemplateStore::bundled().unwrap();
        for name in store.names() {
            let manifest = store.manifest_by_name(name).unwrap();
            assert!(
                semver::Version::parse(&manifest.version).is_ok(),
                "template '{name}' has a non-semver version '{}'",
                manifest.version
            );
        }
    }

    #[test]
    fn test_unknown_file_is_an_error() {
        let store = TemplateStore::bundled().unwrap();
        assert!(store.file(Template::Basic, "src/missing.js").is_err());
    }
}
