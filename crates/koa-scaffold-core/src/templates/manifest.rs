//! Template manifest types and file classification

use serde::Deserialize;

/// File patterns deciding when a template file applies
///
/// Two independent dimensions: the language variant (TypeScript vs
/// JavaScript sources) and the subsystem a file belongs to (swagger, rate
/// limiting, redis, database, auth). A file matching no list in a dimension
/// is unconstrained on that dimension.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileFilters {
    /// Files that require the TypeScript variant
    pub typescript: Vec<String>,

    /// Files that require the JavaScript variant
    pub javascript: Vec<String>,

    /// Files that require the swagger feature
    pub swagger: Vec<String>,

    /// Files that require the rate-limit feature
    pub rate_limit: Vec<String>,

    /// Files that require redis (feature toggle or cache block)
    pub redis: Vec<String>,

    /// Files that require a database block
    pub database: Vec<String>,

    /// Files that require an authentication block
    pub auth: Vec<String>,
}

impl FileFilters {
    /// Merge another filter set into this one (template-level filters extend
    /// the root ones)
    pub fn merge(&mut self, other: &FileFilters) {
        self.typescript.extend(other.typescript.iter().cloned());
        self.javascript.extend(other.javascript.iter().cloned());
        self.swagger.extend(other.swagger.iter().cloned());
        self.rate_limit.extend(other.rate_limit.iter().cloned());
        self.redis.extend(other.redis.iter().cloned());
        self.database.extend(other.database.iter().cloned());
        self.auth.extend(other.auth.iter().cloned());
    }

    /// Check if a filename matches any pattern in a list
    fn matches_any(filename: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                // Suffix match: *.ts matches app.ts
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                // Prefix match: db.* matches db.js and db.ts
                filename.starts_with(prefix)
            } else {
                // Exact match
                filename == pattern
            }
        })
    }

    /// Which language variant a file belongs to (matched on the filename)
    pub fn variant_for(&self, file_path: &str) -> FileVariant {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        if Self::matches_any(filename, &self.typescript) {
            FileVariant::TypeScript
        } else if Self::matches_any(filename, &self.javascript) {
            FileVariant::JavaScript
        } else {
            FileVariant::Any
        }
    }

    /// Which subsystem a file belongs to, if any
    pub fn subsystem_for(&self, file_path: &str) -> Option<FileSubsystem> {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        if Self::matches_any(filename, &self.swagger) {
            Some(FileSubsystem::Swagger)
        } else if Self::matches_any(filename, &self.rate_limit) {
            Some(FileSubsystem::RateLimit)
        } else if Self::matches_any(filename, &self.redis) {
            Some(FileSubsystem::Redis)
        } else if Self::matches_any(filename, &self.database) {
            Some(FileSubsystem::Database)
        } else if Self::matches_any(filename, &self.auth) {
            Some(FileSubsystem::Auth)
        } else {
            None
        }
    }
}

/// Language variant a file is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileVariant {
    Any,
    TypeScript,
    JavaScript,
}

/// Optional subsystem a file is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSubsystem {
    Swagger,
    RateLimit,
    Redis,
    Database,
    Auth,
}

/// Root manifest: lists bundled templates and global file filters
#[derive(Debug, Clone, Deserialize)]
pub struct RootManifest {
    /// Template directory names
    pub templates: Vec<String>,

    /// Global file filters, merged under each template's own
    #[serde(default)]
    pub file_filters: FileFilters,
}

/// Per-template manifest
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Explicit list of files the template ships
    pub files: Vec<String>,

    /// Template-specific filter additions (merged with root)
    #[serde(default)]
    pub file_filters: FileFilters,
}
