//! Project configuration model
//!
//! Three typed sources feed the resolver: command-line options, a config
//! file fragment, and interactive answers. Each normalizes into
//! [`PartialProjectConfig`] where unset means "the source did not say",
//! never "use the default". Defaults are applied once, after the priority
//! merge in [`merge`].

pub mod file;
pub mod merge;
pub mod validate;

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub use file::load_config_file;
pub use merge::resolve_config;
pub use validate::{validate_config, ConfigValidation};

/// Which scaffold a generated project starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Basic,
    Api,
    Fullstack,
}

impl Template {
    /// Directory name inside the bundled template set
    pub fn slug(&self) -> &'static str {
        match self {
            Template::Basic => "basic",
            Template::Api => "api",
            Template::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Node package manager used for dependency installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Binary name, also the install command
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// How the generated project runs a package script
    pub fn run_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Mysql,
    Postgresql,
    Mongodb,
}

impl DatabaseKind {
    pub fn default_port(&self) -> u32 {
        match self {
            DatabaseKind::Mysql => 3306,
            DatabaseKind::Postgresql => 5432,
            DatabaseKind::Mongodb => 27017,
        }
    }

    /// npm client package for this database
    pub fn driver_package(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql2",
            DatabaseKind::Postgresql => "pg",
            DatabaseKind::Mongodb => "mongoose",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Mongodb => "mongodb",
        };
        write!(f, "{s}")
    }
}

/// The only supported cache backend; present so config files that spell
/// out `type: redis` parse, and anything else is rejected by serde with a
/// message naming the accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Redis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    Jwt,
    Session,
}

impl AuthKind {
    /// npm package implementing this auth scheme
    pub fn auth_package(&self) -> &'static str {
        match self {
            AuthKind::Jwt => "jsonwebtoken",
            AuthKind::Session => "koa-session",
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthKind::Jwt => "jwt",
            AuthKind::Session => "session",
        };
        write!(f, "{s}")
    }
}

/// Optional cross-cutting capabilities, toggled independently of the
/// template choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub logging: bool,
    pub cors: bool,
    pub helmet: bool,
    pub rate_limit: bool,
    pub swagger: bool,
    pub redis: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            logging: true,
            cors: true,
            helmet: true,
            rate_limit: false,
            swagger: false,
            redis: false,
        }
    }
}

/// Feature names accepted by `--features`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeatureName {
    Logging,
    Cors,
    Helmet,
    RateLimit,
    Swagger,
    Redis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub kind: DatabaseKind,
    pub host: String,
    pub port: u32,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub host: String,
    pub port: u32,
    /// Redis logical database index, valid range 0-15
    pub db: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub kind: AuthKind,
    /// Token lifetime, only meaningful for jwt
    pub expires_in: Option<String>,
}

/// Fully resolved settings for one project, handed to the generator
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub template: Template,
    pub features: Features,
    pub database: Option<DatabaseConfig>,
    pub cache: Option<CacheConfig>,
    pub auth: Option<AuthConfig>,
    pub package_manager: PackageManager,
    pub typescript: bool,
}

impl ProjectConfig {
    /// Directory name for the project: a scoped name keeps only the part
    /// after the slash.
    pub fn dir_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Whether redis wiring is wanted, either via the feature toggle or an
    /// explicit cache block
    pub fn wants_redis(&self) -> bool {
        self.features.redis || self.cache.is_some()
    }
}

// ---------------------------------------------------------------------------
// Partial fragments: one per configuration source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialFeatures {
    pub logging: Option<bool>,
    pub cors: Option<bool>,
    pub helmet: Option<bool>,
    pub rate_limit: Option<bool>,
    pub swagger: Option<bool>,
    pub redis: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialDatabaseConfig {
    #[serde(rename = "type")]
    pub kind: Option<DatabaseKind>,
    pub host: Option<String>,
    pub port: Option<u32>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialCacheConfig {
    #[serde(rename = "type")]
    pub kind: Option<CacheKind>,
    pub host: Option<String>,
    pub port: Option<u32>,
    pub db: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialAuthConfig {
    #[serde(rename = "type")]
    pub kind: Option<AuthKind>,
    pub expires_in: Option<String>,
}

/// Optional-everywhere mirror of [`ProjectConfig`]
///
/// This is both the config-file shape (camelCase keys) and the common form
/// every source is normalized into before merging.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialProjectConfig {
    pub name: Option<String>,
    pub template: Option<Template>,
    pub features: Option<PartialFeatures>,
    pub database: Option<PartialDatabaseConfig>,
    pub cache: Option<PartialCacheConfig>,
    #[serde(alias = "auth")]
    pub authentication: Option<PartialAuthConfig>,
    pub package_manager: Option<PackageManager>,
    pub typescript: Option<bool>,
}

// ---------------------------------------------------------------------------
// Configuration sources
// ---------------------------------------------------------------------------

/// Command-line options for `create` (highest merge priority)
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub template: Option<Template>,
    pub config: Option<PathBuf>,
    pub features: Option<Vec<FeatureName>>,
    pub package_manager: Option<PackageManager>,
    pub typescript: Option<bool>,
    pub skip_install: bool,
    pub no_git: bool,
    pub force: bool,
    pub yes: bool,
}

impl CreateOptions {
    /// Whether interactive prompts should run for this invocation.
    ///
    /// Extension point: the intended refinement is "prompt only for required
    /// fields the config file failed to supply". Until that lands, the rule
    /// is simply: no config file and not running with --yes.
    pub fn wants_prompts(&self) -> bool {
        self.config.is_none() && !self.yes
    }

    pub fn to_partial(&self) -> PartialProjectConfig {
        let features = self.features.as_ref().map(|names| {
            let mut f = PartialFeatures::default();
            for name in names {
                match name {
                    FeatureName::Logging => f.logging = Some(true),
                    FeatureName::Cors => f.cors = Some(true),
                    FeatureName::Helmet => f.helmet = Some(true),
                    FeatureName::RateLimit => f.rate_limit = Some(true),
                    FeatureName::Swagger => f.swagger = Some(true),
                    FeatureName::Redis => f.redis = Some(true),
                }
            }
            f
        });

        PartialProjectConfig {
            template: self.template,
            features,
            package_manager: self.package_manager,
            typescript: self.typescript,
            ..Default::default()
        }
    }
}

/// What the prompt layer collected (lowest merge priority)
#[derive(Debug, Clone, Default)]
pub struct InteractiveAnswers {
    pub template: Option<Template>,
    pub features: Option<PartialFeatures>,
    pub database: Option<PartialDatabaseConfig>,
    pub cache: Option<PartialCacheConfig>,
    pub authentication: Option<PartialAuthConfig>,
    pub package_manager: Option<PackageManager>,
    pub typescript: Option<bool>,
}

impl InteractiveAnswers {
    pub fn to_partial(&self) -> PartialProjectConfig {
        PartialProjectConfig {
            template: self.template,
            features: self.features,
            database: self.database.clone(),
            cache: self.cache.clone(),
            authentication: self.authentication.clone(),
            package_manager: self.package_manager,
            typescript: self.typescript,
            ..Default::default()
        }
    }
}
