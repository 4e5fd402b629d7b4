//! Three-source priority merge
//!
//! Sources are folded low-to-high priority: interactive answers, then the
//! config file, then command-line options. A defined scalar from a higher
//! priority source fully overwrites; an undefined one never does. The four
//! nested blocks (features, database, cache, authentication) merge shallowly
//! per sub-key, so a higher-priority source only overrides the sub-keys it
//! actually defines.

use super::{
    AuthConfig, AuthKind, CacheConfig, CreateOptions, DatabaseConfig, DatabaseKind, Features,
    InteractiveAnswers, PackageManager, PartialAuthConfig, PartialCacheConfig,
    PartialDatabaseConfig, PartialFeatures, PartialProjectConfig, ProjectConfig, Template,
};
use crate::error::ScaffoldError;

/// Default jwt token lifetime when none was configured
const DEFAULT_JWT_EXPIRY: &str = "7d";

fn overlay_opt<T>(base: Option<T>, over: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, over) {
        (Some(b), Some(o)) => Some(merge(b, o)),
        (base, over) => over.or(base),
    }
}

impl PartialFeatures {
    fn overlay(base: Self, over: Self) -> Self {
        Self {
            logging: over.logging.or(base.logging),
            cors: over.cors.or(base.cors),
            helmet: over.helmet.or(base.helmet),
            rate_limit: over.rate_limit.or(base.rate_limit),
            swagger: over.swagger.or(base.swagger),
            redis: over.redis.or(base.redis),
        }
    }
}

impl PartialDatabaseConfig {
    fn overlay(base: Self, over: Self) -> Self {
        Self {
            kind: over.kind.or(base.kind),
            host: over.host.or(base.host),
            port: over.port.or(base.port),
            database: over.database.or(base.database),
        }
    }
}

impl PartialCacheConfig {
    fn overlay(base: Self, over: Self) -> Self {
        Self {
            kind: over.kind.or(base.kind),
            host: over.host.or(base.host),
            port: over.port.or(base.port),
            db: over.db.or(base.db),
        }
    }
}

impl PartialAuthConfig {
    fn overlay(base: Self, over: Self) -> Self {
        Self {
            kind: over.kind.or(base.kind),
            expires_in: over.expires_in.or(base.expires_in),
        }
    }
}

impl PartialProjectConfig {
    /// Merge `over` on top of `base`
    pub fn overlay(base: Self, over: Self) -> Self {
        Self {
            name: over.name.or(base.name),
            template: over.template.or(base.template),
            features: overlay_opt(base.features, over.features, PartialFeatures::overlay),
            database: overlay_opt(base.database, over.database, PartialDatabaseConfig::overlay),
            cache: overlay_opt(base.cache, over.cache, PartialCacheConfig::overlay),
            authentication: overlay_opt(
                base.authentication,
                over.authentication,
                PartialAuthConfig::overlay,
            ),
            package_manager: over.package_manager.or(base.package_manager),
            typescript: over.typescript.or(base.typescript),
        }
    }
}

/// Fold partial fragments in increasing priority order
pub fn merge_partials(
    fragments: impl IntoIterator<Item = PartialProjectConfig>,
) -> PartialProjectConfig {
    fragments
        .into_iter()
        .fold(PartialProjectConfig::default(), PartialProjectConfig::overlay)
}

fn resolve_features(partial: Option<PartialFeatures>) -> Features {
    let defaults = Features::default();
    let Some(p) = partial else {
        return defaults;
    };
    Features {
        logging: p.logging.unwrap_or(defaults.logging),
        cors: p.cors.unwrap_or(defaults.cors),
        helmet: p.helmet.unwrap_or(defaults.helmet),
        rate_limit: p.rate_limit.unwrap_or(defaults.rate_limit),
        swagger: p.swagger.unwrap_or(defaults.swagger),
        redis: p.redis.unwrap_or(defaults.redis),
    }
}

fn resolve_database(partial: PartialDatabaseConfig, project_name: &str) -> DatabaseConfig {
    let kind = partial.kind.unwrap_or(DatabaseKind::Postgresql);
    DatabaseConfig {
        kind,
        host: partial.host.unwrap_or_else(|| "localhost".to_string()),
        port: partial.port.unwrap_or_else(|| kind.default_port()),
        database: partial
            .database
            .unwrap_or_else(|| default_database_name(project_name)),
    }
}

/// Database names get underscores where the project name has separators
fn default_database_name(project_name: &str) -> String {
    project_name
        .rsplit('/')
        .next()
        .unwrap_or(project_name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_cache(partial: PartialCacheConfig) -> CacheConfig {
    CacheConfig {
        host: partial.host.unwrap_or_else(|| "localhost".to_string()),
        port: partial.port.unwrap_or(6379),
        db: partial.db.unwrap_or(0),
    }
}

fn resolve_auth(partial: PartialAuthConfig) -> AuthConfig {
    let kind = partial.kind.unwrap_or(AuthKind::Jwt);
    let expires_in = match kind {
        AuthKind::Jwt => partial
            .expires_in
            .or_else(|| Some(DEFAULT_JWT_EXPIRY.to_string())),
        // Expiry has no meaning for cookie sessions
        AuthKind::Session => None,
    };
    AuthConfig { kind, expires_in }
}

/// Turn a merged partial into a full [`ProjectConfig`] by filling defaults
pub fn finish(project_name: &str, merged: PartialProjectConfig) -> ProjectConfig {
    let database = merged
        .database
        .map(|d| resolve_database(d, project_name));
    ProjectConfig {
        name: project_name.to_string(),
        template: merged.template.unwrap_or(Template::Basic),
        features: resolve_features(merged.features),
        database,
        cache: merged.cache.map(resolve_cache),
        auth: merged.authentication.map(resolve_auth),
        package_manager: merged.package_manager.unwrap_or(PackageManager::Pnpm),
        typescript: merged.typescript.unwrap_or(true),
    }
}

/// Resolve the final configuration from the three sources.
///
/// Loads the config file named in `options` (if any), normalizes every
/// source into a partial fragment, merges interactive < file < command-line,
/// and fills defaults. Deterministic: identical inputs produce identical
/// output.
pub fn resolve_config(
    project_name: &str,
    options: &CreateOptions,
    answers: Option<&InteractiveAnswers>,
) -> Result<ProjectConfig, ScaffoldError> {
    let file_fragment = match &options.config {
        Some(path) => super::file::load_config_file(path)?,
        None => PartialProjectConfig::default(),
    };

    let merged = merge_partials([
        answers.map(InteractiveAnswers::to_partial).unwrap_or_default(),
        file_fragment,
        options.to_partial(),
    ]);

    Ok(finish(project_name, merged))
}
