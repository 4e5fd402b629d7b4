//! Post-merge configuration validation
//!
//! Enumerated fields (template, package manager, database and auth kinds)
//! are valid by construction in the typed model; the parsers reject unknown
//! values and name the accepted ones. What remains are the value-range
//! invariants, checked independently here with every violation collected.

use super::ProjectConfig;

const PORT_RANGE: std::ops::RangeInclusive<u32> = 1..=65535;
const REDIS_DB_RANGE: std::ops::RangeInclusive<u32> = 0..=15;

/// Outcome of validating a resolved configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a resolved configuration against its invariants
pub fn validate_config(config: &ProjectConfig) -> ConfigValidation {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("name: must not be empty".to_string());
    }

    if let Some(db) = &config.database {
        if !PORT_RANGE.contains(&db.port) {
            errors.push(format!(
                "database.port: {} is out of range (valid: 1-65535)",
                db.port
            ));
        }
    }

    if let Some(cache) = &config.cache {
        if !PORT_RANGE.contains(&cache.port) {
            errors.push(format!(
                "cache.port: {} is out of range (valid: 1-65535)",
                cache.port
            ));
        }
        if !REDIS_DB_RANGE.contains(&cache.db) {
            errors.push(format!(
                "cache.db: {} is out of range (valid: 0-15)",
                cache.db
            ));
        }
    }

    ConfigValidation {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge::finish;
    use crate::config::{PartialCacheConfig, PartialDatabaseConfig, PartialProjectConfig};

    fn config_with(partial: PartialProjectConfig) -> ProjectConfig {
        finish("demo", partial)
    }

    #[test]
    fn test_default_config_is_valid() {
        let result = validate_config(&config_with(PartialProjectConfig::default()));
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_out_of_range_database_port() {
        let config = config_with(PartialProjectConfig {
            database: Some(PartialDatabaseConfig {
                port: Some(99999),
                ..Default::default()
            }),
            ..Default::default()
        });

        let result = validate_config(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("99999")));
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let config = config_with(PartialProjectConfig {
            cache: Some(PartialCacheConfig {
                port: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        });

        let result = validate_config(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.starts_with("cache.port")));
    }

    #[test]
    fn test_redis_db_index_range() {
        let config = config_with(PartialProjectConfig {
            cache: Some(PartialCacheConfig {
                db: Some(16),
                ..Default::default()
            }),
            ..Default::default()
        });

        let result = validate_config(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("0-15")));
    }

    #[test]
    fn test_all_violations_collected() {
        let mut config = config_with(PartialProjectConfig {
            database: Some(PartialDatabaseConfig {
                port: Some(0),
                ..Default::default()
            }),
            cache: Some(PartialCacheConfig {
                port: Some(70000),
                db: Some(99),
                ..Default::default()
            }),
            ..Default::default()
        });
        config.name = String::new();

        let result = validate_config(&config);
        assert_eq!(result.errors.len(), 4);
    }
}
