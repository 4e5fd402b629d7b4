//! package.json finalization
//!
//! The bundled package.json files carry only the koa baseline. The
//! feature-implied dependencies, the TypeScript toolchain, and the variant
//! scripts are injected here from a fixed version map, so the written file
//! reflects the resolved configuration exactly. serde_json's map keeps
//! keys sorted, which makes the output deterministic.

use crate::config::{ProjectConfig, Template};
use serde_json::{json, Value};

/// Pinned dependency versions for generated projects
const FEATURE_DEPENDENCIES: &[(&str, &str, &str)] = &[
    // (feature key, package, version)
    ("logging", "koa-logger", "^3.2.1"),
    ("cors", "@koa/cors", "^5.0.0"),
    ("helmet", "koa-helmet", "^7.0.2"),
    ("rate_limit", "koa-ratelimit", "^5.1.0"),
    ("swagger", "swagger-jsdoc", "^6.2.8"),
    ("swagger", "koa2-swagger-ui", "^5.10.0"),
    ("redis", "ioredis", "^5.4.1"),
];

const DEV_DEPENDENCIES_TS: &[(&str, &str)] = &[
    ("typescript", "^5.5.4"),
    ("tsx", "^4.16.5"),
    ("@types/node", "^20.14.0"),
    ("@types/koa", "^2.15.0"),
    ("@types/koa__router", "^12.0.4"),
];

fn set_dep(value: &mut Value, section: &str, package: &str, version: &str) {
    let deps = value
        .as_object_mut()
        .expect("package.json root is an object")
        .entry(section)
        .or_insert_with(|| json!({}));
    if let Some(map) = deps.as_object_mut() {
        map.insert(package.to_string(), json!(version));
    }
}

fn enabled(config: &ProjectConfig, key: &str) -> bool {
    match key {
        "logging" => config.features.logging,
        "cors" => config.features.cors,
        "helmet" => config.features.helmet,
        "rate_limit" => config.features.rate_limit,
        "swagger" => config.features.swagger,
        "redis" => config.wants_redis(),
        _ => false,
    }
}

/// Rewrite a copied package.json to match the resolved configuration
pub fn finalize(value: &mut Value, config: &ProjectConfig) {
    if let Some(obj) = value.as_object_mut() {
        obj.insert("name".to_string(), json!(config.name));
    }

    for (key, package, version) in FEATURE_DEPENDENCIES {
        if enabled(config, key) {
            set_dep(value, "dependencies", package, version);
        }
    }

    if let Some(db) = &config.database {
        set_dep(value, "dependencies", db.kind.driver_package(), "*");
    }

    if let Some(auth) = &config.auth {
        set_dep(value, "dependencies", auth.kind.auth_package(), "*");
    }

    if config.template == Template::Fullstack {
        set_dep(value, "dependencies", "koa-static", "^5.0.0");
    }

    let scripts = if config.typescript {
        for (package, version) in DEV_DEPENDENCIES_TS {
            set_dep(value, "devDependencies", package, version);
        }
        json!({
            "dev": "tsx watch src/app.ts",
            "build": "tsc",
            "start": "node dist/app.js"
        })
    } else {
        json!({
            "dev": "node --watch src/app.js",
            "start": "node src/app.js"
        })
    };
    if let Some(obj) = value.as_object_mut() {
        obj.insert("scripts".to_string(), scripts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge::finish;
    use crate::config::{
        DatabaseKind, PartialAuthConfig, PartialDatabaseConfig, PartialFeatures,
        PartialProjectConfig,
    };

    fn base_value() -> Value {
        json!({
            "name": "{{projectName}}",
            "version": "0.1.0",
            "dependencies": {
                "koa": "^2.15.3",
                "@koa/router": "^13.0.0",
                "dotenv": "^16.4.5"
            }
        })
    }

    fn dep<'a>(value: &'a Value, section: &str, package: &str) -> Option<&'a Value> {
        value.get(section).and_then(|d| d.get(package))
    }

    #[test]
    fn test_default_features_inject_middleware() {
        let config = finish("demo", PartialProjectConfig::default());
        let mut value = base_value();
        finalize(&mut value, &config);

        assert_eq!(value["name"], "demo");
        // logging, cors, helmet default on
        assert!(dep(&value, "dependencies", "koa-logger").is_some());
        assert!(dep(&value, "dependencies", "@koa/cors").is_some());
        assert!(dep(&value, "dependencies", "koa-helmet").is_some());
        // rate limit, swagger, redis default off
        assert!(dep(&value, "dependencies", "koa-ratelimit").is_none());
        assert!(dep(&value, "dependencies", "swagger-jsdoc").is_none());
        assert!(dep(&value, "dependencies", "ioredis").is_none());
    }

    #[test]
    fn test_database_and_auth_drivers() {
        let config = finish(
            "demo",
            PartialProjectConfig {
                database: Some(PartialDatabaseConfig {
                    kind: Some(DatabaseKind::Mongodb),
                    ..Default::default()
                }),
                authentication: Some(PartialAuthConfig::default()),
                ..Default::default()
            },
        );
        let mut value = base_value();
        finalize(&mut value, &config);

        assert!(dep(&value, "dependencies", "mongoose").is_some());
        assert!(dep(&value, "dependencies", "jsonwebtoken").is_some());
    }

    #[test]
    fn test_typescript_toolchain_and_scripts() {
        let config = finish("demo", PartialProjectConfig::default());
        let mut value = base_value();
        finalize(&mut value, &config);

        assert!(dep(&value, "devDependencies", "typescript").is_some());
        assert_eq!(value["scripts"]["build"], "tsc");
    }

    #[test]
    fn test_javascript_variant_has_no_ts_toolchain() {
        let config = finish(
            "demo",
            PartialProjectConfig {
                typescript: Some(false),
                ..Default::default()
            },
        );
        let mut value = base_value();
        finalize(&mut value, &config);

        assert!(value.get("devDependencies").is_none());
        assert_eq!(value["scripts"]["start"], "node src/app.js");
    }

    #[test]
    fn test_finalize_is_deterministic() {
        let config = finish(
            "demo",
            PartialProjectConfig {
                features: Some(PartialFeatures {
                    swagger: Some(true),
                    redis: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let mut a = base_value();
        let mut b = base_value();
        finalize(&mut a, &config);
        finalize(&mut b, &config);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
