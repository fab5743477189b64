use std::path::PathBuf;

use crate::app_config::{AppConfig, SourceConfig, SourceKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any present env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any present env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let directory_path = PathBuf::from(or_default(
        "AQUASHIP_DIRECTORY_PATH",
        "./config/pincodes.yaml",
    ));
    let log_level = or_default("AQUASHIP_LOG_LEVEL", "info");
    let cache_ttl_secs = parse_u64("AQUASHIP_CACHE_TTL_SECS", "86400")?;

    let open_data = SourceConfig {
        kind: SourceKind::OpenData,
        base_url: or_default("AQUASHIP_OPEN_DATA_BASE_URL", "https://api.data.gov.in"),
        // No literal fallback key: a missing credential disables the source
        // explicitly instead of silently using a baked-in one.
        api_key: lookup("AQUASHIP_OPEN_DATA_API_KEY").ok(),
        resource_id: lookup("AQUASHIP_OPEN_DATA_RESOURCE_ID").ok(),
        enabled: parse_bool("AQUASHIP_OPEN_DATA_ENABLED", "true")?,
        priority: parse_u8("AQUASHIP_OPEN_DATA_PRIORITY", "1")?,
        rate_limit_per_minute: parse_u32("AQUASHIP_OPEN_DATA_RATE_LIMIT_PER_MINUTE", "10")?,
        timeout_ms: parse_u64("AQUASHIP_OPEN_DATA_TIMEOUT_MS", "3000")?,
    };

    let postal_lookup = SourceConfig {
        kind: SourceKind::PostalLookup,
        base_url: or_default(
            "AQUASHIP_POSTAL_LOOKUP_BASE_URL",
            "https://api.postalpincode.in",
        ),
        api_key: None,
        resource_id: None,
        enabled: parse_bool("AQUASHIP_POSTAL_LOOKUP_ENABLED", "true")?,
        priority: parse_u8("AQUASHIP_POSTAL_LOOKUP_PRIORITY", "2")?,
        rate_limit_per_minute: parse_u32("AQUASHIP_POSTAL_LOOKUP_RATE_LIMIT_PER_MINUTE", "30")?,
        timeout_ms: parse_u64("AQUASHIP_POSTAL_LOOKUP_TIMEOUT_MS", "5000")?,
    };

    Ok(AppConfig {
        directory_path,
        log_level,
        cache_ttl_secs,
        sources: vec![open_data, postal_lookup],
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    fn source<'a>(cfg: &'a AppConfig, kind: SourceKind) -> &'a SourceConfig {
        cfg.sources
            .iter()
            .find(|s| s.kind == kind)
            .expect("source should be configured")
    }

    #[test]
    fn defaults_apply_with_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.directory_path, PathBuf::from("./config/pincodes.yaml"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.cache_ttl_secs, 86_400);

        let od = source(&cfg, SourceKind::OpenData);
        assert!(od.enabled);
        assert_eq!(od.priority, 1);
        assert_eq!(od.rate_limit_per_minute, 10);
        assert_eq!(od.timeout_ms, 3000);
        assert!(od.api_key.is_none(), "no baked-in credential default");
        assert!(od.resource_id.is_none());

        let pl = source(&cfg, SourceKind::PostalLookup);
        assert!(pl.enabled);
        assert_eq!(pl.priority, 2);
        assert_eq!(pl.rate_limit_per_minute, 30);
        assert_eq!(pl.timeout_ms, 5000);
    }

    #[test]
    fn overrides_are_honored() {
        let mut map = HashMap::new();
        map.insert("AQUASHIP_OPEN_DATA_API_KEY", "k-123");
        map.insert("AQUASHIP_OPEN_DATA_RESOURCE_ID", "r-456");
        map.insert("AQUASHIP_OPEN_DATA_PRIORITY", "5");
        map.insert("AQUASHIP_POSTAL_LOOKUP_ENABLED", "false");
        map.insert("AQUASHIP_CACHE_TTL_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();

        let od = source(&cfg, SourceKind::OpenData);
        assert_eq!(od.api_key.as_deref(), Some("k-123"));
        assert_eq!(od.resource_id.as_deref(), Some("r-456"));
        assert_eq!(od.priority, 5);
        assert!(!source(&cfg, SourceKind::PostalLookup).enabled);
        assert_eq!(cfg.cache_ttl_secs, 60);
    }

    #[test]
    fn invalid_rate_limit_is_rejected() {
        let mut map = HashMap::new();
        map.insert("AQUASHIP_OPEN_DATA_RATE_LIMIT_PER_MINUTE", "fast");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "AQUASHIP_OPEN_DATA_RATE_LIMIT_PER_MINUTE"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let mut map = HashMap::new();
        map.insert("AQUASHIP_POSTAL_LOOKUP_ENABLED", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "AQUASHIP_POSTAL_LOOKUP_ENABLED"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        for (raw, expected) in [("1", true), ("yes", true), ("FALSE", false), ("0", false)] {
            let mut map = HashMap::new();
            map.insert("AQUASHIP_OPEN_DATA_ENABLED", raw);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert_eq!(source(&cfg, SourceKind::OpenData).enabled, expected, "raw = {raw}");
        }
    }

    #[test]
    fn requires_credential_only_for_open_data() {
        assert!(SourceKind::OpenData.requires_credential());
        assert!(!SourceKind::PostalLookup.requires_credential());
    }
}
