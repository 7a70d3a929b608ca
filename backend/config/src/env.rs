//! Environment overrides for config values.
//!
//! Recognised variables:
//! - `RELIGHT_CACHE_CAPACITY` — prompt cache size
//! - `RELIGHT_PREVIEW` — `0`, `false`, `off` or `no` disables previews
//! - `RELIGHT_LOG` — log level
//! - `RELIGHT_LOG_DIR` — rolling log file directory

use std::collections::HashMap;

use tracing::warn;

use crate::schema::{CacheConfig, LoggingConfig, PreviewConfig, RelightConfig};

pub const ENV_CACHE_CAPACITY: &str = "RELIGHT_CACHE_CAPACITY";
pub const ENV_PREVIEW: &str = "RELIGHT_PREVIEW";
pub const ENV_LOG_LEVEL: &str = "RELIGHT_LOG";
pub const ENV_LOG_DIR: &str = "RELIGHT_LOG_DIR";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: RelightConfig) -> RelightConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: RelightConfig,
    env: &HashMap<String, String>,
) -> RelightConfig {
    if let Some(raw) = env.get(ENV_CACHE_CAPACITY) {
        match raw.trim().parse::<usize>() {
            Ok(capacity) => {
                config
                    .cache
                    .get_or_insert_with(CacheConfig::default)
                    .capacity = Some(capacity);
            }
            Err(e) => warn!(var = ENV_CACHE_CAPACITY, value = %raw, error = %e, "Ignoring invalid env override"),
        }
    }

    if let Some(raw) = env.get(ENV_PREVIEW) {
        let enabled = !matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "off" | "no"
        );
        config
            .preview
            .get_or_insert_with(PreviewConfig::default)
            .enabled = Some(enabled);
    }

    if let Some(level) = env.get(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config
            .logging
            .get_or_insert_with(LoggingConfig::default)
            .level = Some(level.trim().to_string());
    }

    if let Some(dir) = env.get(ENV_LOG_DIR).filter(|v| !v.trim().is_empty()) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir.clone());
    }

    config
}
