//! Config defaults: applies default values to parsed config.

use crate::schema::{CacheConfig, LoggingConfig, PreviewConfig, RelightConfig};

/// Default number of node ids kept in the prompt cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

pub const DEFAULT_PREVIEW_ENABLED: bool = true;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: RelightConfig) -> RelightConfig {
    let config = apply_cache_defaults(config);
    let config = apply_preview_defaults(config);
    apply_logging_defaults(config)
}

fn apply_cache_defaults(mut config: RelightConfig) -> RelightConfig {
    let cache = config.cache.get_or_insert_with(CacheConfig::default);
    if cache.capacity.is_none() {
        cache.capacity = Some(DEFAULT_CACHE_CAPACITY);
    }
    config
}

fn apply_preview_defaults(mut config: RelightConfig) -> RelightConfig {
    let preview = config.preview.get_or_insert_with(PreviewConfig::default);
    if preview.enabled.is_none() {
        preview.enabled = Some(DEFAULT_PREVIEW_ENABLED);
    }
    config
}

fn apply_logging_defaults(mut config: RelightConfig) -> RelightConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
