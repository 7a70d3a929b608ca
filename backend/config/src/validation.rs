//! Config validation with field paths in every message.

use crate::schema::RelightConfig;
use thiserror::Error;

/// Capacities above this are accepted but flagged.
pub const LARGE_CACHE_WARNING_THRESHOLD: usize = 10_000;

const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &RelightConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_cache(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_cache(config: &RelightConfig, report: &mut ValidationReport) {
    let Some(capacity) = config.cache.as_ref().and_then(|c| c.capacity) else {
        return;
    };
    if capacity == 0 {
        report.error("cache.capacity", "Cache capacity must be at least 1");
    } else if capacity > LARGE_CACHE_WARNING_THRESHOLD {
        report.warn(
            "cache.capacity",
            format!("Cache capacity {capacity} is unusually large; every entry keeps a full preview"),
        );
    }
}

/// Accepts plain levels only; `EnvFilter` directives belong in `RUST_LOG`.
fn validate_logging(config: &RelightConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    if !KNOWN_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}
