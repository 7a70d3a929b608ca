//! `relight-config` — runtime configuration for the relighting node.
//!
//! Provides:
//! - Typed config schema (cache, preview, logging)
//! - YAML loading
//! - `RELIGHT_*` environment overrides
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config};
pub use schema::{CacheConfig, LoggingConfig, PreviewConfig, RelightConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::path::Path;

/// Load, apply env overrides and defaults, then validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<RelightConfig> {
    check(load_unchecked(path).await?)
}

/// Load and apply env overrides and defaults without validating.
///
/// Binaries that build their logger from the config use this, install the
/// subscriber, then call [`check`] so validation messages are not lost.
pub async fn load_unchecked(path: &Path) -> Result<RelightConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config);
    Ok(apply_all_defaults(config))
}

/// Validate a prepared config, logging warnings and failing on errors.
pub fn check(config: RelightConfig) -> Result<RelightConfig> {
    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{first}");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn check_rejects_zero_capacity() {
        let cfg = RelightConfig {
            cache: Some(CacheConfig { capacity: Some(0) }),
            ..Default::default()
        };
        let err = check(cfg).unwrap_err();
        assert!(err.to_string().contains("cache.capacity"));
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn check_logs_warnings_to_installed_subscriber() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let cfg = RelightConfig {
            cache: Some(CacheConfig {
                capacity: Some(validation::LARGE_CACHE_WARNING_THRESHOLD + 1),
            }),
            ..Default::default()
        };
        let cfg = tracing::subscriber::with_default(subscriber, || check(cfg)).unwrap();
        assert_eq!(cfg.cache_capacity(), validation::LARGE_CACHE_WARNING_THRESHOLD + 1);
        let out = logs.contents();
        assert!(out.contains("Config warning"), "captured: {out}");
        assert!(out.contains("cache.capacity"), "captured: {out}");
    }

    #[tokio::test]
    async fn unchecked_load_defers_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "cache:\n  capacity: 0\n").unwrap();
        let cfg = load_unchecked(&path).await.unwrap();
        assert_eq!(cfg.cache_capacity(), 0);
        assert!(cfg.logging.is_some());
        assert!(check(cfg).is_err());
        assert!(load_and_prepare(&path).await.is_err());
    }

    #[tokio::test]
    async fn prepares_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "preview:\n  enabled: false\n").unwrap();
        let cfg = load_and_prepare(&path).await.unwrap();
        assert!(!cfg.preview_enabled());
        assert!(cfg.cache.is_some());
    }
}
