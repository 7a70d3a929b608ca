//! Relighting node configuration schema.
//!
//! Every field is optional on disk; `defaults::apply_all_defaults` fills the
//! gaps after loading.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelightConfig {
    /// Prompt cache settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,

    /// Preview image settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of node ids remembered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl RelightConfig {
    pub fn cache_capacity(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.capacity)
            .unwrap_or(crate::defaults::DEFAULT_CACHE_CAPACITY)
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview
            .as_ref()
            .and_then(|p| p.enabled)
            .unwrap_or(crate::defaults::DEFAULT_PREVIEW_ENABLED)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = "cache:\n  capacity: 8\npreview:\n  enabled: false\n";
        let cfg: RelightConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.cache_capacity(), 8);
        assert!(!cfg.preview_enabled());
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.log_dir().is_none());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: RelightConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, RelightConfig::default());
    }
}
