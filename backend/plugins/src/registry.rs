//! Node registry: the class and display-name mappings the host reads at
//! startup, plus dispatch of evaluations to the registered node.

use std::collections::BTreeMap;
use std::sync::Arc;

use relight_config::RelightConfig;
use relight_core::{Node, NodeInputs, NodeOutput, RelightError};
use relight_lighting::{
    LightingPromptGenerator, LruPromptCache, PreviewEncoder, QwenMultiangleLightningNode,
};
use tracing::{info, warn};

use crate::manifest::NodeManifest;

#[derive(Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, Arc<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every node this package ships, built from `config`.
    pub fn with_builtin_nodes(config: &RelightConfig) -> Self {
        let generator = LightingPromptGenerator::with_cache(Arc::new(LruPromptCache::new(
            config.cache_capacity(),
        )))
        .with_preview(PreviewEncoder::new(config.preview_enabled()));

        let mut registry = Self::new();
        registry.register(Arc::new(QwenMultiangleLightningNode::new(Arc::new(generator))));
        registry
    }

    /// Register a node under its class name, replacing any previous one.
    pub fn register(&mut self, node: Arc<dyn Node>) {
        let class = node.class_name().to_string();
        if self.nodes.insert(class.clone(), node).is_some() {
            warn!("[Nodes] Replaced existing registration for {}", class);
        } else {
            info!("[Nodes] Registered: {}", class);
        }
    }

    pub fn get(&self, class: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(class)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Class name → node.
    pub fn class_mappings(&self) -> &BTreeMap<String, Arc<dyn Node>> {
        &self.nodes
    }

    /// Class name → human-readable name.
    pub fn display_name_mappings(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|(class, node)| (class.clone(), node.display_name().to_string()))
            .collect()
    }

    pub fn manifests(&self) -> Vec<NodeManifest> {
        self.nodes
            .values()
            .map(|node| NodeManifest::from_node(node.as_ref()))
            .collect()
    }

    /// Class name → manifest, as one JSON object.
    pub fn object_info(&self) -> serde_json::Value {
        let map = self
            .manifests()
            .into_iter()
            .filter_map(|m| {
                let name = m.name.clone();
                serde_json::to_value(m).ok().map(|v| (name, v))
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// Evaluate the node registered under `class`.
    pub async fn execute(&self, class: &str, inputs: NodeInputs) -> Result<NodeOutput, RelightError> {
        let node = self
            .get(class)
            .ok_or_else(|| RelightError::UnknownNode(class.to_string()))?;
        node.execute(inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relight_config::CacheConfig;
    use serde_json::json;

    #[test]
    fn builtin_registry_lists_lighting_node() {
        let registry = NodeRegistry::with_builtin_nodes(&RelightConfig::default());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("QwenMultiangleLightningNode").is_some());
        assert_eq!(
            registry.display_name_mappings()["QwenMultiangleLightningNode"],
            "Qwen Multiangle Lightning"
        );
        let info = registry.object_info();
        assert_eq!(
            info["QwenMultiangleLightningNode"]["category"],
            "image/lighting"
        );
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = NodeRegistry::new();
        registry.register(Arc::new(QwenMultiangleLightningNode::default()));
        registry.register(Arc::new(QwenMultiangleLightningNode::default()));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn unknown_class_is_an_error() {
        let registry = NodeRegistry::new();
        let err = registry
            .execute("Nope", NodeInputs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RelightError::UnknownNode(name) if name == "Nope"));
    }

    #[tokio::test]
    async fn executes_through_registry() {
        let config = RelightConfig {
            cache: Some(CacheConfig { capacity: Some(2) }),
            ..Default::default()
        };
        let registry = NodeRegistry::with_builtin_nodes(&config);
        let out = registry
            .execute(
                "QwenMultiangleLightningNode",
                NodeInputs::new(json!({ "light_azimuth": 180, "light_intensity": 8.0 }))
                    .with_unique_id("12"),
            )
            .await
            .unwrap();
        let prompt = out.prompt().unwrap();
        assert!(prompt.contains("strong dramatic contrast colored light (hex: #FFFFFF)"));
        assert!(prompt.contains("backlighting, light from behind"));
        assert_eq!(out.ui.image_base64, vec![String::new()]);
    }
}
