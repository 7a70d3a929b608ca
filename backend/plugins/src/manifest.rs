//! Node manifest: what the host needs to list and wire a node.
//!
//! Serializes in the host's `object_info` shape.

use relight_core::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeManifest {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub function: String,
    pub output_node: bool,
    /// `{"required": {...}, "optional": {...}, "hidden": {...}}`
    pub input: serde_json::Value,
    pub output: Vec<String>,
    pub output_name: Vec<String>,
}

impl NodeManifest {
    /// Describe a node from its trait metadata.
    pub fn from_node(node: &dyn Node) -> Self {
        Self {
            name: node.class_name().to_string(),
            display_name: node.display_name().to_string(),
            category: node.category().to_string(),
            function: node.function_name().to_string(),
            output_node: node.output_node(),
            input: node.input_types(),
            output: node.return_types(),
            output_name: node.return_names(),
        }
    }

    /// Validate the manifest for required fields.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("Node manifest missing 'name'");
        }
        if self.function.is_empty() {
            anyhow::bail!("Node manifest missing 'function'");
        }
        if self.output.len() != self.output_name.len() {
            anyhow::bail!(
                "Node '{}' declares {} outputs but {} output names",
                self.name,
                self.output.len(),
                self.output_name.len()
            );
        }
        if !self.input.is_object() {
            anyhow::bail!("Node '{}' input schema must be an object", self.name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relight_lighting::QwenMultiangleLightningNode;

    #[test]
    fn lighting_node_manifest() {
        let manifest = NodeManifest::from_node(&QwenMultiangleLightningNode::default());
        manifest.validate().unwrap();
        assert_eq!(manifest.name, "QwenMultiangleLightningNode");
        assert_eq!(manifest.display_name, "Qwen Multiangle Lightning");
        assert_eq!(manifest.category, "image/lighting");
        assert_eq!(manifest.function, "generate_lighting_prompt");
        assert!(manifest.output_node);
        assert_eq!(manifest.output, vec!["STRING"]);
        assert_eq!(manifest.output_name, vec!["lighting_prompt"]);
    }

    #[test]
    fn rejects_mismatched_outputs() {
        let mut manifest = NodeManifest::from_node(&QwenMultiangleLightningNode::default());
        manifest.output_name.clear();
        assert!(manifest.validate().is_err());
    }
}
