use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::image::ImageSource;
use crate::types::NodeOutput;

/// Everything the host passes to one node evaluation.
#[derive(Debug, Clone, Default)]
pub struct NodeInputs {
    /// Widget values keyed by input name.
    pub widgets: serde_json::Value,
    /// Optional `IMAGE` input.
    pub image: Option<Arc<dyn ImageSource>>,
    /// Hidden `UNIQUE_ID`, used only for cache partitioning.
    pub unique_id: Option<String>,
}

impl NodeInputs {
    pub fn new(widgets: serde_json::Value) -> Self {
        Self {
            widgets,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: Arc<dyn ImageSource>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_unique_id(mut self, id: impl Into<String>) -> Self {
        self.unique_id = Some(id.into());
        self
    }
}

/// A node the host graph runtime can schedule.
#[async_trait]
pub trait Node: Send + Sync {
    /// Registry key (e.g., "QwenMultiangleLightningNode").
    fn class_name(&self) -> &str;

    /// Name shown in the host's node browser.
    fn display_name(&self) -> &str;

    /// Menu category, slash separated.
    fn category(&self) -> &str;

    /// Entry point name reported to the host.
    fn function_name(&self) -> &str;

    /// Output nodes run even when nothing consumes their outputs.
    fn output_node(&self) -> bool {
        false
    }

    fn return_types(&self) -> Vec<String>;

    fn return_names(&self) -> Vec<String>;

    /// Input schema grouped into `required`, `optional` and `hidden`.
    fn input_types(&self) -> serde_json::Value;

    /// Evaluate the node once.
    async fn execute(&self, inputs: NodeInputs) -> Result<NodeOutput>;
}
