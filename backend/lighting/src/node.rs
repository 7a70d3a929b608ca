use std::sync::Arc;

use async_trait::async_trait;
use relight_core::types::{
    AZIMUTH_RANGE, DEFAULT_AZIMUTH, DEFAULT_CINEMATIC, DEFAULT_COLOR_HEX, DEFAULT_ELEVATION,
    DEFAULT_INTENSITY, ELEVATION_RANGE, INTENSITY_RANGE,
};
use relight_core::{LightingParameters, Node, NodeInputs, NodeOutput, RelightError};
use serde_json::json;
use tracing::debug;

use crate::generator::LightingPromptGenerator;

pub const CLASS_NAME: &str = "QwenMultiangleLightningNode";
pub const DISPLAY_NAME: &str = "Qwen Multiangle Lightning";
pub const CATEGORY: &str = "image/lighting";
pub const FUNCTION_NAME: &str = "generate_lighting_prompt";

/// Host-facing lighting control node.
pub struct QwenMultiangleLightningNode {
    generator: Arc<LightingPromptGenerator>,
}

impl QwenMultiangleLightningNode {
    pub fn new(generator: Arc<LightingPromptGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &LightingPromptGenerator {
        &self.generator
    }
}

impl Default for QwenMultiangleLightningNode {
    fn default() -> Self {
        Self::new(Arc::new(LightingPromptGenerator::new()))
    }
}

/// Read widget values, filling defaults and clamping to the widget ranges.
pub fn parse_widgets(widgets: &serde_json::Value) -> Result<LightingParameters, RelightError> {
    let params: LightingParameters = match widgets {
        serde_json::Value::Null => LightingParameters::default(),
        serde_json::Value::Object(_) => {
            serde_json::from_value(widgets.clone()).map_err(|e| RelightError::InvalidInput {
                field: "widgets".to_string(),
                message: e.to_string(),
            })?
        }
        other => {
            return Err(RelightError::InvalidInput {
                field: "widgets".to_string(),
                message: format!("expected an object, got {other}"),
            });
        }
    };
    Ok(params.clamped())
}

#[async_trait]
impl Node for QwenMultiangleLightningNode {
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    fn category(&self) -> &str {
        CATEGORY
    }

    fn function_name(&self) -> &str {
        FUNCTION_NAME
    }

    fn output_node(&self) -> bool {
        true
    }

    fn return_types(&self) -> Vec<String> {
        vec!["STRING".to_string()]
    }

    fn return_names(&self) -> Vec<String> {
        vec!["lighting_prompt".to_string()]
    }

    fn input_types(&self) -> serde_json::Value {
        json!({
            "required": {
                "light_azimuth": ["INT", {
                    "default": DEFAULT_AZIMUTH, "min": AZIMUTH_RANGE.0, "max": AZIMUTH_RANGE.1,
                    "step": 1, "display": "slider"
                }],
                "light_elevation": ["INT", {
                    "default": DEFAULT_ELEVATION, "min": ELEVATION_RANGE.0, "max": ELEVATION_RANGE.1,
                    "step": 1, "display": "slider"
                }],
                "light_intensity": ["FLOAT", {
                    "default": DEFAULT_INTENSITY, "min": INTENSITY_RANGE.0, "max": INTENSITY_RANGE.1,
                    "step": 0.1, "display": "slider"
                }],
                "light_color_hex": ["COLOR", { "default": DEFAULT_COLOR_HEX }],
                "cinematic_mode": ["BOOLEAN", { "default": DEFAULT_CINEMATIC, "display": "checkbox" }]
            },
            "optional": {
                "image": ["IMAGE"]
            },
            "hidden": {
                "unique_id": "UNIQUE_ID"
            }
        })
    }

    async fn execute(&self, inputs: NodeInputs) -> Result<NodeOutput, RelightError> {
        let params = parse_widgets(&inputs.widgets)?;
        debug!(node = CLASS_NAME, unique_id = ?inputs.unique_id, "Evaluating lighting node");
        let result = self.generator.generate(
            inputs.unique_id.as_deref(),
            &params,
            inputs.image.as_deref(),
        );
        Ok(NodeOutput::from(result.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relight_core::ImageTensor;

    #[test]
    fn parses_defaults_from_null() {
        assert_eq!(
            parse_widgets(&serde_json::Value::Null).unwrap(),
            LightingParameters::default()
        );
    }

    #[test]
    fn clamps_out_of_range_widgets() {
        let params = parse_widgets(&json!({
            "light_azimuth": 720,
            "light_elevation": 120,
            "light_intensity": -1.0
        }))
        .unwrap();
        assert_eq!(params.azimuth, 360);
        assert_eq!(params.elevation, 90);
        assert_eq!(params.intensity, 0.0);
    }

    #[test]
    fn rejects_mistyped_widgets() {
        let err = parse_widgets(&json!({ "light_azimuth": "north" })).unwrap_err();
        assert!(matches!(err, RelightError::InvalidInput { .. }));
        let err = parse_widgets(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, RelightError::InvalidInput { .. }));
    }

    #[test]
    fn schema_exposes_host_contract() {
        let node = QwenMultiangleLightningNode::default();
        let schema = node.input_types();
        assert_eq!(schema["required"]["light_azimuth"][1]["max"], 360);
        assert_eq!(schema["required"]["light_elevation"][1]["default"], 30);
        assert_eq!(schema["required"]["light_color_hex"][1]["default"], "#FFFFFF");
        assert_eq!(schema["optional"]["image"][0], "IMAGE");
        assert_eq!(schema["hidden"]["unique_id"], "UNIQUE_ID");
        assert!(node.output_node());
        assert_eq!(node.return_names(), vec!["lighting_prompt"]);
    }

    #[tokio::test]
    async fn execute_wraps_prompt_and_preview() {
        let node = QwenMultiangleLightningNode::default();
        let image: Arc<dyn relight_core::ImageSource> =
            Arc::new(ImageTensor::filled(vec![1, 2, 2, 3], 0.5).unwrap());
        let inputs = NodeInputs::new(json!({ "cinematic_mode": false }))
            .with_image(image)
            .with_unique_id("7");
        let out = node.execute(inputs).await.unwrap();
        assert_eq!(out.ui.image_base64.len(), 1);
        assert!(out.ui.image_base64[0].starts_with("data:image/png;base64,"));
        assert!(out.prompt().unwrap().ends_with("high-positioned light source"));
        assert!(node.generator().cache().get("7").is_some());
    }
}
