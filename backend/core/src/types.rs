use serde::{Deserialize, Serialize};

/// Host-enforced azimuth range, in degrees.
pub const AZIMUTH_RANGE: (i32, i32) = (0, 360);
/// Host-enforced elevation range, in degrees.
pub const ELEVATION_RANGE: (i32, i32) = (-90, 90);
/// Host-enforced intensity range.
pub const INTENSITY_RANGE: (f64, f64) = (0.0, 10.0);

pub const DEFAULT_AZIMUTH: i32 = 0;
pub const DEFAULT_ELEVATION: i32 = 30;
pub const DEFAULT_INTENSITY: f64 = 5.0;
pub const DEFAULT_COLOR_HEX: &str = "#FFFFFF";
pub const DEFAULT_CINEMATIC: bool = true;

/// Lighting controls for one node evaluation.
///
/// Field names on the wire follow the host widget names. Equality is exact,
/// including the floating-point intensity; the cache relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingParameters {
    /// Horizontal angle in degrees. Wrapped modulo 360 when classified.
    #[serde(rename = "light_azimuth")]
    pub azimuth: i32,
    /// Vertical angle in degrees, signed.
    #[serde(rename = "light_elevation")]
    pub elevation: i32,
    #[serde(rename = "light_intensity")]
    pub intensity: f64,
    /// Passed through verbatim into the prompt; never parsed.
    #[serde(rename = "light_color_hex")]
    pub color_hex: String,
    #[serde(rename = "cinematic_mode")]
    pub cinematic: bool,
}

impl Default for LightingParameters {
    fn default() -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
            intensity: DEFAULT_INTENSITY,
            color_hex: DEFAULT_COLOR_HEX.to_string(),
            cinematic: DEFAULT_CINEMATIC,
        }
    }
}

impl LightingParameters {
    pub fn new(
        azimuth: i32,
        elevation: i32,
        intensity: f64,
        color_hex: impl Into<String>,
        cinematic: bool,
    ) -> Self {
        Self {
            azimuth,
            elevation,
            intensity,
            color_hex: color_hex.into(),
            cinematic,
        }
    }

    /// Clamp every numeric field into the range the host widgets allow.
    ///
    /// A NaN intensity is replaced by the default.
    pub fn clamped(mut self) -> Self {
        self.azimuth = self.azimuth.clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1);
        self.elevation = self.elevation.clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1);
        self.intensity = if self.intensity.is_nan() {
            DEFAULT_INTENSITY
        } else {
            self.intensity.clamp(INTENSITY_RANGE.0, INTENSITY_RANGE.1)
        };
        self
    }
}

/// Output of one prompt generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptResult {
    pub prompt: String,
    /// `data:image/png;base64,...`, or empty when no preview is available.
    pub preview_base64: String,
}

/// Side-channel payload the host UI renders next to the node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiPayload {
    /// Always exactly one element; empty string when unavailable.
    pub image_base64: Vec<String>,
}

/// What a node evaluation hands back to the host.
///
/// Serializes as `{"ui": {"image_base64": [..]}, "result": ["<prompt>"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeOutput {
    pub ui: UiPayload,
    pub result: Vec<String>,
}

impl From<&PromptResult> for NodeOutput {
    fn from(result: &PromptResult) -> Self {
        Self {
            ui: UiPayload {
                image_base64: vec![result.preview_base64.clone()],
            },
            result: vec![result.prompt.clone()],
        }
    }
}

impl NodeOutput {
    /// The `lighting_prompt` output slot.
    pub fn prompt(&self) -> Option<&str> {
        self.result.first().map(String::as_str)
    }
}
