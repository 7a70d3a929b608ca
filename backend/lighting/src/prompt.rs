//! Relighting prompt assembly.

use relight_core::LightingParameters;

use crate::classify::{classify_azimuth, classify_elevation, classify_intensity};

/// Fixed preamble prepended to every prompt. Locks scene, camera, subject,
/// pose and composition so the downstream model only changes the lighting.
pub const SCENE_LOCK_PREAMBLE: &str = concat!(
    "SCENE LOCK, CONSTANT BACKGROUND, FIXED SCENERY. ",
    "STATIC SHOT, FIXED VIEWPOINT, NO CAMERA MOVEMENT. ",
    "maintaining character consistency, ",
    "keeping the same character pose and action, ",
    "maintaining the same composition, ",
    "RELIGHTING ONLY: only the light rays and shadows change, the scene remains untouched. ",
);

const CINEMATIC_PREFIX: &str = "professional cinematic relighting, ";
const CINEMATIC_SUFFIX: &str = ", raytraced shadows, realistic global illumination";

/// `"<intensity> colored light (hex: <color>), <azimuth>, <elevation>"`
pub fn lighting_detail(params: &LightingParameters) -> String {
    format!(
        "{} colored light (hex: {}), {}, {}",
        classify_intensity(params.intensity),
        params.color_hex,
        classify_azimuth(params.azimuth),
        classify_elevation(params.elevation),
    )
}

/// Build the full prompt. Pure: identical parameters give identical bytes.
pub fn build_prompt(params: &LightingParameters) -> String {
    let detail = lighting_detail(params);
    if params.cinematic {
        format!("{SCENE_LOCK_PREAMBLE}{CINEMATIC_PREFIX}{detail}{CINEMATIC_SUFFIX}")
    } else {
        format!("{SCENE_LOCK_PREAMBLE}{detail}")
    }
}
