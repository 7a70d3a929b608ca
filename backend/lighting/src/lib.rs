//! Lighting prompt generation for the relighting node.
//!
//! Maps azimuth, elevation, intensity, color and the cinematic flag onto a
//! fixed phrase vocabulary, memoizes the result per host node id, and
//! renders a PNG preview of the optional input image.

pub mod cache;
pub mod classify;
pub mod fingerprint;
pub mod generator;
pub mod node;
pub mod preview;
pub mod prompt;

pub use cache::{CacheEntry, DEFAULT_CACHE_CAPACITY, LruPromptCache, PromptCache};
pub use classify::{classify_azimuth, classify_elevation, classify_intensity};
pub use fingerprint::fingerprint;
pub use generator::LightingPromptGenerator;
pub use node::QwenMultiangleLightningNode;
pub use preview::PreviewEncoder;
pub use prompt::{SCENE_LOCK_PREAMBLE, build_prompt};
