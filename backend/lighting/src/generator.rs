//! Memoized lighting prompt generation.

use std::sync::{Arc, Mutex};

use relight_core::{ImageSource, LightingParameters, PromptResult};
use tracing::debug;

use crate::cache::{CacheEntry, DEFAULT_CACHE_KEY, LruPromptCache, PromptCache};
use crate::fingerprint::fingerprint;
use crate::preview::PreviewEncoder;
use crate::prompt::build_prompt;

/// Turns lighting controls into a relighting prompt, remembering the last
/// result per node id so unchanged inputs skip recomputation.
pub struct LightingPromptGenerator {
    cache: Arc<dyn PromptCache>,
    preview: PreviewEncoder,
    /// Held across lookup and store so concurrent callers cannot interleave.
    generate_lock: Mutex<()>,
}

impl Default for LightingPromptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingPromptGenerator {
    /// Generator with a default-sized LRU cache and previews enabled.
    pub fn new() -> Self {
        Self::with_cache(Arc::new(LruPromptCache::default()))
    }

    pub fn with_cache(cache: Arc<dyn PromptCache>) -> Self {
        Self {
            cache,
            preview: PreviewEncoder::default(),
            generate_lock: Mutex::new(()),
        }
    }

    pub fn with_preview(mut self, preview: PreviewEncoder) -> Self {
        self.preview = preview;
        self
    }

    pub fn cache(&self) -> &dyn PromptCache {
        self.cache.as_ref()
    }

    /// Generate (or recall) the prompt and preview for one evaluation.
    ///
    /// A cached result is reused only when every parameter and the image
    /// fingerprint compare exactly equal; the same `Arc` is handed back.
    pub fn generate(
        &self,
        node_id: Option<&str>,
        params: &LightingParameters,
        image: Option<&dyn ImageSource>,
    ) -> Arc<PromptResult> {
        let key = node_id.unwrap_or(DEFAULT_CACHE_KEY);
        let image_fingerprint = fingerprint(image);

        let _guard = self
            .generate_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(entry) = self.cache.get(key) {
            if entry.matches(params, image_fingerprint.as_deref()) {
                debug!(node_id = %key, "Lighting prompt cache hit");
                return entry.result;
            }
        }

        debug!(
            node_id = %key,
            azimuth = params.azimuth,
            elevation = params.elevation,
            intensity = params.intensity,
            has_image = image.is_some(),
            "Lighting prompt cache miss; regenerating"
        );
        let result = Arc::new(PromptResult {
            prompt: build_prompt(params),
            preview_base64: self.preview.encode(image),
        });
        self.cache.put(
            key,
            CacheEntry {
                params: params.clone(),
                image_fingerprint,
                result: Arc::clone(&result),
            },
        );
        result
    }
}
