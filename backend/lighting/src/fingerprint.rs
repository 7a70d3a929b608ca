//! Image fingerprints used to tell whether the `image` input changed
//! between evaluations.
//!
//! Best-effort change detection, not a cryptographic guarantee: when the
//! pixel bytes cannot be read, the image's textual representation is hashed
//! instead, and two different images with the same representation collide.

use relight_core::{ImageSource, RelightError};
use tracing::trace;

/// Prefix marking a fingerprint derived from the textual fallback.
pub const REPR_PREFIX: &str = "repr:";

/// MD5 of the first frame's raw sample bytes, lowercase hex.
pub fn content_digest(image: &dyn ImageSource) -> Result<String, RelightError> {
    let bytes = image.to_bytes()?;
    Ok(format!("{:x}", md5::compute(bytes)))
}

/// MD5 of the image's `Debug` representation.
pub fn repr_digest(image: &dyn ImageSource) -> String {
    let repr = format!("{image:?}");
    format!("{REPR_PREFIX}{:x}", md5::compute(repr.as_bytes()))
}

/// Fingerprint an optional image. Never fails; `None` only when there is no image.
pub fn fingerprint(image: Option<&dyn ImageSource>) -> Option<String> {
    let image = image?;
    match content_digest(image) {
        Ok(digest) => Some(digest),
        Err(e) => {
            trace!(error = %e, "Image bytes unavailable; fingerprinting textual representation");
            Some(repr_digest(image))
        }
    }
}
