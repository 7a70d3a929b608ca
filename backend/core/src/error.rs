use thiserror::Error;

/// Top-level error type for the relighting node workspace.
#[derive(Debug, Error)]
pub enum RelightError {
    #[error("invalid tensor shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    #[error("image batch is empty")]
    EmptyBatch,

    #[error("preview encoding failed: {0}")]
    Encode(String),

    #[error("invalid node input '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("unknown node class: {0}")]
    UnknownNode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = RelightError> = std::result::Result<T, E>;
