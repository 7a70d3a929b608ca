//! Structured logging setup for the relighting node binaries.

pub mod logger;

pub use logger::{LOG_FILE_PREFIX, build_filter, init_logger};
