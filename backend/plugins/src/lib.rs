pub mod manifest;
pub mod registry;

pub use manifest::NodeManifest;
pub use registry::NodeRegistry;
