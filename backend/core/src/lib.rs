pub mod error;
pub mod image;
pub mod traits;
pub mod types;

pub use error::RelightError;
pub use image::{Frame, ImageSource, ImageTensor};
pub use traits::{Node, NodeInputs};
pub use types::{LightingParameters, NodeOutput, PromptResult, UiPayload};
