/// Bert for Sequence Classification
pub mod model;

/// The model configuration
pub mod config;

/// Pretrained classification heads
pub mod head;

pub use config::Config;
pub use model::{Model, ModelRecord};
