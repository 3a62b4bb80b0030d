/// Common batcher operations for Sequence Classification
pub mod batcher;

/// Common config for Sequence Classification
pub mod config;

pub use batcher::{Batcher, Infer};
pub use config::Config;
