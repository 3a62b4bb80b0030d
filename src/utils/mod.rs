/// Hugging Face utilities
pub mod hugging_face;

/// Tokenizer construction
pub mod tokenizer;

/// Weight conversion utilities
pub mod weights;
