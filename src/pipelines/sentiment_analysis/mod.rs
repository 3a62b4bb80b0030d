/// Sentiment Analysis errors
pub mod error;

/// Score shaping for a single text
pub mod scores;

/// The classifier seam and its BERT implementation
pub mod classifier;

/// The per-request analysis loop
pub mod pipeline;

/// Loading a pretrained classifier from the Hugging Face Hub
pub mod pretrained;

pub use classifier::{BertClassifier, Classifier};
pub use error::Error;
pub use pipeline::analyze;
pub use scores::{
    LabelScore, Limits, Scores, SentimentResult, NEGATIVE, NEUTRAL, POSITIVE,
};

/// The unique string token that identifies this pipeline
pub static PIPELINE: &str = "sentiment-analysis";

/// The default model to use
pub static DEFAULT_MODEL: &str = "ProsusAI/finbert";
