/// Sentiment Analysis Error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The shared model can no longer be used
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Tokenization, the forward pass, or shaping its output failed
    #[error("{0}")]
    Inference(String),
}
