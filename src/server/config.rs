use std::path::PathBuf;

use crate::pipelines::sentiment_analysis::{pretrained::Source, Limits};

/// Define configuration struct for the server
#[derive(burn::config::Config)]
pub struct ServerConfig {
    /// Interface to bind
    #[config(default = "\"0.0.0.0\".to_string()")]
    pub host: String,

    /// Port to bind
    #[config(default = 5001)]
    pub port: u16,

    /// Hugging Face model id
    #[config(default = "crate::pipelines::sentiment_analysis::DEFAULT_MODEL.to_string()")]
    pub model_name: String,

    /// Model repo revision
    #[config(default = "\"main\".to_string()")]
    pub revision: String,

    /// Name reported by the health check
    #[config(default = "\"FinBERT\".to_string()")]
    pub display_name: String,

    /// Characters of each text passed to the model
    #[config(default = 512)]
    pub max_input_chars: usize,

    /// Characters of each text echoed back in results
    #[config(default = 100)]
    pub preview_chars: usize,

    /// Largest accepted JSON body, in bytes
    #[config(default = 4_194_304)]
    pub max_body_bytes: usize,

    /// Lowercase input when the tokenizer is built from a bare vocabulary
    #[config(default = true)]
    pub lowercase: bool,

    /// Directory for weights converted for Burn
    #[config(default = "\"artifacts\".to_string()")]
    pub artifact_dir: String,

    /// Number of HTTP workers, defaulting to one per physical core
    pub workers: Option<usize>,

    /// Override for the Hugging Face cache directory
    pub cache_dir: Option<String>,
}

impl ServerConfig {
    /// The `host:port` pair to listen on
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Character limits applied to each text
    pub fn limits(&self) -> Limits {
        Limits {
            max_input_chars: self.max_input_chars,
            preview_chars: self.preview_chars,
        }
    }

    /// Where the pretrained classifier comes from
    pub fn source(&self) -> Source {
        Source {
            model_name: self.model_name.clone(),
            revision: self.revision.clone(),
            cache_dir: self.cache_dir.as_ref().map(PathBuf::from),
            artifact_dir: PathBuf::from(&self.artifact_dir),
            lowercase: self.lowercase,
        }
    }
}
