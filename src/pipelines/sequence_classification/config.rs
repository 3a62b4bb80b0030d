use std::collections::BTreeMap;

/// The common model configuration properties needed for the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// The padding token ID
    pub pad_token_id: usize,

    /// The max position embeddings
    pub max_position_embeddings: usize,

    /// An optional max sequence length, if different from max position embeddings
    pub max_seq_len: Option<usize>,

    /// A mapping from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,
}

impl Config {
    /// The longest token sequence the model accepts
    pub fn max_seq_length(&self) -> usize {
        self.max_seq_len.unwrap_or(self.max_position_embeddings)
    }

    /// Class name labels in class id order
    pub fn labels(&self) -> Vec<String> {
        self.id2label.values().cloned().collect()
    }
}
