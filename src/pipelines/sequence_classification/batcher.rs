use burn::{
    nn::attention::generate_padding_mask,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;
use tokenizers::Tokenizer;

use crate::pipelines::sequence_classification;

/// An inference batch for sequence classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Tokenized text as 2D tensor: [batch_size, max_seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Padding mask for the tokenized text containing booleans for padding locations
    pub mask_pad: Tensor<B, 2, Bool>,
}

/// Struct for batching sequence classification inputs
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Tokenizer for converting text to token IDs
    pub tokenizer: Tokenizer,

    /// Maximum sequence length for tokenized text
    pub max_seq_length: usize,

    /// ID of the padding token
    pub pad_token_id: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(
        tokenizer: Tokenizer,
        config: &sequence_classification::Config,
        device: B::Device,
    ) -> Self {
        Self {
            tokenizer,
            pad_token_id: config.pad_token_id,
            max_seq_length: config.max_seq_length(),
            device,
        }
    }

    /// Collects a list of texts into an inference batch
    pub fn batch(&self, items: Vec<String>) -> tokenizers::Result<Infer<B>> {
        let mut token_ids_list = Vec::with_capacity(items.len());

        for input in items {
            let tokens = self.tokenizer.encode(input, true)?;

            let token_ids: Vec<_> = tokens.get_ids().iter().map(|t| *t as usize).collect();

            token_ids_list.push(token_ids);
        }

        let padding = generate_padding_mask(
            self.pad_token_id,
            token_ids_list,
            Some(self.max_seq_length),
            &self.device,
        );

        Ok(Infer {
            tokens: padding.tensor,
            mask_pad: padding.mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::tokenizer::tests::tiny_tokenizer;

    fn batcher() -> Batcher<NdArray> {
        let config = sequence_classification::Config {
            pad_token_id: 0,
            max_position_embeddings: 16,
            max_seq_len: None,
            id2label: BTreeMap::new(),
        };

        Batcher::new(tiny_tokenizer(16), &config, NdArrayDevice::Cpu)
    }

    #[test]
    fn test_batch_wraps_special_tokens() {
        let batch = batcher()
            .batch(vec!["Profits rose".to_string()])
            .expect("batch should encode");

        assert_eq!(batch.tokens.dims(), [1, 4]);

        let ids = batch.tokens.into_data().convert::<i64>().value;

        // [CLS] profits rose [SEP]
        assert_eq!(ids, vec![2, 4, 5, 3]);
    }

    #[test]
    fn test_batch_pads_shorter_inputs() {
        let batch = batcher()
            .batch(vec!["profits rose".to_string(), "losses".to_string()])
            .expect("batch should encode");

        assert_eq!(batch.tokens.dims(), [2, 4]);

        let mask = batch.mask_pad.into_data().value;

        assert_eq!(
            mask,
            vec![false, false, false, false, false, false, false, true]
        );
    }
}
