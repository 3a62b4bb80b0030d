use std::path::PathBuf;

use bert_burn::{
    data::BertInferenceBatch,
    model::{BertModel, BertModelOutput},
};
use burn::{
    module::{ConstantRecord, Module},
    nn::{Linear, LinearRecord},
    tensor::{activation::softmax, backend::Backend, Tensor},
};
use derive_new::new;

use crate::pipelines::sequence_classification;

use super::Config;

/// BERT for sequence Classification
#[derive(Module, Debug, new)]
pub struct Model<B: Backend> {
    /// The base BERT model
    pub model: BertModel<B>,

    /// Linear layer for sequence classification
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Defines forward pass for inference, returning class probabilities: [batch_size, n_classes]
    pub fn infer(&self, input: sequence_classification::Infer<B>) -> Tensor<B, 2> {
        let [batch_size, _seq_length] = input.tokens.dims();

        let BertModelOutput {
            pooled_output,
            hidden_states,
        } = self.model.forward(BertInferenceBatch {
            tokens: input.tokens,
            mask_pad: input.mask_pad,
        });

        let output = self
            .output
            .forward(pooled_output.unwrap_or(hidden_states))
            .slice([0..batch_size, 0..1])
            .reshape([batch_size, self.n_classes]);

        softmax(output, 1)
    }

    /// Load the pretrained backbone from a safetensors file and attach a pretrained head
    pub fn load_pretrained(
        device: &B::Device,
        backbone_file: PathBuf,
        head: LinearRecord<B>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let n_classes = config.id2label.len();
        if n_classes == 0 {
            return Err(anyhow::anyhow!(
                "Classes are not defined in the model configuration"
            ));
        }

        let record = ModelRecord {
            model: BertModel::from_safetensors(backbone_file, device, config.model.clone()),
            output: head,
            n_classes: ConstantRecord::new(),
        };

        Ok(config.init(device).load_record(record))
    }
}
