use std::{collections::BTreeMap, path::Path};

use bert_burn::model::BertModelConfig;
use burn::{config::Config as _, nn::LinearConfig, tensor::backend::Backend};
use serde::Deserialize;

use crate::pipelines::sequence_classification;

use super::model::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The base BERT config
    pub model: BertModelConfig,

    /// A map from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,
}

/// The subset of a Hugging Face `config.json` that describes the classification head
#[derive(Deserialize)]
struct HeadConfig {
    #[serde(default)]
    id2label: BTreeMap<usize, String>,
}

impl Config {
    /// Initializes a Bert model with default weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let model = self.model.init(device);

        let n_classes = self.id2label.len();

        let output = LinearConfig::new(self.model.hidden_size, n_classes).init(device);

        Model {
            model,
            output,
            n_classes,
        }
    }

    /// Load a fine-tuned classifier configuration from a Hugging Face `config.json`
    pub async fn load_pretrained(config_file: &Path) -> anyhow::Result<Self> {
        let mut bert_config = BertModelConfig::load(config_file)
            .map_err(|e| anyhow!("Unable to load Hugging Face Config file: {}", e))?;

        // Enable the pooling layer for sequence classification
        bert_config.with_pooling_layer = Some(true);

        // Inference only
        bert_config.hidden_dropout_prob = 0.0;

        let raw = tokio::fs::read_to_string(config_file).await?;

        Ok(Config::new(bert_config, parse_id2label(&raw)?))
    }

    /// Return the Config needed for the sequence classification pipeline
    pub fn get_config(&self) -> sequence_classification::Config {
        sequence_classification::Config {
            pad_token_id: self.model.pad_token_id,
            max_position_embeddings: self.model.max_position_embeddings,
            max_seq_len: self.model.max_seq_len,
            id2label: self.id2label.clone(),
        }
    }
}

/// Read the `id2label` map out of a Hugging Face model config
pub fn parse_id2label(raw: &str) -> anyhow::Result<BTreeMap<usize, String>> {
    let head: HeadConfig = serde_json::from_str(raw)?;

    if head.id2label.is_empty() {
        return Err(anyhow!(
            "Classes are not defined in the model configuration"
        ));
    }

    Ok(head.id2label)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_id2label_orders_by_class_id() {
        let raw = r#"{
            "architectures": ["BertForSequenceClassification"],
            "hidden_size": 768,
            "id2label": {"2": "neutral", "0": "positive", "1": "negative"}
        }"#;

        let id2label = parse_id2label(raw).expect("labels should parse");

        assert_eq!(
            id2label.values().cloned().collect::<Vec<_>>(),
            vec!["positive", "negative", "neutral"]
        );
    }

    #[test]
    fn test_parse_id2label_requires_labels() {
        let err = parse_id2label(r#"{"hidden_size": 768}"#).expect_err("no labels");

        assert_eq!(
            err.to_string(),
            "Classes are not defined in the model configuration"
        );
    }
}
