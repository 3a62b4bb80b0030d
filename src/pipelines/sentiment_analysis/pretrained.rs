use std::path::PathBuf;

use burn::tensor::backend::Backend;

use crate::{
    models::bert::sequence_classification::{head, Config, Model},
    pipelines::sequence_classification::Batcher,
    utils::{
        hugging_face::{download_hf_model, TokenizerFile},
        tokenizer, weights,
    },
};

use super::{BertClassifier, Classifier};

/// Where to find a fine-tuned BERT classifier and where to keep converted weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Hugging Face model id (e.g., "ProsusAI/finbert")
    pub model_name: String,

    /// Branch, tag, or commit of the model repo
    pub revision: String,

    /// Override for the Hugging Face cache directory
    pub cache_dir: Option<PathBuf>,

    /// Directory for weights converted for Burn
    pub artifact_dir: PathBuf,

    /// Lowercase input when the tokenizer is built from a bare vocabulary
    pub lowercase: bool,
}

impl Source {
    /// The converted backbone for this model and revision
    pub fn backbone_path(&self) -> PathBuf {
        self.artifact_dir
            .join(self.model_name.replace('/', "--"))
            .join(self.revision.replace('/', "--"))
            .join("backbone.safetensors")
    }
}

/// Fetch, convert, and assemble a pretrained classifier. Every failure here is fatal to startup.
pub async fn load<B: Backend>(
    source: &Source,
    device: B::Device,
) -> anyhow::Result<BertClassifier<B>> {
    log::info!(
        "Resolving {} at revision {}...",
        source.model_name,
        source.revision
    );

    let files = download_hf_model(
        &source.model_name,
        &source.revision,
        source.cache_dir.clone(),
    )
    .await?;

    let config = Config::load_pretrained(&files.config).await?;
    let pipeline_config = config.get_config();

    log::info!("Loading weights...");

    let checkpoint = files.weights.clone();
    let target = source.backbone_path();
    let prepared =
        tokio::task::spawn_blocking(move || weights::prepare(&checkpoint, &target)).await??;

    let head = head::linear_from_candle::<B>(
        &prepared.classifier_weight,
        &prepared.classifier_bias,
        config.id2label.len(),
        &device,
    )?;

    log::info!("Creating model...");

    let model = Model::load_pretrained(&device, prepared.backbone, head, &config)?;

    let max_len = pipeline_config.max_seq_length();
    let tokenizer = match &files.tokenizer {
        TokenizerFile::Json(path) => tokenizer::from_file(path, max_len)?,
        TokenizerFile::Vocab(path) => tokenizer::from_vocab(path, source.lowercase, max_len)?,
    };

    let batcher = Batcher::new(tokenizer, &pipeline_config, device);

    let classifier = BertClassifier::new(model, batcher, &pipeline_config);

    log::info!(
        "Loaded {} with labels: {}",
        source.model_name,
        classifier.labels().join(", ")
    );

    Ok(classifier)
}
