use std::path::PathBuf;

use hf_hub::{
    api::tokio::{Api, ApiBuilder, ApiError, ApiRepo},
    Repo, RepoType,
};

/// Weights serialized with safetensors
pub const SAFETENSORS_FILE: &str = "model.safetensors";

/// Weights serialized with PyTorch's pickle format
pub const PYTORCH_FILE: &str = "pytorch_model.bin";

/// How the resolved weights were serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Weights {
    /// A `model.safetensors` file
    SafeTensors(PathBuf),

    /// A `pytorch_model.bin` file
    PyTorch(PathBuf),
}

/// The tokenizer files available in the model repo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerFile {
    /// A serialized `tokenizer.json`
    Json(PathBuf),

    /// A WordPiece `vocab.txt`
    Vocab(PathBuf),
}

/// Local paths of everything needed to build a pretrained classifier
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// The Hugging Face `config.json`
    pub config: PathBuf,

    /// The model weights
    pub weights: Weights,

    /// The tokenizer definition
    pub tokenizer: TokenizerFile,
}

/// Download model config, weights, and tokenizer from Hugging Face Hub
/// If files exist in cache, they will not be downloaded again
pub async fn download_hf_model(
    model_name: &str,
    revision: &str,
    cache_dir: Option<PathBuf>,
) -> anyhow::Result<ModelFiles> {
    let api = match cache_dir {
        Some(dir) => ApiBuilder::new().with_cache_dir(dir).build(),
        None => Api::new(),
    }
    .map_err(|e| anyhow!("Unable to initialize the Hugging Face Hub client: {}", e))?;

    let repo = api.repo(Repo::with_revision(
        model_name.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let config = repo.get("config.json").await.map_err(|e| {
        anyhow!(
            "Failed to download: {} config with name: config.json from HuggingFace Hub: {}",
            model_name,
            e
        )
    })?;

    let weights = match repo.get(SAFETENSORS_FILE).await {
        Ok(path) => Weights::SafeTensors(path),
        Err(err) => {
            log::debug!("No {} for {}: {}", SAFETENSORS_FILE, model_name, err);

            let path = get_required(&repo, model_name, PYTORCH_FILE).await?;

            Weights::PyTorch(path)
        }
    };

    let tokenizer = match repo.get("tokenizer.json").await {
        Ok(path) => TokenizerFile::Json(path),
        Err(err) => {
            log::debug!("No tokenizer.json for {}: {}", model_name, err);

            TokenizerFile::Vocab(get_required(&repo, model_name, "vocab.txt").await?)
        }
    };

    Ok(ModelFiles {
        config,
        weights,
        tokenizer,
    })
}

async fn get_required(repo: &ApiRepo, model_name: &str, file: &str) -> anyhow::Result<PathBuf> {
    repo.get(file).await.map_err(|e: ApiError| {
        anyhow!(
            "Failed to download: {} file with name: {} from HuggingFace Hub: {}",
            model_name,
            file,
            e
        )
    })
}
