use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use candle_core::{DType, Device, Tensor as CandleTensor};

use super::hugging_face::Weights;

/// Key prefix of the base model inside a `BertForSequenceClassification` checkpoint
pub const BASE_MODEL_PREFIX: &str = "bert.";

/// Key prefix of the classification head
pub const CLASSIFIER_PREFIX: &str = "classifier.";

/// Checkpoint tensors split into the BERT backbone and the classification head
#[derive(Debug)]
pub struct Prepared {
    /// A safetensors file holding only backbone weights, keyed the way the base model expects
    pub backbone: PathBuf,

    /// Classifier weight: [n_classes, hidden_size]
    pub classifier_weight: CandleTensor,

    /// Classifier bias: [n_classes]
    pub classifier_bias: CandleTensor,
}

/// Map a checkpoint key onto the key the base BERT model loads, or `None` if the tensor does not
/// belong to the backbone
pub fn backbone_key(key: &str) -> Option<String> {
    if key.starts_with(CLASSIFIER_PREFIX) || key.ends_with("position_ids") {
        return None;
    }

    let key = key.strip_prefix(BASE_MODEL_PREFIX).unwrap_or(key);

    // Older checkpoints name LayerNorm parameters after the paper
    if let Some(stem) = key.strip_suffix(".gamma") {
        return Some(format!("{stem}.weight"));
    }
    if let Some(stem) = key.strip_suffix(".beta") {
        return Some(format!("{stem}.bias"));
    }

    Some(key.to_string())
}

/// Read every tensor in the checkpoint onto the CPU
pub fn read_tensors(weights: &Weights) -> anyhow::Result<HashMap<String, CandleTensor>> {
    match weights {
        Weights::SafeTensors(path) => candle_core::safetensors::load(path, &Device::Cpu)
            .map_err(|e| {
                anyhow!("Unable to read safetensors from {}: {}", path.display(), e)
            }),
        Weights::PyTorch(path) => Ok(candle_core::pickle::read_all(path)
            .map_err(|e| {
                anyhow!("Unable to read PyTorch weights from {}: {}", path.display(), e)
            })?
            .into_iter()
            .collect()),
    }
}

/// Split the checkpoint, writing the backbone to `target` unless a previous run already did
pub fn prepare(weights: &Weights, target: &Path) -> anyhow::Result<Prepared> {
    let mut tensors = read_tensors(weights)?;

    let classifier_weight = take(&mut tensors, "classifier.weight")?;
    let classifier_bias = take(&mut tensors, "classifier.bias")?;

    if target.exists() {
        log::info!("Reusing prepared weights at {}", target.display());
    } else {
        log::info!("Preparing backbone weights at {}", target.display());

        let mut backbone = HashMap::with_capacity(tensors.len());

        for (key, tensor) in tensors {
            if let Some(key) = backbone_key(&key) {
                let tensor = tensor
                    .to_dtype(DType::F32)
                    .map_err(|e| anyhow!("Unable to convert {} to f32: {}", key, e))?;

                backbone.insert(key, tensor);
            }
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        // A crash mid-write must not leave a truncated file that the next start would reuse
        let partial = target.with_extension("tmp");

        candle_core::safetensors::save(&backbone, &partial)
            .map_err(|e| anyhow!("Unable to write {}: {}", partial.display(), e))?;

        fs::rename(&partial, target)?;
    }

    Ok(Prepared {
        backbone: target.to_path_buf(),
        classifier_weight,
        classifier_bias,
    })
}

fn take(tensors: &mut HashMap<String, CandleTensor>, key: &str) -> anyhow::Result<CandleTensor> {
    tensors
        .remove(key)
        .ok_or_else(|| anyhow!("Checkpoint has no {} tensor", key))?
        .to_dtype(DType::F32)
        .map_err(|e| anyhow!("Unable to convert {} to f32: {}", key, e))
}
