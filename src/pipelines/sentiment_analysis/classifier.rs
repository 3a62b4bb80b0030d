use std::sync::Mutex;

use burn::tensor::backend::Backend;

use crate::{
    models::bert::sequence_classification::Model,
    pipelines::sequence_classification::{self, Batcher},
};

use super::{Error, LabelScore};

/// A model that scores a text against every label it knows
pub trait Classifier: Send + Sync {
    /// Class name labels, in the order `classify` reports them
    fn labels(&self) -> &[String];

    /// Return a probability for every label
    fn classify(&self, text: &str) -> Result<Vec<LabelScore>, Error>;
}

/// A BERT sequence classifier running on a Burn backend
pub struct BertClassifier<B: Backend> {
    /// Burn modules are `Send` but not `Sync`, so inferences take turns
    model: Mutex<Model<B>>,

    batcher: Batcher<B>,

    labels: Vec<String>,
}

impl<B: Backend> BertClassifier<B> {
    /// Wrap a loaded model together with the batcher that feeds it
    pub fn new(
        model: Model<B>,
        batcher: Batcher<B>,
        config: &sequence_classification::Config,
    ) -> Self {
        Self {
            model: Mutex::new(model),
            batcher,
            labels: config.labels(),
        }
    }
}

impl<B: Backend> Classifier for BertClassifier<B> {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn classify(&self, text: &str) -> Result<Vec<LabelScore>, Error> {
        let item = self
            .batcher
            .batch(vec![text.to_string()])
            .map_err(|e| Error::Inference(format!("unable to encode text: {e}")))?;

        let probabilities = {
            let model = self
                .model
                .lock()
                .map_err(|_| Error::Unavailable("a previous inference panicked".to_string()))?;

            model.infer(item)
        };

        let values = probabilities.into_data().convert::<f32>().value;

        if values.len() != self.labels.len() {
            return Err(Error::Inference(format!(
                "model returned {} scores for {} labels",
                values.len(),
                self.labels.len()
            )));
        }

        Ok(self
            .labels
            .iter()
            .zip(values)
            .map(|(label, score)| LabelScore::new(label.clone(), score))
            .collect())
    }
}
