use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::pipelines::sentiment_analysis::{analyze, SentimentResult};

use super::{AppState, Error};

/// Body of `POST /analyze-sentiment`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Texts to analyze, in order. Missing or `null` counts as empty.
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

/// Body of a successful `POST /analyze-sentiment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// One result per input text, in input order
    pub results: Vec<SentimentResult>,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always "healthy" while the process answers
    pub status: String,

    /// The model being served
    pub model: String,
}

/// Score every text in the request
pub async fn analyze_sentiment(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, Error> {
    let texts = body.into_inner().texts.unwrap_or_default();

    if texts.is_empty() {
        return Err(Error::NoTexts);
    }

    let count = texts.len();
    let classifier = state.classifier.clone();
    let limits = state.limits;

    // Inference is CPU bound, so keep it off the async workers
    let results = web::block(move || analyze(classifier.as_ref(), &texts, limits))
        .await
        .map_err(|e| Error::Inference(e.to_string()))?
        .map_err(|e| {
            log::error!("Error in sentiment analysis: {}", e);

            Error::from(e)
        })?;

    log::debug!("Analyzed {} texts", count);

    Ok(HttpResponse::Ok().json(AnalyzeResponse { results }))
}

/// Liveness check. Never touches the model.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "healthy".to_string(),
        model: state.model_name.clone(),
    })
}
