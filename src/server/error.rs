use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::pipelines::sentiment_analysis;

/// The JSON body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human readable description of the failure
    pub error: String,
}

/// Request Error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request had no texts to analyze
    #[error("No texts provided")]
    NoTexts,

    /// The body could not be read as an analysis request
    #[error("{0}")]
    InvalidBody(String),

    /// The shared model cannot serve requests
    #[error("{0}")]
    ModelUnavailable(String),

    /// Inference failed for one of the texts
    #[error("{0}")]
    Inference(String),
}

impl From<sentiment_analysis::Error> for Error {
    fn from(err: sentiment_analysis::Error) -> Self {
        match err {
            sentiment_analysis::Error::Unavailable(_) => Error::ModelUnavailable(err.to_string()),
            sentiment_analysis::Error::Inference(_) => Error::Inference(err.to_string()),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NoTexts | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
