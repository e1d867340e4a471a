use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnalysisError;
use crate::domain::UnsupportedAudioFormat;

pub const ANALYSIS_FAILURE_MESSAGE: &str =
    "An error occurred during analysis. Check the backend logs for more details.";
pub const UPLOAD_REJECTED_MESSAGE: &str = "The upload was rejected.";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Every way the analyze endpoint can fail, mapped once to a status and JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("Failed to read upload: {0}")]
    UnreadableUpload(#[from] MultipartError),
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedAudioFormat),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::UnreadableUpload(e) => e.status(),
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Analysis(_) => ANALYSIS_FAILURE_MESSAGE,
            _ => UPLOAD_REJECTED_MESSAGE,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            message: message.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
