use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::domain::{AudioFormat, AudioUpload};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<E, L>(
    State(state): State<AppState<E, L>>,
    multipart: Multipart,
) -> Response
where
    E: TranscriptionEngine + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    match analyze(&state, multipart).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                ApiError::Analysis(_) => tracing::error!(error = %e, "Error during analysis"),
                _ => tracing::warn!(error = %e, "Upload rejected"),
            }
            e.into_response()
        }
    }
}

async fn analyze<E, L>(state: &AppState<E, L>, multipart: Multipart) -> Result<Response, ApiError>
where
    E: TranscriptionEngine + ?Sized,
    L: LlmClient + ?Sized,
{
    let upload = read_upload(multipart).await?;

    tracing::info!(
        filename = %upload.filename,
        format = %upload.format,
        bytes = upload.size_bytes(),
        "Analyzing uploaded audio"
    );

    let report = state.analysis_service.analyze(&upload).await?;

    tracing::info!(
        transcription = %sanitize_prompt(&report.transcription),
        analysis = %sanitize_prompt(&report.analysis),
        "Analysis completed"
    );

    Ok(Json(report).into_response())
}

/// Takes the first multipart field that carries a filename. The extension is
/// checked before the body is read.
async fn read_upload(mut multipart: Multipart) -> Result<AudioUpload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        tracing::debug!(
            field = field.name().unwrap_or_default(),
            filename = %filename,
            content_type = field.content_type().unwrap_or("application/octet-stream"),
            "Processing file upload"
        );

        AudioFormat::detect(&filename)?;
        let data = field.bytes().await?;

        return Ok(AudioUpload::new(filename, data)?);
    }

    Err(ApiError::MissingFile)
}
