use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{
    AudioFormat, AudioReference, TranscriptId, TranscriptSnapshot, TranscriptStatus,
};

/// Client for an AssemblyAI-compatible transcription API.
pub struct AssemblyAiEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language_code: String,
}

impl AssemblyAiEngine {
    pub fn new(
        base_url: &str,
        api_key: &str,
        language_code: &str,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language_code: language_code.to_string(),
        })
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TranscriptionError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(TranscriptionError::ApiRequestFailed(format!(
            "status {}: {}",
            status, body
        )))
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    language_code: &'a str,
}

#[derive(Deserialize)]
struct TranscriptCreated {
    id: String,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    status: TranscriptStatus,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl TranscriptionEngine for AssemblyAiEngine {
    async fn upload(&self, audio_path: &Path) -> Result<AudioReference, TranscriptionError> {
        let audio_data = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let mime = AudioFormat::from_filename(&file_name)
            .map(|format| format.mime_type())
            .unwrap_or("application/octet-stream");

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;
        let form = multipart::Form::new().part("file", file_part);

        tracing::debug!(base_url = %self.base_url, "Uploading audio to transcription provider");

        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("upload: {}", e)))?;

        let uploaded: UploadResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("upload: {}", e)))?;

        Ok(AudioReference::new(uploaded.upload_url))
    }

    async fn request_transcript(
        &self,
        audio: &AudioReference,
    ) -> Result<TranscriptId, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&TranscriptRequest {
                audio_url: audio.as_str(),
                language_code: &self.language_code,
            })
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("transcript: {}", e)))?;

        let created: TranscriptCreated = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("transcript: {}", e)))?;

        Ok(TranscriptId::new(created.id))
    }

    async fn fetch_transcript(
        &self,
        id: &TranscriptId,
    ) -> Result<TranscriptSnapshot, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("status: {}", e)))?;

        let transcript: TranscriptResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("status: {}", e)))?;

        Ok(TranscriptSnapshot {
            status: transcript.status,
            text: transcript.text,
            error: transcript.error,
        })
    }
}
