use std::path::Path;

use async_trait::async_trait;

use crate::domain::{AudioReference, TranscriptId, TranscriptSnapshot};

/// Remote speech-to-text provider that works in three steps: upload the audio,
/// open a transcription job for it, then observe the job until it settles.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn upload(&self, audio_path: &Path) -> Result<AudioReference, TranscriptionError>;

    async fn request_transcript(
        &self,
        audio: &AudioReference,
    ) -> Result<TranscriptId, TranscriptionError>;

    async fn fetch_transcript(
        &self,
        id: &TranscriptId,
    ) -> Result<TranscriptSnapshot, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("reading audio failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transcription failed: {0}")]
    Failed(String),
    #[error("Transcription timed out after {attempts} status checks")]
    TimedOut { attempts: u32 },
}
