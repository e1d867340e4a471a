use std::sync::Arc;

use crate::application::ports::{
    AudioSpool, AudioSpoolError, LlmClient, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AnalysisReport, AudioUpload};

use super::classification_service::{ClassificationError, ClassificationService};
use super::transcription_service::TranscriptionService;

/// Runs an upload through spooling, transcription and classification, in that order.
pub struct AnalysisService<E, L>
where
    E: TranscriptionEngine + ?Sized,
    L: LlmClient + ?Sized,
{
    audio_spool: Arc<dyn AudioSpool>,
    transcription: TranscriptionService<E>,
    classification: ClassificationService<L>,
}

impl<E, L> AnalysisService<E, L>
where
    E: TranscriptionEngine + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(
        audio_spool: Arc<dyn AudioSpool>,
        transcription: TranscriptionService<E>,
        classification: ClassificationService<L>,
    ) -> Self {
        Self {
            audio_spool,
            transcription,
            classification,
        }
    }

    pub async fn analyze(&self, upload: &AudioUpload) -> Result<AnalysisReport, AnalysisError> {
        // Dropping `spooled` removes the file on every return path below.
        let spooled = self.audio_spool.spool(upload).await?;
        tracing::debug!(
            filename = %upload.filename,
            format = %upload.format,
            bytes = upload.size_bytes(),
            path = %spooled.path().display(),
            "Upload spooled"
        );

        let transcription = self.transcription.transcribe(spooled.path()).await?;
        let analysis = self.classification.classify(&transcription).await?;

        Ok(AnalysisReport {
            transcription,
            analysis,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Spool(#[from] AudioSpoolError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}
