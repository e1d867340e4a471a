use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{TranscriptId, TranscriptStatus};

/// Fixed-interval polling budget for a transcription job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(10),
        }
    }
}

pub struct TranscriptionService<E>
where
    E: TranscriptionEngine + ?Sized,
{
    engine: Arc<E>,
    poll_policy: PollPolicy,
}

impl<E> TranscriptionService<E>
where
    E: TranscriptionEngine + ?Sized,
{
    pub fn new(engine: Arc<E>, poll_policy: PollPolicy) -> Self {
        Self {
            engine,
            poll_policy,
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    /// Uploads the audio, opens a transcription job and waits for its text.
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let reference = self.engine.upload(audio_path).await?;
        tracing::debug!(audio_url = %reference, "Audio uploaded to transcription provider");

        let transcript_id = self.engine.request_transcript(&reference).await?;
        tracing::info!(transcript_id = %transcript_id, "Transcription job created");

        self.await_transcript(&transcript_id).await
    }

    /// Polls the job until it completes, fails, or the attempt budget runs out.
    /// Exactly `max_attempts` status requests are made before timing out, and no
    /// sleep follows the last one.
    pub async fn await_transcript(
        &self,
        transcript_id: &TranscriptId,
    ) -> Result<String, TranscriptionError> {
        let PollPolicy {
            max_attempts,
            interval,
        } = self.poll_policy;

        for attempt in 1..=max_attempts {
            let snapshot = self.engine.fetch_transcript(transcript_id).await?;

            match snapshot.status {
                TranscriptStatus::Completed => {
                    let text = snapshot.text.ok_or_else(|| {
                        TranscriptionError::InvalidResponse(
                            "completed transcript has no text".to_string(),
                        )
                    })?;
                    tracing::info!(
                        transcript_id = %transcript_id,
                        attempt,
                        chars = text.len(),
                        "Transcription completed"
                    );
                    return Ok(text);
                }
                TranscriptStatus::Error => {
                    let reason = snapshot
                        .error
                        .unwrap_or_else(|| "provider reported an error".to_string());
                    tracing::warn!(
                        transcript_id = %transcript_id,
                        attempt,
                        reason = %reason,
                        "Transcription failed"
                    );
                    return Err(TranscriptionError::Failed(reason));
                }
                status => {
                    tracing::debug!(
                        transcript_id = %transcript_id,
                        attempt,
                        max_attempts,
                        status = %status,
                        "Transcription not ready"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        }

        Err(TranscriptionError::TimedOut {
            attempts: max_attempts,
        })
    }
}
