use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use callscreen::application::ports::{TranscriptionEngine, TranscriptionError};
use callscreen::application::services::{PollPolicy, TranscriptionService};
use callscreen::domain::{AudioReference, TranscriptId, TranscriptSnapshot, TranscriptStatus};

struct ScriptedEngine {
    snapshots: Vec<TranscriptSnapshot>,
    fetches: AtomicUsize,
    fail_upload: bool,
}

impl ScriptedEngine {
    fn new(snapshots: Vec<TranscriptSnapshot>) -> Self {
        Self {
            snapshots,
            fetches: AtomicUsize::new(0),
            fail_upload: false,
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for ScriptedEngine {
    async fn upload(&self, _audio_path: &Path) -> Result<AudioReference, TranscriptionError> {
        if self.fail_upload {
            return Err(TranscriptionError::ApiRequestFailed("status 503".to_string()));
        }
        Ok(AudioReference::new("https://cdn.example.test/a"))
    }

    async fn request_transcript(
        &self,
        audio: &AudioReference,
    ) -> Result<TranscriptId, TranscriptionError> {
        assert_eq!(audio.as_str(), "https://cdn.example.test/a");
        Ok(TranscriptId::new("job-7"))
    }

    async fn fetch_transcript(
        &self,
        id: &TranscriptId,
    ) -> Result<TranscriptSnapshot, TranscriptionError> {
        assert_eq!(id.as_str(), "job-7");
        let call = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshots[call.min(self.snapshots.len() - 1)].clone())
    }
}

fn snapshot(status: TranscriptStatus, text: Option<&str>) -> TranscriptSnapshot {
    TranscriptSnapshot {
        status,
        text: text.map(str::to_string),
        error: None,
    }
}

fn instant_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        max_attempts,
        interval: Duration::ZERO,
    }
}

#[tokio::test]
async fn given_processing_forever_when_polling_then_times_out_after_ten_requests() {
    let engine = Arc::new(ScriptedEngine::new(vec![snapshot(
        TranscriptStatus::Processing,
        None,
    )]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::TimedOut { attempts: 10 })
    ));
    assert_eq!(engine.fetches(), 10);
}

#[tokio::test]
async fn given_completion_on_third_poll_when_polling_then_returns_text_after_three_requests() {
    let engine = Arc::new(ScriptedEngine::new(vec![
        snapshot(TranscriptStatus::Processing, None),
        snapshot(TranscriptStatus::Processing, None),
        snapshot(TranscriptStatus::Completed, Some("hello there")),
    ]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    assert_eq!(result.unwrap(), "hello there");
    assert_eq!(engine.fetches(), 3);
}

#[tokio::test]
async fn given_error_status_when_polling_then_fails_without_further_requests() {
    let engine = Arc::new(ScriptedEngine::new(vec![
        TranscriptSnapshot {
            status: TranscriptStatus::Error,
            text: None,
            error: Some("audio too short".to_string()),
        },
        snapshot(TranscriptStatus::Completed, Some("never reached")),
    ]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    match result {
        Err(TranscriptionError::Failed(reason)) => assert_eq!(reason, "audio too short"),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(engine.fetches(), 1);
}

#[tokio::test]
async fn given_queued_and_unknown_statuses_when_polling_then_they_are_treated_as_pending() {
    let engine = Arc::new(ScriptedEngine::new(vec![
        snapshot(TranscriptStatus::Queued, None),
        snapshot(TranscriptStatus::Unknown, None),
        snapshot(TranscriptStatus::Completed, Some("done")),
    ]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(engine.fetches(), 3);
}

#[tokio::test]
async fn given_completed_without_text_when_polling_then_returns_invalid_response() {
    let engine = Arc::new(ScriptedEngine::new(vec![snapshot(
        TranscriptStatus::Completed,
        None,
    )]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    assert!(matches!(result, Err(TranscriptionError::InvalidResponse(_))));
}

#[tokio::test(start_paused = true)]
async fn given_pending_job_when_polling_then_sleeps_fixed_interval_between_requests() {
    let engine = Arc::new(ScriptedEngine::new(vec![snapshot(
        TranscriptStatus::Processing,
        None,
    )]));
    let policy = PollPolicy {
        max_attempts: 3,
        interval: Duration::from_secs(10),
    };
    let service = TranscriptionService::new(Arc::clone(&engine), policy);
    let started = tokio::time::Instant::now();

    let result = service.await_transcript(&TranscriptId::new("job-7")).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::TimedOut { attempts: 3 })
    ));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(20));
    assert!(elapsed < Duration::from_secs(30));
}

#[tokio::test]
async fn given_upload_failure_when_transcribing_then_error_propagates_without_polling() {
    let mut engine = ScriptedEngine::new(vec![snapshot(TranscriptStatus::Completed, Some("x"))]);
    engine.fail_upload = true;
    let engine = Arc::new(engine);
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.transcribe(Path::new("/nonexistent.wav")).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
    assert_eq!(engine.fetches(), 0);
}

#[tokio::test]
async fn given_all_steps_succeed_when_transcribing_then_returns_text() {
    let engine = Arc::new(ScriptedEngine::new(vec![snapshot(
        TranscriptStatus::Completed,
        Some("full run"),
    )]));
    let service = TranscriptionService::new(Arc::clone(&engine), instant_policy(10));

    let result = service.transcribe(Path::new("/unused.wav")).await;

    assert_eq!(result.unwrap(), "full run");
}

#[test]
fn given_default_policy_when_created_then_ten_attempts_ten_seconds_apart() {
    let policy = PollPolicy::default();

    assert_eq!(policy.max_attempts, 10);
    assert_eq!(policy.interval, Duration::from_secs(10));
}
