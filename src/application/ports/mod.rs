mod audio_spool;
mod llm_client;
mod transcription_engine;

pub use audio_spool::{AudioSpool, AudioSpoolError, SpooledAudio};
pub use llm_client::{LlmClient, LlmClientError, LlmTokenStream};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
