mod analysis_service;
mod classification_service;
mod transcription_service;

pub use analysis_service::{AnalysisError, AnalysisService};
pub use classification_service::{
    ClassificationError, ClassificationService, build_classification_prompt,
};
pub use transcription_service::{PollPolicy, TranscriptionService};
