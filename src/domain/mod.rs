mod audio_upload;
mod classification;
mod transcript;

pub use audio_upload::{AudioFormat, AudioUpload, UnsupportedAudioFormat};
pub use classification::{AnalysisReport, ClassificationLabel};
pub use transcript::{AudioReference, TranscriptId, TranscriptSnapshot, TranscriptStatus};
