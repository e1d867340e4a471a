use std::fmt;

use bytes::Bytes;

/// Audio container formats accepted at ingress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Resolves the format from the filename suffix. Matching is case-sensitive.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".mp3") {
            Some(Self::Mp3)
        } else if filename.ends_with(".wav") {
            Some(Self::Wav)
        } else {
            None
        }
    }

    pub fn detect(filename: &str) -> Result<Self, UnsupportedAudioFormat> {
        Self::from_filename(filename).ok_or_else(|| UnsupportedAudioFormat {
            filename: filename.to_string(),
        })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid file format. Please upload an MP3 or WAV file.")]
pub struct UnsupportedAudioFormat {
    pub filename: String,
}

/// An uploaded audio file held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub format: AudioFormat,
    pub data: Bytes,
}

impl AudioUpload {
    pub fn new(filename: impl Into<String>, data: Bytes) -> Result<Self, UnsupportedAudioFormat> {
        let filename = filename.into();
        let format = AudioFormat::detect(&filename)?;
        Ok(Self {
            filename,
            format,
            data,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
