use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{AudioSpool, AudioSpoolError, SpooledAudio};
use crate::domain::AudioUpload;

/// Spools uploads into uniquely named files under a local directory.
pub struct TempAudioSpool {
    dir: PathBuf,
}

impl TempAudioSpool {
    pub fn new(dir: PathBuf) -> Result<Self, AudioSpoolError> {
        std::fs::create_dir_all(&dir).map_err(AudioSpoolError::Create)?;
        Ok(Self { dir })
    }

    pub fn in_system_temp() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl AudioSpool for TempAudioSpool {
    async fn spool(&self, upload: &AudioUpload) -> Result<SpooledAudio, AudioSpoolError> {
        let suffix = format!(".{}", upload.format.extension());
        let temp_path = tempfile::Builder::new()
            .prefix("upload_")
            .suffix(&suffix)
            .tempfile_in(&self.dir)
            .map_err(AudioSpoolError::Create)?
            .into_temp_path();

        let path = temp_path.to_path_buf();
        // The guard owns the file before the write starts.
        let spooled = SpooledAudio::new(path.clone(), move || temp_path.close());

        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(AudioSpoolError::Write)?;

        Ok(spooled)
    }
}
