use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::AudioUpload;

/// Writes an upload to local disk for the providers that need a file path.
#[async_trait]
pub trait AudioSpool: Send + Sync {
    async fn spool(&self, upload: &AudioUpload) -> Result<SpooledAudio, AudioSpoolError>;
}

type Release = Box<dyn FnOnce() -> io::Result<()> + Send + Sync>;

/// A spooled file that is removed when the value is dropped.
pub struct SpooledAudio {
    path: PathBuf,
    release: Option<Release>,
}

impl SpooledAudio {
    pub fn new(
        path: PathBuf,
        release: impl FnOnce() -> io::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            path,
            release: Some(Box::new(release)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for SpooledAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpooledAudio")
            .field("path", &self.path)
            .finish()
    }
}

impl Drop for SpooledAudio {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            match release() {
                Ok(()) => tracing::debug!(path = %self.path.display(), "Spooled audio removed"),
                Err(e) => tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Error cleaning up temporary file"
                ),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioSpoolError {
    #[error("creating spool file failed: {0}")]
    Create(io::Error),
    #[error("writing spool file failed: {0}")]
    Write(io::Error),
}
