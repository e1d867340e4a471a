use std::sync::Arc;

use crate::application::ports::{LlmClient, TranscriptionEngine};
use crate::application::services::AnalysisService;
use crate::presentation::config::Settings;

pub struct AppState<E, L>
where
    E: TranscriptionEngine + ?Sized,
    L: LlmClient + ?Sized,
{
    pub analysis_service: Arc<AnalysisService<E, L>>,
    pub settings: Settings,
}

impl<E, L> Clone for AppState<E, L>
where
    E: TranscriptionEngine + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            settings: self.settings.clone(),
        }
    }
}
