use std::sync::Arc;

use futures::StreamExt;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ClassificationLabel;

pub struct ClassificationService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
}

impl<L> ClassificationService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Streams a classification of the transcript and returns the trimmed answer.
    pub async fn classify(&self, transcript: &str) -> Result<String, ClassificationError> {
        let prompt = build_classification_prompt(transcript);
        let mut stream = self.llm_client.complete_stream(&prompt).await?;

        let mut answer = String::new();
        let mut fragments = 0usize;
        while let Some(fragment) = stream.next().await {
            answer.push_str(&fragment?);
            fragments += 1;
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ClassificationError::EmptyResult);
        }

        tracing::info!(
            fragments,
            chars = answer.len(),
            label = %ClassificationLabel::from_answer(answer),
            "Classification completed"
        );

        Ok(answer.to_string())
    }
}

pub fn build_classification_prompt(transcript: &str) -> String {
    let categories = ClassificationLabel::CATEGORIES
        .iter()
        .map(ClassificationLabel::as_str)
        .collect::<Vec<_>>();
    let (last, rest) = categories
        .split_last()
        .map(|(last, rest)| (*last, rest.join(", ")))
        .unwrap_or_default();

    format!(
        "Analyze the following text:\n\"{}\"\nClassify it as {}, or {}.\n",
        transcript, rest, last
    )
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Error communicating with classification service: {0}")]
    Communication(#[from] LlmClientError),
    #[error("Classification service returned an empty response.")]
    EmptyResult,
}
