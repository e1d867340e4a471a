use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream};
use crate::infrastructure::observability::sanitize_prompt;

use super::ndjson::{GenerateFragment, NdjsonLineBuffer, parse_generate_line};

/// Streaming client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    max_tokens: usize,
    skipped_fragments: Arc<AtomicU64>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: usize,
    stream: bool,
}

impl OllamaClient {
    pub fn new(
        base_url: &str,
        model: &str,
        max_tokens: usize,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_tokens,
            skipped_fragments: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Number of unparseable stream lines dropped since the client was created.
    pub fn skipped_fragments(&self) -> u64 {
        self.skipped_fragments.load(Ordering::Relaxed)
    }
}

fn accept_line(line: &str, skipped: &AtomicU64) -> Option<String> {
    match parse_generate_line(line) {
        GenerateFragment::Text(text) => Some(text),
        GenerateFragment::Empty => None,
        GenerateFragment::ServiceError(error) => {
            tracing::warn!(error = %error, "Generation service reported an error in stream");
            None
        }
        GenerateFragment::Malformed(reason) => {
            let total = skipped.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::warn!(
                line = %sanitize_prompt(line),
                reason = %reason,
                skipped_total = total,
                "Skipping malformed stream fragment"
            );
            None
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete_stream(&self, prompt: &str) -> Result<LlmTokenStream, LlmClientError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
            stream: true,
        };

        tracing::debug!(
            model = %self.model,
            prompt = %sanitize_prompt(prompt),
            "Requesting streamed classification"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let skipped = Arc::clone(&self.skipped_fragments);
        let chunks = response.bytes_stream().boxed();

        let lines = futures::stream::unfold(
            Some((chunks, NdjsonLineBuffer::new())),
            |state| async move {
                let Some((mut chunks, mut buffer)) = state else {
                    return None;
                };
                match chunks.next().await {
                    Some(Ok(bytes)) => Some((Ok(buffer.push(&bytes)), Some((chunks, buffer)))),
                    Some(Err(e)) => {
                        let error = LlmClientError::ApiRequestFailed(e.to_string());
                        Some((Err(error), None))
                    }
                    None => Some((Ok(buffer.finish().into_iter().collect()), None)),
                }
            },
        );

        let token_stream: LlmTokenStream = Box::pin(lines.flat_map(move |batch| {
            let items: Vec<Result<String, LlmClientError>> = match batch {
                Ok(lines) => lines
                    .iter()
                    .filter_map(|line| accept_line(line, &skipped))
                    .map(Ok)
                    .collect(),
                Err(e) => vec![Err(e)],
            };
            futures::stream::iter(items)
        }));

        Ok(token_stream)
    }
}
