use std::sync::{Arc, Mutex};

use callscreen::application::ports::{LlmClient, LlmClientError, LlmTokenStream};
use callscreen::application::services::{
    ClassificationError, ClassificationService, build_classification_prompt,
};

enum Reply {
    Tokens(Vec<Result<String, String>>),
    Unreachable,
}

struct MockLlmClient {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    fn tokens(tokens: &[&str]) -> Self {
        Self::new(Reply::Tokens(
            tokens.iter().map(|t| Ok(t.to_string())).collect(),
        ))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_stream(&self, prompt: &str) -> Result<LlmTokenStream, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Unreachable => Err(LlmClientError::ApiRequestFailed(
                "connection refused".to_string(),
            )),
            Reply::Tokens(tokens) => {
                let items: Vec<Result<String, LlmClientError>> = tokens
                    .iter()
                    .map(|t| t.clone().map_err(LlmClientError::ApiRequestFailed))
                    .collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
        }
    }
}

#[tokio::test]
async fn given_streamed_fragments_when_classifying_then_concatenates_and_trims() {
    let client = Arc::new(MockLlmClient::tokens(&[" Fraud", " detected", "\n"]));
    let service = ClassificationService::new(Arc::clone(&client));

    let result = service.classify("send me your bank details").await;

    assert_eq!(result.unwrap(), "Fraud detected");
}

#[tokio::test]
async fn given_no_text_when_classifying_then_returns_empty_result() {
    let client = Arc::new(MockLlmClient::tokens(&[]));
    let service = ClassificationService::new(client);

    let result = service.classify("hello").await;

    assert!(matches!(result, Err(ClassificationError::EmptyResult)));
}

#[tokio::test]
async fn given_only_whitespace_when_classifying_then_returns_empty_result() {
    let client = Arc::new(MockLlmClient::tokens(&["  ", "\n"]));
    let service = ClassificationService::new(client);

    let result = service.classify("hello").await;

    assert!(matches!(result, Err(ClassificationError::EmptyResult)));
}

#[tokio::test]
async fn given_unreachable_service_when_classifying_then_returns_communication_error() {
    let client = Arc::new(MockLlmClient::new(Reply::Unreachable));
    let service = ClassificationService::new(client);

    let result = service.classify("hello").await;

    assert!(matches!(result, Err(ClassificationError::Communication(_))));
}

#[tokio::test]
async fn given_stream_breaks_midway_when_classifying_then_returns_communication_error() {
    let client = Arc::new(MockLlmClient::new(Reply::Tokens(vec![
        Ok("Spa".to_string()),
        Err("connection reset".to_string()),
    ])));
    let service = ClassificationService::new(client);

    let result = service.classify("hello").await;

    assert!(matches!(result, Err(ClassificationError::Communication(_))));
}

#[tokio::test]
async fn given_transcript_when_classifying_then_prompt_embeds_it() {
    let client = Arc::new(MockLlmClient::tokens(&["Bot"]));
    let service = ClassificationService::new(Arc::clone(&client));

    service.classify("press one to continue").await.unwrap();

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"press one to continue\""));
}

#[test]
fn given_transcript_when_building_prompt_then_lists_all_categories() {
    let prompt = build_classification_prompt("hi");

    assert!(prompt.contains("Analyze the following text:"));
    assert!(prompt.contains("Classify it as Fraud, Spam, Bot, or None."));
}
