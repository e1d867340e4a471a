mod ndjson;
mod ollama_client;

pub use ndjson::{GenerateFragment, NdjsonLineBuffer, parse_generate_line};
pub use ollama_client::OllamaClient;
