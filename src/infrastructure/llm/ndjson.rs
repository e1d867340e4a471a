use serde::Deserialize;

/// Reassembles newline-delimited records from arbitrarily split network chunks.
/// Buffering is done on bytes so multi-byte characters may straddle chunks.
#[derive(Debug, Default)]
pub struct NdjsonLineBuffer {
    pending: Vec<u8>,
}

impl NdjsonLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            lines.push(decode_line(&line[..newline]));
        }
        lines
    }

    /// Returns the trailing line when the stream ended without a newline.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\r')
        .to_string()
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// What a single line of a generate stream contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateFragment {
    Text(String),
    /// Valid JSON with nothing to append (blank lines, the final `done` record).
    Empty,
    /// The service reported an error inside the stream.
    ServiceError(String),
    Malformed(String),
}

pub fn parse_generate_line(line: &str) -> GenerateFragment {
    if line.trim().is_empty() {
        return GenerateFragment::Empty;
    }

    match serde_json::from_str::<GenerateChunk>(line) {
        Ok(GenerateChunk {
            error: Some(error), ..
        }) => GenerateFragment::ServiceError(error),
        Ok(GenerateChunk {
            response: Some(text),
            ..
        }) if !text.is_empty() => GenerateFragment::Text(text),
        Ok(_) => GenerateFragment::Empty,
        Err(e) => GenerateFragment::Malformed(e.to_string()),
    }
}
