//! JSON payload extraction from model output.
//!
//! Models asked for "JSON only" still wrap the payload in markdown fences or
//! surrounding prose often enough that we try three candidates in order:
//! a ```json fence, any fence, then the whole response text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::gateway::{GenerativeGateway, ProviderError};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid regex"));

static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:\w+)?\s*(.*?)\s*```").expect("valid regex"));

/// How much of a bad response to keep in the error for diagnostics.
const SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum StructuredError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Response text did not parse as JSON after all extraction attempts.
    #[error("malformed response: no JSON payload found in {snippet:?}")]
    MalformedResponse { snippet: String },

    /// The JSON parsed but did not match the expected typed shape.
    #[error("schema mismatch decoding {shape}: {source}")]
    SchemaMismatch {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StructuredError {
    /// True for failures of a single generation that callers drop-and-continue on.
    pub fn is_per_item(&self) -> bool {
        !matches!(
            self,
            StructuredError::Provider(ProviderError::Config(_))
                | StructuredError::Provider(ProviderError::AuthRejected { .. })
        )
    }
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut end = trimmed.len().min(SNIPPET_LEN);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Parse a JSON payload out of possibly-fenced response text.
pub fn parse_payload(text: &str) -> Result<Value, StructuredError> {
    let candidates = [
        JSON_FENCE.captures(text).map(|c| c[1].to_string()),
        ANY_FENCE.captures(text).map(|c| c[1].to_string()),
        Some(text.trim().to_string()),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
            return Ok(value);
        }
    }

    Err(StructuredError::MalformedResponse {
        snippet: snippet(text),
    })
}

/// Issue one generation request and parse the response as JSON.
pub async fn generate_value(
    gateway: &dyn GenerativeGateway,
    prompt: &str,
) -> Result<Value, StructuredError> {
    let text = gateway.generate(prompt).await?;
    parse_payload(&text)
}

/// Issue one generation request and decode the response into a typed shape.
///
/// `shape` names the expected type in diagnostics.
pub async fn generate_decoded<T: DeserializeOwned>(
    gateway: &dyn GenerativeGateway,
    prompt: &str,
    shape: &'static str,
) -> Result<T, StructuredError> {
    let value = generate_value(gateway, prompt).await?;
    serde_json::from_value(value).map_err(|source| StructuredError::SchemaMismatch { shape, source })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fence_with_prose() {
        let text = "Here is the result:\n```json\n{\"a\": 1}\n```\nLet me know!";
        let value = parse_payload(text).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn bare_fence() {
        let text = "```\n{\"a\": 2}\n```";
        let value = parse_payload(text).unwrap();
        assert_eq!(value["a"], 2);
    }

    #[test]
    fn unfenced_json() {
        let value = parse_payload("  {\"a\": 3}  ").unwrap();
        assert_eq!(value["a"], 3);
    }

    #[test]
    fn prefers_json_fence_over_bare_fence() {
        let text = "```\nnot json\n```\n```json\n{\"a\": 4}\n```";
        let value = parse_payload(text).unwrap();
        assert_eq!(value["a"], 4);
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_payload("I'd be happy to brainstorm!").unwrap_err();
        assert!(matches!(err, StructuredError::MalformedResponse { .. }));
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(10_000);
        match parse_payload(&long).unwrap_err() {
            StructuredError::MalformedResponse { snippet } => {
                assert!(snippet.len() <= 200);
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }
}
