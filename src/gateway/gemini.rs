//! Gemini adapter for text generation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::error::{ErrorContext, ProviderError};
use super::GenerativeGateway;

/// Maximum allowed response content length (1MB).
const MAX_RESPONSE_LEN: usize = 1_024 * 1_024;

/// Maximum allowed input characters (~125k tokens).
const MAX_INPUT_CHARS: usize = 500_000;

const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling configuration sent with every request.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Gemini API adapter for `generateContent` requests.
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
    config: GenerationConfig,
}

impl GeminiAdapter {
    /// Create from API key with default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_config(
            api_key,
            DEFAULT_BASE_URL,
            DEFAULT_MODEL,
            Duration::from_secs(120),
            GenerationConfig::default(),
        )
    }

    /// Create from environment variables. `GEMINI_API_KEY` is required.
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ProviderError::config("GEMINI_API_KEY not set"))?;

        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout = std::env::var("GEMINI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(120));

        Self::with_config(api_key, base_url, model, timeout, GenerationConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        config: GenerationConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let key_value = HeaderValue::from_str(&api_key)
            .map_err(|_| ProviderError::config("Invalid API key format"))?;
        headers.insert("x-goog-api-key", key_value);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

// =============================================================================
// API TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: ApiGenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ApiGenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateApiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    status: Option<String>,
}

// =============================================================================
// GATEWAY IMPL
// =============================================================================

#[async_trait]
impl GenerativeGateway for GeminiAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if prompt.len() > MAX_INPUT_CHARS {
            return Err(ProviderError::InvalidRequest {
                message: format!(
                    "Input too large: {} chars (max {MAX_INPUT_CHARS})",
                    prompt.len()
                ),
                context: ErrorContext::new(),
            });
        }

        let api_req = GenerateApiRequest {
            contents: vec![ApiContent {
                role: "user",
                parts: vec![ApiPart { text: prompt }],
            }],
            generation_config: ApiGenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&api_req)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let ctx = ErrorContext::new().with_status(status.as_u16());

        if !status.is_success() {
            let (message, ctx) = match serde_json::from_str::<GenerateApiResponse>(&body) {
                Ok(parsed) => match parsed.error {
                    Some(err) => {
                        let ctx = match err.status {
                            Some(s) => ctx.with_provider_status(s),
                            None => ctx,
                        };
                        (err.message.unwrap_or_default(), ctx)
                    }
                    None => (format!("HTTP {}", status.as_u16()), ctx),
                },
                Err(_) => (format!("HTTP {}", status.as_u16()), ctx),
            };

            return Err(match status.as_u16() {
                429 => ProviderError::QuotaExhausted { message, context: ctx },
                401 | 403 => ProviderError::AuthRejected { message, context: ctx },
                400 => ProviderError::InvalidRequest { message, context: ctx },
                _ => ProviderError::provider("gemini", message, ctx),
            });
        }

        let parsed: GenerateApiResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::provider("gemini", format!("Invalid JSON: {e}"), ctx.clone())
        })?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::provider(
                "gemini",
                error.message.unwrap_or_default(),
                ctx,
            ));
        }

        // A blocked prompt returns no candidates but carries feedback.
        if let Some(feedback) = parsed.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(ProviderError::EmptyResponse(format!(
                    "prompt blocked: {reason}"
                )));
            }
        }

        let candidate = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| {
                ProviderError::EmptyResponse("no candidates in response".to_string())
            })?;

        if let Some(reason) = &candidate.finish_reason {
            if reason == "SAFETY" || reason == "RECITATION" {
                return Err(ProviderError::EmptyResponse(format!(
                    "generation stopped: {reason}"
                )));
            }
        }

        let mut text = candidate
            .content
            .and_then(|c| c.parts)
            .map(|parts| {
                parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(
                "candidate carried no text parts".to_string(),
            ));
        }

        // Normalize content for downstream parsers. The cut must land on a
        // char boundary or truncate panics.
        if text.len() > MAX_RESPONSE_LEN {
            let mut end = MAX_RESPONSE_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }

        Ok(text)
    }
}
