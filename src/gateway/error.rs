//! Error types for the provider gateway.

use thiserror::Error;

/// Additional context from provider errors for debugging.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// HTTP status code from the provider.
    pub http_status: Option<u16>,
    /// Provider-specific status string (e.g. "RESOURCE_EXHAUSTED").
    pub provider_status: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_provider_status(mut self, status: impl Into<String>) -> Self {
        self.provider_status = Some(status.into());
        self
    }
}

/// Errors that can occur when calling the generative provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider exhausted our request quota (HTTP 429).
    #[error("quota exhausted: {message}")]
    QuotaExhausted {
        message: String,
        context: ErrorContext,
    },

    /// Credential rejected (HTTP 401/403) - permanent error.
    #[error("auth rejected: {message}")]
    AuthRejected {
        message: String,
        context: ErrorContext,
    },

    /// Invalid request - permanent error.
    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
        context: ErrorContext,
    },

    /// Provider returned an error response.
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
        context: ErrorContext,
    },

    /// Response arrived but did not carry usable text.
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// HTTP/network error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error (missing API key, etc.).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn provider(
        provider: &'static str,
        message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            context,
        }
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::QuotaExhausted { .. } => "quota_exhausted",
            Self::AuthRejected { .. } => "auth_rejected",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Provider { .. } => "provider_error",
            Self::EmptyResponse(_) => "empty_response",
            Self::Http(_) => "http_error",
            Self::Config(_) => "config_error",
        }
    }

    /// Get the error context if available.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::QuotaExhausted { context, .. } => Some(context),
            Self::AuthRejected { context, .. } => Some(context),
            Self::InvalidRequest { context, .. } => Some(context),
            Self::Provider { context, .. } => Some(context),
            Self::EmptyResponse(_) | Self::Http(_) | Self::Config(_) => None,
        }
    }
}
