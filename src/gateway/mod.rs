//! Provider gateway for Gemini text generation.

pub mod error;
pub mod gemini;

pub use error::{ErrorContext, ProviderError};
pub use gemini::{GeminiAdapter, GenerationConfig};

/// Trait for generative text providers.
///
/// One call, one complete textual response. Callers decide what to do on
/// failure; the gateway itself never retries.
#[async_trait::async_trait]
pub trait GenerativeGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
