use cellforge_model::Provider;
use thiserror::Error;

/// Errors crossing the LLM boundary.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured for the provider an operation requires.
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    /// The provider call itself failed (transport, quota, vendor error).
    #[error("{provider} call failed: {message}")]
    Provider { provider: Provider, message: String },

    /// The reply carried the `{"error": ...}` sentinel.
    #[error("{provider} returned an error payload: {message}")]
    ErrorPayload { provider: Provider, message: String },

    /// The reply could not be parsed as the expected JSON shape.
    #[error("Could not parse model reply as JSON: {0}")]
    Parse(String),

    /// Every configured provider in the chain failed.
    #[error("All configured providers failed")]
    ChainExhausted,
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;
