//! The runner boundary.
//!
//! Vendor SDK calls stay outside the engine. Everything in this workspace
//! reaches models through [`LlmRunner`]: a provider, a model id, a prompt,
//! an API key, and an optional system instruction in; raw text out. The
//! reply may be a normal text/JSON payload or the JSON-encoded
//! `{"error": ...}` sentinel, which callers detect with
//! [`crate::error_sentinel`].

use crate::error::LlmResult;
use async_trait::async_trait;
use cellforge_model::Provider;

/// Narrow boundary through which all model calls flow.
#[async_trait]
pub trait LlmRunner: Send + Sync {
    async fn run(
        &self,
        provider: Provider,
        model_id: &str,
        prompt: &str,
        api_key: &str,
        system_instruction: Option<&str>,
    ) -> LlmResult<String>;
}

/// API keys configured per provider. A provider without a key is skipped by
/// fallback chains.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub google: Option<String>,
    pub anthropic: Option<String>,
    pub openai: Option<String>,
}

impl ProviderKeys {
    /// The key for one provider, if configured and non-empty.
    #[must_use]
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Google => self.google.as_deref(),
            Provider::Anthropic => self.anthropic.as_deref(),
            Provider::OpenAi => self.openai.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// Whether any provider is usable.
    #[must_use]
    pub fn any_configured(&self) -> bool {
        Provider::PRIORITY
            .iter()
            .any(|p| self.key_for(*p).is_some())
    }
}
