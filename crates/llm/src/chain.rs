//! Sequential provider fallback.
//!
//! Providers are tried strictly in [`Provider::PRIORITY`] order over the
//! configured keys; the first reply that is not a transport failure, not the
//! `{"error": ...}` sentinel, and accepted by the caller's parse step wins.
//! Failures are logged and swallowed; only exhausting the whole chain
//! surfaces an error. There is no concurrent racing and no retry beyond the
//! chain itself.

use crate::error::{LlmError, LlmResult};
use crate::payload::error_sentinel;
use crate::runner::{LlmRunner, ProviderKeys};
use cellforge_model::Provider;

/// Run one prompt through the provider chain, validating each reply with
/// `accept`. A rejected reply (parse failure, wrong shape) advances the
/// chain exactly like a transport failure.
pub async fn run_chain<T, F>(
    runner: &dyn LlmRunner,
    keys: &ProviderKeys,
    prompt: &str,
    system_instruction: Option<&str>,
    mut accept: F,
) -> LlmResult<(Provider, T)>
where
    F: FnMut(Provider, &str) -> LlmResult<T>,
{
    for provider in Provider::PRIORITY {
        let Some(key) = keys.key_for(provider) else {
            continue;
        };
        let reply = match runner
            .run(provider, provider.default_model(), prompt, key, system_instruction)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "provider call failed, advancing chain"
                );
                continue;
            }
        };
        if let Some(message) = error_sentinel(&reply) {
            tracing::warn!(
                provider = provider.name(),
                %message,
                "provider returned error payload, advancing chain"
            );
            continue;
        }
        match accept(provider, &reply) {
            Ok(parsed) => return Ok((provider, parsed)),
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "provider reply rejected, advancing chain"
                );
            }
        }
    }
    Err(LlmError::ChainExhausted)
}

/// Run the chain and return the first raw (non-sentinel) reply.
pub async fn run_chain_text(
    runner: &dyn LlmRunner,
    keys: &ProviderKeys,
    prompt: &str,
    system_instruction: Option<&str>,
) -> LlmResult<(Provider, String)> {
    run_chain(runner, keys, prompt, system_instruction, |_, reply| {
        Ok(reply.to_string())
    })
    .await
}
