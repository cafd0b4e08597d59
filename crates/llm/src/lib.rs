//! # cellforge-llm
//!
//! The LLM boundary of the cellforge engine: a narrow runner trait the
//! vendor SDKs plug into, the fixed-priority provider fallback chain, the
//! `{"error": ...}` sentinel convention, and agent execution over a row.
//!
//! No vendor SDK is called from this crate; [`LlmRunner`] is the seam.
//! Provider order is a constant (`Provider::PRIORITY`), never runtime
//! state: Google, then Anthropic, then OpenAI.

mod agent;
mod chain;
mod error;
mod payload;
mod runner;

pub use agent::{run_agent, AgentOutcome};
pub use chain::{run_chain, run_chain_text};
pub use error::{LlmError, LlmResult};
pub use payload::{error_sentinel, extract_json};
pub use runner::{LlmRunner, ProviderKeys};
