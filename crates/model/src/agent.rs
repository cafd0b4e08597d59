use serde::{Deserialize, Serialize};
use std::fmt;

/// Which LLM vendor backs an agent or a fuzzy-match call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Anthropic,
    OpenAi,
}

impl Provider {
    /// Fixed priority order for fallback chains. First configured provider
    /// wins; the order itself never changes at runtime.
    pub const PRIORITY: [Provider; 3] = [Provider::Google, Provider::Anthropic, Provider::OpenAi];

    /// Human-readable vendor name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
        }
    }

    /// Default model id used when a config does not pin one.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Google => "gemini-2.5-flash",
            Provider::Anthropic => "claude-sonnet-4-20250514",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which rows an agent run targets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "count")]
pub enum RowsToDeploy {
    #[default]
    All,
    FirstN(usize),
}

/// Configuration for an AI agent attached to a sheet.
///
/// `inputs` lists the column ids the prompt/condition may reference;
/// `outputs` is the JSON key schema the agent is expected to produce, which
/// lands in the column named `output_column_name` as an enrichment blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub provider: Provider,
    pub model_id: String,
    pub prompt: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    pub output_column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub rows_to_deploy: RowsToDeploy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_fixed() {
        assert_eq!(
            Provider::PRIORITY,
            [Provider::Google, Provider::Anthropic, Provider::OpenAi]
        );
    }

    #[test]
    fn test_provider_serde() {
        assert_eq!(
            serde_json::to_string(&Provider::OpenAi).unwrap(),
            "\"openai\""
        );
        let p: Provider = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(p, Provider::Anthropic);
    }
}
