//! Agent execution over a single row.
//!
//! The agent prompt is sent verbatim: `/columnId` tokens are NOT resolved
//! (the model interprets them contextually). The declared input columns are
//! appended as a `header: value` context block instead, and the expected
//! output keys are stated so the reply comes back as a JSON object. The
//! result lands in the output column as an enrichment blob; runner failures
//! become an `{"error": ...}` blob rather than a hard failure.

use crate::error::{LlmError, LlmResult};
use crate::payload::{error_sentinel, extract_json};
use crate::runner::LlmRunner;
use cellforge_model::{AgentConfig, ColumnDef, Row};
use serde_json::{json, Map, Value as JsonValue};
use std::time::Instant;

/// The staged result of one agent run: the blob to write into the column
/// named by the config's `output_column_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    pub output_column_name: String,
    pub blob: String,
}

/// Run an agent over one row. Only configuration problems (missing API key)
/// are hard errors; runtime failures produce an error blob the grid can
/// display.
pub async fn run_agent(
    config: &AgentConfig,
    row: &Row,
    columns: &[ColumnDef],
    api_key: Option<&str>,
    runner: &dyn LlmRunner,
) -> LlmResult<AgentOutcome> {
    let key = api_key.ok_or(LlmError::MissingApiKey(config.provider.name()))?;

    let prompt = build_prompt(config, row, columns);
    let model = if config.model_id.is_empty() {
        config.provider.default_model()
    } else {
        config.model_id.as_str()
    };

    let started = Instant::now();
    let reply = runner
        .run(config.provider, model, &prompt, key, None)
        .await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let blob = match reply {
        Err(e) => {
            tracing::warn!(agent = %config.name, error = %e, "agent run failed");
            json!({ "error": e.to_string() }).to_string()
        }
        Ok(text) => match error_sentinel(&text) {
            Some(message) => json!({ "error": message }).to_string(),
            None => enrich_blob(&text, config, elapsed_ms),
        },
    };

    Ok(AgentOutcome {
        output_column_name: config.output_column_name.clone(),
        blob,
    })
}

/// Compose the prompt: the configured text verbatim, the condition verbatim,
/// a context block for the declared inputs, and the output key schema.
fn build_prompt(config: &AgentConfig, row: &Row, columns: &[ColumnDef]) -> String {
    let mut prompt = config.prompt.clone();

    if let Some(condition) = &config.condition {
        if !condition.is_empty() {
            prompt.push_str("\n\nOnly proceed if the following holds: ");
            prompt.push_str(condition);
        }
    }

    if !config.inputs.is_empty() {
        prompt.push_str("\n\nRow data:\n");
        for input in &config.inputs {
            let header = columns
                .iter()
                .find(|c| &c.id == input)
                .map_or(input.as_str(), |c| c.header.as_str());
            prompt.push_str(&format!("{header}: {}\n", row.text(input)));
        }
    }

    if !config.outputs.is_empty() {
        prompt.push_str(&format!(
            "\nReply with a single JSON object with exactly these keys: {}.",
            config.outputs.join(", ")
        ));
    }

    prompt
}

/// Parse the reply into the enrichment blob, attaching `_metadata`. An
/// unparseable reply degrades to an empty object rather than failing.
fn enrich_blob(text: &str, config: &AgentConfig, elapsed_ms: f64) -> String {
    let mut object = match extract_json(text) {
        Ok(JsonValue::Object(map)) => map,
        Ok(_) | Err(_) => Map::new(),
    };
    object.insert(
        "_metadata".to_string(),
        json!({
            "agentName": config.name,
            "stepsTaken": 1,
            "executionTime": elapsed_ms,
        }),
    );
    JsonValue::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cellforge_model::{ColumnType, Provider, RowsToDeploy};

    struct FixedRunner {
        reply: LlmResult<String>,
    }

    #[async_trait]
    impl LlmRunner for FixedRunner {
        async fn run(
            &self,
            provider: Provider,
            _model_id: &str,
            _prompt: &str,
            _api_key: &str,
            _system_instruction: Option<&str>,
        ) -> LlmResult<String> {
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(LlmError::Provider {
                    provider,
                    message: "down".into(),
                }),
            }
        }
    }

    fn config() -> AgentConfig {
        AgentConfig {
            id: "a1".into(),
            name: "prospector".into(),
            ty: "enrichment".into(),
            provider: Provider::Google,
            model_id: String::new(),
            prompt: "Find the industry of /company".into(),
            inputs: vec!["company".into()],
            outputs: vec!["industry".into()],
            output_column_name: "Enrichment".into(),
            condition: None,
            rows_to_deploy: RowsToDeploy::All,
        }
    }

    fn row_and_columns() -> (Row, Vec<ColumnDef>) {
        let mut row = Row::with_id("r1");
        row.set("company", "Acme");
        let columns = vec![ColumnDef::new("company", "Company", ColumnType::Text)];
        (row, columns)
    }

    #[test]
    fn test_prompt_keeps_tokens_verbatim() {
        let (row, columns) = row_and_columns();
        let prompt = build_prompt(&config(), &row, &columns);
        // Tokens are never substituted in agent prompts.
        assert!(prompt.contains("/company"));
        // The declared inputs arrive as a context block instead.
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("industry"));
    }

    #[tokio::test]
    async fn test_successful_run_attaches_metadata() {
        let (row, columns) = row_and_columns();
        let runner = FixedRunner {
            reply: Ok(r#"{"industry": "Robotics"}"#.into()),
        };
        let outcome = run_agent(&config(), &row, &columns, Some("key"), &runner)
            .await
            .unwrap();
        assert_eq!(outcome.output_column_name, "Enrichment");
        let blob: JsonValue = serde_json::from_str(&outcome.blob).unwrap();
        assert_eq!(blob["industry"], "Robotics");
        assert_eq!(blob["_metadata"]["agentName"], "prospector");
        assert_eq!(blob["_metadata"]["stepsTaken"], 1);
    }

    #[tokio::test]
    async fn test_runner_failure_becomes_error_blob() {
        let (row, columns) = row_and_columns();
        let runner = FixedRunner {
            reply: Err(LlmError::ChainExhausted),
        };
        let outcome = run_agent(&config(), &row, &columns, Some("key"), &runner)
            .await
            .unwrap();
        let blob: JsonValue = serde_json::from_str(&outcome.blob).unwrap();
        assert!(blob["error"].as_str().unwrap().contains("down"));
    }

    #[tokio::test]
    async fn test_sentinel_reply_becomes_error_blob() {
        let (row, columns) = row_and_columns();
        let runner = FixedRunner {
            reply: Ok(r#"{"error": "blocked"}"#.into()),
        };
        let outcome = run_agent(&config(), &row, &columns, Some("key"), &runner)
            .await
            .unwrap();
        let blob: JsonValue = serde_json::from_str(&outcome.blob).unwrap();
        assert_eq!(blob["error"], "blocked");
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let (row, columns) = row_and_columns();
        let runner = FixedRunner {
            reply: Ok("irrelevant".into()),
        };
        let err = run_agent(&config(), &row, &columns, None, &runner)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey(_)));
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_to_empty_object() {
        let (row, columns) = row_and_columns();
        let runner = FixedRunner {
            reply: Ok("sorry, I cannot".into()),
        };
        let outcome = run_agent(&config(), &row, &columns, Some("key"), &runner)
            .await
            .unwrap();
        let blob: JsonValue = serde_json::from_str(&outcome.blob).unwrap();
        assert!(blob.get("error").is_none());
        assert!(blob["_metadata"].is_object());
    }
}
