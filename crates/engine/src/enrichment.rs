//! Defensive parsing of enrichment cells.
//!
//! An ENRICHMENT column stores the JSON blob an agent run produced. The blob
//! is untrusted: it may be empty, malformed, an `{"error": ...}` sentinel,
//! or an object mixing data keys with the reserved `_sources` / `_metadata`
//! keys. Parsing never fails; malformed input collapses to an empty payload.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Execution metadata an agent attaches under `_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichmentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_taken: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
}

/// Parsed content of a well-formed enrichment cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentPayload {
    /// Arbitrary data keys produced by the agent, in blob order.
    pub data: IndexMap<String, JsonValue>,
    /// Source URLs/domains reported under `_sources`.
    pub sources: Vec<String>,
    /// Execution metadata reported under `_metadata`.
    pub metadata: Option<EnrichmentMetadata>,
}

/// Result of parsing an enrichment cell. An `error` key in the blob is the
/// agent-failure sentinel; everything else, including garbage, is `Ok`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentResult {
    Ok(EnrichmentPayload),
    Error(String),
}

impl EnrichmentResult {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, EnrichmentResult::Error(_))
    }
}

/// Parse an enrichment cell's raw text. Never fails: empty, non-JSON and
/// non-object input all yield an empty `Ok` payload.
#[must_use]
pub fn parse_enrichment(raw: &str) -> EnrichmentResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EnrichmentResult::Ok(EnrichmentPayload::default());
    }

    let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(trimmed) else {
        return EnrichmentResult::Ok(EnrichmentPayload::default());
    };

    if let Some(err) = map.get("error") {
        let message = match err {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        return EnrichmentResult::Error(message);
    }

    let mut payload = EnrichmentPayload::default();
    for (key, value) in map {
        match key.as_str() {
            "_sources" => {
                if let JsonValue::Array(items) = value {
                    payload.sources = items
                        .into_iter()
                        .filter_map(|v| match v {
                            JsonValue::String(s) => Some(s),
                            _ => None,
                        })
                        .collect();
                }
            }
            "_metadata" => {
                payload.metadata = serde_json::from_value(value).ok();
            }
            _ => {
                payload.data.insert(key, value);
            }
        }
    }

    EnrichmentResult::Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_and_malformed_swallowed() {
        assert_eq!(
            parse_enrichment(""),
            EnrichmentResult::Ok(EnrichmentPayload::default())
        );
        assert_eq!(
            parse_enrichment("not json {{"),
            EnrichmentResult::Ok(EnrichmentPayload::default())
        );
        assert_eq!(
            parse_enrichment("[1,2,3]"),
            EnrichmentResult::Ok(EnrichmentPayload::default())
        );
    }

    #[test]
    fn test_error_sentinel() {
        let result = parse_enrichment(r#"{"error": "rate limited"}"#);
        assert_eq!(result, EnrichmentResult::Error("rate limited".to_string()));
    }

    #[test]
    fn test_data_sources_and_metadata_split() {
        let blob = json!({
            "company": "Acme",
            "employees": 250,
            "_sources": ["acme.com", "news.example", 42],
            "_metadata": {"agentName": "prospector", "stepsTaken": 3, "executionTime": 1.25}
        })
        .to_string();

        let EnrichmentResult::Ok(payload) = parse_enrichment(&blob) else {
            panic!("expected ok payload");
        };
        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.data["company"], json!("Acme"));
        assert_eq!(payload.sources, vec!["acme.com", "news.example"]);
        let meta = payload.metadata.unwrap();
        assert_eq!(meta.agent_name.as_deref(), Some("prospector"));
        assert_eq!(meta.steps_taken, Some(3));
        assert_eq!(meta.execution_time, Some(1.25));
        assert_eq!(meta.tokens_used, None);
    }

    #[test]
    fn test_bad_metadata_dropped_not_fatal() {
        let result = parse_enrichment(r#"{"k": 1, "_metadata": "oops"}"#);
        let EnrichmentResult::Ok(payload) = result else {
            panic!("expected ok payload");
        };
        assert!(payload.metadata.is_none());
        assert_eq!(payload.data["k"], serde_json::json!(1));
    }
}
