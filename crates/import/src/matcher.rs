//! Header matching for imports.
//!
//! Uploaded column headers are paired with existing columns. The fuzzy path
//! asks an LLM through the provider fallback chain; the deterministic path
//! is normalization-based and also serves as the fallback whenever fuzzy
//! matching is unavailable or the whole chain fails.

use crate::normalize::{compact_header, normalize_header};
use cellforge_llm::{run_chain, LlmError, LlmRunner, ProviderKeys};
use serde::{Deserialize, Serialize};

/// Confidence below which a pairing is discarded (target nulled out).
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Default threshold at which callers auto-apply a match.
pub const DEFAULT_AUTO_APPLY_THRESHOLD: f64 = 0.7;

/// One source header paired (or not) with an existing column header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMatch {
    pub source_header: String,
    pub target_header: Option<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HeaderMatch {
    fn unmatched(source: &str) -> Self {
        HeaderMatch {
            source_header: source.to_string(),
            target_header: None,
            confidence: 0.0,
            reason: None,
        }
    }
}

/// Settings for one matching run.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// When false, only deterministic matching runs.
    pub fuzzy_enabled: bool,
    pub keys: ProviderKeys,
    /// Matches at or above this confidence are auto-applied by the caller.
    pub auto_apply_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            fuzzy_enabled: true,
            keys: ProviderKeys::default(),
            auto_apply_threshold: DEFAULT_AUTO_APPLY_THRESHOLD,
        }
    }
}

/// Match source headers against target headers.
///
/// Falls back to [`deterministic_matches`] when fuzzy matching is disabled,
/// no provider key is configured, there are no targets, the provider chain
/// is exhausted, or the model returns zero matches.
pub async fn match_headers(
    source_headers: &[String],
    target_headers: &[String],
    config: &MatchConfig,
    runner: &dyn LlmRunner,
) -> Vec<HeaderMatch> {
    if !config.fuzzy_enabled || !config.keys.any_configured() || target_headers.is_empty() {
        return deterministic_matches(source_headers, target_headers);
    }

    match fuzzy_matches(source_headers, target_headers, &config.keys, runner).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "fuzzy header matching unavailable, using deterministic fallback");
            deterministic_matches(source_headers, target_headers)
        }
    }
}

/// Normalization-based matching: exact normalized equality scores 1.0,
/// compact-form substring containment either direction scores 0.7, anything
/// below [`MIN_CONFIDENCE`] keeps no target.
#[must_use]
pub fn deterministic_matches(
    source_headers: &[String],
    target_headers: &[String],
) -> Vec<HeaderMatch> {
    source_headers
        .iter()
        .map(|source| {
            let mut m = score_deterministic(source, target_headers);
            if m.confidence < MIN_CONFIDENCE {
                m.target_header = None;
            }
            m
        })
        .collect()
}

fn score_deterministic(source: &str, targets: &[String]) -> HeaderMatch {
    let norm_source = normalize_header(source);

    if let Some(target) = targets.iter().find(|t| normalize_header(t) == norm_source) {
        return HeaderMatch {
            source_header: source.to_string(),
            target_header: Some(target.clone()),
            confidence: 1.0,
            reason: Some("exact match".to_string()),
        };
    }

    let compact_source = compact_header(source);
    if !compact_source.is_empty() {
        let substring = targets.iter().find(|t| {
            let compact_target = compact_header(t);
            !compact_target.is_empty()
                && (compact_source.contains(&compact_target)
                    || compact_target.contains(&compact_source))
        });
        if let Some(target) = substring {
            return HeaderMatch {
                source_header: source.to_string(),
                target_header: Some(target.clone()),
                confidence: 0.7,
                reason: Some("substring match".to_string()),
            };
        }
    }

    HeaderMatch::unmatched(source)
}

#[derive(Deserialize)]
struct MatchReply {
    #[serde(default)]
    matches: Vec<HeaderMatch>,
}

/// One prompt through the provider chain. A reply that fails to parse, has
/// the wrong shape, or carries zero matches advances the chain like any
/// other failure.
async fn fuzzy_matches(
    source_headers: &[String],
    target_headers: &[String],
    keys: &ProviderKeys,
    runner: &dyn LlmRunner,
) -> Result<Vec<HeaderMatch>, LlmError> {
    let prompt = build_prompt(source_headers, target_headers);

    let (provider, reply) = run_chain(runner, keys, &prompt, None, |_, reply| {
        let value = cellforge_llm::extract_json(reply)?;
        let parsed: MatchReply =
            serde_json::from_value(value).map_err(|e| LlmError::Parse(e.to_string()))?;
        if parsed.matches.is_empty() {
            return Err(LlmError::Parse("empty matches array".to_string()));
        }
        Ok(parsed.matches)
    })
    .await?;

    tracing::debug!(provider = provider.name(), "fuzzy header matching succeeded");
    Ok(sanitize(reply, source_headers, target_headers))
}

/// Enforce the reply contract: targets must come from the candidate list,
/// confidences are clamped to 0..=1, sub-threshold targets are nulled, and
/// source headers the model skipped are backfilled unmatched, in source
/// order.
fn sanitize(
    matches: Vec<HeaderMatch>,
    source_headers: &[String],
    target_headers: &[String],
) -> Vec<HeaderMatch> {
    source_headers
        .iter()
        .map(|source| {
            let Some(m) = matches.iter().find(|m| &m.source_header == source) else {
                return HeaderMatch::unmatched(source);
            };
            let mut m = m.clone();
            m.confidence = m.confidence.clamp(0.0, 1.0);
            if let Some(target) = &m.target_header {
                if !target_headers.contains(target) {
                    m.target_header = None;
                    m.confidence = 0.0;
                }
            }
            if m.confidence < MIN_CONFIDENCE {
                m.target_header = None;
            }
            m
        })
        .collect()
}

fn build_prompt(source_headers: &[String], target_headers: &[String]) -> String {
    format!(
        "You match uploaded spreadsheet column headers to existing columns.\n\
         Uploaded headers:\n{}\n\nExisting column headers (the only allowed \
         targetHeader values):\n{}\n\nReply with a single JSON object of the \
         shape {{\"matches\": [{{\"sourceHeader\": string, \"targetHeader\": \
         string or null, \"confidence\": number between 0 and 1, \"reason\": \
         string}}]}}. Include every uploaded header exactly once. Use null \
         for targetHeader when no existing column fits.",
        bullet_list(source_headers),
        bullet_list(target_headers),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exact_and_substring_scores() {
        let matches = deterministic_matches(
            &strings(&["Company Name", "company_name"]),
            &strings(&["Company Name"]),
        );
        assert_eq!(matches[0].target_header.as_deref(), Some("Company Name"));
        assert_eq!(matches[0].confidence, 1.0);
        assert_eq!(matches[1].target_header.as_deref(), Some("Company Name"));
        assert!(matches[1].confidence >= 0.7);
    }

    #[test]
    fn test_no_match_keeps_no_target() {
        let matches = deterministic_matches(&strings(&["Revenue"]), &strings(&["Email"]));
        assert_eq!(matches[0].target_header, None);
        assert_eq!(matches[0].confidence, 0.0);
    }

    #[test]
    fn test_normalized_exact_match() {
        let matches =
            deterministic_matches(&strings(&["  email  "]), &strings(&["Email"]));
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn test_no_targets_yields_all_unmatched() {
        let matches = deterministic_matches(&strings(&["A", "B"]), &[]);
        assert!(matches.iter().all(|m| m.target_header.is_none()));
    }

    #[test]
    fn test_sanitize_rejects_foreign_targets_and_backfills() {
        let raw = vec![HeaderMatch {
            source_header: "Name".into(),
            target_header: Some("Invented Column".into()),
            confidence: 0.9,
            reason: None,
        }];
        let sanitized = sanitize(raw, &strings(&["Name", "Email"]), &strings(&["Full Name"]));
        assert_eq!(sanitized.len(), 2);
        assert_eq!(sanitized[0].target_header, None);
        assert_eq!(sanitized[0].confidence, 0.0);
        // "Email" was missing from the reply entirely.
        assert_eq!(sanitized[1].source_header, "Email");
        assert_eq!(sanitized[1].confidence, 0.0);
    }

    #[test]
    fn test_sanitize_nulls_sub_threshold_targets() {
        let raw = vec![HeaderMatch {
            source_header: "Name".into(),
            target_header: Some("Full Name".into()),
            confidence: 0.3,
            reason: Some("weak".into()),
        }];
        let sanitized = sanitize(raw, &strings(&["Name"]), &strings(&["Full Name"]));
        assert_eq!(sanitized[0].target_header, None);
        assert_eq!(sanitized[0].confidence, 0.3);
    }
}
