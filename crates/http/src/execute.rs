//! Request execution.
//!
//! The pipeline resolves the configured URL, header values and body against
//! the row, injects authentication, performs the call, and maps JSON-path
//! results back onto columns. Mapping targets are column *headers*, looked
//! up at execution time; a renamed column silently loses its mapping.

use crate::auth::apply_auth;
use crate::error::{HttpError, HttpResult};
use crate::jsonpath::resolve_json_path;
use cellforge_engine::resolve;
use cellforge_model::{ColumnDef, HttpMethod, HttpRequestConfig, Row};
use futures::future::{AbortRegistration, Abortable};
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Result of one executed request: the parsed response and the staged
/// per-column updates for the caller to merge into the row.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOutcome {
    pub raw: JsonValue,
    pub updates: IndexMap<String, String>,
}

/// Executes configured requests against live rows.
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Construct an executor with a 30-second default timeout.
    pub fn new() -> HttpResult<Self> {
        Self::with_timeout(30)
    }

    /// Construct an executor with a custom per-request timeout in seconds.
    pub fn with_timeout(timeout_secs: u64) -> HttpResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| HttpError::Network(e.to_string()))?;
        Ok(HttpExecutor { client })
    }

    /// Execute a request config against one row.
    ///
    /// `signal` aborts the in-flight request; an aborted call surfaces as
    /// [`HttpError::Cancelled`].
    ///
    /// # Errors
    ///
    /// `Config` for a missing URL, `Network` for transport failures,
    /// `Status` for non-2xx responses.
    pub async fn execute(
        &self,
        config: &HttpRequestConfig,
        row: &Row,
        columns: &[ColumnDef],
        signal: Option<AbortRegistration>,
    ) -> HttpResult<HttpOutcome> {
        if config.url.trim().is_empty() {
            return Err(HttpError::Config("request has no URL".to_string()));
        }

        let url = resolve(&config.url, row, columns);
        let mut headers: IndexMap<String, String> = config
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), resolve(value, row, columns)))
            .collect();

        let (url, basic) = apply_auth(&config.auth, url, &mut headers);

        let body = if config.method.allows_body() {
            config.body.as_ref().map(|b| resolve(b, row, columns))
        } else {
            None
        };

        if config.method.allows_body()
            && !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type"))
        {
            headers.insert(
                "Content-Type".to_string(),
                "application/json".to_string(),
            );
        }

        let mut request = self.client.request(method(config.method), &url);
        for (name, value) in &headers {
            request = request.header(name, value);
        }
        if let Some(creds) = basic {
            request = request.basic_auth(creds.username, Some(creds.password));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(name = %config.name, method = config.method.as_str(), %url, "executing request");

        let send = request.send();
        let response = match signal {
            Some(registration) => Abortable::new(send, registration)
                .await
                .map_err(|_| HttpError::Cancelled)?,
            None => send.await,
        }
        .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let raw = if is_json {
            serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
        } else {
            JsonValue::String(text)
        };

        let updates = map_response(&raw, &config.response_mapping, columns);
        Ok(HttpOutcome { raw, updates })
    }
}

/// Stage column updates from a parsed response. Paths that miss and headers
/// naming no column are skipped silently.
fn map_response(
    raw: &JsonValue,
    mapping: &IndexMap<String, String>,
    columns: &[ColumnDef],
) -> IndexMap<String, String> {
    let mut updates = IndexMap::new();
    for (path, header) in mapping {
        let Some(value) = resolve_json_path(raw, path) else {
            continue;
        };
        let Some(column) = columns.iter().find(|c| &c.header == header) else {
            tracing::debug!(%header, "response mapping targets no current column");
            continue;
        };
        let stored = match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        updates.insert(column.id.clone(), stored);
    }
    updates
}

fn method(m: HttpMethod) -> reqwest::Method {
    match m {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}
