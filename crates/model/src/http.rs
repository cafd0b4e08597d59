use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP methods supported by request configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// GET and DELETE never carry a body, even when one is configured.
    #[must_use]
    pub fn allows_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Where an API key is injected. A key goes into a named header or a URL
/// query parameter, never both; the enum makes the exclusivity structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKeyPlacement {
    Header(String),
    Query(String),
}

/// Authentication applied to an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthConfig {
    #[default]
    None,
    ApiKey {
        key: String,
        placement: ApiKeyPlacement,
    },
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
}

/// An outbound HTTP request template attached to a sheet.
///
/// `url`, header values and `body` may contain `/columnId` tokens resolved
/// against the row at execution time. `response_mapping` maps a JSON path in
/// the response to a target column **header** (not id); the column is looked
/// up by header text when the response arrives, so renaming a column
/// silently detaches its mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub response_mapping: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_gating() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(HttpMethod::Patch.allows_body());
    }

    #[test]
    fn test_auth_serde() {
        let auth = AuthConfig::ApiKey {
            key: "k".into(),
            placement: ApiKeyPlacement::Query("api_key".into()),
        };
        let json = serde_json::to_string(&auth).unwrap();
        assert!(json.contains("\"API_KEY\""));
        let back: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, auth);
    }
}
