//! Authentication injection.
//!
//! API keys go into a named header or a URL query parameter, never both;
//! the placement enum makes that structural. Basic credentials are returned
//! to the caller because reqwest applies them on the request builder.

use cellforge_model::{ApiKeyPlacement, AuthConfig};
use indexmap::IndexMap;

/// Basic-auth credentials to hand to the request builder.
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Apply auth to the resolved url/headers. Returns the possibly-rewritten
/// URL and, for Basic auth, the credentials for the builder.
pub fn apply_auth(
    auth: &AuthConfig,
    url: String,
    headers: &mut IndexMap<String, String>,
) -> (String, Option<BasicCredentials>) {
    match auth {
        AuthConfig::None => (url, None),
        AuthConfig::ApiKey { key, placement } => match placement {
            ApiKeyPlacement::Header(name) => {
                headers.insert(name.clone(), key.clone());
                (url, None)
            }
            ApiKeyPlacement::Query(param) => (append_query_param(&url, param, key), None),
        },
        AuthConfig::Bearer { token } => {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            (url, None)
        }
        AuthConfig::Basic { username, password } => (
            url,
            Some(BasicCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
        ),
    }
}

/// Append a query parameter, joining with `?` or `&` as appropriate.
#[must_use]
pub fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{name}={value}")
}
