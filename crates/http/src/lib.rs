//! # cellforge-http
//!
//! The HTTP execution pipeline: resolves a configured request template
//! against a row (`/columnId` tokens in the URL, header values and body),
//! injects authentication, performs the call, and maps JSON-path results
//! back onto columns as staged updates.
//!
//! The caller owns merging updates into the row (last-write-wins) and may
//! thread an abort registration through to cancel the in-flight request.

mod auth;
mod error;
mod execute;
mod jsonpath;

pub use auth::{append_query_param, apply_auth, BasicCredentials};
pub use error::{HttpError, HttpResult};
pub use execute::{HttpExecutor, HttpOutcome};
pub use jsonpath::resolve_json_path;
