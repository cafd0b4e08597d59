use thiserror::Error;

/// Errors from the HTTP execution pipeline.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Bad request config (missing URL, malformed header name). Reported
    /// synchronously, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx response; carries the status code and raw body text.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The request was aborted through its signal.
    #[error("Request cancelled")]
    Cancelled,
}

/// Result type for HTTP pipeline operations.
pub type HttpResult<T> = Result<T, HttpError>;
