use thiserror::Error;

/// Errors from the import pipeline.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty import: no header row")]
    NoHeaders,
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
