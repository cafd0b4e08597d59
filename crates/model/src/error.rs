use thiserror::Error;

/// Errors that can occur during model mutations.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Duplicate column id: {id}")]
    DuplicateColumnId { id: String },

    #[error("Duplicate select option label: {label}")]
    DuplicateOptionLabel { label: String },

    #[error("Column not found: {id}")]
    ColumnNotFound { id: String },

    #[error("Sheet not found: {id}")]
    SheetNotFound { id: String },

    #[error("Row not found: {id}")]
    RowNotFound { id: String },

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
