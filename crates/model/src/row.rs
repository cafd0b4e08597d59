use crate::cell::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sparse row: cell values keyed by column id. Absent keys read as null.
///
/// Serializes flat, as `{"id": ..., "<columnId>": <value>, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(flatten)]
    pub cells: IndexMap<String, CellValue>,
}

impl Row {
    /// Create an empty row with a generated id.
    #[must_use]
    pub fn new() -> Self {
        Row {
            id: Uuid::new_v4().to_string(),
            cells: IndexMap::new(),
        }
    }

    /// Create an empty row with a fixed id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Row {
            id: id.into(),
            cells: IndexMap::new(),
        }
    }

    /// Read a cell. Absent keys read as `CellValue::Null`.
    #[must_use]
    pub fn get(&self, column_id: &str) -> &CellValue {
        self.cells.get(column_id).unwrap_or(&CellValue::Null)
    }

    /// Stringified cell value; null/absent stringify to the empty string.
    #[must_use]
    pub fn text(&self, column_id: &str) -> String {
        self.get(column_id).as_str()
    }

    /// Write a cell. Writing `Null` keeps the key (the cell was explicitly
    /// cleared, which still counts as present for sparse diffing).
    pub fn set(&mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> &mut Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// Remove a cell entirely.
    pub fn clear(&mut self, column_id: &str) {
        self.cells.shift_remove(column_id);
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}
