use crate::agent::AgentConfig;
use crate::cell::CellValue;
use crate::column::{ColumnDef, SelectOption};
use crate::error::{ModelError, ModelResult};
use crate::http::HttpRequestConfig;
use crate::row::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A named table: an ordered list of column definitions and an ordered list
/// of rows, plus the agent and HTTP request configs scoped to it.
///
/// Row order is insertion order and doubles as the "created" ordering used
/// by deduplication. Column ids are unique within a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
    #[serde(default)]
    pub http_requests: Vec<HttpRequestConfig>,
    #[serde(default)]
    pub auto_update: bool,
}

impl Sheet {
    /// Create an empty sheet with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            agents: Vec::new(),
            http_requests: Vec::new(),
            auto_update: false,
        }
    }

    /// Look up a column by id.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Mutable column lookup by id.
    pub fn column_mut(&mut self, id: &str) -> Option<&mut ColumnDef> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Look up a column by header text (exact match). Response mappings and
    /// import matching address columns this way.
    #[must_use]
    pub fn column_by_header(&self, header: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.header == header)
    }

    /// Look up a row by id.
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Mutable row lookup by id.
    pub fn row_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Append a column, enforcing id uniqueness within the sheet.
    pub fn add_column(&mut self, column: ColumnDef) -> ModelResult<()> {
        if self.columns.iter().any(|c| c.id == column.id) {
            return Err(ModelError::DuplicateColumnId { id: column.id });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append a row, applying column default values to absent cells.
    pub fn add_row(&mut self, mut row: Row) {
        for col in &self.columns {
            if let Some(default) = &col.default_value {
                if !row.cells.contains_key(&col.id) && !default.is_empty() {
                    row.set(col.id.clone(), CellValue::parse(default));
                }
            }
        }
        self.rows.push(row);
    }

    /// Remove a row by id. Returns whether a row was removed.
    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    /// Write a cell on a row, rejecting writes to read-only columns.
    /// Returns whether the write was applied.
    pub fn set_cell(&mut self, row_id: &str, column_id: &str, value: CellValue) -> bool {
        let editable = self.column(column_id).is_some_and(ColumnDef::is_editable);
        if !editable {
            return false;
        }
        match self.row_mut(row_id) {
            Some(row) => {
                row.set(column_id.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// Replace a SELECT column's options, enforcing label uniqueness.
    pub fn set_options(&mut self, column_id: &str, options: Vec<SelectOption>) -> ModelResult<()> {
        let mut seen = HashSet::new();
        for opt in &options {
            if !seen.insert(opt.label.as_str()) {
                return Err(ModelError::DuplicateOptionLabel {
                    label: opt.label.clone(),
                });
            }
        }
        let col = self
            .column_mut(column_id)
            .ok_or_else(|| ModelError::ColumnNotFound {
                id: column_id.to_string(),
            })?;
        col.options = Some(options);
        Ok(())
    }

    /// Validate the sheet invariants: unique column ids, unique option
    /// labels per SELECT column.
    pub fn validate(&self) -> ModelResult<()> {
        let mut ids = HashSet::new();
        for col in &self.columns {
            if !ids.insert(col.id.as_str()) {
                return Err(ModelError::DuplicateColumnId { id: col.id.clone() });
            }
            if let Some(options) = &col.options {
                let mut labels = HashSet::new();
                for opt in options {
                    if !labels.insert(opt.label.as_str()) {
                        return Err(ModelError::DuplicateOptionLabel {
                            label: opt.label.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
