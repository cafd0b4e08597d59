use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The declared type of a column. Each variant is a pure mapping from a
/// stored raw value to a derived value plus an editability flag; there is no
/// shared state between types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Date,
    Url,
    Email,
    Image,
    Checkbox,
    Select,
    Formula,
    Enrichment,
    Http,
    Message,
    Waterfall,
    Merge,
}

impl ColumnType {
    /// Whether cells of this type accept direct writes. Derived types
    /// (formula, merge, enrichment, http) are written only by their
    /// evaluation/execution paths.
    #[must_use]
    pub fn is_editable(self) -> bool {
        !matches!(
            self,
            ColumnType::Formula | ColumnType::Merge | ColumnType::Enrichment | ColumnType::Http
        )
    }
}

/// One choice in a SELECT column. Labels are unique within the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    pub color: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        SelectOption {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Which rows to keep when a deduplicating column collapses duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keep {
    Oldest,
    Newest,
}

/// Per-column deduplication rule. When active, rows sharing an equal cell
/// value in this column are collapsed to one after a data mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduplication {
    pub active: bool,
    pub keep: Keep,
}

/// Cross-sheet join configuration. A column carrying one of these is
/// read-only; its value is looked up in the source sheet by matching
/// `match_column_id` (this sheet) against `source_match_column_id` (source
/// sheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedColumn {
    pub source_sheet_id: String,
    pub source_column_id: String,
    pub match_column_id: String,
    pub source_match_column_id: String,
}

/// One template in a MERGE column. Templates are evaluated in order and the
/// first non-empty resolved result wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeInput {
    pub id: String,
    pub template: String,
    #[serde(default, rename = "useAI")]
    pub use_ai: bool,
}

/// A column definition inside a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduplication: Option<Deduplication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_http_request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_inputs: Option<Vec<MergeInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_column: Option<LinkedColumn>,
}

fn default_width() -> u32 {
    180
}

impl ColumnDef {
    /// Create a column with a given id, header and type; everything else
    /// defaulted.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>, ty: ColumnType) -> Self {
        ColumnDef {
            id: id.into(),
            header: header.into(),
            width: default_width(),
            ty,
            formula: None,
            default_value: None,
            options: None,
            deduplication: None,
            connected_agent_id: None,
            connected_http_request_id: None,
            description: None,
            header_color: None,
            pinned: None,
            hidden: None,
            merge_inputs: None,
            linked_column: None,
        }
    }

    /// Create a column with a generated id.
    #[must_use]
    pub fn generated(header: impl Into<String>, ty: ColumnType) -> Self {
        Self::new(Uuid::new_v4().to_string(), header, ty)
    }

    /// A linked column is read-only regardless of its declared type.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.linked_column.is_none() && self.ty.is_editable()
    }

    /// Whether deduplication is switched on for this column.
    #[must_use]
    pub fn dedupes(&self) -> bool {
        self.deduplication.is_some_and(|d| d.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editability() {
        assert!(ColumnType::Text.is_editable());
        assert!(ColumnType::Checkbox.is_editable());
        assert!(ColumnType::Message.is_editable());
        assert!(ColumnType::Waterfall.is_editable());
        assert!(!ColumnType::Formula.is_editable());
        assert!(!ColumnType::Merge.is_editable());
        assert!(!ColumnType::Enrichment.is_editable());
        assert!(!ColumnType::Http.is_editable());
    }

    #[test]
    fn test_linked_column_forces_read_only() {
        let mut col = ColumnDef::new("email", "Email", ColumnType::Text);
        assert!(col.is_editable());
        col.linked_column = Some(LinkedColumn {
            source_sheet_id: "s2".into(),
            source_column_id: "c1".into(),
            match_column_id: "email".into(),
            source_match_column_id: "email".into(),
        });
        assert!(!col.is_editable());
    }

    #[test]
    fn test_column_type_serde_tags() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Enrichment).unwrap(),
            "\"ENRICHMENT\""
        );
        let ty: ColumnType = serde_json::from_str("\"CHECKBOX\"").unwrap();
        assert_eq!(ty, ColumnType::Checkbox);
    }

    #[test]
    fn test_column_def_roundtrip() {
        let mut col = ColumnDef::new("amount", "Amount", ColumnType::Currency);
        col.deduplication = Some(Deduplication {
            active: true,
            keep: Keep::Newest,
        });
        let json = serde_json::to_string(&col).unwrap();
        let back: ColumnDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, col);
        assert!(back.dedupes());
    }
}
