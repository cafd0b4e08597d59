//! Cross-sheet linked column resolution.
//!
//! A linked column joins the current row to a row in another sheet: the
//! current row's match cell is compared (stringified, exact) against the
//! source sheet's match column, and the first matching source row supplies
//! the displayed value. Linked columns are read-only by invariant.

use cellforge_model::{CellValue, LinkedColumn, Row, Sheet};
use std::collections::HashMap;

/// Hash index over one source sheet's match column, for bulk resolution.
/// The first source row wins when match values collide.
pub struct LinkIndex {
    values: HashMap<String, CellValue>,
}

impl LinkIndex {
    /// Build an index mapping stringified match values to the source
    /// column's cell values.
    #[must_use]
    pub fn build(source: &Sheet, source_match_column_id: &str, source_column_id: &str) -> Self {
        let mut values = HashMap::with_capacity(source.rows.len());
        for row in &source.rows {
            let key = row.text(source_match_column_id);
            values
                .entry(key)
                .or_insert_with(|| row.get(source_column_id).clone());
        }
        LinkIndex { values }
    }

    /// Look up the linked value for one stringified match key.
    #[must_use]
    pub fn lookup(&self, match_value: &str) -> CellValue {
        self.values.get(match_value).cloned().unwrap_or(CellValue::Null)
    }
}

/// Resolve a linked column for a single row with a linear scan. Missing
/// source sheet or no matching source row both yield `Null`.
#[must_use]
pub fn resolve_linked(row: &Row, link: &LinkedColumn, sheets: &[Sheet]) -> CellValue {
    let Some(source) = sheets.iter().find(|s| s.id == link.source_sheet_id) else {
        return CellValue::Null;
    };
    let key = row.text(&link.match_column_id);
    source
        .rows
        .iter()
        .find(|s| s.text(&link.source_match_column_id) == key)
        .map(|s| s.get(&link.source_column_id).clone())
        .unwrap_or(CellValue::Null)
}

/// Resolve a linked column for every row of a sheet using a prebuilt index.
#[must_use]
pub fn resolve_linked_bulk(rows: &[Row], link: &LinkedColumn, sheets: &[Sheet]) -> Vec<CellValue> {
    let Some(source) = sheets.iter().find(|s| s.id == link.source_sheet_id) else {
        return vec![CellValue::Null; rows.len()];
    };
    let index = LinkIndex::build(source, &link.source_match_column_id, &link.source_column_id);
    rows.iter()
        .map(|row| index.lookup(&row.text(&link.match_column_id)))
        .collect()
}
