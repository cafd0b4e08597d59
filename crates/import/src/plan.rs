//! Applying header matches to a sheet.
//!
//! Matches at or above the auto-apply threshold map source headers onto
//! existing columns. Everything else becomes a proposed new TEXT column;
//! below-threshold pairings are additionally surfaced for manual review.

use crate::csv::ImportedTable;
use crate::matcher::HeaderMatch;
use cellforge_model::{CellValue, ColumnDef, ColumnType, Row, Sheet};

/// The resolved destination of every source header.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    /// Source header -> existing column id, for auto-applied matches.
    pub mapped: Vec<(String, String)>,
    /// Proposed new columns, one per unmapped source header, in order.
    pub new_columns: Vec<ColumnDef>,
    /// Below-threshold pairings surfaced for manual review. Their source
    /// headers still get a new column unless the user intervenes.
    pub review: Vec<HeaderMatch>,
}

impl ImportPlan {
    /// The column id a source header's values land in.
    #[must_use]
    pub fn column_id_for(&self, source_header: &str) -> Option<&str> {
        if let Some((_, id)) = self.mapped.iter().find(|(s, _)| s == source_header) {
            return Some(id);
        }
        self.new_columns
            .iter()
            .find(|c| c.header == source_header)
            .map(|c| c.id.as_str())
    }
}

/// Decide where each matched source header lands on `sheet`.
#[must_use]
pub fn plan_import(matches: &[HeaderMatch], sheet: &Sheet, threshold: f64) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for m in matches {
        let target_column = m
            .target_header
            .as_deref()
            .and_then(|h| sheet.column_by_header(h));

        match target_column {
            Some(column) if m.confidence >= threshold => {
                plan.mapped
                    .push((m.source_header.clone(), column.id.clone()));
            }
            _ => {
                if m.target_header.is_some() {
                    plan.review.push(m.clone());
                }
                plan.new_columns
                    .push(ColumnDef::generated(m.source_header.clone(), ColumnType::Text));
            }
        }
    }

    plan
}

/// Build sparse rows from the imported records, keyed by the plan's column
/// ids. Empty fields stay absent.
#[must_use]
pub fn build_rows(plan: &ImportPlan, table: &ImportedTable) -> Vec<Row> {
    table
        .records
        .iter()
        .map(|record| {
            let mut row = Row::new();
            for (i, header) in table.headers.iter().enumerate() {
                let Some(value) = record.get(i) else { continue };
                if value.is_empty() {
                    continue;
                }
                if let Some(column_id) = plan.column_id_for(header) {
                    row.set(column_id.to_string(), CellValue::parse(value));
                }
            }
            row
        })
        .collect()
}

/// Apply a plan to the sheet: create the proposed columns, then append the
/// imported rows. Returns the number of rows added.
pub fn apply_import(sheet: &mut Sheet, plan: &ImportPlan, table: &ImportedTable) -> usize {
    for column in &plan.new_columns {
        // Ids are freshly generated; a collision would be a bug upstream.
        if sheet.add_column(column.clone()).is_err() {
            tracing::warn!(header = %column.header, "skipping import column with duplicate id");
        }
    }
    let rows = build_rows(plan, table);
    let added = rows.len();
    for row in rows {
        sheet.add_row(row);
    }
    added
}
