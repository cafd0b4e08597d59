//! Column-scoped deduplication.
//!
//! When a column's deduplication rule is active, rows sharing an equal
//! (case-sensitive, stringified) value in that column collapse to one after
//! a data mutation. "Created" ordering is list position, not a timestamp.
//! Empty values never participate: sparse rows would otherwise collapse into
//! each other.

use cellforge_model::{ColumnDef, Keep, Row, Sheet};
use std::collections::{HashMap, HashSet};

/// Collapse duplicates in `rows` for one column. Returns the removed rows,
/// in their original order; kept rows preserve relative order.
pub fn dedupe_rows(rows: &mut Vec<Row>, column_id: &str, keep: Keep) -> Vec<Row> {
    let keep_indices: HashSet<usize> = match keep {
        Keep::Oldest => {
            let mut seen = HashSet::new();
            let mut kept = HashSet::new();
            for (i, row) in rows.iter().enumerate() {
                let value = row.text(column_id);
                if value.is_empty() || seen.insert(value) {
                    kept.insert(i);
                }
            }
            kept
        }
        Keep::Newest => {
            let mut last: HashMap<String, usize> = HashMap::new();
            let mut kept = HashSet::new();
            for (i, row) in rows.iter().enumerate() {
                let value = row.text(column_id);
                if value.is_empty() {
                    kept.insert(i);
                } else {
                    last.insert(value, i);
                }
            }
            kept.extend(last.into_values());
            kept
        }
    };

    let mut removed = Vec::new();
    let mut kept_rows = Vec::with_capacity(keep_indices.len());
    for (i, row) in rows.drain(..).enumerate() {
        if keep_indices.contains(&i) {
            kept_rows.push(row);
        } else {
            removed.push(row);
        }
    }
    *rows = kept_rows;
    removed
}

/// Apply one column's deduplication rule if it is active. No-op otherwise.
pub fn dedupe_column(rows: &mut Vec<Row>, column: &ColumnDef) -> Vec<Row> {
    match column.deduplication {
        Some(dedup) if dedup.active => dedupe_rows(rows, &column.id, dedup.keep),
        _ => Vec::new(),
    }
}

/// Run every active deduplication rule of a sheet, in column order. Columns
/// deduplicate independently of each other.
pub fn dedupe_sheet(sheet: &mut Sheet) -> Vec<Row> {
    let rules: Vec<(String, Keep)> = sheet
        .columns
        .iter()
        .filter_map(|c| {
            c.deduplication
                .filter(|d| d.active)
                .map(|d| (c.id.clone(), d.keep))
        })
        .collect();

    let mut removed = Vec::new();
    for (column_id, keep) in rules {
        removed.extend(dedupe_rows(&mut sheet.rows, &column_id, keep));
    }
    removed
}
