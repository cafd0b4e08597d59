//! Column-type dispatch: derive the displayed/computed value of a cell from
//! its column's declared type, and validate direct writes.
//!
//! Each type is a pure mapping plus an editability flag. Coercion never
//! fails: invalid numeric/date/JSON input degrades to a safe value rather
//! than surfacing an error into the grid.

use crate::enrichment::{parse_enrichment, EnrichmentResult};
use crate::linked::resolve_linked;
use crate::resolve::resolve;
use cellforge_model::{
    palette_color, CellValue, ColumnDef, ColumnType, Row, SelectOption, Sheet,
};
use validator::{ValidateEmail, ValidateUrl};

/// Display text for an HTTP column with no connected request config.
pub const HTTP_UNCONFIGURED: &str = "unconfigured";

/// Fallback text for a merge column where no input resolves non-empty and
/// the cell holds no stored value.
pub const MERGE_NO_DATA: &str = "no data";

/// The derived value of a cell, after type dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedValue {
    Empty,
    Text(String),
    Number(f64),
    Currency(f64),
    Checkbox(bool),
    /// Image URL; broken images are a rendering concern.
    Image(String),
    /// URL with a non-enforcing validity hint.
    Link { url: String, valid: bool },
    /// Email address with a non-enforcing validity hint.
    Email { address: String, valid: bool },
    /// SELECT label plus the matching option, if the label is known.
    Select {
        label: String,
        option: Option<SelectOption>,
    },
    Enrichment(EnrichmentResult),
    /// HTTP column with no connected request config.
    Unconfigured,
}

impl DerivedValue {
    /// Flatten to display text.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            DerivedValue::Empty => String::new(),
            DerivedValue::Text(s) => s.clone(),
            DerivedValue::Number(n) => CellValue::Number(*n).as_str(),
            DerivedValue::Currency(n) => format!("${n:.2}"),
            DerivedValue::Checkbox(b) => b.to_string(),
            DerivedValue::Image(url) => url.clone(),
            DerivedValue::Link { url, .. } => url.clone(),
            DerivedValue::Email { address, .. } => address.clone(),
            DerivedValue::Select { label, .. } => label.clone(),
            DerivedValue::Enrichment(EnrichmentResult::Error(msg)) => msg.clone(),
            DerivedValue::Enrichment(EnrichmentResult::Ok(payload)) => payload
                .data
                .iter()
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => format!("{k}: {s}"),
                    other => format!("{k}: {other}"),
                })
                .collect::<Vec<_>>()
                .join(", "),
            DerivedValue::Unconfigured => HTTP_UNCONFIGURED.to_string(),
        }
    }
}

/// Derive the value of `(row, column)` within one sheet. Linked columns need
/// the other sheets of the vertical; use [`derive_cell`] for those.
#[must_use]
pub fn derive(row: &Row, column: &ColumnDef, columns: &[ColumnDef]) -> DerivedValue {
    let raw = row.get(&column.id);
    let text = raw.as_str();

    match column.ty {
        ColumnType::Text | ColumnType::Message | ColumnType::Waterfall | ColumnType::Date => {
            if text.is_empty() {
                DerivedValue::Empty
            } else {
                DerivedValue::Text(text)
            }
        }
        ColumnType::Number => match raw.as_number() {
            Some(n) => DerivedValue::Number(n),
            None if text.is_empty() => DerivedValue::Empty,
            // Invalid numeric input is kept, shown as raw text.
            None => DerivedValue::Text(text),
        },
        ColumnType::Currency => match raw.as_number() {
            Some(n) => DerivedValue::Currency(n),
            None if text.is_empty() => DerivedValue::Empty,
            None => DerivedValue::Text(text),
        },
        ColumnType::Url => {
            if text.is_empty() {
                DerivedValue::Empty
            } else {
                let valid = text.validate_url();
                DerivedValue::Link { url: text, valid }
            }
        }
        ColumnType::Email => {
            if text.is_empty() {
                DerivedValue::Empty
            } else {
                let valid = text.validate_email();
                DerivedValue::Email {
                    address: text,
                    valid,
                }
            }
        }
        ColumnType::Image => {
            if text.is_empty() {
                DerivedValue::Empty
            } else {
                DerivedValue::Image(text)
            }
        }
        ColumnType::Checkbox => DerivedValue::Checkbox(raw.as_checkbox()),
        ColumnType::Select => {
            if text.is_empty() {
                DerivedValue::Empty
            } else {
                let option = column
                    .options
                    .as_deref()
                    .and_then(|opts| opts.iter().find(|o| o.label == text).cloned());
                DerivedValue::Select {
                    label: text,
                    option,
                }
            }
        }
        ColumnType::Formula => match column.formula.as_deref() {
            Some(formula) if !formula.is_empty() => {
                DerivedValue::Text(resolve(formula, row, columns))
            }
            _ => DerivedValue::Empty,
        },
        ColumnType::Merge => DerivedValue::Text(merge_value(row, column, columns)),
        ColumnType::Enrichment => DerivedValue::Enrichment(parse_enrichment(&text)),
        ColumnType::Http => {
            if column.connected_http_request_id.is_none() {
                DerivedValue::Unconfigured
            } else if text.is_empty() {
                DerivedValue::Empty
            } else {
                DerivedValue::Text(text)
            }
        }
    }
}

/// Derive a cell, resolving linked columns against the vertical's sheets.
#[must_use]
pub fn derive_cell(
    row: &Row,
    column: &ColumnDef,
    columns: &[ColumnDef],
    sheets: &[Sheet],
) -> DerivedValue {
    if let Some(link) = &column.linked_column {
        let value = resolve_linked(row, link, sheets);
        return if value.is_empty() {
            DerivedValue::Empty
        } else {
            DerivedValue::Text(value.as_str())
        };
    }
    derive(row, column, columns)
}

/// Evaluate a MERGE column: first merge input whose resolved template is
/// non-empty after trimming wins; otherwise the stored raw value; otherwise
/// the "no data" marker.
#[must_use]
pub fn merge_value(row: &Row, column: &ColumnDef, columns: &[ColumnDef]) -> String {
    if let Some(inputs) = &column.merge_inputs {
        for input in inputs {
            let resolved = resolve(&input.template, row, columns);
            let trimmed = resolved.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    let stored = row.text(&column.id);
    if stored.trim().is_empty() {
        MERGE_NO_DATA.to_string()
    } else {
        stored
    }
}

/// Validate a direct write to a column. Returns `None` when the write is
/// rejected: read-only columns (derived types, linked columns) and SELECT
/// labels naming no option.
#[must_use]
pub fn prepare_write(column: &ColumnDef, input: &str) -> Option<CellValue> {
    if !column.is_editable() {
        return None;
    }
    match column.ty {
        ColumnType::Number | ColumnType::Currency => Some(CellValue::parse(input)),
        ColumnType::Checkbox => Some(CellValue::Bool(CellValue::parse(input).as_checkbox())),
        ColumnType::Select => {
            if input.is_empty() {
                return Some(CellValue::Null);
            }
            let known = column
                .options
                .as_deref()
                .is_some_and(|opts| opts.iter().any(|o| o.label == input));
            known.then(|| CellValue::Text(input.to_string()))
        }
        _ => {
            if input.is_empty() {
                Some(CellValue::Null)
            } else {
                Some(CellValue::Text(input.to_string()))
            }
        }
    }
}

/// The value a checkbox toggle writes back: the opposite of the current
/// coerced state, always as a real boolean.
#[must_use]
pub fn toggled(row: &Row, column: &ColumnDef) -> CellValue {
    CellValue::Bool(!row.get(&column.id).as_checkbox())
}

/// Auto-populate a SELECT column's options from current row values:
/// one option per distinct non-empty value, in first-seen row order, colors
/// assigned round-robin from the palette. A column that already has options
/// is left untouched, which also makes the conversion idempotent.
pub fn populate_select_options(column: &mut ColumnDef, rows: &[Row]) {
    if column.options.as_deref().is_some_and(|o| !o.is_empty()) {
        return;
    }

    let mut labels: Vec<String> = Vec::new();
    for row in rows {
        let value = row.text(&column.id);
        if value.is_empty() || labels.iter().any(|l| *l == value) {
            continue;
        }
        labels.push(value);
    }

    let options = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| SelectOption::new(label, palette_color(i)))
        .collect();
    column.options = Some(options);
}
