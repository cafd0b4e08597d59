//! Filter and search predicates over rows.
//!
//! Filters are flat condition sets combined with a single AND/OR combinator;
//! there is no nesting or per-pair grouping. Search is independent of
//! filters and ANDed with them. All comparisons are case-insensitive over
//! stringified cell values; null and absent cells stringify to "".

use cellforge_model::Row;
use serde::{Deserialize, Serialize};

/// Per-column comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    EqualTo,
    NotEqualTo,
    Contains,
    DoesNotContain,
    /// Comma-split list; matches when any entry is contained.
    ContainsAnyOf,
    DoesNotContainAnyOf,
    IsEmpty,
    IsNotEmpty,
}

/// One predicate against one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub col_id: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

/// How the conditions of a filter set combine. Uniform across the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

/// The active filter set. Zero conditions is a pass-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub combinator: Combinator,
}

/// Substring search, scoped to one column or to the whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Search {
    Column { col_id: String, query: String },
    Global { query: String },
}

/// Evaluate one condition against a row.
#[must_use]
pub fn condition_matches(row: &Row, condition: &FilterCondition) -> bool {
    let cell = row.text(&condition.col_id).to_lowercase();
    let needle = condition.value.to_lowercase();

    match condition.operator {
        FilterOperator::EqualTo => cell == needle,
        FilterOperator::NotEqualTo => cell != needle,
        FilterOperator::Contains => cell.contains(&needle),
        FilterOperator::DoesNotContain => !cell.contains(&needle),
        FilterOperator::ContainsAnyOf => any_of(&cell, &needle),
        FilterOperator::DoesNotContainAnyOf => !any_of(&cell, &needle),
        FilterOperator::IsEmpty => cell.is_empty(),
        FilterOperator::IsNotEmpty => !cell.is_empty(),
    }
}

fn any_of(cell: &str, list: &str) -> bool {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .any(|entry| cell.contains(entry))
}

/// Evaluate the whole filter set against a row.
#[must_use]
pub fn filter_matches(row: &Row, filter: &FilterState) -> bool {
    if filter.conditions.is_empty() {
        return true;
    }
    match filter.combinator {
        Combinator::And => filter
            .conditions
            .iter()
            .all(|c| condition_matches(row, c)),
        Combinator::Or => filter
            .conditions
            .iter()
            .any(|c| condition_matches(row, c)),
    }
}

/// Evaluate the search against a row. An empty query is a pass-through.
#[must_use]
pub fn search_matches(row: &Row, search: &Search) -> bool {
    match search {
        Search::Column { col_id, query } => {
            if query.is_empty() {
                return true;
            }
            row.text(col_id).to_lowercase().contains(&query.to_lowercase())
        }
        Search::Global { query } => {
            if query.is_empty() {
                return true;
            }
            let needle = query.to_lowercase();
            row.cells
                .values()
                .any(|v| v.as_str().to_lowercase().contains(&needle))
        }
    }
}

/// A row passes iff it passes the active search (if any) AND the filter set
/// (if any conditions exist).
#[must_use]
pub fn row_passes(row: &Row, filter: Option<&FilterState>, search: Option<&Search>) -> bool {
    search.map_or(true, |s| search_matches(row, s))
        && filter.map_or(true, |f| filter_matches(row, f))
}

/// Evaluate filters and search over a row list, preserving order.
#[must_use]
pub fn evaluate<'a>(
    rows: &'a [Row],
    filter: Option<&FilterState>,
    search: Option<&Search>,
) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| row_passes(row, filter, search))
        .collect()
}
