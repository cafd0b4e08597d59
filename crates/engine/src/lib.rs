//! # cellforge-engine
//!
//! Reference resolution and typed-cell computation over the cellforge data
//! model.
//!
//! The engine is deliberately infallible: coercion and parsing degrade to
//! safe defaults instead of erroring, so a bad cell can never corrupt the
//! grid. Fallible concerns (network, providers) live in `cellforge-http`
//! and `cellforge-llm`.
//!
//! # Examples
//!
//! ```
//! use cellforge_engine::{derive, resolve, DerivedValue};
//! use cellforge_model::{ColumnDef, ColumnType, Row};
//!
//! let mut formula = ColumnDef::new("greet", "Greeting", ColumnType::Formula);
//! formula.formula = Some("Hello /name!".to_string());
//! let columns = vec![
//!     ColumnDef::new("name", "Name", ColumnType::Text),
//!     formula.clone(),
//! ];
//!
//! let mut row = Row::new();
//! row.set("name", "Ada");
//!
//! assert_eq!(resolve("Hello /name!", &row, &columns), "Hello Ada!");
//! assert_eq!(
//!     derive(&row, &formula, &columns),
//!     DerivedValue::Text("Hello Ada!".to_string())
//! );
//! ```

mod dedup;
mod dispatch;
mod enrichment;
mod filter;
mod linked;
mod resolve;

pub use dedup::{dedupe_column, dedupe_rows, dedupe_sheet};
pub use dispatch::{
    derive, derive_cell, merge_value, populate_select_options, prepare_write, toggled,
    DerivedValue, HTTP_UNCONFIGURED, MERGE_NO_DATA,
};
pub use enrichment::{parse_enrichment, EnrichmentMetadata, EnrichmentPayload, EnrichmentResult};
pub use filter::{
    condition_matches, evaluate, filter_matches, row_passes, search_matches, Combinator,
    FilterCondition, FilterOperator, FilterState, Search,
};
pub use linked::{resolve_linked, resolve_linked_bulk, LinkIndex};
pub use resolve::{referenced_column_ids, resolve};
