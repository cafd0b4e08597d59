//! # cellforge-model
//!
//! Data model for the cellforge engine: verticals, sheets, typed column
//! definitions, sparse rows, and the agent / HTTP request configs scoped to
//! a sheet.
//!
//! All records serialize as plain JSON keyed by `id`; persistence is an
//! external concern. The model enforces the structural invariants (unique
//! column ids per sheet, unique option labels per SELECT column, read-only
//! derived columns) and nothing else; derivation semantics live in
//! `cellforge-engine`.
//!
//! # Examples
//!
//! ```
//! use cellforge_model::{CellValue, ColumnDef, ColumnType, Row, Sheet};
//!
//! let mut sheet = Sheet::new("Leads");
//! sheet.add_column(ColumnDef::new("name", "Name", ColumnType::Text)).unwrap();
//! sheet.add_column(ColumnDef::new("email", "Email", ColumnType::Email)).unwrap();
//!
//! let mut row = Row::new();
//! row.set("name", "Acme").set("email", "hello@acme.com");
//! sheet.add_row(row);
//!
//! assert_eq!(sheet.rows[0].text("name"), "Acme");
//! assert_eq!(sheet.rows[0].get("missing"), &CellValue::Null);
//! ```

mod agent;
mod cell;
mod column;
mod error;
mod http;
mod palette;
mod row;
mod sheet;
mod vertical;

pub use agent::{AgentConfig, Provider, RowsToDeploy};
pub use cell::CellValue;
pub use column::{
    ColumnDef, ColumnType, Deduplication, Keep, LinkedColumn, MergeInput, SelectOption,
};
pub use error::{ModelError, ModelResult};
pub use http::{ApiKeyPlacement, AuthConfig, HttpMethod, HttpRequestConfig};
pub use palette::{palette_color, SELECT_PALETTE};
pub use row::Row;
pub use sheet::Sheet;
pub use vertical::Vertical;
