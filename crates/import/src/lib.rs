//! # cellforge-import
//!
//! The import pipeline: CSV ingestion, header matching (deterministic
//! normalization plus an LLM-backed fuzzy matcher with a fixed provider
//! fallback chain), and the planning step that maps matched headers onto a
//! sheet's columns and builds the imported rows.

mod csv;
mod error;
mod matcher;
mod normalize;
mod plan;

pub use crate::csv::{read_csv, read_csv_file, ImportedTable};
pub use error::{ImportError, ImportResult};
pub use matcher::{
    deterministic_matches, match_headers, HeaderMatch, MatchConfig,
    DEFAULT_AUTO_APPLY_THRESHOLD, MIN_CONFIDENCE,
};
pub use normalize::{compact_header, normalize_header};
pub use plan::{apply_import, build_rows, plan_import, ImportPlan};
