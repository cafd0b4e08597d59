use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw cell value as stored on a row.
///
/// Cells are sparse: an absent key reads as `Null`. Derived column types
/// (formula, merge, enrichment, ...) interpret the raw value; this type only
/// covers storage and coercion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Check if the value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the value stringifies to the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Stringify the value. Null stringifies to the empty string; this is
    /// the representation used by token resolution, filtering, linked-column
    /// matching and deduplication.
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Try to read the value as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Null => None,
        }
    }

    /// Checkbox coercion: `true`, `"true"`, `1`, `"1"` are checked,
    /// everything else is unchecked.
    #[must_use]
    pub fn as_checkbox(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n == 1.0,
            CellValue::Text(s) => {
                let t = s.trim();
                t.eq_ignore_ascii_case("true") || t == "1"
            }
            CellValue::Null => false,
        }
    }

    /// Parse free-text input into a `CellValue` with type inference.
    /// Tries: null -> bool -> number -> text. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        match trimmed {
            "true" => return CellValue::Bool(true),
            "false" => return CellValue::Bool(false),
            _ => {}
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        CellValue::Text(s.to_string())
    }
}

/// Render a number the way cells display it: integral values drop the
/// fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}
