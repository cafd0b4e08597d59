use crate::sheet::Sheet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level workspace grouping multiple sheets. Deleting a vertical drops
/// its sheets (and their rows) with it; ownership is the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertical {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Vertical {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Vertical {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            sheets: Vec::new(),
        }
    }

    /// Look up a sheet by id.
    #[must_use]
    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    /// Remove a sheet by id. Returns whether a sheet was removed.
    pub fn delete_sheet(&mut self, id: &str) -> bool {
        let before = self.sheets.len();
        self.sheets.retain(|s| s.id != id);
        self.sheets.len() != before
    }
}
