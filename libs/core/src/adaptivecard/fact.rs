use serde::{Deserialize, Serialize};

use super::check::{Validate, require_value};
use crate::error::ValidationResult;

/// A title/value pair shown in tabular form inside a FactSet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

impl Fact {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }

    /// Whether either side of the fact contains `needle`.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.value.contains(needle)
    }
}

impl Validate for Fact {
    fn validate(&self) -> ValidationResult {
        require_value(&self.title, "Title", "Fact")?;
        require_value(&self.value, "Value", "Fact")
    }
}
