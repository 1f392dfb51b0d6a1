use serde::{Deserialize, Serialize};

use super::check::{Validate, check_optional_in, require_items, require_type};
use super::element::Element;
use super::values::supported_container_style_values;
use super::{TYPE_TABLE_CELL, TYPE_TABLE_ROW};
use crate::error::ValidationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub cells: Vec<TableCell>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
}

impl Default for TableRow {
    fn default() -> Self {
        Self {
            kind: TYPE_TABLE_ROW.to_string(),
            cells: Vec::new(),
            style: String::new(),
        }
    }
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            ..Default::default()
        }
    }
}

impl Validate for TableRow {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_TABLE_ROW, "table row")?;
        check_optional_in(
            &self.style,
            "Style",
            TYPE_TABLE_ROW,
            supported_container_style_values(),
        )?;
        self.cells.validate()
    }
}

/// A table cell holds arbitrary elements, usually a single TextBlock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<Element>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            kind: TYPE_TABLE_CELL.to_string(),
            items: Vec::new(),
            style: String::new(),
        }
    }
}

impl TableCell {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

impl Validate for TableCell {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_TABLE_CELL, "table cell")?;
        require_items(&self.items, "Items", TYPE_TABLE_CELL)?;
        check_optional_in(
            &self.style,
            "Style",
            TYPE_TABLE_CELL,
            supported_container_style_values(),
        )?;
        self.items.validate()
    }
}
