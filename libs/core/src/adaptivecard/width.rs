use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{COLUMN_WIDTH_AUTO, COLUMN_WIDTH_STRETCH, PIXEL_WIDTH_EXAMPLE, PIXEL_WIDTH_PATTERN};
use crate::error::{ValidationError, ValidationResult};

static PIXEL_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(PIXEL_WIDTH_PATTERN).expect("pixel width pattern must compile"));

pub(crate) fn is_pixel_value(value: &str) -> bool {
    PIXEL_WIDTH.is_match(value)
}

/// Width of a column: a keyword, a relative weight or a fixed pixel size.
///
/// Serialized untagged: keywords and pixel sizes as strings, weights as
/// integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnWidth {
    Auto,
    Stretch,
    /// Relative weight against sibling columns; any value is accepted.
    Weight(i64),
    /// Fixed size such as `50px`.
    Pixels(String),
}

impl ColumnWidth {
    pub fn pixels(px: u32) -> Self {
        ColumnWidth::Pixels(format!("{px}px"))
    }

    /// Parses the string forms; integers must be given as [`ColumnWidth::Weight`].
    pub fn parse(value: &str) -> ValidationResult<Self> {
        match value {
            COLUMN_WIDTH_AUTO => Ok(ColumnWidth::Auto),
            COLUMN_WIDTH_STRETCH => Ok(ColumnWidth::Stretch),
            px if is_pixel_value(px) => Ok(ColumnWidth::Pixels(px.to_string())),
            other => Err(invalid_width(other)),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        match self {
            ColumnWidth::Pixels(px) if !is_pixel_value(px) => Err(invalid_width(px)),
            _ => Ok(()),
        }
    }
}

fn invalid_width(value: &str) -> ValidationError {
    ValidationError::InvalidFieldValue(format!(
        "invalid column width {value:?}; expected one of keywords \"{COLUMN_WIDTH_AUTO}\", \
         \"{COLUMN_WIDTH_STRETCH}\", an integer weight (e.g. 1) or a pixel width \
         (e.g. {PIXEL_WIDTH_EXAMPLE})"
    ))
}

impl FromStr for ColumnWidth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnWidth::parse(s)
    }
}

impl From<i64> for ColumnWidth {
    fn from(weight: i64) -> Self {
        ColumnWidth::Weight(weight)
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Auto => f.write_str(COLUMN_WIDTH_AUTO),
            ColumnWidth::Stretch => f.write_str(COLUMN_WIDTH_STRETCH),
            ColumnWidth::Weight(weight) => write!(f, "{weight}"),
            ColumnWidth::Pixels(px) => f.write_str(px),
        }
    }
}

impl Serialize for ColumnWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColumnWidth::Weight(weight) => serializer.serialize_i64(*weight),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WidthVisitor;

        impl Visitor<'_> for WidthVisitor {
            type Value = ColumnWidth;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"auto\", \"stretch\", an integer or a pixel width like \"50px\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ColumnWidth::Weight(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(ColumnWidth::Weight)
                    .map_err(|_| E::custom(format!("column weight {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                ColumnWidth::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(WidthVisitor)
    }
}
