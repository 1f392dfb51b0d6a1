use serde::{Deserialize, Serialize};

use super::check::{Validate, check_optional_in, require_type, require_value};
use super::values::supported_msteams_width_values;
use super::{MENTION_TEXT_CLOSE, MENTION_TEXT_OPEN, TYPE_MENTION, mention_text};
use crate::error::{ValidationError, ValidationResult};

/// Teams specific card properties: layout hints and user mentions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsTeams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
    /// Lets images open in stage view.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_expand: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Mention>,
}

impl MsTeams {
    /// True when nothing would be emitted for this block.
    pub fn is_empty(&self) -> bool {
        self.width.is_empty() && !self.wrap && !self.allow_expand && self.entities.is_empty()
    }
}

impl Validate for MsTeams {
    fn validate(&self) -> ValidationResult {
        check_optional_in(
            &self.width,
            "Width",
            "MSTeams",
            supported_msteams_width_values(),
        )?;
        self.entities.validate()
    }
}

/// A user mention; `text` must also appear somewhere in the card body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub mentioned: Mentioned,
}

impl Mention {
    /// Builds a mention for `display_name`, failing when the name or id is empty.
    pub fn new(display_name: &str, id: &str) -> ValidationResult<Self> {
        let mentioned = Mentioned {
            id: id.to_string(),
            name: display_name.to_string(),
        };
        mentioned.validate()?;
        Ok(Self {
            kind: TYPE_MENTION.to_string(),
            text: mention_text(display_name),
            mentioned,
        })
    }
}

impl Validate for Mention {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_MENTION, "mention")?;
        require_value(&self.text, "Text", "Mention")?;
        if !(self.text.starts_with(MENTION_TEXT_OPEN) && self.text.ends_with(MENTION_TEXT_CLOSE))
            || self.text.len() <= MENTION_TEXT_OPEN.len() + MENTION_TEXT_CLOSE.len()
        {
            return Err(ValidationError::InvalidFieldValue(format!(
                "invalid Text {:?} for Mention; expected format {:?}",
                self.text,
                mention_text("NAME")
            )));
        }
        self.mentioned.validate()?;
        let expected = mention_text(&self.mentioned.name);
        if self.text != expected {
            return Err(ValidationError::InvalidFieldValue(format!(
                "invalid Text {:?} for Mention; expected {expected:?} to match the mentioned name",
                self.text
            )));
        }
        Ok(())
    }
}

/// The id and display name of a mentioned user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mentioned {
    /// Object id or user principal name, e.g. `user@contoso.onmicrosoft.com`.
    pub id: String,
    pub name: String,
}

impl Validate for Mentioned {
    fn validate(&self) -> ValidationResult {
        require_value(&self.id, "ID", "Mentioned")?;
        require_value(&self.name, "Name", "Mentioned")
    }
}
