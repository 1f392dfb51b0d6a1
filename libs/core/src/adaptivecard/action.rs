use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card::Card;
use super::check::{Validate, check_optional_in, require_value};
use super::values::{
    supported_action_values, supported_fallback_values, supported_select_action_values,
};
use super::{ADAPTIVE_CARD_MAX_VERSION, TYPE_ACTION_OPEN_URL, TYPE_ACTION_SHOW_CARD};
use crate::error::{ValidationError, ValidationResult};

/// An action rendered as a button in a card's action bar or an ActionSet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Required for `Action.OpenUrl`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback: String,
    /// Card revealed by `Action.ShowCard`; not allowed for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Box<Card>>,
    /// Payload merged into the inputs for `Action.Submit` / `Action.Execute`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Action {
    pub fn open_url(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: TYPE_ACTION_OPEN_URL.to_string(),
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn show_card(card: Card, title: impl Into<String>) -> Self {
        Self {
            kind: TYPE_ACTION_SHOW_CARD.to_string(),
            title: title.into(),
            card: Some(Box::new(card)),
            ..Default::default()
        }
    }
}

impl Validate for Action {
    fn validate(&self) -> ValidationResult {
        check_action_type(&self.kind, "Action", &supported_action_values(ADAPTIVE_CARD_MAX_VERSION))?;

        if self.kind == TYPE_ACTION_OPEN_URL {
            require_value(&self.url, "URL", TYPE_ACTION_OPEN_URL)?;
        }

        match (self.kind == TYPE_ACTION_SHOW_CARD, &self.card) {
            (true, None) => {
                return Err(ValidationError::missing_field("Card", TYPE_ACTION_SHOW_CARD));
            }
            (false, Some(_)) => {
                return Err(ValidationError::InvalidFieldValue(format!(
                    "Card field is only supported by {TYPE_ACTION_SHOW_CARD}, not {:?}",
                    self.kind
                )));
            }
            _ => {}
        }

        check_optional_in(
            &self.fallback,
            "Fallback",
            "Action",
            &supported_fallback_values(ADAPTIVE_CARD_MAX_VERSION),
        )?;

        self.card.validate()
    }
}

/// Action invoked when a Container, ColumnSet or Column is tapped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback: String,
}

impl SelectAction {
    pub fn open_url(url: impl Into<String>) -> Self {
        Self {
            kind: TYPE_ACTION_OPEN_URL.to_string(),
            url: url.into(),
            ..Default::default()
        }
    }
}

impl Validate for SelectAction {
    fn validate(&self) -> ValidationResult {
        check_action_type(
            &self.kind,
            "SelectAction",
            &supported_select_action_values(ADAPTIVE_CARD_MAX_VERSION),
        )?;

        if self.kind == TYPE_ACTION_OPEN_URL {
            require_value(&self.url, "URL", TYPE_ACTION_OPEN_URL)?;
        }

        check_optional_in(
            &self.fallback,
            "Fallback",
            "SelectAction",
            &supported_fallback_values(ADAPTIVE_CARD_MAX_VERSION),
        )
    }
}

fn check_action_type(kind: &str, owner: &str, legal: &[&str]) -> ValidationResult {
    if legal.contains(&kind) {
        Ok(())
    } else {
        Err(ValidationError::InvalidType(format!(
            "invalid {owner} type {kind:?}; expected one of {legal:?}"
        )))
    }
}
