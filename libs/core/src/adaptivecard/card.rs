use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::Action;
use super::check::{Validate, check_optional_in, require_type};
use super::element::Element;
use super::mention::{Mention, MsTeams};
use super::values::supported_vertical_content_alignment_values;
use super::width::is_pixel_value;
use super::*;
use crate::error::{ValidationError, ValidationResult};

/// An Adaptive Card. Used both as a message attachment (see [`TopLevelCard`])
/// and nested inside `Action.ShowCard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "$schema", default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback_text: String,
    #[serde(default)]
    pub body: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "MsTeams::is_empty")]
    pub msteams: MsTeams,
    /// Pixel value such as `50px`; needs `vertical_content_alignment`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub min_height: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vertical_content_alignment: String,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            kind: TYPE_ADAPTIVE_CARD.to_string(),
            schema: ADAPTIVE_CARD_SCHEMA.to_string(),
            version: format_version(ADAPTIVE_CARD_MAX_VERSION),
            fallback_text: String::new(),
            body: Vec::new(),
            actions: Vec::new(),
            msteams: MsTeams::default(),
            min_height: String::new(),
            vertical_content_alignment: String::new(),
        }
    }
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mentions recorded in the Teams metadata block.
    pub fn mentions(&self) -> &[Mention] {
        &self.msteams.entities
    }

    pub fn add_element(&mut self, prepend: bool, elements: Vec<Element>) -> ValidationResult {
        elements.validate()?;
        insert_all(&mut self.body, prepend, elements);
        Ok(())
    }

    pub fn add_container(&mut self, prepend: bool, container: Element) -> ValidationResult {
        require_type(&container.kind, TYPE_ELEMENT_CONTAINER, "container")?;
        container.validate()?;
        insert_all(&mut self.body, prepend, vec![container]);
        Ok(())
    }

    pub fn add_action(&mut self, prepend: bool, actions: Vec<Action>) -> ValidationResult {
        actions.validate()?;
        insert_all(&mut self.actions, prepend, actions);
        Ok(())
    }

    /// Records mentions without touching the body; the caller must make sure
    /// each mention's text shows up somewhere in it.
    pub fn add_mention(&mut self, prepend: bool, mentions: Vec<Mention>) -> ValidationResult {
        mentions.validate()?;
        insert_all(&mut self.msteams.entities, prepend, mentions);
        Ok(())
    }

    /// Adds a TextBlock reading `<at>display_name</at> text` and the matching
    /// mention record. Nothing changes if the name or id is empty.
    pub fn mention(
        &mut self,
        prepend: bool,
        display_name: &str,
        id: &str,
        text: &str,
    ) -> ValidationResult {
        let mention = Mention::new(display_name, id)?;
        let block = new_text_block(&format!("{} {text}", mention.text), true);
        block.validate()?;

        insert_all(&mut self.body, prepend, vec![block]);
        self.msteams.entities.push(mention);
        Ok(())
    }

    fn check_layout(&self) -> ValidationResult {
        if self.min_height.is_empty() {
            return check_optional_in(
                &self.vertical_content_alignment,
                "VerticalContentAlignment",
                TYPE_ADAPTIVE_CARD,
                supported_vertical_content_alignment_values(),
            );
        }
        if !is_pixel_value(&self.min_height) {
            return Err(ValidationError::InvalidFieldValue(format!(
                "invalid MinHeight {:?} for {TYPE_ADAPTIVE_CARD}; expected pixel value (e.g. {PIXEL_WIDTH_EXAMPLE})",
                self.min_height
            )));
        }
        if self.vertical_content_alignment.is_empty() {
            return Err(ValidationError::MissingValue(format!(
                "VerticalContentAlignment is required when MinHeight is set for {TYPE_ADAPTIVE_CARD}"
            )));
        }
        check_optional_in(
            &self.vertical_content_alignment,
            "VerticalContentAlignment",
            TYPE_ADAPTIVE_CARD,
            supported_vertical_content_alignment_values(),
        )
    }

    fn check_mentions_reachable(&self) -> ValidationResult {
        let mentions = self.mentions();
        if mentions.is_empty() {
            return Ok(());
        }
        if self.body.is_empty() {
            return Err(ValidationError::MissingValue(format!(
                "{} mention(s) recorded but card body is empty",
                mentions.len()
            )));
        }
        for mention in mentions {
            if !self.body.iter().any(|element| element.contains_mention_text(mention)) {
                return Err(ValidationError::MissingValue(format!(
                    "mention text {:?} not found in card body",
                    mention.text
                )));
            }
        }
        Ok(())
    }
}

impl Validate for Card {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_ADAPTIVE_CARD, "card")?;
        if !self.schema.is_empty() && self.schema != ADAPTIVE_CARD_SCHEMA {
            return Err(ValidationError::InvalidFieldValue(format!(
                "invalid $schema {:?}; expected {ADAPTIVE_CARD_SCHEMA:?}",
                self.schema
            )));
        }
        self.check_layout()?;
        self.body.validate()?;
        self.actions.validate()?;
        self.msteams.validate()?;
        self.check_mentions_reachable()
    }
}

fn insert_all<T>(target: &mut Vec<T>, prepend: bool, values: Vec<T>) {
    if prepend {
        target.splice(0..0, values);
    } else {
        target.extend(values);
    }
}

/// A card attached directly to a message; unlike nested cards it must
/// declare a supported schema version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopLevelCard(pub Card);

impl TopLevelCard {
    pub fn into_inner(self) -> Card {
        self.0
    }

    fn check_version(&self) -> ValidationResult {
        if self.version.is_empty() {
            return Err(ValidationError::MissingValue(
                "card version is required for top-level cards".into(),
            ));
        }
        let version = parse_version(&self.version).ok_or_else(|| {
            ValidationError::InvalidFieldValue(format!(
                "unable to parse card version {:?}",
                self.version
            ))
        })?;
        if version < ADAPTIVE_CARD_MIN_VERSION {
            return Err(ValidationError::InvalidFieldValue(format!(
                "card version {} is below minimum supported version {}",
                self.version,
                format_version(ADAPTIVE_CARD_MIN_VERSION)
            )));
        }
        if version > ADAPTIVE_CARD_MAX_VERSION {
            debug!(
                version = %self.version,
                max = %format_version(ADAPTIVE_CARD_MAX_VERSION),
                "card version newer than known maximum"
            );
        }
        // Execute only exists from 1.4 on.
        if version < ACTION_EXECUTE_MIN_CARD_VERSION
            && self.actions.iter().any(|action| action.kind == TYPE_ACTION_EXECUTE)
        {
            return Err(ValidationError::InvalidFieldValue(format!(
                "{TYPE_ACTION_EXECUTE} requires card version {} or later, got {}",
                format_version(ACTION_EXECUTE_MIN_CARD_VERSION),
                self.version
            )));
        }
        Ok(())
    }
}

impl From<Card> for TopLevelCard {
    fn from(card: Card) -> Self {
        TopLevelCard(card)
    }
}

impl Deref for TopLevelCard {
    type Target = Card;

    fn deref(&self) -> &Card {
        &self.0
    }
}

impl DerefMut for TopLevelCard {
    fn deref_mut(&mut self) -> &mut Card {
        &mut self.0
    }
}

impl Validate for TopLevelCard {
    fn validate(&self) -> ValidationResult {
        self.0.validate()?;
        self.check_version()
    }
}
