use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::card::{Card, TopLevelCard};
use super::check::{Validate, check_optional_in, require_items, require_type};
use super::values::supported_attachment_layout_values;
use super::*;
use crate::error::{CardError, ValidationResult};

/// The envelope posted to an incoming webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Only `carousel` renders more than one attachment in Teams.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attachment_layout: String,
    #[serde(skip)]
    payload: Option<Bytes>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            kind: TYPE_MESSAGE.to_string(),
            attachments: Vec::new(),
            attachment_layout: String::new(),
            payload: None,
        }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches cards in order. Every card is validated as a top-level card
    /// before any of them is added.
    pub fn attach(&mut self, cards: Vec<Card>) -> ValidationResult {
        let attachments: Vec<Attachment> = cards.into_iter().map(Attachment::new).collect();
        for attachment in &attachments {
            attachment.content.validate()?;
        }
        self.attachments.extend(attachments);
        Ok(())
    }

    /// Adds a mention to the first attachment, or attaches a fresh mention
    /// card when the message has none.
    pub fn mention(
        &mut self,
        prepend: bool,
        display_name: &str,
        id: &str,
        text: &str,
    ) -> ValidationResult {
        match self.attachments.first_mut() {
            Some(attachment) => attachment.content.mention(prepend, display_name, id, text),
            None => {
                let card = new_mention_card(display_name, id, text)?;
                self.attach(vec![card])
            }
        }
    }

    /// Validates and serializes the message, caching the bytes for
    /// [`Message::payload`]. Unchanged messages always produce the same bytes.
    pub fn prepare(&mut self) -> Result<Bytes, CardError> {
        self.validate()?;

        if self.attachments.len() > 1 && self.attachment_layout != ATTACHMENT_LAYOUT_CAROUSEL {
            warn!(
                attachments = self.attachments.len(),
                layout = %self.attachment_layout,
                "only the first attachment is rendered unless attachmentLayout is carousel"
            );
        }

        let payload = Bytes::from(serde_json::to_vec(self)?);
        debug!(bytes = payload.len(), "prepared message payload");
        self.payload = Some(payload.clone());
        Ok(payload)
    }

    /// Bytes cached by the last successful [`Message::prepare`].
    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Indented JSON of the prepared payload.
    pub fn pretty_print(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(self.payload.as_ref()?).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }
}

impl Validate for Message {
    fn validate(&self) -> ValidationResult {
        require_type(&self.kind, TYPE_MESSAGE, "message")?;
        require_items(&self.attachments, "Attachments", "Message")?;
        self.attachments.validate()?;
        check_optional_in(
            &self.attachment_layout,
            "AttachmentLayout",
            "Message",
            supported_attachment_layout_values(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    pub content: TopLevelCard,
}

impl Attachment {
    pub fn new(card: Card) -> Self {
        Self {
            content_type: ATTACHMENT_CONTENT_TYPE.to_string(),
            content_url: None,
            content: TopLevelCard(card),
        }
    }
}

impl Validate for Attachment {
    fn validate(&self) -> ValidationResult {
        require_type(&self.content_type, ATTACHMENT_CONTENT_TYPE, "attachment content")?;
        self.content.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tracing_test::traced_test;

    fn simple_card(text: &str) -> Card {
        let mut card = Card::new();
        card.body.push(new_text_block(text, true));
        card
    }

    #[test]
    fn empty_message_is_missing_attachments() {
        let err = Message::new().validate().expect_err("no attachments");
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn wrong_discriminators_are_invalid_type() {
        let mut msg = Message::new();
        msg.attach(vec![simple_card("hi")]).unwrap();
        msg.kind = "note".into();
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::InvalidType);

        msg.kind = TYPE_MESSAGE.into();
        msg.attachments[0].content_type = "application/json".into();
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn layout_is_checked() {
        let mut msg = Message::new();
        msg.attach(vec![simple_card("hi")]).unwrap();
        msg.attachment_layout = "grid".into();
        assert_eq!(
            msg.validate().unwrap_err().kind(),
            ErrorKind::InvalidFieldValue
        );
        msg.attachment_layout = ATTACHMENT_LAYOUT_CAROUSEL.into();
        msg.validate().unwrap();
    }

    #[test]
    fn attach_is_all_or_nothing() {
        let mut msg = Message::new();
        let mut unversioned = simple_card("b");
        unversioned.version.clear();
        let err = msg
            .attach(vec![simple_card("a"), unversioned])
            .expect_err("second card lacks version");
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn mention_on_empty_message_creates_card() {
        let mut msg = Message::new();
        msg.mention(false, "Ann", "ann@example.com", "hello").unwrap();
        assert_eq!(msg.attachments.len(), 1);
        let card = &msg.attachments[0].content;
        assert_eq!(card.body[0].text, "<at>Ann</at> hello");
        assert_eq!(card.mentions()[0].mentioned.name, "Ann");
        msg.validate().unwrap();
    }

    #[test]
    fn mention_uses_first_attachment() {
        let mut msg = Message::new();
        msg.attach(vec![simple_card("one"), simple_card("two")]).unwrap();
        msg.mention(false, "Ann", "ann", "fyi").unwrap();
        assert_eq!(msg.attachments[0].content.body.len(), 2);
        assert_eq!(msg.attachments[1].content.body.len(), 1);
    }

    #[test]
    fn prepare_caches_identical_bytes() {
        let mut msg = Message::new();
        assert!(msg.payload().is_none());
        assert!(msg.pretty_print().is_none());

        msg.attach(vec![simple_card("hi")]).unwrap();
        let first = msg.prepare().unwrap();
        let second = msg.prepare().unwrap();
        assert_eq!(first, second);
        assert_eq!(msg.payload(), Some(&first));

        let pretty = msg.pretty_print().unwrap();
        assert!(pretty.contains("\n  \"type\": \"message\""));
    }

    #[test]
    fn prepare_rejects_invalid_message() {
        let mut msg = Message::new();
        let err = msg.prepare().expect_err("invalid");
        assert!(matches!(err, CardError::Validation(_)));
        assert!(msg.payload().is_none());
    }

    #[test]
    #[traced_test]
    fn prepare_warns_about_hidden_attachments() {
        let mut msg = Message::new();
        msg.attach(vec![simple_card("a"), simple_card("b")]).unwrap();
        msg.prepare().unwrap();
        assert!(logs_contain("only the first attachment is rendered"));
    }

    #[test]
    fn serialized_shape() {
        let mut msg = Message::new();
        msg.attach(vec![simple_card("hi")]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&msg.prepare().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "message",
                "attachments": [{
                    "contentType": "application/vnd.microsoft.card.adaptive",
                    "content": {
                        "type": "AdaptiveCard",
                        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
                        "version": "1.5",
                        "body": [{ "type": "TextBlock", "text": "hi", "wrap": true }]
                    }
                }]
            })
        );
    }
}
