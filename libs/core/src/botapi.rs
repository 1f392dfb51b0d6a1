//! Plain text message with user mentions, the smallest payload Teams
//! webhooks accept besides cards.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::adaptivecard::{Mention, TYPE_MESSAGE, Validate};
use crate::error::{CardError, ValidationError, ValidationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Mention>,
    #[serde(skip)]
    payload: Option<Bytes>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            kind: TYPE_MESSAGE.to_string(),
            text: String::new(),
            entities: Vec::new(),
            payload: None,
        }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` verbatim to the message text.
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Records a mention and places its `<at>` token at the start or end of
    /// the text, separated by a space.
    pub fn mention(&mut self, display_name: &str, id: &str, prepend: bool) -> ValidationResult {
        let mention = Mention::new(display_name, id)?;
        self.text = match (self.text.is_empty(), prepend) {
            (true, _) => mention.text.clone(),
            (false, true) => format!("{} {}", mention.text, self.text),
            (false, false) => format!("{} {}", self.text, mention.text),
        };
        self.entities.push(mention);
        Ok(())
    }

    pub fn prepare(&mut self) -> Result<Bytes, CardError> {
        self.validate()?;
        let payload = Bytes::from(serde_json::to_vec(self)?);
        self.payload = Some(payload.clone());
        Ok(payload)
    }

    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    pub fn pretty_print(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(self.payload.as_ref()?).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }
}

impl Validate for Message {
    fn validate(&self) -> ValidationResult {
        if self.kind != TYPE_MESSAGE {
            return Err(ValidationError::InvalidType(format!(
                "invalid message type {:?}; expected {TYPE_MESSAGE:?}",
                self.kind
            )));
        }
        if self.text.is_empty() {
            return Err(ValidationError::MissingValue(
                "required Text is empty for message".into(),
            ));
        }
        if self.entities.is_empty() {
            return Err(ValidationError::MissingValue(
                "required Entities collection is empty for message".into(),
            ));
        }
        for mention in &self.entities {
            mention.validate()?;
            if !self.text.contains(&mention.text) {
                return Err(ValidationError::MissingValue(format!(
                    "mention text {:?} not found in message text",
                    mention.text
                )));
            }
        }
        Ok(())
    }
}
