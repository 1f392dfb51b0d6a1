use bytes::Bytes;
use tnotify_core::adaptivecard::{self, Validate};
use tnotify_core::{CardError, ValidationResult, botapi};

/// A payload the webhook client knows how to check and serialize.
pub trait Notification {
    fn validate(&self) -> ValidationResult;

    /// Validates and serializes the payload, caching it on the value.
    fn prepare(&mut self) -> Result<Bytes, CardError>;
}

impl Notification for adaptivecard::Message {
    fn validate(&self) -> ValidationResult {
        Validate::validate(self)
    }

    fn prepare(&mut self) -> Result<Bytes, CardError> {
        adaptivecard::Message::prepare(self)
    }
}

impl Notification for botapi::Message {
    fn validate(&self) -> ValidationResult {
        Validate::validate(self)
    }

    fn prepare(&mut self) -> Result<Bytes, CardError> {
        botapi::Message::prepare(self)
    }
}
