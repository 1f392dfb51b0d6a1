use http::StatusCode;
use thiserror::Error;
use tnotify_core::{CardError, ValidationError};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid webhook URL")]
    InvalidUrl(#[source] url::ParseError),
    #[error("webhook URL does not match any accepted pattern")]
    UnexpectedUrl { host: Option<String> },
    #[error("invalid webhook URL pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("notification rejected before sending")]
    Notification(#[from] CardError),
    #[error("webhook transport error")]
    Transport(#[source] reqwest::Error),
    #[error("webhook returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected webhook response (status {status}): {body:?}")]
    UnexpectedResponse { status: StatusCode, body: String },
    #[error("delivery deadline exceeded after {attempts} attempt(s)")]
    DeadlineExceeded {
        attempts: u32,
        #[source]
        last: Option<Box<DeliveryError>>,
    },
}

impl DeliveryError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeliveryError::Transport(_) | DeliveryError::UnexpectedResponse { .. } => true,
            DeliveryError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Short label used for the `kind` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::InvalidUrl(_) => "invalid_url",
            DeliveryError::UnexpectedUrl { .. } => "unexpected_url",
            DeliveryError::InvalidPattern { .. } => "invalid_pattern",
            DeliveryError::Notification(_) => "notification",
            DeliveryError::Transport(_) => "transport",
            DeliveryError::Status { .. } => "status",
            DeliveryError::UnexpectedResponse { .. } => "unexpected_response",
            DeliveryError::DeadlineExceeded { .. } => "deadline",
        }
    }

    /// Underlying validation failure, if the notification was rejected.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            DeliveryError::Notification(CardError::Validation(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DeliveryError {
    fn from(err: ValidationError) -> Self {
        DeliveryError::Notification(CardError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> DeliveryError {
        DeliveryError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn retryable_statuses() {
        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
    }

    #[test]
    fn validation_is_final() {
        let err = DeliveryError::from(ValidationError::MissingValue("x".into()));
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), "notification");
        assert!(err.validation().is_some());
        assert!(!DeliveryError::UnexpectedUrl { host: None }.is_retryable());
    }
}
