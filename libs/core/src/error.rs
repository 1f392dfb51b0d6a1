use thiserror::Error;

/// Broad category of a validation failure.
///
/// Callers that only care about *why* something failed can match on the kind
/// instead of the full [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A discriminator or enum field holds a value outside its legal set.
    InvalidType,
    /// A field value failed a format, membership or range check.
    InvalidFieldValue,
    /// A required field or required non-empty collection is absent.
    MissingValue,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::InvalidFieldValue => "invalid_field_value",
            ErrorKind::MissingValue => "missing_value",
        }
    }
}

/// First failure found while validating a card document.
///
/// Validation is fail-fast: the walk stops at the first problem and returns it
/// with enough context (field, offending value, legal values) to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid type value: {0}")]
    InvalidType(String),
    #[error("invalid field value: {0}")]
    InvalidFieldValue(String),
    #[error("missing expected value: {0}")]
    MissingValue(String),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::InvalidType(_) => ErrorKind::InvalidType,
            ValidationError::InvalidFieldValue(_) => ErrorKind::InvalidFieldValue,
            ValidationError::MissingValue(_) => ErrorKind::MissingValue,
        }
    }

    /// Context attached to the failure, without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            ValidationError::InvalidType(detail)
            | ValidationError::InvalidFieldValue(detail)
            | ValidationError::MissingValue(detail) => detail,
        }
    }

    pub(crate) fn missing_field(field: &str, owner: &str) -> Self {
        ValidationError::MissingValue(format!("required {field} is empty for {owner}"))
    }

    pub(crate) fn empty_collection(field: &str, owner: &str) -> Self {
        ValidationError::MissingValue(format!(
            "required {field} collection is empty for {owner}"
        ))
    }

    pub(crate) fn unexpected_type(owner: &str, got: &str, expected: &str) -> Self {
        ValidationError::InvalidType(format!(
            "invalid {owner} type {got:?}; expected {expected:?}"
        ))
    }
}

/// Errors raised while turning a document into its wire payload.
#[derive(Debug, Error)]
pub enum CardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to serialize payload to JSON")]
    Serialize(#[from] serde_json::Error),
}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;
