use crate::error::{ValidationError, ValidationResult};

/// Implemented by every node that can check its own fields.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> ValidationResult {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> ValidationResult {
        self.as_slice().validate()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> ValidationResult {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> ValidationResult {
        (**self).validate()
    }
}

pub(crate) fn require_type(got: &str, expected: &str, owner: &str) -> ValidationResult {
    if got == expected {
        Ok(())
    } else {
        Err(ValidationError::unexpected_type(owner, got, expected))
    }
}

pub(crate) fn require_value(value: &str, field: &str, owner: &str) -> ValidationResult {
    if value.is_empty() {
        Err(ValidationError::missing_field(field, owner))
    } else {
        Ok(())
    }
}

pub(crate) fn require_items<T>(items: &[T], field: &str, owner: &str) -> ValidationResult {
    if items.is_empty() {
        Err(ValidationError::empty_collection(field, owner))
    } else {
        Ok(())
    }
}

/// Membership check that only applies when the field is set.
pub(crate) fn check_optional_in(
    value: &str,
    field: &str,
    owner: &str,
    legal: &[&str],
) -> ValidationResult {
    if value.is_empty() || legal.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFieldValue(format!(
            "invalid {field} {value:?} for {owner}; expected one of {legal:?}"
        )))
    }
}
