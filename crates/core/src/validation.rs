//! Conversion of duplicate verdicts into `validator` errors, so the rule
//! slots into structs validated with `#[derive(Validate)]`.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::outcome::DuplicateValue;

/// Error code attached to every duplicate verdict.
pub const UNIQUE_ERROR_CODE: &str = "unique";

impl From<DuplicateValue> for ValidationError {
    fn from(dup: DuplicateValue) -> Self {
        let mut err = ValidationError::new(UNIQUE_ERROR_CODE);
        err.message = Some(Cow::Owned(dup.to_string()));
        err.add_param(Cow::Borrowed("field"), &dup.field);
        err
    }
}

impl DuplicateValue {
    /// Wrap this verdict as a single-field [`ValidationErrors`] map.
    ///
    /// `validator` keys its map by static field names, the same names
    /// `#[derive(Validate)]` uses, so the key is supplied by the caller.
    pub fn into_validation_errors(self, field: &'static str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add(field, self.into());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_message_carried() {
        let err: ValidationError = DuplicateValue::new("email", "").into();
        assert_eq!(err.code, UNIQUE_ERROR_CODE);
        assert_eq!(
            err.message.as_deref(),
            Some("The email has already been taken")
        );
        assert_eq!(err.params["field"], serde_json::json!("email"));
    }

    #[test]
    fn custom_message_carried() {
        let err: ValidationError = DuplicateValue::new("email", "Email taken").into();
        assert_eq!(err.message.as_deref(), Some("Email taken"));
    }

    #[test]
    fn keyed_by_field() {
        let errors = DuplicateValue::new("handle", "").into_validation_errors("handle");
        let field_errors = errors.field_errors();
        let handle = field_errors.get("handle").expect("handle errors");
        assert_eq!(handle.len(), 1);
        assert_eq!(handle[0].code, UNIQUE_ERROR_CODE);
        assert_eq!(
            handle[0].message.as_deref(),
            Some("The handle has already been taken")
        );
    }
}
