//! Result of a uniqueness check.

use std::fmt;

use serde::Serialize;

/// The value already exists in the target column.
///
/// Displays the caller's custom message verbatim when one was supplied,
/// otherwise `The <field> has already been taken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateValue {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DuplicateValue {
    /// An empty `message` counts as no custom message.
    pub fn new(field: impl Into<String>, message: &str) -> Self {
        Self {
            field: field.into(),
            message: (!message.is_empty()).then(|| message.to_string()),
        }
    }
}

impl fmt::Display for DuplicateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "The {} has already been taken", self.field),
        }
    }
}

impl std::error::Error for DuplicateValue {}

/// Verdict of a count query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Unique,
    Duplicate(DuplicateValue),
}

impl CheckOutcome {
    /// Any positive count is a duplicate.
    pub fn from_count(count: i64, field: &str, message: &str) -> Self {
        if count > 0 {
            CheckOutcome::Duplicate(DuplicateValue::new(field, message))
        } else {
            CheckOutcome::Unique
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, CheckOutcome::Unique)
    }

    pub fn into_result(self) -> Result<(), DuplicateValue> {
        match self {
            CheckOutcome::Unique => Ok(()),
            CheckOutcome::Duplicate(dup) => Err(dup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_unique() {
        assert!(CheckOutcome::from_count(0, "email", "").is_unique());
    }

    #[test]
    fn positive_count_is_duplicate() {
        let outcome = CheckOutcome::from_count(3, "email", "");
        assert!(!outcome.is_unique());
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "The email has already been taken");
    }

    #[test]
    fn custom_message_verbatim() {
        let err = CheckOutcome::from_count(1, "email", "Email taken")
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Email taken");
        assert_eq!(err.field, "email");
    }

    #[test]
    fn empty_message_means_default() {
        let dup = DuplicateValue::new("username", "");
        assert!(dup.message.is_none());
        assert_eq!(dup.to_string(), "The username has already been taken");
    }

    #[test]
    fn serializes_without_empty_message() {
        let json = serde_json::to_value(DuplicateValue::new("email", "")).unwrap();
        assert_eq!(json, serde_json::json!({ "field": "email" }));
    }
}
