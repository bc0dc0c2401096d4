use uniqcheck_core::error::CoreError;
use uniqcheck_core::outcome::DuplicateValue;
use validator::ValidationError;

/// Failure modes of [`UniqueRule::check`](crate::unique_rule::UniqueRule::check).
#[derive(Debug, thiserror::Error)]
pub enum UniqueRuleError {
    /// The descriptor did not parse; no query was issued.
    #[error(transparent)]
    InvalidDescriptor(#[from] CoreError),

    /// The count query failed. Carries the driver error unchanged.
    #[error(transparent)]
    Query(#[from] sqlx::Error),

    /// The value already exists.
    #[error(transparent)]
    Duplicate(#[from] DuplicateValue),
}

impl UniqueRuleError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, UniqueRuleError::Duplicate(_))
    }

    /// The validation-level error for a duplicate verdict; `None` for
    /// descriptor and query failures, which are not user-facing.
    pub fn into_validation_error(self) -> Option<ValidationError> {
        match self {
            UniqueRuleError::Duplicate(dup) => Some(dup.into()),
            _ => None,
        }
    }
}
