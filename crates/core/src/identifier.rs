//! SQL identifiers that are safe to interpolate into query text.
//!
//! Table and column names cannot be bound as query parameters, so they are
//! written into the SQL string directly. Every name passes through
//! [`Identifier::parse`] first; values never do and are always bound.
//!
//! Names are written unquoted, so PostgreSQL folds them to lowercase. Parsing
//! applies the same folding: `Users` and `users` name the same table, and a
//! table created as `"Users"` (quoted, mixed case) cannot be addressed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a single identifier part (PostgreSQL `NAMEDATALEN - 1`).
pub const MAX_IDENTIFIER_PART_LENGTH: usize = 63;

/// Regex pattern for a bare identifier, optionally schema-qualified.
pub const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$";

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A validated table or column name, e.g. `users` or `auth.users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `raw` as an identifier. Surrounding ASCII whitespace is
    /// trimmed and ASCII letters are folded to lowercase.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "Identifier must not be empty".to_string(),
            ));
        }
        if !IDENTIFIER_RE.is_match(name) {
            return Err(CoreError::InvalidIdentifier(format!(
                "'{name}' is not a plain SQL identifier"
            )));
        }
        if let Some(part) = name
            .split('.')
            .find(|part| part.len() > MAX_IDENTIFIER_PART_LENGTH)
        {
            return Err(CoreError::InvalidIdentifier(format!(
                "'{part}' exceeds maximum length of {MAX_IDENTIFIER_PART_LENGTH} bytes"
            )));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }

    /// Whether the name carries a schema, e.g. `auth.users`.
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
