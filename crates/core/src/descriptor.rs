//! Rule descriptor grammar.
//!
//! A descriptor names the table and column to search, plus an optional
//! exclusion pair that skips one row (the "unique except self" case on
//! update forms):
//!
//! ```text
//! <ruleName>:<table>,<column>
//! <ruleName>:<table>,<column>,<excludeColumn>,<excludeValue>
//! ```

use std::fmt;

use crate::error::CoreError;
use crate::identifier::Identifier;

/// Separator between the rule name and the descriptor body.
pub const RULE_NAME_SEPARATOR: char = ':';

/// Separator between descriptor tokens.
pub const TOKEN_SEPARATOR: char = ',';

/// A row to skip when counting matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub column: Identifier,
    /// Compared as text; never interpolated into SQL.
    pub value: String,
}

/// Parsed form of a `unique` rule descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub table: Identifier,
    pub column: Identifier,
    pub exclusion: Option<Exclusion>,
}

impl RuleDescriptor {
    /// Build a descriptor without an exclusion pair.
    ///
    /// The table may be schema-qualified; the column may not.
    pub fn new(table: &str, column: &str) -> Result<Self, CoreError> {
        Ok(Self {
            table: Identifier::parse(table)?,
            column: parse_column(column)?,
            exclusion: None,
        })
    }

    /// Skip the row whose `column` equals `value`.
    pub fn excluding(mut self, column: &str, value: impl Into<String>) -> Result<Self, CoreError> {
        self.exclusion = Some(Exclusion {
            column: parse_column(column)?,
            value: value.into(),
        });
        Ok(self)
    }

    /// Parse a raw descriptor such as `unique:users,email,id,1`.
    ///
    /// The `<rule_name>:` prefix is stripped when present; a descriptor
    /// without it is parsed as-is. The body must split into exactly two or
    /// exactly four tokens.
    pub fn parse(rule_name: &str, raw: &str) -> Result<Self, CoreError> {
        let prefix = format!("{rule_name}{RULE_NAME_SEPARATOR}");
        let body = raw.strip_prefix(prefix.as_str()).unwrap_or(raw);
        let tokens: Vec<&str> = body.split(TOKEN_SEPARATOR).collect();

        match tokens.as_slice() {
            [table, column] => Self::new(table, column),
            [table, column, exclude_column, exclude_value] => {
                Self::new(table, column)?.excluding(exclude_column, *exclude_value)
            }
            _ => Err(CoreError::InvalidDescriptor(format!(
                "expected 2 or 4 comma-separated tokens after '{prefix}', got {} in '{raw}'",
                tokens.len()
            ))),
        }
    }

    /// Render the full wire form, e.g. `unique:users,email`.
    pub fn to_rule_string(&self, rule_name: &str) -> String {
        format!("{rule_name}{RULE_NAME_SEPARATOR}{self}")
    }
}

fn parse_column(raw: &str) -> Result<Identifier, CoreError> {
    let column = Identifier::parse(raw)?;
    if column.is_qualified() {
        return Err(CoreError::InvalidIdentifier(format!(
            "column '{column}' must not be qualified"
        )));
    }
    Ok(column)
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.table, self.column)?;
        if let Some(exclusion) = &self.exclusion {
            write!(f, ",{},{}", exclusion.column, exclusion.value)?;
        }
        Ok(())
    }
}
