//! Pure logic for the `unique` validation rule.
//!
//! Parses rule descriptors, validates the identifiers that end up in SQL text,
//! and models the check outcome. Nothing here touches a database; query
//! execution lives in `uniqcheck-db`.

pub mod descriptor;
pub mod error;
pub mod identifier;
pub mod outcome;
pub mod validation;
pub mod value;
