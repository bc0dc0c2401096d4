//! The `unique` rule: fail validation when a value already exists in a
//! table column.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uniqcheck_core::descriptor::RuleDescriptor;
use uniqcheck_core::outcome::CheckOutcome;
use uniqcheck_core::value::RuleValue;

use crate::config::DbConfig;
use crate::error::UniqueRuleError;

/// Checks candidate values against a table column.
///
/// Holds a pool handle and the keyword that prefixes descriptors (usually
/// `unique`). Both are fixed at construction. Cloning is cheap; the pool is
/// shared.
#[derive(Debug, Clone)]
pub struct UniqueRule {
    pool: PgPool,
    rule_name: String,
}

impl UniqueRule {
    pub fn new(pool: PgPool, rule_name: impl Into<String>) -> Self {
        Self {
            pool,
            rule_name: rule_name.into(),
        }
    }

    /// Use the rule name from `UNIQUE_RULE_NAME` (see [`DbConfig`]).
    pub fn from_config(pool: PgPool, config: &DbConfig) -> Self {
        Self::new(pool, config.rule_name.clone())
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Check `value` against the table and column named by `rule`.
    ///
    /// `rule` is a descriptor such as `unique:users,email` or
    /// `unique:users,email,id,1`. On a duplicate the error text is `message`
    /// when non-empty, otherwise `The <field> has already been taken`.
    pub async fn check(
        &self,
        field: &str,
        rule: &str,
        message: &str,
        value: impl Into<RuleValue>,
    ) -> Result<(), UniqueRuleError> {
        let descriptor = RuleDescriptor::parse(&self.rule_name, rule)?;
        self.check_descriptor(field, &descriptor, message, value)
            .await
    }

    /// Same as [`check`](Self::check) with an already-parsed descriptor.
    pub async fn check_descriptor(
        &self,
        field: &str,
        descriptor: &RuleDescriptor,
        message: &str,
        value: impl Into<RuleValue>,
    ) -> Result<(), UniqueRuleError> {
        let value = value.into();
        let count = self.count_matches(descriptor, &value).await?;

        CheckOutcome::from_count(count, field, message)
            .into_result()
            .map_err(UniqueRuleError::from)
    }

    /// Number of rows whose column equals `value`, minus the excluded row.
    pub async fn count_matches(
        &self,
        descriptor: &RuleDescriptor,
        value: &RuleValue,
    ) -> Result<i64, sqlx::Error> {
        let mut query = build_count_query(descriptor, value);
        tracing::debug!(
            sql = query.sql(),
            table = %descriptor.table,
            column = %descriptor.column,
            value_kind = value.kind(),
            "Running unique check"
        );

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    error = %e,
                    table = %descriptor.table,
                    column = %descriptor.column,
                    "Unique check query failed"
                );
            })?;

        tracing::debug!(count, table = %descriptor.table, "Unique check counted rows");
        Ok(count)
    }
}

/// Build the `SELECT COUNT(*)` query for a descriptor.
///
/// Identifiers come from the validated descriptor and are written into the
/// SQL text; the candidate value and the exclusion value are always bound.
/// A null candidate is written as a literal `NULL` so it matches nothing
/// regardless of column type.
///
/// The exclusion value arrives as descriptor text. It is converted to the
/// excluded column's own type by populating a row of the table from it, so
/// `1` excludes a `NUMERIC` key stored as `1.00` and the key's index stays
/// usable.
pub fn build_count_query(
    descriptor: &RuleDescriptor,
    value: &RuleValue,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM ");
    query.push(&descriptor.table);
    query.push(" WHERE ");
    query.push(&descriptor.column);
    query.push(" = ");

    match value.clone() {
        RuleValue::Null => query.push("NULL"),
        RuleValue::Bool(b) => query.push_bind(b),
        RuleValue::Int(i) => query.push_bind(i),
        RuleValue::Float(f) => query.push_bind(f),
        RuleValue::Uuid(u) => query.push_bind(u),
        RuleValue::Text(s) => query.push_bind(s),
    };

    if let Some(exclusion) = &descriptor.exclusion {
        query.push(" AND ");
        query.push(&exclusion.column);
        query.push(" <> (json_populate_record(NULL::");
        query.push(&descriptor.table);
        query.push(", json_build_object('");
        query.push(&exclusion.column);
        query.push("', ");
        query.push_bind(exclusion.value.clone());
        query.push("::text))).");
        query.push(&exclusion.column);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(rule: &str, value: RuleValue) -> String {
        let descriptor = RuleDescriptor::parse("unique", rule).unwrap();
        build_count_query(&descriptor, &value).sql().to_string()
    }

    #[test]
    fn two_token_query() {
        assert_eq!(
            sql("unique:users,email", "a@x.com".into()),
            "SELECT COUNT(*) FROM users WHERE email = $1"
        );
    }

    #[test]
    fn exclusion_query() {
        assert_eq!(
            sql("unique:users,email,id,1", "a@x.com".into()),
            "SELECT COUNT(*) FROM users WHERE email = $1 AND id <> \
             (json_populate_record(NULL::users, json_build_object('id', $2::text))).id"
        );
    }

    #[test]
    fn null_value_not_bound() {
        assert_eq!(
            sql("unique:users,email,id,1", RuleValue::Null),
            "SELECT COUNT(*) FROM users WHERE email = NULL AND id <> \
             (json_populate_record(NULL::users, json_build_object('id', $1::text))).id"
        );
    }

    #[test]
    fn schema_qualified_table() {
        assert_eq!(
            sql("unique:auth.users,handle", 5_i64.into()),
            "SELECT COUNT(*) FROM auth.users WHERE handle = $1"
        );
    }
}
