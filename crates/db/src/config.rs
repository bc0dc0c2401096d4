use std::time::Duration;

/// Errors raised while reading [`DbConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Database and rule configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
    /// How long a check waits for a pooled connection (default: `5`).
    pub acquire_timeout_secs: u64,
    /// Keyword that prefixes descriptors (default: `unique`).
    pub rule_name: String,
}

impl DbConfig {
    /// Load configuration from the process environment, reading `.env` first
    /// if present.
    ///
    /// | Env Var                         | Default    |
    /// |---------------------------------|------------|
    /// | `DATABASE_URL`                  | (required) |
    /// | `DATABASE_MAX_CONNECTIONS`      | `20`       |
    /// | `DATABASE_ACQUIRE_TIMEOUT_SECS` | `5`        |
    /// | `UNIQUE_RULE_NAME`              | `unique`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 20, "u32")?;
        let acquire_timeout_secs = parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5, "u64")?;

        let rule_name = lookup("UNIQUE_RULE_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unique".into());

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
            rule_name,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_applied() {
        let config = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/app")]))
            .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/app");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert_eq!(config.rule_name, "unique");
    }

    #[test]
    fn overrides_applied() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", " 2 "),
            ("UNIQUE_RULE_NAME", "unique_db"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout_secs, 2);
        assert_eq!(config.rule_name, "unique_db");
    }

    #[test]
    fn missing_url() {
        assert_matches!(
            DbConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn invalid_number() {
        assert_matches!(
            DbConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://db/app"),
                ("DATABASE_MAX_CONNECTIONS", "many"),
            ])),
            Err(ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. })
        );
    }

    #[test]
    fn blank_rule_name_falls_back() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("UNIQUE_RULE_NAME", "  "),
        ]))
        .unwrap();
        assert_eq!(config.rule_name, "unique");
    }
}
