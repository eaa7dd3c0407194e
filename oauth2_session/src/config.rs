//! Central configuration for the oauth2_session crate
//!
//! Everything is read once at process start into [`AuthConfig`] and then handed
//! to the session layer and the identity provider client.

use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::oauth2::GoogleConfig;
use crate::session::SessionConfig;

#[derive(Debug, Error, Clone)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Process-wide configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session: SessionConfig,
    pub google: GoogleConfig,
}

impl AuthConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session = SessionConfig::from_lookup(&lookup)?;
        let google = GoogleConfig::from_lookup(&lookup)?;
        Ok(Self { session, google })
    }
}

pub(crate) fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) if value.is_empty() => Ok(default),
        Some(value) => {
            let normalized = value.trim().to_lowercase();
            normalized.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_or_default() {
        let lookup = |key: &str| match key {
            "NUM" => Some("42".to_string()),
            "FLAG" => Some("TRUE".to_string()),
            "EMPTY" => Some(String::new()),
            "BAD" => Some("x".to_string()),
            _ => None,
        };

        assert_eq!(parse_or_default(&lookup, "NUM", 0u64).unwrap(), 42);
        assert!(parse_or_default(&lookup, "FLAG", false).unwrap());
        assert_eq!(parse_or_default(&lookup, "EMPTY", 7u64).unwrap(), 7);
        assert_eq!(parse_or_default(&lookup, "UNSET", 9u64).unwrap(), 9);
        assert!(matches!(
            parse_or_default(&lookup, "BAD", 0u64),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_lookup_builds_both_sections() {
        let config = AuthConfig::from_lookup(|key| match key {
            "SESSION_SECRET" => Some("secret".to_string()),
            "GOOGLE_CLIENT_ID" => Some("client-id".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.google.client_id, "client-id");
        assert_eq!(config.google.client_secret, "");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        // Save the current environment variable value if it exists
        let original = env::var("SESSION_SECRET").ok();

        unsafe {
            env::set_var("SESSION_SECRET", "from-env");
        }
        let config = AuthConfig::from_env().expect("config should load");
        assert_eq!(config.session.secret, b"from-env".to_vec());

        unsafe {
            env::remove_var("SESSION_SECRET");
        }
        assert!(matches!(
            AuthConfig::from_env(),
            Err(ConfigError::MissingVar(_))
        ));

        // Restore the original value if it existed
        if let Some(value) = original {
            unsafe {
                env::set_var("SESSION_SECRET", value);
            }
        }
    }
}
