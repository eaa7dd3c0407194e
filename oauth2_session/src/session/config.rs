use std::fmt;

use crate::config::{ConfigError, parse_or_default};

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "sid";

/// Default lifetime of a session record and its cookie: one day.
pub const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 86400;

/// Upper bound for `SESSION_COOKIE_MAX_AGE`: 400 days, the longest browsers keep a cookie.
pub const MAX_SESSION_COOKIE_MAX_AGE: u64 = 400 * 86400;

/// Settings for the session cookie and its backing record.
#[derive(Clone)]
pub struct SessionConfig {
    /// Key used to sign the session cookie (`SESSION_SECRET`, required)
    pub secret: Vec<u8>,
    /// Cookie name (`SESSION_COOKIE_NAME`)
    pub cookie_name: String,
    /// Seconds until both cookie and record expire (`SESSION_COOKIE_MAX_AGE`)
    pub max_age: u64,
    /// Whether to mark the cookie `Secure` (`SESSION_COOKIE_SECURE`)
    pub secure: bool,
}

impl SessionConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("SESSION_SECRET".to_string()))?;

        let cookie_name = lookup("SESSION_COOKIE_NAME")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());

        let max_age = parse_or_default(
            lookup,
            "SESSION_COOKIE_MAX_AGE",
            DEFAULT_SESSION_COOKIE_MAX_AGE,
        )?;
        if max_age > MAX_SESSION_COOKIE_MAX_AGE {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_COOKIE_MAX_AGE".to_string(),
                value: max_age.to_string(),
            });
        }
        let secure = parse_or_default(lookup, "SESSION_COOKIE_SECURE", false)?;

        Ok(Self {
            secret: secret.into_bytes(),
            cookie_name,
            max_age,
            secure,
        })
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .finish()
    }
}
