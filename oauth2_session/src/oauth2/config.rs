use std::fmt;
use std::time::Duration;
use url::Url;

use crate::config::{ConfigError, parse_or_default};

use super::errors::OAuth2Error;

pub(crate) const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub(crate) const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub(crate) const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

pub(crate) const GOOGLE_SCOPES: &[&str] = &["profile", "email"];

/// Callback path registered with the provider. Relative, resolved per request.
pub const DEFAULT_CALLBACK_URL: &str = "/auth/google/callback";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoints for the Google identity provider
#[derive(Clone)]
pub struct GoogleConfig {
    /// `GOOGLE_CLIENT_ID`, empty when unset
    pub client_id: String,
    /// `GOOGLE_CLIENT_SECRET`, empty when unset
    pub client_secret: String,
    /// `GOOGLE_CALLBACK_URL`, absolute or relative to the server origin
    pub callback_url: String,
    /// `ORIGIN`, base for a relative callback url
    pub origin: Option<Url>,
    pub auth_url: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
    pub http_timeout: Duration,
}

impl GoogleConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("GOOGLE_CLIENT_ID").unwrap_or_default();
        let client_secret = lookup("GOOGLE_CLIENT_SECRET").unwrap_or_default();
        if client_id.is_empty() || client_secret.is_empty() {
            tracing::warn!(
                "GOOGLE_CLIENT_ID or GOOGLE_CLIENT_SECRET is empty; the provider will reject logins"
            );
        }

        let callback_url = lookup("GOOGLE_CALLBACK_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string());

        let origin = lookup("ORIGIN")
            .filter(|s| !s.is_empty())
            .map(|s| parse_url("ORIGIN", s))
            .transpose()?;

        let http_timeout = Duration::from_secs(parse_or_default(
            lookup,
            "OAUTH2_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);

        Ok(Self {
            client_id,
            client_secret,
            callback_url,
            origin,
            auth_url: endpoint(lookup, "OAUTH2_AUTH_URL", GOOGLE_AUTH_URL)?,
            token_url: endpoint(lookup, "OAUTH2_TOKEN_URL", GOOGLE_TOKEN_URL)?,
            userinfo_url: endpoint(lookup, "OAUTH2_USERINFO_URL", GOOGLE_USERINFO_URL)?,
            http_timeout,
        })
    }

    /// Absolute callback url sent to the provider.
    ///
    /// A relative `callback_url` is joined onto `origin`, or onto the request's
    /// `Host` header over plain http when no origin is configured.
    pub fn redirect_uri(&self, host: Option<&str>) -> Result<Url, OAuth2Error> {
        if let Ok(absolute) = Url::parse(&self.callback_url) {
            return Ok(absolute);
        }

        let base = match (&self.origin, host) {
            (Some(origin), _) => origin.clone(),
            (None, Some(host)) => Url::parse(&format!("http://{host}"))
                .map_err(|e| OAuth2Error::RedirectUri(format!("Invalid Host header: {e}")))?,
            (None, None) => {
                return Err(OAuth2Error::RedirectUri(
                    "no ORIGIN configured and no Host header".to_string(),
                ));
            }
        };

        base.join(&self.callback_url)
            .map_err(|e| OAuth2Error::RedirectUri(e.to_string()))
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("origin", &self.origin.as_ref().map(Url::as_str))
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("userinfo_url", &self.userinfo_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn parse_url(key: &str, value: String) -> Result<Url, ConfigError> {
    Url::parse(&value).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

fn endpoint<F>(lookup: &F, key: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|s| !s.is_empty()) {
        Some(value) => {
            tracing::debug!("Using {} from environment: {}", key, value);
            parse_url(key, value)
        }
        None => parse_url(key, default.to_string()),
    }
}
