//! Shared helpers for the crate's tests

use async_trait::async_trait;
use axum::response::Response;
use http::header::SET_COOKIE;
use std::sync::Arc;

use oauth2_session::{
    AuthConfig, Email, IdentityProvider, OAuth2Error, Photo, Profile, SharedCacheStore, Url,
    memory_store,
};

use crate::AuthState;

pub(crate) const GOOD_CODE: &str = "good-code";

/// Provider that accepts only [`GOOD_CODE`] and answers with [`ada`]
pub(crate) struct StubProvider;

#[async_trait]
impl IdentityProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn authorization_url(&self, redirect_uri: &Url) -> Url {
        let mut url = Url::parse("https://idp.example.com/authorize").unwrap();
        url.query_pairs_mut()
            .append_pair("redirect_uri", redirect_uri.as_str());
        url
    }

    async fn exchange_code(&self, code: &str, _redirect_uri: &Url) -> Result<Profile, OAuth2Error> {
        if code == GOOD_CODE {
            Ok(ada())
        } else {
            Err(OAuth2Error::TokenExchange("400 Bad Request".to_string()))
        }
    }
}

pub(crate) fn ada() -> Profile {
    Profile {
        id: "1".to_string(),
        provider: "stub".to_string(),
        display_name: "Ada Lovelace".to_string(),
        emails: vec![Email {
            value: "ada@example.com".to_string(),
            verified: None,
        }],
        photos: vec![Photo {
            value: "http://x/a.png".to_string(),
        }],
    }
}

pub(crate) fn test_config() -> AuthConfig {
    AuthConfig::from_lookup(|key| match key {
        "SESSION_SECRET" => Some("test-session-secret".to_string()),
        "GOOGLE_CLIENT_ID" => Some("test-client".to_string()),
        "GOOGLE_CLIENT_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub(crate) fn state_with_store(store: SharedCacheStore) -> AuthState {
    AuthState::new(test_config(), store, Arc::new(StubProvider))
}

pub(crate) fn test_state() -> AuthState {
    state_with_store(memory_store())
}

/// `name=value` pair of the first `Set-Cookie` header, ready to send back
pub(crate) fn cookie_from(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(str::to_string)
}
