use http::header::{HOST, HeaderMap};
use std::sync::Arc;

use oauth2_session::{
    AuthConfig, GoogleProvider, IdentityProvider, OAuth2Error, SessionManager, SharedCacheStore,
    Url, memory_store,
};

/// Shared state of the auth routes and the session middleware
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
    pub sessions: SessionManager,
    pub provider: Arc<dyn IdentityProvider>,
}

impl AuthState {
    pub fn new(
        config: AuthConfig,
        store: SharedCacheStore,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let sessions = SessionManager::new(store, Arc::new(config.session.clone()));
        Self {
            config: Arc::new(config),
            sessions,
            provider,
        }
    }

    /// In-memory sessions and the Google client.
    pub fn from_config(config: AuthConfig) -> Result<Self, OAuth2Error> {
        let provider = GoogleProvider::new(Arc::new(config.google.clone()))?;
        Ok(Self::new(config, memory_store(), Arc::new(provider)))
    }

    /// Absolute callback url for this request
    pub(crate) fn redirect_uri(&self, headers: &HeaderMap) -> Result<Url, OAuth2Error> {
        let host = headers.get(HOST).and_then(|h| h.to_str().ok());
        self.config.google.redirect_uri(host)
    }
}
