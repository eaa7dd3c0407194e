//! oauth2_session_axum - Axum integration for oauth2_session
//!
//! Provides the session middleware, the [`AuthUser`] extractor and a router
//! with the Google login, callback and logout routes.

mod config;
mod error;
mod middleware;
mod oauth2;
mod router;
mod session;
mod state;

#[cfg(test)]
mod test_utils;

pub use config::{O2S_LOGIN_FAILURE_URL, O2S_REDIRECT_ANON, O2S_REDIRECT_USER, redirect_found};
pub use error::IntoResponseError;
pub use middleware::session_layer;
pub use router::{oauth2_session_router, oauth2_session_router_no_trace};
pub use session::{AuthRedirect, AuthUser};
pub use state::AuthState;

// Re-export the core types so applications only need this crate
pub use oauth2_session::{
    AuthConfig, ConfigError, Email, GoogleProvider, IdentityProvider, OAuth2Error, Photo, Profile,
    Session, SessionError, SharedCacheStore, StorageError, Url, memory_store,
};
