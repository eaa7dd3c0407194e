//! oauth2_session - Google sign-in with server-side sessions
//!
//! This crate holds the framework-independent parts: configuration, the
//! OAuth 2.0 authorization-code client, the session store and the signed
//! session cookie. Web framework glue lives in `oauth2_session_axum`.

mod config;
mod oauth2;
mod session;
mod storage;
mod utils;

pub use config::{AuthConfig, ConfigError};

pub use oauth2::{
    AuthResponse, DEFAULT_CALLBACK_URL, Email, GoogleConfig, GoogleProvider, IdentityProvider,
    OAuth2Error, Photo, Profile, complete_oauth2_authorization, prepare_oauth2_auth_request,
};

pub use session::{
    DEFAULT_SESSION_COOKIE_MAX_AGE, DEFAULT_SESSION_COOKIE_NAME, MAX_SESSION_COOKIE_MAX_AGE,
    PASSPORT_KEY, Session, SessionConfig, SessionError, SessionManager, deserialize_user,
    serialize_user,
};

pub use storage::{
    CacheData, CacheStore, InMemoryCacheStore, SharedCacheStore, StorageError, memory_store,
};

pub use url::Url;
