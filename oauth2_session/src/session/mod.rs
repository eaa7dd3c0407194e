mod config;
mod cookie;
mod errors;
mod handle;
mod manager;
mod projection;
mod types;

pub use config::{
    DEFAULT_SESSION_COOKIE_MAX_AGE, DEFAULT_SESSION_COOKIE_NAME, MAX_SESSION_COOKIE_MAX_AGE,
    SessionConfig,
};
pub use errors::SessionError;
pub use handle::Session;
pub use manager::SessionManager;
pub use projection::{PASSPORT_KEY, deserialize_user, serialize_user};
