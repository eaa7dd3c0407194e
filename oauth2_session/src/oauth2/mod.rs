mod config;
mod core;
mod errors;
mod google;
mod provider;
mod types;

pub use config::{DEFAULT_CALLBACK_URL, GoogleConfig};
pub use core::{complete_oauth2_authorization, prepare_oauth2_auth_request};
pub use errors::OAuth2Error;
pub use google::GoogleProvider;
pub use provider::IdentityProvider;
pub use types::{AuthResponse, Email, Photo, Profile};
