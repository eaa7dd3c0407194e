use async_trait::async_trait;
use url::Url;

use super::errors::OAuth2Error;
use super::types::Profile;

/// An OAuth 2.0 authorization-code client for one identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Url of the provider's consent page for this callback.
    fn authorization_url(&self, redirect_uri: &Url) -> Url;

    /// Trade an authorization code for the user's profile.
    async fn exchange_code(&self, code: &str, redirect_uri: &Url) -> Result<Profile, OAuth2Error>;
}
