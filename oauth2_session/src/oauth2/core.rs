use url::Url;

use super::errors::OAuth2Error;
use super::provider::IdentityProvider;
use super::types::{AuthResponse, Profile};

/// Build the redirect that starts a login. No local state is created.
pub fn prepare_oauth2_auth_request(provider: &dyn IdentityProvider, redirect_uri: &Url) -> Url {
    let auth_url = provider.authorization_url(redirect_uri);
    tracing::debug!("Auth URL ({}): {}", provider.name(), auth_url);
    auth_url
}

/// Finish a login from the provider's callback parameters.
///
/// Any provider-reported error, a missing code, a failed exchange or an
/// incomplete profile ends the attempt with an error; the caller decides where
/// to send the browser.
pub async fn complete_oauth2_authorization(
    provider: &dyn IdentityProvider,
    auth_response: &AuthResponse,
    redirect_uri: &Url,
) -> Result<Profile, OAuth2Error> {
    if let Some(error) = &auth_response.error {
        let description = auth_response.error_description.as_deref().unwrap_or("");
        tracing::warn!("Provider {} returned error: {} {}", provider.name(), error, description);
        return Err(OAuth2Error::ProviderDenied(error.clone()));
    }

    let code = auth_response
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(OAuth2Error::MissingCode)?;

    let profile = provider.exchange_code(code, redirect_uri).await?;
    profile.validate()?;

    tracing::info!(
        "Authenticated {} user {} via {}",
        profile.provider,
        profile.id,
        provider.name()
    );
    Ok(profile)
}
