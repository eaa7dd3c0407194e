use serde::{Deserialize, Serialize};

use super::errors::OAuth2Error;

/// User profile returned by the identity provider.
///
/// Serialized with the provider-neutral field names
/// (`displayName`, `emails[].value`, `photos[].value`), which is also the shape
/// kept in the session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub provider: String,
    pub display_name: String,
    pub emails: Vec<Email>,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub value: String,
}

impl Profile {
    /// Reject profiles without at least one email and one photo.
    pub fn validate(&self) -> Result<(), OAuth2Error> {
        if self.emails.is_empty() {
            return Err(OAuth2Error::IncompleteProfile("no email address".to_string()));
        }
        if self.photos.is_empty() {
            return Err(OAuth2Error::IncompleteProfile("no photo".to_string()));
        }
        Ok(())
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.value.as_str())
    }

    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(|p| p.value.as_str())
    }
}

// The user data we'll get back from Google's v3 userinfo endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GoogleUserInfo {
    pub(crate) sub: String,
    pub(crate) name: Option<String>,
    pub(crate) given_name: Option<String>,
    pub(crate) family_name: Option<String>,
    pub(crate) picture: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) email_verified: Option<bool>,
}

impl TryFrom<GoogleUserInfo> for Profile {
    type Error = OAuth2Error;

    fn try_from(info: GoogleUserInfo) -> Result<Self, Self::Error> {
        let display_name = info
            .name
            .or_else(|| match (info.given_name, info.family_name) {
                (Some(given), Some(family)) => Some(format!("{given} {family}")),
                (Some(given), None) => Some(given),
                (None, family) => family,
            })
            .ok_or_else(|| OAuth2Error::IncompleteProfile("no display name".to_string()))?;

        let profile = Self {
            id: info.sub,
            provider: "google".to_string(),
            display_name,
            emails: info
                .email
                .map(|value| Email {
                    value,
                    verified: info.email_verified,
                })
                .into_iter()
                .collect(),
            photos: info
                .picture
                .map(|value| Photo { value })
                .into_iter()
                .collect(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
}

/// Query parameters the provider appends to the callback url
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthResponse {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
