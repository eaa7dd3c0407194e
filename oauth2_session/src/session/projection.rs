use serde_json::{Value, json};

use crate::oauth2::Profile;
use crate::session::errors::SessionError;
use crate::session::handle::Session;

/// Session key holding login state
pub const PASSPORT_KEY: &str = "passport";
const USER_KEY: &str = "user";

/// Stored form of an authenticated user. The whole profile is kept.
pub fn serialize_user(profile: &Profile) -> Result<Value, SessionError> {
    Ok(serde_json::to_value(profile)?)
}

/// Restore a profile from its stored form.
pub fn deserialize_user(value: Value) -> Result<Profile, SessionError> {
    let profile: Profile = serde_json::from_value(value)?;
    profile.validate().map_err(SessionError::InvalidUser)?;
    Ok(profile)
}

impl Session {
    /// Attach an authenticated profile, under a new session id.
    pub async fn login(&self, profile: &Profile) -> Result<(), SessionError> {
        let user = serialize_user(profile)?;
        self.regenerate().await;
        self.insert(PASSPORT_KEY, json!({ USER_KEY: user })).await?;
        tracing::debug!("User {} logged in", profile.id);
        Ok(())
    }

    /// Forget the authenticated profile. Safe to call on any session.
    pub async fn logout(&self) {
        if self.remove(PASSPORT_KEY).await.is_some() {
            tracing::debug!("User logged out");
        }
        self.regenerate().await;
    }

    /// The authenticated profile, if any.
    pub async fn user(&self) -> Result<Option<Profile>, SessionError> {
        let Some(passport) = self.get::<Value>(PASSPORT_KEY).await? else {
            return Ok(None);
        };
        match passport.get(USER_KEY) {
            Some(user) if !user.is_null() => deserialize_user(user.clone()).map(Some),
            _ => Ok(None),
        }
    }
}
