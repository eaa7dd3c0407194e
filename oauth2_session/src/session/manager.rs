use chrono::{Duration, Utc};
use http::header::HeaderMap;
use std::sync::Arc;

use crate::session::config::SessionConfig;
use crate::session::cookie::{get_cookie_value, sign_session_id, verify_session_cookie};
use crate::session::errors::SessionError;
use crate::session::handle::{Session, SessionState};
use crate::session::types::StoredSession;
use crate::storage::{CacheData, SharedCacheStore, StorageError};
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Loads sessions from request cookies and writes them back to the store.
#[derive(Clone)]
pub struct SessionManager {
    store: SharedCacheStore,
    config: Arc<SessionConfig>,
}

impl SessionManager {
    pub fn new(store: SharedCacheStore, config: Arc<SessionConfig>) -> Self {
        Self { store, config }
    }

    /// Prepare the backing store for use.
    pub async fn init(&self) -> Result<(), StorageError> {
        self.store.lock().await.init().await
    }

    /// Restore the session named by the request's cookie.
    ///
    /// Unsigned, tampered, unknown or expired cookies yield a fresh empty session.
    pub async fn load(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let Some(cookie) = get_cookie_value(headers, &self.config.cookie_name) else {
            return Ok(Session::default());
        };

        let mut state = SessionState {
            cookie_present: true,
            ..Default::default()
        };

        let Some(id) = verify_session_cookie(cookie, &self.config.secret) else {
            tracing::warn!("Session cookie signature mismatch");
            return Ok(Session::from_state(state));
        };

        let cached = self.store.lock().await.get(SESSION_PREFIX, id).await?;
        let Some(cached) = cached else {
            tracing::debug!("Session {} not found in store", id);
            return Ok(Session::from_state(state));
        };

        let stored = StoredSession::try_from(cached)?;
        if stored.is_expired() {
            tracing::debug!("Session {} expired", id);
            return Ok(Session::from_state(state));
        }

        tracing::trace!("Restored session {} (ttl {}s)", id, stored.ttl);
        state.id = Some(id.to_string());
        state.data = stored.data;
        Ok(Session::from_state(state))
    }

    /// Persist changes made during the request and return the `Set-Cookie`
    /// headers the response needs, which may be none.
    pub async fn commit(&self, session: &Session) -> Result<HeaderMap, SessionError> {
        let mut state = session.inner.lock().await;
        let mut headers = HeaderMap::new();
        let mut store = self.store.lock().await;

        if let Some(stale_id) = state.stale_id.take() {
            tracing::debug!("Removing regenerated session {}", stale_id);
            store.remove(SESSION_PREFIX, &stale_id).await?;
        }

        if state.data.is_empty() {
            if let Some(id) = state.id.take() {
                store.remove(SESSION_PREFIX, &id).await?;
            }
            if state.cookie_present {
                header_set_cookie(
                    &mut headers,
                    &self.config.cookie_name,
                    "",
                    0,
                    self.config.secure,
                )?;
                state.cookie_present = false;
            }
            state.modified = false;
            return Ok(headers);
        }

        if !state.modified {
            return Ok(headers);
        }

        let id = match &state.id {
            Some(id) => id.clone(),
            None => gen_random_string(32)?,
        };
        let max_age = self.config.max_age;
        let out_of_range = || SessionError::Cookie(format!("Max age out of range: {max_age}"));
        let lifetime = i64::try_from(max_age)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(out_of_range)?;
        let expires_at = Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(out_of_range)?;
        let ttl = usize::try_from(max_age).map_err(|_| out_of_range())?;

        let stored = StoredSession {
            data: state.data.clone(),
            expires_at,
            ttl: max_age,
        };
        let cache: CacheData = stored.try_into()?;
        store.put_with_ttl(SESSION_PREFIX, &id, cache, ttl).await?;

        let value = sign_session_id(&id, &self.config.secret)?;
        header_set_cookie(
            &mut headers,
            &self.config.cookie_name,
            &value,
            lifetime.num_seconds(),
            self.config.secure,
        )?;
        tracing::debug!("Saved session {}", id);

        state.id = Some(id);
        state.modified = false;
        state.cookie_present = true;
        Ok(headers)
    }
}
