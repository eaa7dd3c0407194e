use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::errors::SessionError;

/// Per-request view of a session record.
///
/// Cloning is cheap and every clone sees the same state; the owning
/// [`SessionManager`](super::SessionManager) writes changes back once the
/// request is done.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(super) inner: Arc<Mutex<SessionState>>,
}

#[derive(Debug, Default)]
pub(super) struct SessionState {
    /// Id of the record backing this session, `None` until first saved
    pub(super) id: Option<String>,
    pub(super) data: Map<String, Value>,
    pub(super) modified: bool,
    /// Record to delete on commit after the id was regenerated
    pub(super) stale_id: Option<String>,
    /// The browser holds a session cookie (valid or not)
    pub(super) cookie_present: bool,
}

impl Session {
    pub(super) fn from_state(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        let state = self.inner.lock().await;
        state
            .data
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(SessionError::from)
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)?;
        let mut state = self.inner.lock().await;
        state.data.insert(key.to_string(), value);
        state.modified = true;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        let mut state = self.inner.lock().await;
        let removed = state.data.remove(key);
        if removed.is_some() {
            state.modified = true;
        }
        removed
    }

    /// Drop all data and detach from the current record. The next commit
    /// deletes the old record and, if anything is stored again, issues a new id.
    pub async fn regenerate(&self) {
        let mut state = self.inner.lock().await;
        if let Some(id) = state.id.take() {
            state.stale_id = Some(id);
        }
        state.data.clear();
        state.modified = true;
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.data.is_empty()
    }

    /// Id of the backing record, if one exists.
    pub async fn id(&self) -> Option<String> {
        self.inner.lock().await.id.clone()
    }
}
