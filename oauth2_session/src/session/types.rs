use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Record kept in the cache store under the session id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct StoredSession {
    pub(super) data: Map<String, Value>,
    pub(super) expires_at: DateTime<Utc>,
    pub(super) ttl: u64,
}

impl StoredSession {
    pub(super) fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

impl TryFrom<StoredSession> for CacheData {
    type Error = SessionError;

    fn try_from(data: StoredSession) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(&data)?,
        })
    }
}

impl TryFrom<CacheData> for StoredSession {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
    }
}
