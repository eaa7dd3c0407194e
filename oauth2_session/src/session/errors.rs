use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::storage::StorageError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Session record or value could not be (de)serialized
    #[error("Serde error: {0}")]
    Serde(String),

    /// Stored user no longer passes profile validation
    #[error("Invalid stored user: {0}")]
    InvalidUser(#[source] OAuth2Error),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_conversion_keeps_message() {
        let err: SessionError = StorageError::Storage("connection lost".to_string()).into();
        assert!(matches!(err, SessionError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: Storage error: connection lost");
    }

    #[test]
    fn test_util_error_conversion() {
        let err: SessionError = UtilError::Crypto("rng".to_string()).into();
        assert!(matches!(err, SessionError::Utils(UtilError::Crypto(_))));
    }
}
