use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E5xxx: Notification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    StorageUnavailable,

    // Notification (E5xxx)
    NotificationNotFound,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::StorageUnavailable => "E0004",

            // Notification
            Self::NotificationNotFound => "E5001",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal error")]
    Internal(#[from] anyhow::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable error code string for logging and client-facing payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Known { code, .. } => code.code(),
            Self::Internal(_) => ErrorCode::InternalError.code(),
            Self::Storage(_) => ErrorCode::StorageUnavailable.code(),
            Self::Validation(_) => ErrorCode::ValidationError.code(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn stable_codes_per_variant() {
        // callers that treat mark_read == false as missing map it to E5001
        let missing = AppError::new(ErrorCode::NotificationNotFound, "notification not found");
        assert_eq!(missing.code(), "E5001");
        assert_eq!(missing.to_string(), "notification not found");

        let storage = AppError::from(StorageError::Unavailable("backend down".into()));
        assert_eq!(storage.code(), "E0004");

        assert_eq!(AppError::validation("blank title").code(), "E0002");
        assert_eq!(AppError::from(anyhow::anyhow!("boom")).code(), "E0001");
    }
}
