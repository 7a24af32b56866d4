//! Error taxonomy shared by the store, ranking and HTTP layers.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Underlying cause of a store read or write failure.
#[derive(Debug, Error)]
pub enum StoreFault {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Client supplied a missing or malformed upload field.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Client supplied a missing or malformed proximity query.
    #[error("invalid query {field}: {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    /// Backing document exists but could not be read or parsed.
    #[error("failed to read {}: {source}", .path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: StoreFault,
    },

    /// Persisting the updated document failed. Prior state is intact.
    #[error("failed to write {}: {source}", .path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: StoreFault,
    },

    #[error("image not found: {0}")]
    NotFound(String),

    /// A blocking filesystem task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_query(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn store_read(path: impl Into<PathBuf>, source: impl Into<StoreFault>) -> Self {
        Self::StoreRead {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn store_write(path: impl Into<PathBuf>, source: impl Into<StoreFault>) -> Self {
        Self::StoreWrite {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Store failures, reported as HTTP 500.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::StoreRead { .. } | Self::StoreWrite { .. } | Self::Task(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreRead { .. } | Self::StoreWrite { .. } | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_server_fault() {
            tracing::error!("{self}");
            match self {
                Self::StoreRead { .. } => "Server error while reading stored data.".to_string(),
                Self::StoreWrite { .. } => "Server error while saving upload.".to_string(),
                _ => "Internal server error.".to_string(),
            }
        } else {
            tracing::debug!("Rejected request: {self}");
            self.to_string()
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_faults_map_to_bad_request() {
        assert_eq!(
            Error::validation("latitude", "is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::invalid_query("lat", "is required").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_faults_are_server_faults() {
        let io = std::io::Error::other("disk gone");
        let err = Error::store_write("/tmp/metadata.json", io);
        assert!(err.is_server_fault());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!Error::validation("photo", "missing").is_server_fault());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = Error::validation("longitude", "must be between -180 and 180");
        assert_eq!(
            err.to_string(),
            "invalid longitude: must be between -180 and 180"
        );
    }
}
