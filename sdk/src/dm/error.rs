//! Errors raised at the data-modeling service boundary

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataModelingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Version conflict: {message}")]
    VersionConflict { message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("GraphQL query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DataModelingError {
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    pub fn version_conflict(message: impl Into<String>) -> Self {
        Self::VersionConflict {
            message: message.into(),
        }
    }

    /// Maps a status code and error body to an error.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.to_string());
        if status == 409 {
            Self::version_conflict(message)
        } else if status == 401 || status == 403 {
            Self::Auth(message)
        } else {
            Self::api(status, message)
        }
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Error body returned by the service: `{"error": {"code": 400, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

pub type DmResult<T> = Result<T, DataModelingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response() {
        let body = r#"{"error": {"code": 409, "message": "Existing version mismatch"}}"#;
        let err = DataModelingError::from_response(409, body);
        assert!(err.is_version_conflict());
        assert_eq!(err.to_string(), "Version conflict: Existing version mismatch");

        let err = DataModelingError::from_response(500, "gateway exploded");
        assert!(matches!(err, DataModelingError::Api { code: 500, ref message } if message == "gateway exploded"));
    }
}
