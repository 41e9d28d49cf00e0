use crate::config::ConfigError;
use crate::dm::DataModelingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LegacyError {
    #[error("Could not find {type_name} with external_id '{external_id}'")]
    NotFound {
        type_name: String,
        external_id: String,
    },

    /// Lookup by external id returned several items
    #[error("Multiple items found for {type_name} with external_id '{external_id}'")]
    Duplicate {
        type_name: String,
        external_id: String,
    },

    #[error("Invalid {type_name}: {reason}")]
    Invalid { type_name: String, reason: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(#[from] DataModelingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LegacyError {
    pub fn not_found(type_name: &str, external_id: &str) -> Self {
        Self::NotFound {
            type_name: type_name.to_string(),
            external_id: external_id.to_string(),
        }
    }

    pub fn duplicate(type_name: &str, external_id: &str) -> Self {
        Self::Duplicate {
            type_name: type_name.to_string(),
            external_id: external_id.to_string(),
        }
    }

    pub fn invalid(type_name: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type LegacyResult<T> = Result<T, LegacyError>;
