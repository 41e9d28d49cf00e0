//! Client configuration and construction helpers.

use crate::dm::credentials::Credentials;
use derive_builder::Builder;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CLIENT_NAME: &str = "powerops-sdk";
pub const DEFAULT_TOML_SECTION: &str = "cognite";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Section [{0}] not found in config file")]
    MissingSection(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        ConfigError::Invalid(format!("missing field: {}", err.field_name()))
    }
}

/// Connection settings for a CDF project.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), build_fn(error = "ConfigError"))]
pub struct ClientConfig {
    pub project: String,
    pub base_url: String,
    #[builder(default = "DEFAULT_CLIENT_NAME.to_string()")]
    pub client_name: String,
    pub credentials: Credentials,
    #[builder(default = "30")]
    pub timeout_secs: u64,
    #[builder(default = "3")]
    pub max_retries: u32,
}

/// The `[cognite]` (or custom) section of a TOML config file.
#[derive(Debug, Deserialize)]
struct TomlSection {
    project: String,
    tenant_id: String,
    cdf_cluster: String,
    client_id: String,
    client_secret: String,
    client_name: Option<String>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Configuration for a project authenticated with Azure AD client credentials.
    pub fn azure_project(
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
        cdf_cluster: &str,
        project: &str,
    ) -> Result<Self, ConfigError> {
        let base_url = format!("https://{}.cognitedata.com", cdf_cluster);
        let config = Self::builder()
            .project(project)
            .credentials(Credentials::ClientCredentials {
                token_url: format!(
                    "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
                    tenant_id
                ),
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                scopes: vec![format!("{}/.default", base_url)],
            })
            .base_url(base_url)
            .build()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. `section` defaults to `cognite`.
    pub fn from_toml<P: AsRef<Path>>(path: P, section: Option<&str>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, section)
    }

    pub fn from_toml_str(content: &str, section: Option<&str>) -> Result<Self, ConfigError> {
        let section_name = section.unwrap_or(DEFAULT_TOML_SECTION);
        let table: toml::Table = toml::from_str(content)?;
        let raw = table
            .get(section_name)
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection(section_name.to_string()))?;
        let values: TomlSection = raw.try_into()?;

        let mut config = Self::azure_project(
            &values.tenant_id,
            &values.client_id,
            &values.client_secret,
            &values.cdf_cluster,
            &values.project,
        )?;
        if let Some(client_name) = values.client_name {
            config.client_name = client_name;
        }
        if let Some(timeout_secs) = values.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(max_retries) = values.max_retries {
            config.max_retries = max_retries;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.trim().is_empty() {
            return Err(ConfigError::Invalid("project must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if let Credentials::ClientCredentials { client_id, .. } = &self.credentials {
            if client_id.trim().is_empty() {
                return Err(ConfigError::Invalid("client_id must not be empty".to_string()));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[cognite]
project = "power-ops-dev"
tenant_id = "tenant-123"
cdf_cluster = "westeurope-1"
client_id = "client-abc"
client_secret = "s3cret"
max_retries = 5

[other]
project = "other-project"
tenant_id = "t"
cdf_cluster = "az-eastus-1"
client_id = "c"
client_secret = "s"
"#;

    #[test]
    fn test_azure_project() {
        let config =
            ClientConfig::azure_project("tenant-123", "client-abc", "s3cret", "westeurope-1", "power-ops-dev")
                .unwrap();
        assert_eq!(config.project, "power-ops-dev");
        assert_eq!(config.base_url, "https://westeurope-1.cognitedata.com");
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
        match &config.credentials {
            Credentials::ClientCredentials {
                token_url, scopes, ..
            } => {
                assert_eq!(
                    token_url,
                    "https://login.microsoftonline.com/tenant-123/oauth2/v2.0/token"
                );
                assert_eq!(scopes, &vec!["https://westeurope-1.cognitedata.com/.default".to_string()]);
            }
            other => panic!("unexpected credentials {:?}", other),
        }
    }

    #[test]
    fn test_azure_project_rejects_empty_project() {
        let err = ClientConfig::azure_project("t", "c", "s", "westeurope-1", " ").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_toml_default_section() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ClientConfig::from_toml(file.path(), None).unwrap();
        assert_eq!(config.project, "power-ops-dev");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_toml_named_section() {
        let config = ClientConfig::from_toml_str(SAMPLE, Some("other")).unwrap();
        assert_eq!(config.project, "other-project");
        assert_eq!(config.base_url, "https://az-eastus-1.cognitedata.com");
    }

    #[test]
    fn test_from_toml_missing_section() {
        let err = ClientConfig::from_toml_str(SAMPLE, Some("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(ref s) if s == "missing"));
    }

    #[test]
    fn test_from_toml_missing_file() {
        let err = ClientConfig::from_toml("/nonexistent/powerops.toml", None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder()
            .project("p")
            .base_url("http://localhost:8080")
            .credentials(Credentials::Token("t".into()))
            .build()
            .unwrap();
        assert_eq!(config.max_retries, 3);
        assert!(config.validate().is_ok());
    }
}
