//! Settings for the legacy domain-model clients

use crate::config::ConfigError;
use crate::dm::ViewId;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SETTINGS_SECTION: &str = "powerops";

/// Which data model the legacy clients read and write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Space holding both the views and the instances
    pub space: String,
    pub datamodel: String,
    pub schema_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            space: "power_ops".to_string(),
            datamodel: "power_ops".to_string(),
            schema_version: "1".to_string(),
        }
    }
}

impl Settings {
    pub fn new(
        space: impl Into<String>,
        datamodel: impl Into<String>,
        schema_version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            datamodel: datamodel.into(),
            schema_version: schema_version.into(),
        }
    }

    /// Read the `[powerops]` section of a TOML file; missing keys keep their defaults.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let section = table
            .get(DEFAULT_SETTINGS_SECTION)
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection(DEFAULT_SETTINGS_SECTION.to_string()))?;
        let settings: Settings = section.try_into()?;
        if settings.space.is_empty() {
            return Err(ConfigError::Invalid("space must not be empty".to_string()));
        }
        Ok(settings)
    }

    /// The view a legacy type is stored in
    pub fn view_for(&self, type_name: &str) -> ViewId {
        ViewId::new(&self.space, type_name, &self.schema_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_settings_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[powerops]\nspace = \"power_ops_dev\"\ndatamodel = \"dm\"\nschema_version = \"3\""
        )
        .unwrap();

        let settings = Settings::from_toml(file.path()).unwrap();
        assert_eq!(settings, Settings::new("power_ops_dev", "dm", "3"));
        assert_eq!(settings.view_for("Case").property_key(), "Case/3");
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let settings = Settings::from_toml_str("[powerops]\nspace = \"other\"").unwrap();
        assert_eq!(settings.space, "other");
        assert_eq!(settings.schema_version, "1");
    }

    #[test]
    fn test_missing_section() {
        let err = Settings::from_toml_str("[cognite]\nproject = \"p\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(_)));
    }
}
