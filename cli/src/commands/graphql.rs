use super::Command;
use crate::utils::config::resolve_config_path;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use powerops_sdk::dm::DataModelId;
use powerops_sdk::entity::DomainClient;
use powerops_sdk::{ClientConfig, HttpBackend};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Runs a GraphQL query against one data model and prints the `data` member
pub struct GraphQlCommand {
    pub data_model: DataModelId,
    pub query: QuerySource,
    pub variables: Option<String>,
    pub config: Option<PathBuf>,
    pub section: Option<String>,
}

pub enum QuerySource {
    Inline(String),
    File(PathBuf),
}

impl QuerySource {
    fn load(&self) -> Result<String> {
        match self {
            QuerySource::Inline(query) => Ok(query.clone()),
            QuerySource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read query file: {}", path.display())),
        }
    }
}

impl GraphQlCommand {
    fn variables(&self) -> Result<Option<Value>> {
        self.variables
            .as_deref()
            .map(|raw| serde_json::from_str(raw).context("Variables must be a JSON object"))
            .transpose()
    }
}

#[async_trait]
impl Command for GraphQlCommand {
    async fn execute(&self) -> Result<()> {
        let query = self.query.load()?;
        let variables = self.variables()?;

        let path = resolve_config_path(self.config.as_deref())
            .ok_or_else(|| anyhow!("No config file found, pass --config"))?;
        let config = ClientConfig::from_toml(&path, self.section.as_deref())
            .with_context(|| format!("Failed to load {}", path.display()))?;
        debug!("Using config {} for project {}", path.display(), config.project);
        let backend = HttpBackend::new(&config)?;
        let client = DomainClient::new(Arc::new(backend), "");

        let data = client
            .graphql_query(&self.data_model, &query, variables)
            .await?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(variables: Option<&str>) -> GraphQlCommand {
        GraphQlCommand {
            data_model: DataModelId::new("power_ops_core", "DayAheadBid", "1"),
            query: QuerySource::Inline("{ listPriceProduction { items { name } } }".into()),
            variables: variables.map(str::to_string),
            config: None,
            section: None,
        }
    }

    #[test]
    fn test_variables_parse_as_json() {
        let vars = command(Some(r#"{"first": 10}"#)).variables().unwrap();
        assert_eq!(vars, Some(serde_json::json!({"first": 10})));
        assert!(command(None).variables().unwrap().is_none());
        assert!(command(Some("{first")).variables().is_err());
    }

    #[test]
    fn test_query_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("q.graphql");
        fs::write(&path, "{ a }").unwrap();
        assert_eq!(QuerySource::File(path).load().unwrap(), "{ a }");
        assert!(QuerySource::File(dir.path().join("missing")).load().is_err());
    }
}
