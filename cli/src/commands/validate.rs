use super::Command;
use crate::utils::schema::read_schema_sources;
use anyhow::{Result, bail};
use async_trait::async_trait;
use powerops_sdk::entity::{SchemaParser, SchemaValidator};
use std::path::PathBuf;

pub struct ValidateCommand {
    pub schema: PathBuf,
    pub default_space: String,
    pub default_version: String,
}

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self) -> Result<()> {
        let content = read_schema_sources(&self.schema)?;
        let schema = SchemaParser::new(&self.default_space, &self.default_version)
            .parse_schema(&content)?;
        let result = SchemaValidator::new().validate(&schema)?;
        result.print_results();

        if !result.is_valid() {
            bail!("{} has {} errors", self.schema.display(), result.errors.len());
        }
        println!("{} views", schema.view_count());
        Ok(())
    }
}
