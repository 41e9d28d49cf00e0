use super::Command;
use crate::utils::schema::read_schema_sources;
use anyhow::Result;
use async_trait::async_trait;
use powerops_sdk::entity::codegen::{GenerationOptions, ModelGenerator};
use std::path::PathBuf;

/// Generates one module per view from a schema file or a directory of them
pub struct GenerateCommand {
    pub schema: PathBuf,
    pub options: GenerationOptions,
}

impl GenerateCommand {
    pub fn new(schema: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            schema,
            options: GenerationOptions {
                output_dir,
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl Command for GenerateCommand {
    async fn execute(&self) -> Result<()> {
        println!("Generating views from {}", self.schema.display());
        let content = read_schema_sources(&self.schema)?;

        let mut generator = ModelGenerator::new();
        let result = generator
            .process_schema_string(&content, self.options.clone())
            .await?;

        if let Some(validation) = &result.validation {
            if validation.has_warnings() {
                validation.print_results();
            }
        }
        result.print_summary();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_from_directory() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        std::fs::write(
            src.path().join("scenario.graphql"),
            "type ShopScenario { name: String! }",
        )
        .unwrap();
        std::fs::write(
            src.path().join("case.graphql"),
            "type ShopCase { scenario: ShopScenario }",
        )
        .unwrap();

        GenerateCommand::new(src.path().to_path_buf(), out.path().to_path_buf())
            .execute()
            .await
            .unwrap();

        assert!(out.path().join("shop_case.rs").exists());
        assert!(out.path().join("shop_scenario.rs").exists());
        assert!(out.path().join("mod.rs").exists());
    }
}
