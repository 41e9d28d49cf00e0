//! Schema-to-modules generation pipeline

use super::ViewCodeGenerator;
use crate::entity::schema::{DataModelSchema, SchemaValidator, ValidationResult};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where and how view modules are generated
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Output directory for generated modules
    pub output_dir: PathBuf,
    /// Crate path generated code uses for the SDK
    pub sdk_path: String,
    /// Space of views without `@view(space: ...)`
    pub default_space: String,
    pub default_version: String,
    /// Replace an existing generated directory
    pub overwrite: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("src/generated"),
            sdk_path: "powerops_sdk".to_string(),
            default_space: "power_ops_core".to_string(),
            default_version: "1".to_string(),
            overwrite: true,
        }
    }
}

/// Parses, validates and generates view modules
pub struct ModelGenerator {
    validator: SchemaValidator,
}

impl ModelGenerator {
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
        }
    }

    /// Parse, validate and generate from one `.graphql` file
    pub async fn process_schema_file<P: AsRef<Path>>(
        &mut self,
        schema_path: P,
        options: GenerationOptions,
    ) -> Result<GenerationResult> {
        let schema = Self::view_generator(&options)
            .parser()
            .parse_file(&schema_path)
            .with_context(|| format!("Failed to parse schema: {}", schema_path.as_ref().display()))?;

        self.validate_and_generate(schema, options).await
    }

    /// Same as [`Self::process_schema_file`] for schema text
    pub async fn process_schema_string(
        &mut self,
        schema_content: &str,
        options: GenerationOptions,
    ) -> Result<GenerationResult> {
        let schema = Self::view_generator(&options).parser().parse_schema(schema_content)?;
        self.validate_and_generate(schema, options).await
    }

    fn view_generator(options: &GenerationOptions) -> ViewCodeGenerator {
        ViewCodeGenerator::new()
            .with_sdk_path(&options.sdk_path)
            .with_defaults(&options.default_space, &options.default_version)
    }

    async fn validate_and_generate(
        &mut self,
        schema: DataModelSchema,
        options: GenerationOptions,
    ) -> Result<GenerationResult> {
        let validation = self.validator.validate(&schema)?;
        if !validation.is_valid() {
            return Err(anyhow::anyhow!(
                "Schema validation failed with {} errors: {}",
                validation.errors.len(),
                validation.errors.join("; ")
            ));
        }

        let mut result = GenerationResult::new();
        result.validation = Some(validation);

        let mod_path = options.output_dir.join("mod.rs");
        if !options.overwrite && mod_path.exists() {
            tracing::warn!(
                "Skipping generation, {} exists and overwrite is off",
                mod_path.display()
            );
            return Ok(result);
        }

        result.generated_files = Self::view_generator(&options)
            .write_schema(&schema, &options.output_dir)?;
        result.view_count = schema.view_count();
        Ok(result)
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Files written by one generation run
#[derive(Debug)]
pub struct GenerationResult {
    pub generated_files: Vec<PathBuf>,
    /// Number of views processed
    pub view_count: usize,
    pub validation: Option<ValidationResult>,
}

impl GenerationResult {
    fn new() -> Self {
        Self {
            generated_files: Vec::new(),
            view_count: 0,
            validation: None,
        }
    }

    /// Print what was generated to stdout
    pub fn print_summary(&self) {
        println!("✅ Code generation completed successfully");
        println!("   Generated {} views", self.view_count);
        println!("   Wrote {} files", self.generated_files.len());

        if let Some(ref validation) = self.validation {
            if !validation.warnings.is_empty() {
                println!("   Schema validation warnings: {}", validation.warnings.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_simple_view() {
        let schema = r#"
            type ShopScenario @view(space: "power_ops_core", version: "1") {
                name: String!
                source: String
            }
        "#;

        let temp_dir = TempDir::new().unwrap();
        let options = GenerationOptions {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let mut generator = ModelGenerator::new();
        let result = generator.process_schema_string(schema, options).await.unwrap();

        assert_eq!(result.view_count, 1);
        assert_eq!(result.generated_files.len(), 2);
        for file_path in &result.generated_files {
            assert!(file_path.exists(), "Generated file should exist: {:?}", file_path);
        }
        assert!(temp_dir.path().join("shop_scenario.rs").exists());
    }

    #[tokio::test]
    async fn test_generate_from_file_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let schema_path = temp_dir.path().join("model.graphql");
        std::fs::write(&schema_path, "type A { name: String }").unwrap();
        let out = temp_dir.path().join("generated");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("mod.rs"), "// existing").unwrap();

        let options = GenerationOptions {
            output_dir: out.clone(),
            overwrite: false,
            ..Default::default()
        };
        let result = ModelGenerator::new()
            .process_schema_file(&schema_path, options)
            .await
            .unwrap();

        assert!(result.generated_files.is_empty());
        assert_eq!(std::fs::read_to_string(out.join("mod.rs")).unwrap(), "// existing");
    }

    #[tokio::test]
    async fn test_validation_errors_fail_generation() {
        let temp_dir = TempDir::new().unwrap();
        let options = GenerationOptions {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = ModelGenerator::new()
            .process_schema_string("type A implements Missing { name: String }", options)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown interface"));
    }
}
