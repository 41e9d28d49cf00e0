//! Code generation entry point for model crates
//!
//! Build scripts and the CLI call [`codegen`] with a directory of `.graphql`
//! schema files and an output directory for the generated view modules.

use anyhow::Result;
use derive_builder::Builder;
use std::path::{Path, PathBuf};

/// Result of a code generation operation
#[derive(Debug, Clone, Builder)]
pub struct CodegenResult {
    pub generator_name: String,
    pub files_generated: Vec<PathBuf>,
    pub success: bool,
    pub message: String,
}

/// Trait for all code generators
pub trait CodeGenerator {
    /// Name of this generator (e.g. "views")
    fn generator_name(&self) -> &str;

    /// Check if this generator should run for the given source directory
    fn should_generate(&self, src_dir: &Path) -> bool;

    /// Generate code from source to destination directory
    fn generate(&self, src_dir: &Path, dst_dir: &Path) -> Result<CodegenResult>;
}

/// Runs every registered generator that applies to a source directory
pub struct Codegen {
    generators: Vec<Box<dyn CodeGenerator>>,
}

impl Codegen {
    /// Create a runner with the view generator registered
    pub fn new() -> Self {
        let mut codegen = Self {
            generators: Vec::new(),
        };
        codegen.register_generator(Box::new(crate::entity::codegen::ViewCodeGenerator::new()));
        codegen
    }

    pub fn register_generator(&mut self, generator: Box<dyn CodeGenerator>) {
        self.generators.push(generator);
    }

    /// Run all applicable generators from src to dst directory.
    /// A failing generator is reported in its result rather than aborting the rest.
    pub fn generate_all(&self, src_dir: &Path, dst_dir: &Path) -> Result<Vec<CodegenResult>> {
        let mut results = Vec::new();

        for generator in &self.generators {
            if !generator.should_generate(src_dir) {
                tracing::debug!("Skipping generator {}", generator.generator_name());
                continue;
            }
            match generator.generate(src_dir, dst_dir) {
                Ok(result) => results.push(result),
                Err(e) => results.push(
                    CodegenResultBuilder::default()
                        .generator_name(generator.generator_name().to_string())
                        .files_generated(vec![])
                        .success(false)
                        .message(format!("Generation failed: {:#}", e))
                        .build()?,
                ),
            }
        }

        Ok(results)
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple synchronous codegen function for build scripts
pub fn codegen<P: AsRef<Path>>(src_dir: P, dst_dir: P) -> Result<Vec<CodegenResult>> {
    Codegen::new().generate_all(src_dir.as_ref(), dst_dir.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_codegen_skips_empty_source() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let results = codegen(src.path(), dst.path()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_codegen_reports_failures() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        std::fs::write(src.path().join("broken.graphql"), "type {").unwrap();

        let results = codegen(src.path(), dst.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].message.starts_with("Generation failed"));
    }
}
