//! Code generation for build scripts
//!
//! A model crate keeps its schema files in `schema/` and gets the view
//! modules written to `src/generated/`.

use anyhow::Result;
use std::path::Path;

pub use powerops_sdk::CodegenResult as GeneratorResult;

pub const SCHEMA_DIR: &str = "schema";
pub const GENERATED_DIR: &str = "src/generated";

pub fn run_generation_sync<P: AsRef<Path>>(project_dir: P) -> Result<Vec<GeneratorResult>> {
    let project_dir = project_dir.as_ref();
    powerops_sdk::codegen(project_dir.join(SCHEMA_DIR), project_dir.join(GENERATED_DIR))
}
