//! PowerOps CLI library
//!
//! Programmatic access to the `cargo powerops` commands, and a
//! [`generate_code`] helper for `build.rs` scripts of model crates.

pub mod codegen;
pub mod commands;
pub mod utils;

pub use codegen::{GeneratorResult, run_generation_sync};
pub use commands::{
    Command,
    generate::GenerateCommand,
    graphql::{GraphQlCommand, QuerySource},
    validate::ValidateCommand,
};

use std::path::Path;

/// Initialize logging; `RUST_LOG` overrides the level picked by `debug`.
/// Does nothing when a global subscriber is already installed.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with_target(false)
        .with_line_number(debug)
        .with_file(debug)
        .try_init();
}

pub fn generate_code<P: AsRef<Path>>(project_dir: P) {
    match run_generation_sync(project_dir) {
        Ok(results) => {
            let total_files: usize = results.iter().map(|r| r.files_generated.len()).sum();
            if total_files > 0 {
                println!(
                    "cargo:warning=✅ Code generation completed: {} files generated",
                    total_files
                );
            }
            for result in results.iter().filter(|r| !r.success) {
                println!(
                    "cargo:warning=❌ {} generator failed: {}",
                    result.generator_name, result.message
                );
            }
        }
        Err(e) => {
            println!("cargo:warning=❌ Code generation failed: {}", e);
        }
    };
}
