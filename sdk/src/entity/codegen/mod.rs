//! Code generation for data-model views

pub mod generator;
pub mod view_gen;

pub use generator::{GenerationOptions, GenerationResult, ModelGenerator};
pub use view_gen::ViewCodeGenerator;
