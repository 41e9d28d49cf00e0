//! GraphQL data-model schema parsing and validation

pub mod parser;
pub mod types;
pub mod validation;

pub use parser::SchemaParser;
pub use types::{DataModelSchema, FieldDefinition, FieldKind, ScalarType, ViewDefinition};
pub use validation::{SchemaValidator, ValidationResult};
