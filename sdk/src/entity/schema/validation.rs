//! Schema validation for view definitions

use super::types::{DataModelSchema, FieldDefinition, FieldKind, ViewDefinition};
use anyhow::Result;
use std::collections::HashSet;

/// Property names that collide with fields every generated class carries
const RESERVED_FIELD_NAMES: &[&str] = &["space", "externalId", "dataRecord", "nodeType"];

/// Validator for data-model schemas
pub struct SchemaValidator {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Validate a complete schema
    pub fn validate(&mut self, schema: &DataModelSchema) -> Result<ValidationResult> {
        self.errors.clear();
        self.warnings.clear();

        let mut seen = HashSet::new();
        for view in &schema.views {
            if !seen.insert(view.name.as_str()) {
                self.errors.push(format!("View '{}' is defined more than once", view.name));
            }
            self.validate_view(view, schema);
        }

        self.validate_inheritance(schema);

        Ok(ValidationResult {
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        })
    }

    fn validate_view(&mut self, view: &ViewDefinition, schema: &DataModelSchema) {
        if view.name.is_empty() {
            self.errors.push("View name cannot be empty".to_string());
            return;
        }

        if !view.name.starts_with(|c: char| c.is_ascii_uppercase()) {
            self.warnings.push(format!("View name '{}' should start with an uppercase letter", view.name));
        }

        if view.space.is_empty() || view.version.is_empty() {
            self.errors.push(format!("View '{}' needs both a space and a version", view.name));
        }

        if view.fields.is_empty() {
            self.warnings.push(format!("View '{}' has no properties", view.name));
        }

        for field in &view.fields {
            self.validate_field(view, field, schema);
        }
    }

    fn validate_field(&mut self, view: &ViewDefinition, field: &FieldDefinition, schema: &DataModelSchema) {
        if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
            self.errors.push(format!(
                "Field '{}' in view '{}' uses a reserved name",
                field.name, view.name
            ));
        }

        if field.name.starts_with(char::is_uppercase) {
            self.warnings.push(format!(
                "Field name '{}' in view '{}' should start with a lowercase letter",
                field.name, view.name
            ));
        }

        if let Some(target) = field.target() {
            if !schema.is_view(target) {
                self.errors.push(format!(
                    "Field '{}' in view '{}' references unknown view '{}'",
                    field.name, view.name, target
                ));
            }
        }

        match &field.kind {
            FieldKind::Edge { edge_type, .. } if edge_type.is_empty() => {
                self.errors.push(format!(
                    "Edge field '{}' in view '{}' has no edge type",
                    field.name, view.name
                ));
            }
            FieldKind::Edge { .. } if field.required => {
                self.warnings.push(format!(
                    "Edge field '{}' in view '{}' cannot be enforced as required",
                    field.name, view.name
                ));
            }
            _ => {}
        }
    }

    /// Interfaces must exist, be interfaces, and not form cycles.
    fn validate_inheritance(&mut self, schema: &DataModelSchema) {
        for view in &schema.views {
            for parent in &view.implements {
                match schema.get_view(parent) {
                    None => self.errors.push(format!(
                        "View '{}' implements unknown interface '{}'",
                        view.name, parent
                    )),
                    Some(p) if !p.is_interface => self.errors.push(format!(
                        "View '{}' implements '{}', which is not an interface",
                        view.name, parent
                    )),
                    Some(_) => {}
                }
            }

            if schema.ancestors(&view.name).iter().any(|a| a.name == view.name) {
                self.errors.push(format!("View '{}' inherits from itself", view.name));
            }
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of schema validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn print_results(&self) {
        for error in &self.errors {
            println!("❌ Error: {}", error);
        }
        for warning in &self.warnings {
            println!("⚠️  Warning: {}", warning);
        }

        if self.is_valid() && self.warnings.is_empty() {
            println!("✅ Schema validation passed with no issues");
        } else if self.is_valid() {
            println!("✅ Schema validation passed with {} warning(s)", self.warnings.len());
        } else {
            println!(
                "❌ Schema validation failed with {} error(s) and {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::schema::parser::SchemaParser;

    fn validate(source: &str) -> ValidationResult {
        let schema = SchemaParser::new("s", "1").parse_schema(source).unwrap();
        SchemaValidator::new().validate(&schema).unwrap()
    }

    #[test]
    fn test_validate_valid_schema() {
        let result = validate(
            r#"
            interface Asset { name: String! }
            type Generator implements Asset { name: String! pMax: Float }
            type Plant { generators: [Generator] }
            "#,
        );
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_reserved_names() {
        let result = validate("type Bad { externalId: String space: String }");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_implements_non_interface() {
        let result = validate(
            r#"
            type Parent { name: String }
            type Child implements Parent { name: String }
            "#,
        );
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("not an interface"));
    }

    #[test]
    fn test_casing_warnings() {
        let result = validate("type lower { Upper: String }");
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 2);
    }
}
