//! Data-model schema type definitions

use crate::dm::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Property types supported by data-model views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Timestamp,
    Date,
    Json,
    TimeSeries,
}

impl ScalarType {
    pub fn from_graphql(name: &str) -> Option<Self> {
        match name {
            "String" | "ID" => Some(ScalarType::String),
            "Int" | "Int32" => Some(ScalarType::Int32),
            "Int64" => Some(ScalarType::Int64),
            "Float" | "Float64" => Some(ScalarType::Float64),
            "Float32" => Some(ScalarType::Float32),
            "Boolean" => Some(ScalarType::Boolean),
            "Timestamp" => Some(ScalarType::Timestamp),
            "Date" => Some(ScalarType::Date),
            "JSONObject" | "JSON" => Some(ScalarType::Json),
            "TimeSeries" => Some(ScalarType::TimeSeries),
            _ => None,
        }
    }

    /// Get the Rust type name for this scalar
    pub fn rust_type(&self) -> &'static str {
        match self {
            ScalarType::String | ScalarType::TimeSeries => "String",
            ScalarType::Int32 => "i32",
            ScalarType::Int64 => "i64",
            ScalarType::Float32 => "f32",
            ScalarType::Float64 => "f64",
            ScalarType::Boolean => "bool",
            ScalarType::Timestamp => "DateTime<Utc>",
            ScalarType::Date => "NaiveDate",
            ScalarType::Json => "Value",
        }
    }

    /// Searchable text
    pub fn is_text(&self) -> bool {
        matches!(self, ScalarType::String)
    }

    /// Supports min/max range filters
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ScalarType::Int32
                | ScalarType::Int64
                | ScalarType::Float32
                | ScalarType::Float64
                | ScalarType::Timestamp
                | ScalarType::Date
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::String => "String",
            ScalarType::Int32 => "Int",
            ScalarType::Int64 => "Int64",
            ScalarType::Float32 => "Float32",
            ScalarType::Float64 => "Float",
            ScalarType::Boolean => "Boolean",
            ScalarType::Timestamp => "Timestamp",
            ScalarType::Date => "Date",
            ScalarType::Json => "JSONObject",
            ScalarType::TimeSeries => "TimeSeries",
        };
        write!(f, "{}", name)
    }
}

/// What a field holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Scalar(ScalarType),
    /// A single reference stored as a property
    DirectRelation { target: String },
    /// Nodes connected through edges of `edge_type`
    Edge {
        target: String,
        edge_space: String,
        edge_type: String,
        direction: Direction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Property identifier as stored in the view
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub list: bool,
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn scalar(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(scalar),
            required: false,
            list: false,
            description: None,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.kind {
            FieldKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Target view of a relation field
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::DirectRelation { target } | FieldKind::Edge { target, .. } => Some(target),
            FieldKind::Scalar(_) => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.target().is_some()
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, FieldKind::Edge { .. })
    }
}

/// A type or interface annotated with `@view`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,
    pub space: String,
    pub version: String,
    pub is_interface: bool,
    /// Interfaces this view implements, as declared
    pub implements: Vec<String>,
    /// Declared and inherited fields, in declaration order
    pub fields: Vec<FieldDefinition>,
    pub description: Option<String>,
}

impl ViewDefinition {
    pub fn new(name: impl Into<String>, space: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            space: space.into(),
            version: version.into(),
            is_interface: false,
            implements: Vec::new(),
            fields: Vec::new(),
            description: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Adds a field, replacing an earlier one with the same name in place.
    pub fn add_field(&mut self, field: FieldDefinition) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| !f.is_relation())
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn text_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(|f| !f.list && f.scalar_type().is_some_and(|s| s.is_text()))
    }
}

/// Complete parsed data-model schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModelSchema {
    /// Views in declaration order
    pub views: Vec<ViewDefinition>,
}

impl DataModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_view(&mut self, view: ViewDefinition) {
        self.views.push(view);
    }

    pub fn get_view(&self, name: &str) -> Option<&ViewDefinition> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn is_view(&self, name: &str) -> bool {
        self.get_view(name).is_some()
    }

    pub fn view_names(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// All transitive ancestors of a view, nearest first.
    pub fn ancestors(&self, name: &str) -> Vec<&ViewDefinition> {
        let mut out: Vec<&ViewDefinition> = Vec::new();
        let mut queue: Vec<&str> = self
            .get_view(name)
            .map(|v| v.implements.iter().map(String::as_str).collect())
            .unwrap_or_default();
        while !queue.is_empty() {
            let current = queue.remove(0);
            if out.iter().any(|v| v.name == current) {
                continue;
            }
            if let Some(view) = self.get_view(current) {
                queue.extend(view.implements.iter().map(String::as_str));
                out.push(view);
            }
        }
        out
    }

    /// Index of view names for quick membership checks
    pub fn index(&self) -> HashMap<&str, &ViewDefinition> {
        self.views.iter().map(|v| (v.name.as_str(), v)).collect()
    }
}
