//! GraphQL parser for data-model view definitions

use super::types::{DataModelSchema, FieldDefinition, FieldKind, ScalarType, ViewDefinition};
use crate::dm::Direction;
use anyhow::{anyhow, Context, Result};
use graphql_parser::schema::{Definition, Directive, Document, Field, Type, TypeDefinition, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Object or interface type before inherited fields are merged in
struct RawView {
    view: ViewDefinition,
    declared: Vec<FieldDefinition>,
}

/// Parser for GraphQL schemas annotated with `@view` and `@relation`
pub struct SchemaParser {
    /// Space used for views without an explicit `@view(space: ...)`
    default_space: String,
    default_version: String,
}

impl SchemaParser {
    pub fn new(default_space: impl Into<String>, default_version: impl Into<String>) -> Self {
        Self {
            default_space: default_space.into(),
            default_version: default_version.into(),
        }
    }

    /// Parse a GraphQL schema file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<DataModelSchema> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read schema file: {}", path.as_ref().display()))?;

        self.parse_schema(&content)
            .with_context(|| format!("Failed to parse schema file: {}", path.as_ref().display()))
    }

    /// Parse GraphQL schema from string
    pub fn parse_schema(&self, content: &str) -> Result<DataModelSchema> {
        let document = graphql_parser::parse_schema::<String>(content)
            .map_err(|e| anyhow!("GraphQL parse error: {}", e))?;

        self.process_document(&document)
    }

    fn process_document(&self, document: &Document<'_, String>) -> Result<DataModelSchema> {
        let mut raw = Vec::new();
        for definition in &document.definitions {
            if let Definition::TypeDefinition(type_def) = definition {
                if let Some(view) = self.process_type_definition(type_def)? {
                    raw.push(view);
                }
            }
        }

        let names: Vec<String> = raw.iter().map(|r| r.view.name.clone()).collect();
        let mut schema = DataModelSchema::new();
        for r in &raw {
            let mut view = r.view.clone();
            for field in &r.declared {
                let mut field = field.clone();
                self.resolve_field_kind(&view, &mut field, &names)?;
                view.add_field(field);
            }
            schema.add_view(view);
        }

        merge_inherited_fields(&mut schema);
        Ok(schema)
    }

    fn process_type_definition(&self, type_def: &TypeDefinition<'_, String>) -> Result<Option<RawView>> {
        let (name, description, implements, directives, fields, is_interface) = match type_def {
            TypeDefinition::Object(object) => (
                &object.name,
                &object.description,
                &object.implements_interfaces,
                &object.directives,
                &object.fields,
                false,
            ),
            TypeDefinition::Interface(interface) => (
                &interface.name,
                &interface.description,
                &interface.implements_interfaces,
                &interface.directives,
                &interface.fields,
                true,
            ),
            _ => return Ok(None),
        };

        let view_directive = directives.iter().find(|d| d.name == "view");
        let space = view_directive
            .and_then(|d| string_arg(d, "space"))
            .unwrap_or_else(|| self.default_space.clone());
        let version = view_directive
            .and_then(|d| string_arg(d, "version"))
            .unwrap_or_else(|| self.default_version.clone());

        let mut view = ViewDefinition::new(name.clone(), space, version);
        view.is_interface = is_interface;
        view.implements = implements.clone();
        view.description = description.clone();

        let declared = fields
            .iter()
            .map(|f| self.parse_field(f))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid field in view '{}'", name))?;

        Ok(Some(RawView { view, declared }))
    }

    /// Parse a field into a scalar or a placeholder relation resolved later.
    fn parse_field(&self, field: &Field<'_, String>) -> Result<FieldDefinition> {
        let (type_name, required, list) = unwrap_type(&field.field_type)?;
        let kind = match ScalarType::from_graphql(&type_name) {
            Some(scalar) => FieldKind::Scalar(scalar),
            None => FieldKind::DirectRelation { target: type_name },
        };

        let mut definition = FieldDefinition {
            name: field.name.clone(),
            kind,
            required,
            list,
            description: field.description.clone(),
        };

        if let Some(relation) = field.directives.iter().find(|d| d.name == "relation") {
            let target = definition
                .target()
                .ok_or_else(|| anyhow!("@relation on scalar field '{}'", field.name))?
                .to_string();
            let (edge_space, edge_type) = match relation.arguments.iter().find(|(k, _)| k == "type") {
                Some((_, Value::Object(fields))) => (object_string(fields, "space"), object_string(fields, "externalId")),
                _ => (None, None),
            };
            let direction = match relation.arguments.iter().find(|(k, _)| k == "direction") {
                Some((_, Value::Enum(dir))) | Some((_, Value::String(dir))) => parse_direction(dir)?,
                _ => Direction::Outwards,
            };
            definition.kind = FieldKind::Edge {
                target,
                edge_space: edge_space.unwrap_or_default(),
                edge_type: edge_type.unwrap_or_default(),
                direction,
            };
        }

        Ok(definition)
    }

    /// Lists of views become edges, and edge types default to `{View}.{field}`.
    fn resolve_field_kind(&self, view: &ViewDefinition, field: &mut FieldDefinition, names: &[String]) -> Result<()> {
        match &mut field.kind {
            FieldKind::Scalar(_) => {}
            FieldKind::DirectRelation { target } => {
                if !names.contains(target) {
                    return Err(anyhow!(
                        "Field '{}.{}' has unknown type '{}'",
                        view.name,
                        field.name,
                        target
                    ));
                }
                if field.list {
                    field.kind = FieldKind::Edge {
                        target: target.clone(),
                        edge_space: view.space.clone(),
                        edge_type: format!("{}.{}", view.name, field.name),
                        direction: Direction::Outwards,
                    };
                }
            }
            FieldKind::Edge {
                edge_space, edge_type, ..
            } => {
                if edge_space.is_empty() {
                    *edge_space = view.space.clone();
                }
                if edge_type.is_empty() {
                    *edge_type = format!("{}.{}", view.name, field.name);
                }
            }
        }
        Ok(())
    }
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new("default", "1")
    }
}

/// Fields declared on ancestors are appended after the view's own fields,
/// unless the view redeclares them.
fn merge_inherited_fields(schema: &mut DataModelSchema) {
    let merged: Vec<Vec<FieldDefinition>> = schema
        .views
        .iter()
        .map(|view| {
            let mut fields = view.fields.clone();
            for ancestor in schema.ancestors(&view.name) {
                for field in &ancestor.fields {
                    if !fields.iter().any(|f| f.name == field.name) {
                        fields.push(field.clone());
                    }
                }
            }
            fields
        })
        .collect();

    for (view, fields) in schema.views.iter_mut().zip(merged) {
        view.fields = fields;
    }
}

fn unwrap_type(gql_type: &Type<'_, String>) -> Result<(String, bool, bool)> {
    match gql_type {
        Type::NamedType(name) => Ok((name.clone(), false, false)),
        Type::NonNullType(inner) => {
            let (name, _, list) = unwrap_type(inner)?;
            Ok((name, true, list))
        }
        Type::ListType(inner) => {
            let (name, _, list) = unwrap_type(inner)?;
            if list {
                return Err(anyhow!("Nested lists are not supported: [{}]", name));
            }
            Ok((name, false, true))
        }
    }
}

fn string_arg(directive: &Directive<'_, String>, name: &str) -> Option<String> {
    directive.arguments.iter().find_map(|(k, v)| match v {
        Value::String(s) if k == name => Some(s.clone()),
        _ => None,
    })
}

fn object_string(fields: &BTreeMap<String, Value<'_, String>>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn parse_direction(value: &str) -> Result<Direction> {
    match value.to_ascii_uppercase().as_str() {
        "OUTWARDS" => Ok(Direction::Outwards),
        "INWARDS" => Ok(Direction::Inwards),
        other => Err(anyhow!("Unknown relation direction '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        interface PowerAsset @view(space: "core", version: "1") {
            name: String!
            ordering: Int
        }

        type Generator implements PowerAsset @view(space: "core", version: "2") {
            name: String!
            ordering: Int
            pMax: Float
        }

        type ShopFile @view(space: "core", version: "1") {
            name: String!
        }

        type ShopCase @view(space: "core", version: "1") {
            startTime: Timestamp
            asset: PowerAsset
            shopFiles: [ShopFile] @relation(type: {space: "types", externalId: "ShopCase.shopFiles"}, direction: OUTWARDS)
            plain: [ShopFile]
            prices: [TimeSeries]
        }
    "#;

    fn parse() -> DataModelSchema {
        SchemaParser::default().parse_schema(SCHEMA).unwrap()
    }

    #[test]
    fn test_parse_views() {
        let schema = parse();
        assert_eq!(schema.view_names(), vec!["PowerAsset", "Generator", "ShopFile", "ShopCase"]);

        let asset = schema.get_view("PowerAsset").unwrap();
        assert!(asset.is_interface);
        assert_eq!(asset.space, "core");

        let generator = schema.get_view("Generator").unwrap();
        assert_eq!(generator.version, "2");
        assert_eq!(generator.implements, vec!["PowerAsset".to_string()]);
        assert!(generator.field("name").unwrap().required);
        assert_eq!(generator.field("pMax").unwrap().scalar_type(), Some(ScalarType::Float64));
    }

    #[test]
    fn test_parse_relations() {
        let schema = parse();
        let case = schema.get_view("ShopCase").unwrap();

        assert_eq!(
            case.field("asset").unwrap().kind,
            FieldKind::DirectRelation { target: "PowerAsset".into() }
        );
        assert_eq!(
            case.field("shopFiles").unwrap().kind,
            FieldKind::Edge {
                target: "ShopFile".into(),
                edge_space: "types".into(),
                edge_type: "ShopCase.shopFiles".into(),
                direction: Direction::Outwards,
            }
        );
        assert_eq!(
            case.field("plain").unwrap().kind,
            FieldKind::Edge {
                target: "ShopFile".into(),
                edge_space: "core".into(),
                edge_type: "ShopCase.plain".into(),
                direction: Direction::Outwards,
            }
        );
        let prices = case.field("prices").unwrap();
        assert!(prices.list);
        assert_eq!(prices.scalar_type(), Some(ScalarType::TimeSeries));
    }

    #[test]
    fn test_inherited_fields_are_merged() {
        let schema = SchemaParser::default()
            .parse_schema(
                r#"
                interface Base @view(space: "s", version: "1") { name: String! kind: String }
                type Leaf implements Base @view(space: "s", version: "1") { extra: Int }
                "#,
            )
            .unwrap();
        let leaf = schema.get_view("Leaf").unwrap();
        let names: Vec<&str> = leaf.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["extra", "name", "kind"]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = SchemaParser::default()
            .parse_schema("type A @view(space: \"s\", version: \"1\") { b: Missing }")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("unknown type 'Missing'"));
    }

    #[test]
    fn test_view_defaults() {
        let schema = SchemaParser::new("fallback", "7")
            .parse_schema("type Plain { name: String }")
            .unwrap();
        let view = schema.get_view("Plain").unwrap();
        assert_eq!((view.space.as_str(), view.version.as_str()), ("fallback", "7"));
    }
}
