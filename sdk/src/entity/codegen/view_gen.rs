//! Per-view module generator using the rust-codegen crate

use crate::codegen::{CodeGenerator, CodegenResult};
use crate::entity::schema::{
    DataModelSchema, FieldDefinition, FieldKind, ScalarType, SchemaParser, SchemaValidator,
    ViewDefinition,
};
use crate::dm::Direction;
use anyhow::{anyhow, Context, Result};
use convert_case::{Case, Casing};
use rust_codegen::{Field, Function, Impl, Scope, Struct, Type};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Generator for typed data classes, filters and APIs of each view
pub struct ViewCodeGenerator {
    /// Crate path the generated code imports the SDK from
    sdk_path: String,
    default_space: String,
    default_version: String,
}

impl ViewCodeGenerator {
    pub fn new() -> Self {
        Self {
            sdk_path: "powerops_sdk".to_string(),
            default_space: "power_ops_core".to_string(),
            default_version: "1".to_string(),
        }
    }

    /// Generated code imports the SDK from `path` (e.g. `crate` inside the SDK itself).
    pub fn with_sdk_path(mut self, path: impl Into<String>) -> Self {
        self.sdk_path = path.into();
        self
    }

    pub fn with_defaults(mut self, space: impl Into<String>, version: impl Into<String>) -> Self {
        self.default_space = space.into();
        self.default_version = version.into();
        self
    }

    pub fn parser(&self) -> SchemaParser {
        SchemaParser::new(&self.default_space, &self.default_version)
    }

    pub fn module_name(view: &str) -> String {
        view.to_case(Case::Snake)
    }

    fn const_prefix(view: &str) -> String {
        view.to_case(Case::Constant)
    }

    fn view_const(view: &str) -> String {
        format!("{}_VIEW", Self::const_prefix(view))
    }

    fn edge_const(view: &str, field: &str) -> String {
        format!("{}_{}_EDGE", Self::const_prefix(view), field.to_case(Case::Constant))
    }

    /// Path of another view's constant as seen from `view`'s module
    fn view_const_path(view: &ViewDefinition, target: &str) -> String {
        if target == view.name {
            Self::view_const(target)
        } else {
            format!("super::{}::{}", Self::module_name(target), Self::view_const(target))
        }
    }

    /// Generate the Rust module for one view
    pub fn generate_view(&self, view: &ViewDefinition, schema: &DataModelSchema) -> Result<String> {
        let mut header = Scope::new();
        header.raw(&format!("//! Generated view: {}", view.name));
        header.raw("// This file is auto-generated. Do not edit manually.");
        header.raw("");

        let mut scope = Scope::new();
        self.add_imports(&mut scope, view);
        self.add_constants(&mut scope, view);

        self.generate_read_struct(&mut scope, view)?;
        self.generate_write_struct(&mut scope, view)?;
        self.generate_domain_model_impl(&mut scope, view, schema);
        self.generate_instances_write_impl(&mut scope, view);
        self.generate_lists(&mut scope, view);
        self.generate_field_enums(&mut scope, view);
        self.generate_filter(&mut scope, view)?;
        self.generate_api(&mut scope, view);

        Ok(format!("{}{}", header.to_string(), scope.to_string()))
    }

    /// Imports only what the module body refers to.
    fn add_imports(&self, scope: &mut Scope, view: &ViewDefinition) {
        let sdk = &self.sdk_path;
        let has_scalar = |wanted: ScalarType| {
            view.fields
                .iter()
                .any(|f| matches!(f.kind, FieldKind::Scalar(scalar) if scalar == wanted))
        };
        let has_edges = view.fields.iter().any(FieldDefinition::is_edge);
        let aggregates = view.scalar_fields().any(|f| !f.list);

        let mut chrono = Vec::new();
        if has_scalar(ScalarType::Timestamp) {
            chrono.extend(["DateTime", "Utc"]);
        }
        if has_scalar(ScalarType::Date) {
            chrono.push("NaiveDate");
        }
        import_names(scope, "chrono", &chrono);
        scope.import("futures", "Stream");

        let dm: Vec<&str> = [
            ("Aggregation", aggregates),
            ("Direction", has_edges),
            ("Filter", true),
            ("HistogramBucket", aggregates),
            ("Node", true),
            ("NodeId", true),
            ("NodeRef", has_edges),
            ("ViewRef", true),
        ]
        .into_iter()
        .filter_map(|(name, used)| used.then_some(name))
        .collect();
        import_names(scope, &format!("{}::dm", sdk), &dm);
        scope.import(&format!("{}::entity", sdk), "*");
        scope.import("serde", "Serialize");
        if has_scalar(ScalarType::Json) {
            scope.import("serde_json", "Value");
        }
        scope.import("std::ops", "Deref");

        let targets: BTreeSet<&str> = view
            .relation_fields()
            .filter_map(|f| f.target())
            .filter(|t| *t != view.name)
            .collect();
        for target in targets {
            scope.import(
                &format!("super::{}", Self::module_name(target)),
                &format!("{{{}, {}Write}}", target, target),
            );
        }
        scope.raw("");
    }

    fn add_constants(&self, scope: &mut Scope, view: &ViewDefinition) {
        scope.raw(&format!(
            "/// View backing [`{}`]\npub const {}: ViewRef = ViewRef::new(\"{}\", \"{}\", \"{}\");",
            view.name,
            Self::view_const(&view.name),
            view.space,
            view.name,
            view.version
        ));
        for field in view.relation_fields() {
            if let FieldKind::Edge {
                edge_space,
                edge_type,
                ..
            } = &field.kind
            {
                scope.raw(&format!(
                    "pub const {}: NodeRef = NodeRef::new(\"{}\", \"{}\");",
                    Self::edge_const(&view.name, &field.name),
                    edge_space,
                    edge_type
                ));
            }
        }
        scope.raw("");
    }

    /// Rust type of a field on the read (`write == false`) or write class
    fn field_type_to_rust(&self, field: &FieldDefinition, write: bool) -> String {
        let suffix = if write { "Write" } else { "" };
        match &field.kind {
            FieldKind::Scalar(scalar) => {
                let base = if field.list {
                    format!("Vec<{}>", scalar.rust_type())
                } else {
                    scalar.rust_type().to_string()
                };
                if field.required {
                    base
                } else {
                    format!("Option<{}>", base)
                }
            }
            FieldKind::DirectRelation { target } => format!("Option<Relation<{}{}>>", target, suffix),
            FieldKind::Edge { target, .. } => format!("Option<Vec<Relation<{}{}>>>", target, suffix),
        }
    }

    fn rust_field(&self, field: &FieldDefinition, ty: String) -> Field {
        let rust_field_name = field.name.to_case(Case::Snake);
        let annotation = if rust_field_name != field.name {
            vec![format!("#[serde(rename = \"{}\")]", field.name)]
        } else {
            vec![]
        };
        Field {
            name: format!("pub {}", rust_field_name),
            ty: Type::new(&ty),
            documentation: field.description.iter().cloned().collect(),
            annotation,
        }
    }

    fn push_identity_fields(&self, target: &mut Struct, record_type: &str) {
        target.push_field(Field {
            name: "pub space".to_string(),
            ty: Type::new("String"),
            documentation: vec![],
            annotation: vec![],
        });
        target.push_field(Field {
            name: "pub external_id".to_string(),
            ty: Type::new("String"),
            documentation: vec![],
            annotation: vec!["#[serde(rename = \"externalId\")]".to_string()],
        });
        target.push_field(Field {
            name: "pub data_record".to_string(),
            ty: Type::new(record_type),
            documentation: vec![],
            annotation: vec!["#[serde(rename = \"dataRecord\")]".to_string()],
        });
    }

    fn generate_read_struct(&self, scope: &mut Scope, view: &ViewDefinition) -> Result<()> {
        let mut read = Struct::new(&view.name);
        read.vis("pub");
        match &view.description {
            Some(description) => read.doc(description),
            None => read.doc(&format!("Read class for the {} view", view.name)),
        };
        read.derive("Debug").derive("Clone").derive("PartialEq").derive("Serialize");

        self.push_identity_fields(&mut read, "DataRecord");
        for field in &view.fields {
            let ty = self.field_type_to_rust(field, false);
            read.push_field(self.rust_field(field, ty));
        }

        scope.push_struct(read);
        scope.raw("");
        Ok(())
    }

    fn generate_write_struct(&self, scope: &mut Scope, view: &ViewDefinition) -> Result<()> {
        let mut write = Struct::new(&format!("{}Write", view.name));
        write.vis("pub");
        write.doc(&format!("Write class for the {} view", view.name));
        write
            .derive("Debug")
            .derive("Clone")
            .derive("Default")
            .derive("PartialEq")
            .derive("Serialize");

        self.push_identity_fields(&mut write, "DataRecordWrite");
        for field in &view.fields {
            let ty = self.field_type_to_rust(field, true);
            write.push_field(self.rust_field(field, ty));
        }

        scope.push_struct(write);
        scope.raw("");

        for name in [view.name.clone(), format!("{}Write", view.name)] {
            scope.raw(&format!(
                "impl Identifiable for {} {{\n    fn node_id(&self) -> NodeId {{\n        NodeId::new(&self.space, &self.external_id)\n    }}\n}}\n",
                name
            ));
        }
        scope.raw(&format!(
            "impl DomainModelWrite for {}Write {{\n    const VIEW: ViewRef = {};\n}}\n",
            view.name,
            Self::view_const(&view.name)
        ));
        Ok(())
    }

    fn generate_domain_model_impl(&self, scope: &mut Scope, view: &ViewDefinition, schema: &DataModelSchema) {
        let mut code = format!(
            "impl DomainModel for {name} {{\n    type Write = {name}Write;\n\n    const VIEW: ViewRef = {view_const};\n",
            name = view.name,
            view_const = Self::view_const(&view.name)
        );

        let ancestors = schema.ancestors(&view.name);
        if !ancestors.is_empty() {
            let refs: Vec<String> = ancestors
                .iter()
                .map(|a| Self::view_const_path(view, &a.name))
                .collect();
            code.push_str(&format!(
                "    const IMPLEMENTS: &'static [ViewRef] = &[{}];\n",
                refs.join(", ")
            ));
        }

        let relations: Vec<&FieldDefinition> = view.relation_fields().collect();
        if !relations.is_empty() {
            code.push_str("    const CONNECTIONS: &'static [ConnectionDef] = &[\n");
            for field in &relations {
                let target = field.target().unwrap_or_default();
                let target_const = Self::view_const_path(view, target);
                match &field.kind {
                    FieldKind::Edge { direction, .. } => code.push_str(&format!(
                        "        ConnectionDef::edge(\"{}\", {}, Direction::{}, {}),\n",
                        field.name,
                        Self::edge_const(&view.name, &field.name),
                        direction_name(*direction),
                        target_const
                    )),
                    _ => code.push_str(&format!(
                        "        ConnectionDef::direct(\"{}\", {}),\n",
                        field.name, target_const
                    )),
                }
            }
            code.push_str("    ];\n");
        }

        code.push_str(
            "\n    fn from_node(node: &Node) -> EntityResult<Self> {\n        let props = NodeProperties::new(node, Self::VIEW);\n        Ok(Self {\n            space: node.space.clone(),\n            external_id: node.external_id.clone(),\n            data_record: props.data_record(),\n",
        );
        for field in &view.fields {
            let rust_name = field.name.to_case(Case::Snake);
            let value = match &field.kind {
                FieldKind::Scalar(_) if field.required => format!("props.required(\"{}\")?", field.name),
                FieldKind::Scalar(_) => format!("props.optional(\"{}\")?", field.name),
                FieldKind::DirectRelation { .. } => format!("props.direct_relation(\"{}\")?", field.name),
                FieldKind::Edge { .. } => "None".to_string(),
            };
            code.push_str(&format!("            {}: {},\n", rust_name, value));
        }
        code.push_str("        })\n    }\n");

        if !relations.is_empty() {
            code.push_str("\n    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {\n        match property {\n");
            for field in &relations {
                let rust_name = field.name.to_case(Case::Snake);
                let assign = if field.is_edge() {
                    format!("self.{} = Some(Connected::into_relations(related)?)", rust_name)
                } else {
                    format!("self.{} = Connected::into_single(related)?", rust_name)
                };
                code.push_str(&format!("            \"{}\" => {},\n", field.name, assign));
            }
            code.push_str("            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),\n        }\n        Ok(())\n    }\n");
        }

        code.push_str("\n    fn data_record(&self) -> &DataRecord {\n        &self.data_record\n    }\n");

        code.push_str(&format!(
            "\n    fn as_write(&self) -> {}Write {{\n        {}Write {{\n            space: self.space.clone(),\n            external_id: self.external_id.clone(),\n            data_record: self.data_record.as_write(),\n",
            view.name, view.name
        ));
        for field in &view.fields {
            let rust_name = field.name.to_case(Case::Snake);
            let value = match &field.kind {
                FieldKind::Scalar(_) => format!("self.{}.clone()", rust_name),
                FieldKind::DirectRelation { .. } => format!("self.{}.as_ref().map(Relation::as_write)", rust_name),
                FieldKind::Edge { .. } => format!(
                    "self.{}.as_ref().map(|items| items.iter().map(Relation::as_write).collect())",
                    rust_name
                ),
            };
            code.push_str(&format!("            {}: {},\n", rust_name, value));
        }
        code.push_str("        }\n    }\n}\n");

        scope.raw(&code);
    }

    fn generate_instances_write_impl(&self, scope: &mut Scope, view: &ViewDefinition) {
        let mut code = format!(
            "impl InstancesWrite for {}Write {{\n    fn to_instances_write(\n        &self,\n        cache: &mut VisitedSet,\n        options: &WriteOptions,\n    ) -> EntityResult<ResourcesWrite> {{\n        let mut resources = ResourcesWrite::default();\n        let id = self.node_id();\n        if !cache.visit_node(&id) {{\n            return Ok(resources);\n        }}\n\n        let mut writer = PropertyWriter::new(Self::VIEW, options);\n",
            view.name
        );
        for field in &view.fields {
            let rust_name = field.name.to_case(Case::Snake);
            match &field.kind {
                FieldKind::Scalar(_) if field.required => code.push_str(&format!(
                    "        writer.set(\"{}\", &self.{})?;\n",
                    field.name, rust_name
                )),
                FieldKind::Scalar(_) => code.push_str(&format!(
                    "        writer.optional(\"{}\", &self.{})?;\n",
                    field.name, rust_name
                )),
                FieldKind::DirectRelation { .. } => code.push_str(&format!(
                    "        writer.direct_relation(\"{}\", &self.{})?;\n",
                    field.name, rust_name
                )),
                FieldKind::Edge { .. } => {}
            }
        }
        code.push_str("        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));\n");

        for field in view.relation_fields() {
            let rust_name = field.name.to_case(Case::Snake);
            match &field.kind {
                FieldKind::DirectRelation { .. } => code.push_str(&format!(
                    "\n        if let Some(related) = &self.{} {{\n            resources.extend(related.to_instances_write(cache, options)?);\n        }}\n",
                    rust_name
                )),
                FieldKind::Edge { direction, .. } => code.push_str(&format!(
                    "\n        for related in self.{}.iter().flatten() {{\n            resources.extend(write_edge(&id, related, {}, Direction::{}, cache, options)?);\n        }}\n",
                    rust_name,
                    Self::edge_const(&view.name, &field.name),
                    direction_name(*direction)
                )),
                FieldKind::Scalar(_) => {}
            }
        }
        code.push_str("        Ok(resources)\n    }\n}\n");
        scope.raw(&code);
    }

    fn generate_lists(&self, scope: &mut Scope, view: &ViewDefinition) {
        scope.raw(&format!(
            "pub type {name}List = NodeList<{name}>;\npub type {name}WriteList = NodeList<{name}Write>;\n",
            name = view.name
        ));
    }

    /// `XField` for aggregations and `XTextField` for search
    fn generate_field_enums(&self, scope: &mut Scope, view: &ViewDefinition) {
        let scalars: Vec<&FieldDefinition> = view.scalar_fields().filter(|f| !f.list).collect();
        let texts: Vec<&FieldDefinition> = view.text_fields().collect();

        for (suffix, fields, doc) in [
            ("Field", scalars, "Scalar properties usable in aggregations"),
            ("TextField", texts, "Text properties usable in search"),
        ] {
            if fields.is_empty() {
                continue;
            }
            let name = format!("{}{}", view.name, suffix);
            let mut code = format!(
                "/// {}\n#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\npub enum {} {{\n",
                doc, name
            );
            for field in &fields {
                code.push_str(&format!("    {},\n", field.name.to_case(Case::Pascal)));
            }
            code.push_str(&format!(
                "}}\n\nimpl {} {{\n    pub fn property(&self) -> &'static str {{\n        match self {{\n",
                name
            ));
            for field in &fields {
                code.push_str(&format!(
                    "            Self::{} => \"{}\",\n",
                    field.name.to_case(Case::Pascal),
                    field.name
                ));
            }
            code.push_str("        }\n    }\n}\n");
            scope.raw(&code);
        }
    }

    fn generate_filter(&self, scope: &mut Scope, view: &ViewDefinition) -> Result<()> {
        let name = format!("{}Filter", view.name);
        let mut args = Struct::new(&name);
        args.vis("pub");
        args.doc(&format!("Filter arguments for {} reads", view.name));
        args.derive("Debug").derive("Clone").derive("Default");

        let mut function = Function::new(&format!("create_{}_filter", Self::module_name(&view.name)));
        function
            .doc(&format!("Build the filter for {} reads from its arguments", view.name))
            .vis("pub")
            .arg("args", &name)
            .ret("Option<Filter>")
            .line(&format!("FilterBuilder::new({})", Self::view_const(&view.name)));

        let push = |args: &mut Struct, field: &str, ty: &str| {
            args.push_field(Field {
                name: format!("pub {}", field),
                ty: Type::new(ty),
                documentation: vec![],
                annotation: vec![],
            });
        };

        for field in view.fields.iter().filter(|f| !f.list) {
            let rust_name = field.name.to_case(Case::Snake);
            match &field.kind {
                FieldKind::Scalar(scalar) if scalar.is_text() => {
                    push(&mut args, &rust_name, "Option<OneOrMany<String>>");
                    push(&mut args, &format!("{}_prefix", rust_name), "Option<String>");
                    function.line(&format!("    .equals_or_in(\"{}\", args.{})", field.name, rust_name));
                    function.line(&format!(
                        "    .prefix(\"{}\", args.{}_prefix.as_deref())",
                        field.name, rust_name
                    ));
                }
                FieldKind::Scalar(scalar) if scalar.is_ordered() => {
                    let ty = format!("Option<{}>", scalar.rust_type());
                    push(&mut args, &format!("min_{}", rust_name), &ty);
                    push(&mut args, &format!("max_{}", rust_name), &ty);
                    function.line(&format!(
                        "    .range(\"{}\", args.min_{}, args.max_{})",
                        field.name, rust_name, rust_name
                    ));
                }
                FieldKind::Scalar(ScalarType::Boolean) => {
                    push(&mut args, &rust_name, "Option<bool>");
                    function.line(&format!("    .boolean(\"{}\", args.{})", field.name, rust_name));
                }
                FieldKind::DirectRelation { .. } => {
                    push(&mut args, &rust_name, "Option<OneOrMany<NodeId>>");
                    function.line(&format!(
                        "    .direct_relation(\"{}\", args.{})",
                        field.name, rust_name
                    ));
                }
                _ => {}
            }
        }

        push(&mut args, "external_id_prefix", "Option<String>");
        push(&mut args, "space", "Option<OneOrMany<String>>");
        push(&mut args, "filter", "Option<Filter>");
        function
            .line("    .external_id_prefix(args.external_id_prefix.as_deref())")
            .line("    .space(args.space)")
            .line("    .extra(args.filter)")
            .line("    .build()");

        scope.push_struct(args);
        scope.raw("");
        scope.push_fn(function);
        scope.raw("");
        Ok(())
    }

    fn generate_api(&self, scope: &mut Scope, view: &ViewDefinition) {
        let name = &view.name;
        let api_name = format!("{}Api", name);
        let filter_fn = format!("create_{}_filter", Self::module_name(name));

        let mut api = Struct::new(&api_name);
        api.vis("pub");
        api.doc(&format!("Typed access to {} nodes", name));
        api.derive("Clone");
        api.push_field(Field {
            name: "inner".to_string(),
            ty: Type::new(&format!("NodeApi<{}>", name)),
            documentation: vec![],
            annotation: vec![],
        });
        scope.push_struct(api);
        scope.raw("");

        let mut methods = Impl::new(&api_name);

        let mut new = Function::new("new");
        new.vis("pub")
            .arg("client", "&DomainClient")
            .ret("Self")
            .line("Self { inner: client.api() }");
        methods.push_fn(new);

        let mut list = Function::new("list");
        list.doc(&format!("List {} nodes matching the filter", name))
            .vis("pub")
            .set_async(true)
            .arg_ref_self()
            .arg("filter", &format!("{}Filter", name))
            .arg("limit", "Option<usize>")
            .arg("retrieve_connections", "RetrieveConnections")
            .ret(&format!("EntityResult<{}List>", name))
            .line("self.inner")
            .line("    .list(ListOptions {")
            .line(&format!("        filter: {}(filter),", filter_fn))
            .line("        limit,")
            .line("        retrieve_connections,")
            .line("        ..Default::default()")
            .line("    })")
            .line("    .await");
        methods.push_fn(list);

        if view.text_fields().next().is_some() {
            let mut search = Function::new("search");
            search
                .doc(&format!("Free-text search over {} nodes", name))
                .vis("pub")
                .set_async(true)
                .arg_ref_self()
                .arg("query", "&str")
                .arg("properties", &format!("&[{}TextField]", name))
                .arg("filter", &format!("{}Filter", name))
                .arg("limit", "usize")
                .ret(&format!("EntityResult<{}List>", name))
                .line("self.inner")
                .line("    .search(SearchOptions {")
                .line("        query: Some(query.to_string()),")
                .line("        properties: properties.iter().map(|p| p.property().to_string()).collect(),")
                .line(&format!("        filter: {}(filter),", filter_fn))
                .line("        limit,")
                .line("    })")
                .line("    .await");
            methods.push_fn(search);
        }

        if view.scalar_fields().any(|f| !f.list) {
            let mut aggregate = Function::new("aggregate");
            aggregate
                .doc("Single aggregate over the matching nodes")
                .vis("pub")
                .set_async(true)
                .arg_ref_self()
                .arg("aggregation", "Aggregation")
                .arg("property", &format!("{}Field", name))
                .arg("filter", &format!("{}Filter", name))
                .ret("EntityResult<Option<f64>>")
                .line("self.inner")
                .line(&format!(
                    "    .aggregate_value(aggregation, property.property(), {}(filter))",
                    filter_fn
                ))
                .line("    .await");
            methods.push_fn(aggregate);

            let mut histogram = Function::new("histogram");
            histogram
                .vis("pub")
                .set_async(true)
                .arg_ref_self()
                .arg("property", &format!("{}Field", name))
                .arg("interval", "f64")
                .arg("filter", &format!("{}Filter", name))
                .ret("EntityResult<Vec<HistogramBucket>>")
                .line("self.inner")
                .line(&format!(
                    "    .histogram(property.property(), interval, {}(filter))",
                    filter_fn
                ))
                .line("    .await");
            methods.push_fn(histogram);
        }

        let mut iterate = Function::new("iterate");
        iterate
            .doc("Stream matching nodes in chunks")
            .vis("pub")
            .arg_ref_self()
            .arg("chunk_size", "usize")
            .arg("filter", &format!("{}Filter", name))
            .arg("retrieve_connections", "RetrieveConnections")
            .ret(&format!(
                "impl Stream<Item = EntityResult<{}List>> + Send + 'static",
                name
            ))
            .line("self.inner")
            .line(&format!(
                "    .iterate(chunk_size, {}(filter), retrieve_connections)",
                filter_fn
            ));
        methods.push_fn(iterate);

        scope.push_impl(methods);
        scope.raw("");
        scope.raw(&format!(
            "impl Deref for {} {{\n    type Target = NodeApi<{}>;\n\n    fn deref(&self) -> &Self::Target {{\n        &self.inner\n    }}\n}}",
            api_name, name
        ));
    }

    /// Generate mod.rs declaring and re-exporting every view module
    pub fn generate_views_mod(&self, schema: &DataModelSchema) -> String {
        let mut content = String::new();
        content.push_str("//! Generated views module\n");
        content.push_str("//!\n");
        content.push_str("// This file is auto-generated. Do not edit manually.\n\n");

        for view in &schema.views {
            content.push_str(&format!("pub mod {};\n", Self::module_name(&view.name)));
        }
        content.push('\n');

        for view in &schema.views {
            let name = &view.name;
            let mut exports = vec![
                name.clone(),
                format!("{}Api", name),
                format!("{}Filter", name),
                format!("{}List", name),
                format!("{}Write", name),
                format!("{}WriteList", name),
                Self::view_const(name),
                format!("create_{}_filter", Self::module_name(name)),
            ];
            if view.scalar_fields().any(|f| !f.list) {
                exports.push(format!("{}Field", name));
            }
            if view.text_fields().next().is_some() {
                exports.push(format!("{}TextField", name));
            }
            content.push_str(&format!(
                "pub use {}::{{{}}};\n",
                Self::module_name(name),
                exports.join(", ")
            ));
        }

        content
    }

    /// Write one module per view plus mod.rs into `dst_dir`.
    pub fn write_schema(&self, schema: &DataModelSchema, dst_dir: &Path) -> Result<Vec<PathBuf>> {
        if !dst_dir.exists() {
            fs::create_dir_all(dst_dir)
                .with_context(|| format!("Failed to create output directory: {}", dst_dir.display()))?;
        }

        let mut generated_files = Vec::new();
        for view in &schema.views {
            let code = self
                .generate_view(view, schema)
                .with_context(|| format!("Failed to generate code for view: {}", view.name))?;
            let output_path = dst_dir.join(format!("{}.rs", Self::module_name(&view.name)));
            fs::write(&output_path, code)
                .with_context(|| format!("Failed to write view file: {}", output_path.display()))?;
            generated_files.push(output_path);
        }

        let mod_path = dst_dir.join("mod.rs");
        fs::write(&mod_path, self.generate_views_mod(schema))
            .with_context(|| format!("Failed to write views mod file: {}", mod_path.display()))?;
        generated_files.push(mod_path);
        Ok(generated_files)
    }

    fn schema_files(src_dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(src_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .filter(|p| p.extension().is_some_and(|ext| ext == "graphql"))
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        files
    }
}

fn import_names(scope: &mut Scope, path: &str, names: &[&str]) {
    match names {
        [] => {}
        [name] => {
            scope.import(path, name);
        }
        _ => {
            scope.import(path, &format!("{{{}}}", names.join(", ")));
        }
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Outwards => "Outwards",
        Direction::Inwards => "Inwards",
    }
}

impl Default for ViewCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for ViewCodeGenerator {
    fn generator_name(&self) -> &str {
        "views"
    }

    fn should_generate(&self, src_dir: &Path) -> bool {
        !Self::schema_files(src_dir).is_empty()
    }

    fn generate(&self, src_dir: &Path, dst_dir: &Path) -> Result<CodegenResult> {
        let parser = self.parser();
        let mut schema = DataModelSchema::new();
        for path in Self::schema_files(src_dir) {
            let parsed = parser.parse_file(&path)?;
            schema.views.extend(parsed.views);
        }

        let validation = SchemaValidator::new().validate(&schema)?;
        if !validation.is_valid() {
            return Err(anyhow!(
                "Schema validation failed: {}",
                validation.errors.join("; ")
            ));
        }

        let files_generated = self.write_schema(&schema, dst_dir)?;
        Ok(CodegenResult {
            generator_name: self.generator_name().to_string(),
            files_generated,
            success: true,
            message: format!("Generated {} views", schema.view_count()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"
        type ShopFile @view(space: "power_ops_core", version: "1") {
            name: String!
            order: Int
            isAscii: Boolean
        }

        type ShopCase @view(space: "power_ops_core", version: "1") {
            startTime: Timestamp
            shopFiles: [ShopFile] @relation(type: {space: "power_ops_types", externalId: "ShopCase.shopFiles"}, direction: OUTWARDS)
        }
    "#;

    fn schema() -> DataModelSchema {
        ViewCodeGenerator::new().parser().parse_schema(SCHEMA).unwrap()
    }

    #[test]
    fn test_generate_scalar_view() {
        let schema = schema();
        let generator = ViewCodeGenerator::new();
        let code = generator
            .generate_view(schema.get_view("ShopFile").unwrap(), &schema)
            .unwrap();

        assert!(code.starts_with("//! Generated view: ShopFile\n"));
        assert!(!code.contains("#![allow"));
        assert!(code.contains("use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};"));
        assert!(!code.contains("use chrono"));
        assert!(!code.contains("use serde_json"));
        assert!(code.contains("if !cache.visit_node(&id)"));
        assert!(code.contains("struct ShopFile"));
        assert!(code.contains("struct ShopFileWrite"));
        assert!(code.contains("SHOP_FILE_VIEW: ViewRef = ViewRef::new(\"power_ops_core\", \"ShopFile\", \"1\")"));
        assert!(code.contains("pub name: String"));
        assert!(code.contains("pub order: Option<i32>"));
        assert!(code.contains("#[serde(rename = \"isAscii\")]"));
        assert!(code.contains("props.required(\"name\")?"));
        assert!(code.contains("writer.set(\"name\", &self.name)?"));
        assert!(code.contains(".range(\"order\", args.min_order, args.max_order)"));
        assert!(code.contains("enum ShopFileTextField"));
        assert!(!code.contains("CONNECTIONS"));
    }

    #[test]
    fn test_generate_edge_view() {
        let schema = schema();
        let generator = ViewCodeGenerator::new();
        let code = generator
            .generate_view(schema.get_view("ShopCase").unwrap(), &schema)
            .unwrap();

        assert!(code.contains("use super::shop_file::{ShopFile, ShopFileWrite}"));
        assert!(code.contains("use chrono::{DateTime, Utc};"));
        assert!(code.contains("Direction, Filter, HistogramBucket, Node, NodeId, NodeRef, ViewRef}"));
        assert!(code.contains("SHOP_CASE_SHOP_FILES_EDGE: NodeRef = NodeRef::new(\"power_ops_types\", \"ShopCase.shopFiles\")"));
        assert!(code.contains("pub shop_files: Option<Vec<Relation<ShopFile>>>"));
        assert!(code.contains("pub shop_files: Option<Vec<Relation<ShopFileWrite>>>"));
        assert!(code.contains(
            "ConnectionDef::edge(\"shopFiles\", SHOP_CASE_SHOP_FILES_EDGE, Direction::Outwards, super::shop_file::SHOP_FILE_VIEW)"
        ));
        assert!(code.contains("write_edge(&id, related, SHOP_CASE_SHOP_FILES_EDGE, Direction::Outwards, cache, options)"));
        // no text properties, so no search method
        assert!(!code.contains("fn search"));
    }

    #[test]
    fn test_generate_writes_modules() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("model.graphql"), SCHEMA).unwrap();

        let generator = ViewCodeGenerator::new();
        assert!(generator.should_generate(src.path()));
        let result = generator.generate(src.path(), dst.path()).unwrap();

        assert!(result.success);
        assert_eq!(result.files_generated.len(), 3);
        let mod_rs = fs::read_to_string(dst.path().join("mod.rs")).unwrap();
        assert!(mod_rs.contains("pub mod shop_case;"));
        assert!(mod_rs.contains("pub use shop_file::{ShopFile, ShopFileApi"));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("bad.graphql"), "type Bad { space: String }").unwrap();

        let err = ViewCodeGenerator::new().generate(src.path(), dst.path()).unwrap_err();
        assert!(err.to_string().contains("reserved name"));
    }
}
