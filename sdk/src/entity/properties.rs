//! Reading typed properties from nodes and building apply requests

use super::traits::{Identifiable, InstancesWrite, Relation};
use super::types::{
    DataRecord, DataRecordWrite, EntityError, EntityResult, ResourcesWrite, VisitedSet, WriteOptions,
};
use crate::dm::{Direction, EdgeApply, Node, NodeApply, NodeId, NodeOrEdgeData, NodeRef, PropertyMap, ViewId, ViewRef};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Typed access to the properties a node holds in one view.
pub struct NodeProperties<'a> {
    node: &'a Node,
    type_name: &'static str,
    props: Option<&'a PropertyMap>,
}

impl<'a> NodeProperties<'a> {
    pub fn new(node: &'a Node, view: ViewRef) -> Self {
        let view_id: ViewId = view.into();
        Self {
            node,
            type_name: view.external_id,
            props: node.view_properties(&view_id),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node.id()
    }

    pub fn data_record(&self) -> DataRecord {
        DataRecord::from_node(self.node)
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        self.props
            .and_then(|props| props.get(name))
            .filter(|value| !value.is_null())
    }

    fn convert<T: DeserializeOwned>(&self, name: &str, value: &Value) -> EntityResult<T> {
        serde_json::from_value(value.clone()).map_err(|_| {
            EntityError::type_conversion(
                self.type_name,
                name,
                std::any::type_name::<T>(),
                describe(value),
            )
        })
    }

    /// Unset and `null` both read as `None`.
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> EntityResult<Option<T>> {
        self.raw(name).map(|value| self.convert(name, value)).transpose()
    }

    pub fn required<T: DeserializeOwned>(&self, name: &str) -> EntityResult<T> {
        let value = self
            .raw(name)
            .ok_or_else(|| EntityError::missing_property(self.type_name, &self.node.id(), name))?;
        self.convert(name, value)
    }

    /// A direct relation, read as a bare identifier.
    pub fn direct_relation<M>(&self, name: &str) -> EntityResult<Option<Relation<M>>> {
        Ok(self.optional::<NodeId>(name)?.map(Relation::Id))
    }
}

/// Collects the properties of one node apply.
pub struct PropertyWriter {
    type_name: &'static str,
    write_none: bool,
    props: PropertyMap,
}

impl PropertyWriter {
    pub fn new(view: ViewRef, options: &WriteOptions) -> Self {
        Self {
            type_name: view.external_id,
            write_none: options.write_none,
            props: PropertyMap::new(),
        }
    }

    pub fn set<T: Serialize>(&mut self, name: &str, value: &T) -> EntityResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| EntityError::serialization(self.type_name, e))?;
        self.props.insert(name.to_string(), value);
        Ok(())
    }

    /// `None` is skipped, or written as `null` when `write_none` is set.
    pub fn optional<T: Serialize>(&mut self, name: &str, value: &Option<T>) -> EntityResult<()> {
        match value {
            Some(value) => self.set(name, value),
            None => {
                self.null(name);
                Ok(())
            }
        }
    }

    pub fn direct_relation<M: Identifiable>(&mut self, name: &str, value: &Option<Relation<M>>) -> EntityResult<()> {
        match value {
            Some(relation) => self.set(name, &relation.node_id()),
            None => {
                self.null(name);
                Ok(())
            }
        }
    }

    fn null(&mut self, name: &str) {
        if self.write_none {
            self.props.insert(name.to_string(), Value::Null);
        }
    }

    pub fn into_properties(self) -> PropertyMap {
        self.props
    }
}

/// The node apply for a write object in `view`.
pub fn node_apply(
    id: &NodeId,
    record: &DataRecordWrite,
    view: ViewRef,
    writer: PropertyWriter,
    options: &WriteOptions,
) -> NodeApply {
    NodeApply {
        space: id.space.clone(),
        external_id: id.external_id.clone(),
        existing_version: options.existing_version(record),
        sources: vec![NodeOrEdgeData {
            source: view.into(),
            properties: writer.into_properties(),
        }],
    }
}

/// External id given to the edge between two nodes.
pub fn edge_external_id(start: &NodeId, end: &NodeId) -> String {
    format!("{}:{}", start.external_id, end.external_id)
}

/// One edge of `edge_type` from `owner` to `related`, plus the related node's
/// own writes when it is a nested object.
pub fn write_edge<M>(
    owner: &NodeId,
    related: &Relation<M>,
    edge_type: NodeRef,
    direction: Direction,
    cache: &mut VisitedSet,
    options: &WriteOptions,
) -> EntityResult<ResourcesWrite>
where
    M: InstancesWrite + Identifiable,
{
    let other = related.node_id();
    let (start_node, end_node) = match direction {
        Direction::Outwards => (owner.clone(), other),
        Direction::Inwards => (other, owner.clone()),
    };

    let mut resources = ResourcesWrite::default();
    let edge_id = NodeId::new(&owner.space, edge_external_id(&start_node, &end_node));
    if cache.visit_edge(&edge_id) {
        resources.push_edge(EdgeApply {
            space: edge_id.space,
            external_id: edge_id.external_id,
            existing_version: None,
            edge_type: edge_type.to_node_id(),
            start_node,
            end_node,
            sources: Vec::new(),
        });
    }
    resources.extend(related.to_instances_write(cache, options)?);
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::InstanceProperties;
    use serde_json::json;

    const VIEW: ViewRef = ViewRef::new("core", "ShopFile", "1");

    fn node() -> Node {
        let mut properties = InstanceProperties::new();
        properties.entry("core".into()).or_default().insert(
            "ShopFile/1".into(),
            [
                ("name".to_string(), json!("f")),
                ("order".to_string(), json!(2)),
                ("label".to_string(), Value::Null),
                ("scenario".to_string(), json!({"space": "sp", "externalId": "s1"})),
            ]
            .into_iter()
            .collect(),
        );
        Node {
            space: "sp".into(),
            external_id: "file1".into(),
            version: 1,
            last_updated_time: 0,
            created_time: 0,
            deleted_time: None,
            properties,
        }
    }

    #[test]
    fn test_node_properties() {
        let node = node();
        let props = NodeProperties::new(&node, VIEW);
        assert_eq!(props.required::<String>("name").unwrap(), "f");
        assert_eq!(props.optional::<i64>("order").unwrap(), Some(2));
        assert_eq!(props.optional::<String>("label").unwrap(), None);
        assert_eq!(props.optional::<String>("absent").unwrap(), None);

        let scenario: Option<Relation<NodeId>> = props.direct_relation("scenario").unwrap();
        assert_eq!(scenario.unwrap().node_id(), NodeId::new("sp", "s1"));

        assert!(matches!(
            props.required::<String>("label"),
            Err(EntityError::MissingProperty { .. })
        ));
        assert!(matches!(
            props.optional::<bool>("name"),
            Err(EntityError::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_property_writer_write_none() {
        let mut writer = PropertyWriter::new(VIEW, &WriteOptions::default());
        writer.optional::<String>("label", &None).unwrap();
        writer.optional("name", &Some("x")).unwrap();
        assert_eq!(writer.into_properties().len(), 1);

        let options = WriteOptions {
            write_none: true,
            ..Default::default()
        };
        let mut writer = PropertyWriter::new(VIEW, &options);
        writer.optional::<String>("label", &None).unwrap();
        writer.direct_relation::<NodeId>("scenario", &None).unwrap();
        let props = writer.into_properties();
        assert_eq!(props.get("label"), Some(&Value::Null));
        assert_eq!(props.get("scenario"), Some(&Value::Null));
    }
}
