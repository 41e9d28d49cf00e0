//! Node and edge instances as read from and written to the service.

use super::ids::{NodeId, ViewId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Property values of one view, keyed by property identifier.
pub type PropertyMap = BTreeMap<String, Value>;

/// `properties[space]["<view>/<version>"][property]`
pub type InstanceProperties = BTreeMap<String, BTreeMap<String, PropertyMap>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstanceType {
    Node,
    Edge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub space: String,
    pub external_id: String,
    pub version: i64,
    pub last_updated_time: i64,
    pub created_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<i64>,
    #[serde(default)]
    pub properties: InstanceProperties,
}

impl Node {
    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }

    /// Properties stored through the given view, if the node has data in it.
    pub fn view_properties(&self, view: &ViewId) -> Option<&PropertyMap> {
        self.properties
            .get(&view.space)
            .and_then(|views| views.get(&view.property_key()))
    }

    pub fn property(&self, view: &ViewId, name: &str) -> Option<&Value> {
        self.view_properties(view).and_then(|props| props.get(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub space: String,
    pub external_id: String,
    #[serde(rename = "type")]
    pub edge_type: NodeId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub version: i64,
    pub last_updated_time: i64,
    pub created_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<i64>,
    #[serde(default)]
    pub properties: InstanceProperties,
}

impl Edge {
    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instanceType", rename_all = "camelCase")]
pub enum Instance {
    Node(Node),
    Edge(Edge),
}

impl Instance {
    pub fn id(&self) -> NodeId {
        match self {
            Instance::Node(node) => node.id(),
            Instance::Edge(edge) => edge.id(),
        }
    }

    pub fn instance_type(&self) -> InstanceType {
        match self {
            Instance::Node(_) => InstanceType::Node,
            Instance::Edge(_) => InstanceType::Edge,
        }
    }

    pub fn properties(&self) -> &InstanceProperties {
        match self {
            Instance::Node(node) => &node.properties,
            Instance::Edge(edge) => &edge.properties,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Instance::Node(node) => Some(node),
            Instance::Edge(_) => None,
        }
    }

    pub fn into_edge(self) -> Option<Edge> {
        match self {
            Instance::Edge(edge) => Some(edge),
            Instance::Node(_) => None,
        }
    }
}

/// Properties written through one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOrEdgeData {
    pub source: ViewId,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeApply {
    pub space: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
    #[serde(default)]
    pub sources: Vec<NodeOrEdgeData>,
}

impl NodeApply {
    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeApply {
    pub space: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
    #[serde(rename = "type")]
    pub edge_type: NodeId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    #[serde(default)]
    pub sources: Vec<NodeOrEdgeData>,
}

impl EdgeApply {
    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instanceType", rename_all = "camelCase")]
pub enum InstanceApply {
    Node(NodeApply),
    Edge(EdgeApply),
}

/// Identifies an instance in retrieve and delete requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRef {
    pub instance_type: InstanceType,
    pub space: String,
    pub external_id: String,
}

impl InstanceRef {
    pub fn node(id: &NodeId) -> Self {
        Self {
            instance_type: InstanceType::Node,
            space: id.space.clone(),
            external_id: id.external_id.clone(),
        }
    }

    pub fn edge(id: &NodeId) -> Self {
        Self {
            instance_type: InstanceType::Edge,
            space: id.space.clone(),
            external_id: id.external_id.clone(),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceWriteResult {
    pub instance_type: InstanceType,
    pub space: String,
    pub external_id: String,
    pub version: i64,
    pub was_modified: bool,
    pub last_updated_time: i64,
    pub created_time: i64,
}

impl InstanceWriteResult {
    pub fn id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstancesApplyResult {
    pub items: Vec<InstanceWriteResult>,
}

impl InstancesApplyResult {
    pub fn nodes(&self) -> impl Iterator<Item = &InstanceWriteResult> {
        self.items
            .iter()
            .filter(|item| item.instance_type == InstanceType::Node)
    }

    pub fn edges(&self) -> impl Iterator<Item = &InstanceWriteResult> {
        self.items
            .iter()
            .filter(|item| item.instance_type == InstanceType::Edge)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstancesDeleteResult {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<NodeId>,
}

impl InstancesDeleteResult {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_from_service_json() {
        let node: Instance = serde_json::from_value(json!({
            "instanceType": "node",
            "space": "sp",
            "externalId": "ds1",
            "version": 3,
            "lastUpdatedTime": 1700000000000i64,
            "createdTime": 1690000000000i64,
            "properties": {
                "power_ops_core": {
                    "DateSpecification/1": {"name": "Winter", "processingTimezone": "UTC"}
                }
            }
        }))
        .unwrap();

        let view = ViewId::new("power_ops_core", "DateSpecification", "1");
        let node = node.into_node().unwrap();
        assert_eq!(node.version, 3);
        assert_eq!(node.property(&view, "name"), Some(&json!("Winter")));
        assert!(node.property(&view, "resolution").is_none());
    }

    #[test]
    fn test_edge_apply_shape() {
        let apply = InstanceApply::Edge(EdgeApply {
            space: "sp".into(),
            external_id: "case1:file1".into(),
            existing_version: None,
            edge_type: NodeId::new("power_ops_types", "ShopCase.shopFiles"),
            start_node: NodeId::new("sp", "case1"),
            end_node: NodeId::new("sp", "file1"),
            sources: vec![],
        });
        let value = serde_json::to_value(&apply).unwrap();
        assert_eq!(value["instanceType"], "edge");
        assert_eq!(value["type"]["externalId"], "ShopCase.shopFiles");
        assert_eq!(value["startNode"]["externalId"], "case1");
        assert!(value.get("existingVersion").is_none());
    }
}
