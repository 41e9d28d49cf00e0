//! Core types shared by generated data classes and entity APIs

use crate::dm::{
    DataModelingError, EdgeApply, InstanceApply, InstanceWriteResult, InstancesApplyResult, Node,
    NodeApply, NodeId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Service-maintained metadata of a node as it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    pub version: i64,
    pub last_updated_time: DateTime<Utc>,
    pub created_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<DateTime<Utc>>,
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

impl DataRecord {
    pub fn from_node(node: &Node) -> Self {
        Self {
            version: node.version,
            last_updated_time: from_millis(node.last_updated_time),
            created_time: from_millis(node.created_time),
            deleted_time: node.deleted_time.map(from_millis),
        }
    }

    /// The write-side record, pinned to the version that was read.
    pub fn as_write(&self) -> DataRecordWrite {
        DataRecordWrite {
            existing_version: Some(self.version),
        }
    }
}

/// Optimistic-concurrency state of a node about to be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecordWrite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_version: Option<i64>,
}

/// How much of the related nodes a read should fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RetrieveConnections {
    /// Only the requested nodes
    #[default]
    Skip,
    /// Related nodes as bare identifiers
    Identifier,
    /// Related nodes with all their properties
    Full,
}

/// Options threaded through write assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write `null` for unset optional properties instead of leaving them untouched
    pub write_none: bool,
    /// Drop `existing_version` so the service accepts the write regardless of version
    pub allow_version_increase: bool,
}

impl WriteOptions {
    pub fn existing_version(&self, record: &DataRecordWrite) -> Option<i64> {
        if self.allow_version_increase {
            None
        } else {
            record.existing_version
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertOptions {
    /// Replace all properties instead of merging with the stored ones
    pub replace: bool,
    pub write_none: bool,
    pub allow_version_increase: bool,
}

impl UpsertOptions {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            write_none: self.write_none,
            allow_version_increase: self.allow_version_increase,
        }
    }
}

/// Instances already emitted during one write. Nodes and edges are tracked
/// apart since an edge id may equal some node's id.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    nodes: HashSet<NodeId>,
    edges: HashSet<NodeId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time `id` is seen as a node.
    pub fn visit_node(&mut self, id: &NodeId) -> bool {
        self.nodes.insert(id.clone())
    }

    /// `true` the first time `id` is seen as an edge.
    pub fn visit_edge(&mut self, id: &NodeId) -> bool {
        self.edges.insert(id.clone())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Nodes and edges assembled for one apply request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcesWrite {
    pub nodes: Vec<NodeApply>,
    pub edges: Vec<EdgeApply>,
}

impl ResourcesWrite {
    pub fn push_node(&mut self, node: NodeApply) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: EdgeApply) {
        self.edges.push(edge);
    }

    pub fn extend(&mut self, other: ResourcesWrite) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn into_items(self) -> Vec<InstanceApply> {
        self.nodes
            .into_iter()
            .map(InstanceApply::Node)
            .chain(self.edges.into_iter().map(InstanceApply::Edge))
            .collect()
    }
}

/// Outcome of an upsert, split by instance type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcesWriteResult {
    pub nodes: Vec<InstanceWriteResult>,
    pub edges: Vec<InstanceWriteResult>,
}

impl From<InstancesApplyResult> for ResourcesWriteResult {
    fn from(result: InstancesApplyResult) -> Self {
        let mut out = Self::default();
        for item in result.items {
            match item.instance_type {
                crate::dm::InstanceType::Node => out.nodes.push(item),
                crate::dm::InstanceType::Edge => out.edges.push(item),
            }
        }
        out
    }
}

/// Error type for typed data-model operations
#[derive(Error, Debug)]
pub enum EntityError {
    /// No item with the given id
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// More than one item matched a lookup that expects exactly one
    #[error("Multiple items found for {entity_type} with id '{id}' ({count} matches)")]
    Duplicate {
        entity_type: String,
        id: String,
        count: usize,
    },

    /// A required property is absent on a node
    #[error("{entity_type} '{id}' is missing required property '{property}'")]
    MissingProperty {
        entity_type: String,
        id: String,
        property: String,
    },

    /// Type conversion error
    #[error("Type conversion error for {entity_type} property '{property}': expected {expected}, got {actual}")]
    TypeConversion {
        entity_type: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// The query composer handed back a connection the model does not declare
    #[error("{entity_type} has no connection named '{property}'")]
    UnknownConnection {
        entity_type: String,
        property: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error for {entity_type}: {message}")]
    Serialization { entity_type: String, message: String },

    /// Errors from the data-modeling service, passed through unchanged
    #[error(transparent)]
    Backend(#[from] DataModelingError),

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

impl EntityError {
    pub fn not_found<E: AsRef<str>, I: fmt::Display>(entity_type: E, id: I) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn duplicate<E: AsRef<str>, I: fmt::Display>(entity_type: E, id: I, count: usize) -> Self {
        Self::Duplicate {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
            count,
        }
    }

    pub fn missing_property<E: AsRef<str>, P: AsRef<str>>(
        entity_type: E,
        id: &NodeId,
        property: P,
    ) -> Self {
        Self::MissingProperty {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
            property: property.as_ref().to_string(),
        }
    }

    pub fn type_conversion<E: AsRef<str>, P: AsRef<str>, Ex: AsRef<str>, A: AsRef<str>>(
        entity_type: E,
        property: P,
        expected: Ex,
        actual: A,
    ) -> Self {
        Self::TypeConversion {
            entity_type: entity_type.as_ref().to_string(),
            property: property.as_ref().to_string(),
            expected: expected.as_ref().to_string(),
            actual: actual.as_ref().to_string(),
        }
    }

    pub fn unknown_connection<E: AsRef<str>, P: AsRef<str>>(entity_type: E, property: P) -> Self {
        Self::UnknownConnection {
            entity_type: entity_type.as_ref().to_string(),
            property: property.as_ref().to_string(),
        }
    }

    pub fn serialization<E: AsRef<str>>(entity_type: E, source: serde_json::Error) -> Self {
        Self::Serialization {
            entity_type: entity_type.as_ref().to_string(),
            message: source.to_string(),
        }
    }

    pub fn configuration<R: AsRef<str>>(reason: R) -> Self {
        Self::Configuration {
            reason: reason.as_ref().to_string(),
        }
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::Backend(err) if err.is_version_conflict())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type EntityResult<T> = Result<T, EntityError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::InstanceType;

    #[test]
    fn test_data_record_from_node() {
        let node = Node {
            space: "sp".into(),
            external_id: "n1".into(),
            version: 4,
            last_updated_time: 1_700_000_000_000,
            created_time: 1_600_000_000_000,
            deleted_time: None,
            properties: Default::default(),
        };
        let record = DataRecord::from_node(&node);
        assert_eq!(record.version, 4);
        assert_eq!(record.created_time.timestamp_millis(), 1_600_000_000_000);
        assert_eq!(record.as_write().existing_version, Some(4));
    }

    #[test]
    fn test_existing_version_dropped_on_version_increase() {
        let record = DataRecordWrite {
            existing_version: Some(2),
        };
        assert_eq!(WriteOptions::default().existing_version(&record), Some(2));
        let options = WriteOptions {
            allow_version_increase: true,
            ..Default::default()
        };
        assert_eq!(options.existing_version(&record), None);
    }

    #[test]
    fn test_write_result_split() {
        let item = |instance_type| InstanceWriteResult {
            instance_type,
            space: "sp".into(),
            external_id: "x".into(),
            version: 1,
            was_modified: true,
            last_updated_time: 0,
            created_time: 0,
        };
        let result = ResourcesWriteResult::from(InstancesApplyResult {
            items: vec![item(InstanceType::Node), item(InstanceType::Edge), item(InstanceType::Node)],
        });
        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.edges.len(), 1);
    }

    #[test]
    fn test_visited_nodes_and_edges_apart() {
        let mut visited = VisitedSet::new();
        let id = NodeId::new("sp", "a:b");
        assert!(visited.visit_node(&id));
        assert!(!visited.visit_node(&id));
        assert!(visited.visit_edge(&id));
        assert!(!visited.visit_edge(&id));
        assert_eq!((visited.node_count(), visited.edge_count()), (1, 1));
    }

    #[test]
    fn test_error_messages() {
        let err = EntityError::duplicate("Case", "dup", 2);
        assert_eq!(err.to_string(), "Multiple items found for Case with id 'dup' (2 matches)");
        assert!(EntityError::not_found("Case", "missing").is_not_found());
        let err = EntityError::from(DataModelingError::version_conflict("mismatch"));
        assert!(err.is_version_conflict());
    }
}
