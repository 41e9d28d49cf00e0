//! Traits implemented by generated data classes

use super::types::{DataRecord, EntityError, EntityResult, ResourcesWrite, VisitedSet, WriteOptions};
use crate::dm::{Direction, Node, NodeId, NodeRef, ViewId, ViewRef};
use serde::{Serialize, Serializer};
use std::fmt::Debug;

/// Anything addressable by (space, external id)
pub trait Identifiable {
    fn node_id(&self) -> NodeId;
}

impl Identifiable for NodeId {
    fn node_id(&self) -> NodeId {
        self.clone()
    }
}

/// How a model reaches related nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Through edges of the given type
    Edge {
        edge_type: NodeRef,
        direction: Direction,
    },
    /// Through a direct-relation property
    DirectRelation,
}

/// A declared relation property of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDef {
    pub property: &'static str,
    pub kind: ConnectionKind,
    pub target: ViewRef,
}

impl ConnectionDef {
    pub const fn edge(
        property: &'static str,
        edge_type: NodeRef,
        direction: Direction,
        target: ViewRef,
    ) -> Self {
        Self {
            property,
            kind: ConnectionKind::Edge {
                edge_type,
                direction,
            },
            target,
        }
    }

    pub const fn direct(property: &'static str, target: ViewRef) -> Self {
        Self {
            property,
            kind: ConnectionKind::DirectRelation,
            target,
        }
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, ConnectionKind::Edge { .. })
    }
}

/// A read data class backed by one view
pub trait DomainModel: Identifiable + Clone + Debug + Send + Sync + 'static {
    type Write: DomainModelWrite;

    const VIEW: ViewRef;
    /// Views this view implements, nearest first
    const IMPLEMENTS: &'static [ViewRef] = &[];
    /// Relation properties in declaration order
    const CONNECTIONS: &'static [ConnectionDef] = &[];

    /// Build the model from a node read through `VIEW`.
    fn from_node(node: &Node) -> EntityResult<Self>;

    /// Attach related nodes found by the query composer.
    fn connect(&mut self, property: &str, _related: Vec<Connected>) -> EntityResult<()> {
        Err(EntityError::unknown_connection(Self::VIEW.external_id, property))
    }

    fn data_record(&self) -> &DataRecord;

    fn as_write(&self) -> Self::Write;

    fn view_id() -> ViewId {
        Self::VIEW.to_view_id()
    }

    fn type_name() -> &'static str {
        Self::VIEW.external_id
    }

    fn connection(property: &str) -> Option<&'static ConnectionDef> {
        Self::CONNECTIONS.iter().find(|c| c.property == property)
    }
}

/// Anything that can be turned into nodes and edges for an apply request.
///
/// `cache` holds every node and edge already emitted during the current
/// write so shared related nodes are written once.
pub trait InstancesWrite: Send + Sync {
    fn to_instances_write(
        &self,
        cache: &mut VisitedSet,
        options: &WriteOptions,
    ) -> EntityResult<ResourcesWrite>;
}

/// A write data class backed by one view
pub trait DomainModelWrite: InstancesWrite + Identifiable + Clone + Debug + 'static {
    const VIEW: ViewRef;
}

/// A relation that is either a bare identifier or a full nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation<M> {
    Id(NodeId),
    Node(Box<M>),
}

impl<M> Relation<M> {
    pub fn node(model: M) -> Self {
        Relation::Node(Box::new(model))
    }

    pub fn as_node(&self) -> Option<&M> {
        match self {
            Relation::Node(model) => Some(model),
            Relation::Id(_) => None,
        }
    }

    pub fn is_id(&self) -> bool {
        matches!(self, Relation::Id(_))
    }
}

impl<M: Identifiable> Relation<M> {
    pub fn node_id(&self) -> NodeId {
        match self {
            Relation::Id(id) => id.clone(),
            Relation::Node(model) => model.node_id(),
        }
    }
}

impl<M: DomainModel> Relation<M> {
    pub fn as_write(&self) -> Relation<M::Write> {
        match self {
            Relation::Id(id) => Relation::Id(id.clone()),
            Relation::Node(model) => Relation::node(model.as_write()),
        }
    }
}

impl<M: InstancesWrite> Relation<M> {
    /// Write assembly for a nested object; identifiers contribute nothing.
    pub fn to_instances_write(
        &self,
        cache: &mut VisitedSet,
        options: &WriteOptions,
    ) -> EntityResult<ResourcesWrite> {
        match self {
            Relation::Id(_) => Ok(ResourcesWrite::default()),
            Relation::Node(model) => model.to_instances_write(cache, options),
        }
    }
}

impl<M> From<NodeId> for Relation<M> {
    fn from(id: NodeId) -> Self {
        Relation::Id(id)
    }
}

impl<M: Serialize> Serialize for Relation<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Relation::Id(id) => id.serialize(serializer),
            Relation::Node(model) => model.serialize(serializer),
        }
    }
}

/// A related instance as delivered by the query unpacker.
#[derive(Debug, Clone, PartialEq)]
pub enum Connected {
    Id(NodeId),
    Node(Node),
}

impl Connected {
    pub fn node_id(&self) -> NodeId {
        match self {
            Connected::Id(id) => id.clone(),
            Connected::Node(node) => node.id(),
        }
    }

    pub fn into_relation<M: DomainModel>(self) -> EntityResult<Relation<M>> {
        match self {
            Connected::Id(id) => Ok(Relation::Id(id)),
            Connected::Node(node) => Ok(Relation::node(M::from_node(&node)?)),
        }
    }

    /// All related items as relations, in delivery order.
    pub fn into_relations<M: DomainModel>(related: Vec<Connected>) -> EntityResult<Vec<Relation<M>>> {
        related.into_iter().map(Connected::into_relation).collect()
    }

    /// The first related item, for single-valued relations.
    pub fn into_single<M: DomainModel>(related: Vec<Connected>) -> EntityResult<Option<Relation<M>>> {
        related.into_iter().next().map(Connected::into_relation).transpose()
    }
}
