//! Typed data-model framework
//!
//! Generated data classes implement [`DomainModel`] (read) and
//! [`DomainModelWrite`] (write). [`NodeApi`] provides retrieve, list, search,
//! aggregate and iterate on top of any [`crate::dm::DataModelingBackend`],
//! composing multi-hop graph queries with [`query::QueryBuilder`] when related
//! nodes are requested. [`DomainClient`] holds the client-level upsert, delete
//! and GraphQL operations.

pub mod api;
pub mod client;
pub mod codegen;
pub mod filters;
pub mod list;
pub mod properties;
pub mod query;
pub mod schema;
pub mod traits;
pub mod types;

pub use api::{AggregateOptions, DEFAULT_LIMIT_READ, ListOptions, NodeApi, SearchOptions};
pub use client::DomainClient;
pub use filters::{FilterBuilder, OneOrMany, ToFilterValue};
pub use list::NodeList;
pub use properties::{NodeProperties, PropertyWriter, edge_external_id, node_apply, write_edge};
pub use traits::{
    Connected, ConnectionDef, ConnectionKind, DomainModel, DomainModelWrite, Identifiable,
    InstancesWrite, Relation,
};
pub use types::{
    DataRecord, DataRecordWrite, EntityError, EntityResult, ResourcesWrite, ResourcesWriteResult,
    RetrieveConnections, UpsertOptions, VisitedSet, WriteOptions,
};

pub use schema::{
    DataModelSchema, FieldDefinition, FieldKind, ScalarType, SchemaParser, SchemaValidator,
    ViewDefinition,
};
