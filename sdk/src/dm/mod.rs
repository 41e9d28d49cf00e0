//! Wire types and backends for the data-modeling service.

pub mod aggregation;
pub mod backend;
pub mod credentials;
pub mod error;
pub mod filters;
pub mod http;
pub mod ids;
pub mod instances;
pub mod query;

pub use aggregation::{AggregatedGroup, AggregatedValue, Aggregation, AggregationSpec, HistogramBucket};
pub use backend::{
    AggregateRequest, ApplyRequest, DataModelingBackend, GraphQlError, GraphQlResponse,
    ListRequest, ListResponse, RetrieveRequest, SearchRequest, SourceRef,
};
pub use credentials::Credentials;
pub use error::{DataModelingError, DmResult};
pub use filters::{Filter, InstanceSort, PropertyRef, SortDirection};
pub use http::HttpBackend;
pub use ids::{DataModelId, NodeId, NodeRef, ViewId, ViewRef};
pub use instances::{
    Edge, EdgeApply, Instance, InstanceApply, InstanceProperties, InstanceRef, InstanceType,
    InstanceWriteResult, InstancesApplyResult, InstancesDeleteResult, Node, NodeApply,
    NodeOrEdgeData, PropertyMap,
};
pub use query::{
    ChainTo, Direction, EdgeExpression, NodeExpression, Query, QueryResult, ResultSetExpression,
    Select, SetExpression, SourceSelector, ViewPropertyId,
};
