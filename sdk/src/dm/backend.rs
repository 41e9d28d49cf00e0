//! Backend abstraction for the data-modeling service

use super::aggregation::{AggregatedGroup, AggregationSpec};
use super::error::DmResult;
use super::filters::{Filter, InstanceSort};
use super::ids::{DataModelId, ViewId};
use super::instances::{Instance, InstanceApply, InstanceRef, InstanceType, InstancesApplyResult, InstancesDeleteResult};
use super::query::{Query, QueryResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A view whose properties should be returned with each instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub source: ViewId,
}

impl From<ViewId> for SourceRef {
    fn from(source: ViewId) -> Self {
        Self { source }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub items: Vec<InstanceApply>,
    pub replace: bool,
    pub auto_create_start_nodes: bool,
    pub auto_create_end_nodes: bool,
}

impl ApplyRequest {
    pub fn new(items: Vec<InstanceApply>, replace: bool) -> Self {
        Self {
            items,
            replace,
            auto_create_start_nodes: true,
            auto_create_end_nodes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub items: Vec<InstanceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub instance_type: InstanceType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<InstanceSort>,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub items: Vec<Instance>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub view: ViewId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub instance_type: InstanceType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    pub view: ViewId,
    pub instance_type: InstanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    pub aggregates: Vec<AggregationSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// The operations the typed client needs from the data-modeling service.
///
/// `HttpBackend` talks to the real service; `testing::MemoryBackend` keeps
/// everything in process.
#[async_trait]
pub trait DataModelingBackend: Send + Sync {
    /// Create or update nodes and edges
    async fn apply(&self, request: ApplyRequest) -> DmResult<InstancesApplyResult>;

    /// Retrieve instances by id; missing ids are skipped
    async fn retrieve(&self, request: RetrieveRequest) -> DmResult<Vec<Instance>>;

    /// List one page of instances
    async fn list(&self, request: ListRequest) -> DmResult<ListResponse>;

    async fn search(&self, request: SearchRequest) -> DmResult<Vec<Instance>>;

    async fn aggregate(&self, request: AggregateRequest) -> DmResult<Vec<AggregatedGroup>>;

    /// Execute a composed graph query
    async fn query(&self, query: Query) -> DmResult<QueryResult>;

    async fn delete(&self, items: Vec<InstanceRef>) -> DmResult<InstancesDeleteResult>;

    async fn graphql(
        &self,
        data_model: &DataModelId,
        query: &str,
        variables: Option<Value>,
    ) -> DmResult<GraphQlResponse>;
}
