//! Client-level write, delete and GraphQL operations

use super::api::NodeApi;
use super::traits::{DomainModel, InstancesWrite};
use super::types::{EntityResult, ResourcesWrite, ResourcesWriteResult, UpsertOptions, VisitedSet};
use crate::dm::{
    ApplyRequest, DataModelId, DataModelingBackend, DataModelingError, InstanceRef,
    InstancesDeleteResult, NodeId,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Assembles every item into one apply request and sends it.
pub(crate) async fn upsert_instances(
    backend: &dyn DataModelingBackend,
    items: &[&dyn InstancesWrite],
    options: UpsertOptions,
) -> EntityResult<ResourcesWriteResult> {
    let write_options = options.write_options();
    let mut cache = VisitedSet::new();
    let mut resources = ResourcesWrite::default();
    for item in items {
        resources.extend(item.to_instances_write(&mut cache, &write_options)?);
    }
    if resources.is_empty() {
        return Ok(ResourcesWriteResult::default());
    }

    debug!(
        "Upserting {} nodes and {} edges (replace: {})",
        resources.nodes.len(),
        resources.edges.len(),
        options.replace
    );
    let result = backend
        .apply(ApplyRequest::new(resources.into_items(), options.replace))
        .await?;
    Ok(result.into())
}

pub(crate) async fn delete_instances(
    backend: &dyn DataModelingBackend,
    ids: &[NodeId],
) -> EntityResult<InstancesDeleteResult> {
    if ids.is_empty() {
        return Ok(InstancesDeleteResult::default());
    }
    debug!("Deleting {} nodes", ids.len());
    let result = backend
        .delete(ids.iter().map(InstanceRef::node).collect())
        .await?;
    Ok(result)
}

/// Entry point shared by generated clients: owns the backend and the
/// default instance space.
#[derive(Clone)]
pub struct DomainClient {
    backend: Arc<dyn DataModelingBackend>,
    default_space: String,
}

impl DomainClient {
    pub fn new(backend: Arc<dyn DataModelingBackend>, default_space: impl Into<String>) -> Self {
        Self {
            backend,
            default_space: default_space.into(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn DataModelingBackend> {
        &self.backend
    }

    pub fn default_space(&self) -> &str {
        &self.default_space
    }

    pub fn api<T: DomainModel>(&self) -> NodeApi<T> {
        NodeApi::new(self.backend.clone(), self.default_space.clone())
    }

    /// Create or update the items and everything nested in them.
    ///
    /// A node referenced from several items is written once. With
    /// `allow_version_increase` the existing versions are not sent, so the
    /// write succeeds even when the nodes changed since they were read.
    pub async fn upsert(
        &self,
        items: &[&dyn InstancesWrite],
        options: UpsertOptions,
    ) -> EntityResult<ResourcesWriteResult> {
        upsert_instances(self.backend.as_ref(), items, options).await
    }

    /// Delete nodes by external id; `space` defaults to the client's instance space.
    pub async fn delete(
        &self,
        external_ids: &[&str],
        space: Option<&str>,
    ) -> EntityResult<InstancesDeleteResult> {
        let space = space.unwrap_or(&self.default_space);
        let ids: Vec<NodeId> = external_ids
            .iter()
            .map(|external_id| NodeId::new(space, *external_id))
            .collect();
        delete_instances(self.backend.as_ref(), &ids).await
    }

    pub async fn delete_nodes(&self, ids: &[NodeId]) -> EntityResult<InstancesDeleteResult> {
        delete_instances(self.backend.as_ref(), ids).await
    }

    /// Run a GraphQL query against a data model and return its `data` member.
    pub async fn graphql_query(
        &self,
        data_model: &DataModelId,
        query: &str,
        variables: Option<Value>,
    ) -> EntityResult<Value> {
        debug!("GraphQL query against {}", data_model);
        let response = self.backend.graphql(data_model, query, variables).await?;
        if !response.errors.is_empty() {
            let messages = response.errors.into_iter().map(|e| e.message).collect();
            return Err(DataModelingError::GraphQl(messages).into());
        }
        Ok(response.data.unwrap_or(Value::Null))
    }
}
