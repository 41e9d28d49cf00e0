//! Storage seam for the legacy clients

use super::error::LegacyResult;
use super::models::LegacyModel;
use super::settings::Settings;
use crate::dm::filters::node_property;
use crate::dm::{
    ApplyRequest, DataModelingBackend, Filter, InstanceApply, InstanceRef, InstanceType,
    ListRequest, NodeApply, NodeId, NodeOrEdgeData, ViewId,
};
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Storage operations the legacy clients are built on.
#[async_trait]
pub trait LegacyDomainApi<T: LegacyModel>: Send + Sync {
    /// Every stored item whose external id is in `external_ids`.
    async fn list_by_external_ids(&self, external_ids: &[String]) -> LegacyResult<Vec<T>>;

    async fn apply(&self, items: &[T]) -> LegacyResult<()>;

    async fn delete(&self, external_ids: &[String]) -> LegacyResult<()>;
}

/// [`LegacyDomainApi`] storing `T` as nodes of view `(space, T::TYPE_NAME, schema_version)`.
pub struct ViewBackedApi<T: LegacyModel> {
    backend: Arc<dyn DataModelingBackend>,
    view: ViewId,
    space: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: LegacyModel> ViewBackedApi<T> {
    pub fn new(backend: Arc<dyn DataModelingBackend>, settings: &Settings) -> Self {
        Self {
            backend,
            view: settings.view_for(T::TYPE_NAME),
            space: settings.space.clone(),
            _marker: PhantomData,
        }
    }

    pub fn view(&self) -> &ViewId {
        &self.view
    }
}

#[async_trait]
impl<T: LegacyModel> LegacyDomainApi<T> for ViewBackedApi<T> {
    async fn list_by_external_ids(&self, external_ids: &[String]) -> LegacyResult<Vec<T>> {
        if external_ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Listing {} {} items by external id", external_ids.len(), T::TYPE_NAME);

        let ids = external_ids.iter().cloned().map(Value::String).collect();
        let filter = Filter::has_data(self.view.clone())
            .and(Filter::equals(node_property("space"), self.space.clone()))
            .and(Filter::in_(node_property("externalId"), ids));

        let mut items = Vec::new();
        let mut cursor = None;
        loop {
            let response = self
                .backend
                .list(ListRequest {
                    instance_type: InstanceType::Node,
                    sources: vec![self.view.clone().into()],
                    filter: Some(filter.clone()),
                    sort: Vec::new(),
                    limit: 1000,
                    cursor,
                })
                .await?;
            for instance in response.items {
                if let Some(node) = instance.into_node() {
                    items.push(T::from_node(&node, &self.view)?);
                }
            }
            cursor = response.next_cursor;
            if cursor.is_none() {
                break;
            }
        }
        Ok(items)
    }

    async fn apply(&self, items: &[T]) -> LegacyResult<()> {
        debug!("Applying {} {} items", items.len(), T::TYPE_NAME);
        let nodes = items
            .iter()
            .map(|item| {
                Ok(InstanceApply::Node(NodeApply {
                    space: self.space.clone(),
                    external_id: item.external_id().to_string(),
                    existing_version: None,
                    sources: vec![NodeOrEdgeData {
                        source: self.view.clone(),
                        properties: item.to_properties()?,
                    }],
                }))
            })
            .collect::<LegacyResult<Vec<_>>>()?;
        self.backend.apply(ApplyRequest::new(nodes, false)).await?;
        Ok(())
    }

    async fn delete(&self, external_ids: &[String]) -> LegacyResult<()> {
        debug!("Deleting {} {} items", external_ids.len(), T::TYPE_NAME);
        let refs = external_ids
            .iter()
            .map(|id| InstanceRef::node(&NodeId::new(&self.space, id)))
            .collect();
        self.backend.delete(refs).await?;
        Ok(())
    }
}
