//! Generic typed API over one view

use super::client::{delete_instances, upsert_instances};
use super::list::NodeList;
use super::query::{
    DEFAULT_CONNECTION_LIMIT, QueryBuilder, QueryStepFactory, QueryUnpacker, ROOT_STEP,
};
use super::traits::{DomainModel, InstancesWrite};
use super::types::{EntityResult, ResourcesWriteResult, RetrieveConnections, UpsertOptions};
use crate::dm::filters::node_property;
use crate::dm::{
    AggregateRequest, AggregatedGroup, AggregatedValue, Aggregation, AggregationSpec,
    DataModelingBackend, Filter, HistogramBucket, Instance, InstanceRef, InstanceSort, InstanceType,
    InstancesDeleteResult, ListRequest, NodeId, RetrieveRequest, SearchRequest, SourceRef,
};
use futures::Stream;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_LIMIT_READ: usize = 25;
/// Page size used when walking the list endpoint.
pub const LIST_PAGE_SIZE: usize = 1_000;
/// Largest root page requested from the query endpoint.
pub const QUERY_PAGE_SIZE: usize = 10_000;

/// Options for [`NodeApi::list`]
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub filter: Option<Filter>,
    pub sort: Vec<InstanceSort>,
    /// `None` reads every matching node
    pub limit: Option<usize>,
    pub retrieve_connections: RetrieveConnections,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            filter: None,
            sort: Vec::new(),
            limit: Some(DEFAULT_LIMIT_READ),
            retrieve_connections: RetrieveConnections::Skip,
        }
    }
}

/// Options for [`NodeApi::search`]
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub query: Option<String>,
    /// Text properties to search; empty searches all of them
    pub properties: Vec<String>,
    pub filter: Option<Filter>,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: None,
            properties: Vec::new(),
            filter: None,
            limit: DEFAULT_LIMIT_READ,
        }
    }
}

/// Options for [`NodeApi::aggregate`]
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub aggregations: Vec<AggregationSpec>,
    pub group_by: Vec<String>,
    pub query: Option<String>,
    pub search_properties: Vec<String>,
    pub filter: Option<Filter>,
    pub limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            aggregations: Vec::new(),
            group_by: Vec::new(),
            query: None,
            search_properties: Vec::new(),
            filter: None,
            limit: DEFAULT_LIMIT_READ,
        }
    }
}

/// Typed access to the nodes of `T`'s view.
pub struct NodeApi<T: DomainModel> {
    backend: Arc<dyn DataModelingBackend>,
    default_space: String,
    connection_limit: usize,
    _model: PhantomData<fn() -> T>,
}

impl<T: DomainModel> Clone for NodeApi<T> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            default_space: self.default_space.clone(),
            connection_limit: self.connection_limit,
            _model: PhantomData,
        }
    }
}

impl<T: DomainModel> NodeApi<T> {
    pub fn new(backend: Arc<dyn DataModelingBackend>, default_space: impl Into<String>) -> Self {
        Self {
            backend,
            default_space: default_space.into(),
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            _model: PhantomData,
        }
    }

    /// Page size for related instances in composed queries.
    pub fn with_connection_limit(mut self, limit: usize) -> Self {
        self.connection_limit = limit;
        self
    }

    fn step_factory(&self) -> QueryStepFactory {
        QueryStepFactory::for_model::<T>().with_connection_limit(self.connection_limit)
    }

    pub fn default_space(&self) -> &str {
        &self.default_space
    }

    fn with_has_data(filter: Option<Filter>) -> Filter {
        let has_data = Filter::has_data(T::view_id());
        match filter {
            Some(filter) => has_data.and(filter),
            None => has_data,
        }
    }

    /// Retrieve one node from the default space, with related identifiers.
    pub async fn retrieve(&self, external_id: &str) -> EntityResult<Option<T>> {
        let id = NodeId::new(&self.default_space, external_id);
        self.retrieve_node(&id, RetrieveConnections::Identifier).await
    }

    pub async fn retrieve_node(
        &self,
        id: &NodeId,
        connections: RetrieveConnections,
    ) -> EntityResult<Option<T>> {
        let mut items = self
            .retrieve_many(std::slice::from_ref(id), connections)
            .await?
            .into_inner();
        Ok(items.pop())
    }

    /// Retrieve several nodes; ids without data in the view are skipped.
    /// Results follow the order of `ids`.
    pub async fn retrieve_many(
        &self,
        ids: &[NodeId],
        connections: RetrieveConnections,
    ) -> EntityResult<NodeList<T>> {
        if ids.is_empty() {
            return Ok(NodeList::default());
        }
        debug!("Retrieving {} {} nodes", ids.len(), T::type_name());

        let mut found: Vec<T> = if connections == RetrieveConnections::Skip {
            let instances = self
                .backend
                .retrieve(RetrieveRequest {
                    items: ids.iter().map(InstanceRef::node).collect(),
                    sources: vec![SourceRef::from(T::view_id())],
                })
                .await?;
            let view = T::view_id();
            instances
                .into_iter()
                .filter_map(Instance::into_node)
                .filter(|node| node.view_properties(&view).is_some())
                .map(|node| T::from_node(&node))
                .collect::<EntityResult<_>>()?
        } else {
            let filter = node_ids_filter(ids);
            self.query(Some(filter), Vec::new(), Some(ids.len()), connections)
                .await?
        };

        let position: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        found.retain(|item| position.contains_key(&item.node_id()));
        found.sort_by_key(|item| position.get(&item.node_id()).copied().unwrap_or(usize::MAX));
        Ok(NodeList::new(found))
    }

    pub async fn list(&self, options: ListOptions) -> EntityResult<NodeList<T>> {
        debug!(
            "Listing {} nodes (limit {:?}, connections {:?})",
            T::type_name(),
            options.limit,
            options.retrieve_connections
        );
        if options.retrieve_connections == RetrieveConnections::Skip {
            return self.list_pages(options).await;
        }
        let items = self
            .query(
                options.filter,
                options.sort,
                options.limit,
                options.retrieve_connections,
            )
            .await?;
        Ok(NodeList::new(items))
    }

    /// Walks the list endpoint page by page.
    async fn list_pages(&self, options: ListOptions) -> EntityResult<NodeList<T>> {
        if options.limit == Some(0) {
            return Ok(NodeList::default());
        }
        let filter = Self::with_has_data(options.filter);
        let mut items = Vec::new();
        let mut cursor = None;
        loop {
            let page_size = match options.limit {
                Some(limit) => limit.saturating_sub(items.len()).min(LIST_PAGE_SIZE),
                None => LIST_PAGE_SIZE,
            };
            let page = self
                .backend
                .list(ListRequest {
                    instance_type: InstanceType::Node,
                    sources: vec![SourceRef::from(T::view_id())],
                    filter: Some(filter.clone()),
                    sort: options.sort.clone(),
                    limit: page_size,
                    cursor,
                })
                .await?;
            for instance in page.items {
                if let Instance::Node(node) = instance {
                    items.push(T::from_node(&node)?);
                }
            }
            cursor = page.next_cursor;
            let limit_reached = options.limit.is_some_and(|limit| items.len() >= limit);
            if cursor.is_none() || limit_reached {
                break;
            }
        }
        Ok(NodeList::new(items))
    }

    /// Composed query: root nodes plus the requested connections.
    async fn query(
        &self,
        filter: Option<Filter>,
        sort: Vec<InstanceSort>,
        limit: Option<usize>,
        connections: RetrieveConnections,
    ) -> EntityResult<Vec<T>> {
        let factory = self.step_factory();
        let page_size = limit.unwrap_or(QUERY_PAGE_SIZE).min(QUERY_PAGE_SIZE);
        let mut builder = QueryBuilder::new();
        builder
            .push(factory.root(filter, sort, Some(page_size)))
            .extend(factory.connections(connections));

        let mut items = Vec::new();
        loop {
            builder.execute(self.backend.as_ref()).await?;
            items.extend(QueryUnpacker::new(factory.root_name(), builder.steps()).unpack::<T>()?);
            let limit_reached = limit.is_some_and(|limit| items.len() >= limit);
            if builder.root_cursor().is_none() || limit_reached {
                break;
            }
        }
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    pub async fn search(&self, options: SearchOptions) -> EntityResult<NodeList<T>> {
        debug!("Searching {} for {:?}", T::type_name(), options.query);
        let instances = self
            .backend
            .search(SearchRequest {
                view: T::view_id(),
                query: options.query,
                instance_type: InstanceType::Node,
                properties: options.properties,
                filter: options.filter,
                limit: options.limit,
            })
            .await?;
        instances
            .into_iter()
            .filter_map(Instance::into_node)
            .map(|node| T::from_node(&node))
            .collect()
    }

    pub async fn aggregate(&self, options: AggregateOptions) -> EntityResult<Vec<AggregatedGroup>> {
        debug!(
            "Aggregating {} with {} aggregates",
            T::type_name(),
            options.aggregations.len()
        );
        let groups = self
            .backend
            .aggregate(AggregateRequest {
                view: T::view_id(),
                instance_type: InstanceType::Node,
                query: options.query,
                properties: options.search_properties,
                aggregates: options.aggregations,
                group_by: options.group_by,
                filter: options.filter,
                limit: options.limit,
            })
            .await?;
        Ok(groups)
    }

    /// A single ungrouped aggregate value.
    pub async fn aggregate_value(
        &self,
        aggregation: Aggregation,
        property: &str,
        filter: Option<Filter>,
    ) -> EntityResult<Option<f64>> {
        let groups = self
            .aggregate(AggregateOptions {
                aggregations: vec![aggregation.on(property)],
                filter,
                ..Default::default()
            })
            .await?;
        Ok(groups
            .first()
            .and_then(|group| group.aggregates.first())
            .and_then(AggregatedValue::value))
    }

    pub async fn histogram(
        &self,
        property: &str,
        interval: f64,
        filter: Option<Filter>,
    ) -> EntityResult<Vec<HistogramBucket>> {
        let groups = self
            .aggregate(AggregateOptions {
                aggregations: vec![AggregationSpec::Histogram {
                    property: property.to_string(),
                    interval,
                }],
                filter,
                ..Default::default()
            })
            .await?;
        let buckets = groups
            .into_iter()
            .flat_map(|group| group.aggregates)
            .find_map(|value| match value {
                AggregatedValue::Histogram { buckets, .. } => Some(buckets),
                _ => None,
            })
            .unwrap_or_default();
        Ok(buckets)
    }

    /// Streams matching nodes in chunks of `chunk_size`, one composed query per chunk.
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: Option<Filter>,
        connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<NodeList<T>>> + Send + 'static {
        let backend = self.backend.clone();
        let factory = self.step_factory();
        let mut builder = QueryBuilder::new();
        builder
            .push(factory.root(filter, Vec::new(), Some(chunk_size.clamp(1, QUERY_PAGE_SIZE))))
            .extend(factory.connections(connections));

        futures::stream::try_unfold((builder, false), move |(mut builder, done)| {
            let backend = backend.clone();
            async move {
                if done {
                    return EntityResult::Ok(None);
                }
                builder.execute(backend.as_ref()).await?;
                let items = QueryUnpacker::new(ROOT_STEP, builder.steps()).unpack::<T>()?;
                let done = builder.root_cursor().is_none();
                if items.is_empty() && done {
                    return Ok(None);
                }
                Ok(Some((NodeList::new(items), (builder, done))))
            }
        })
    }

    #[deprecated(note = "use DomainClient::upsert")]
    pub async fn apply(
        &self,
        items: &[&dyn InstancesWrite],
        options: UpsertOptions,
    ) -> EntityResult<ResourcesWriteResult> {
        warn!(
            "{}Api.apply is deprecated, use the client's upsert instead",
            T::type_name()
        );
        upsert_instances(self.backend.as_ref(), items, options).await
    }

    #[deprecated(note = "use DomainClient::delete")]
    pub async fn delete(
        &self,
        external_ids: &[&str],
        space: Option<&str>,
    ) -> EntityResult<InstancesDeleteResult> {
        warn!(
            "{}Api.delete is deprecated, use the client's delete instead",
            T::type_name()
        );
        let space = space.unwrap_or(&self.default_space);
        let ids: Vec<NodeId> = external_ids.iter().map(|ext| NodeId::new(space, *ext)).collect();
        delete_instances(self.backend.as_ref(), &ids).await
    }
}

/// Matches exactly the given ids: one `space AND externalId IN` group per
/// space, joined with `or`.
fn node_ids_filter(ids: &[NodeId]) -> Filter {
    let mut by_space: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for id in ids {
        by_space
            .entry(id.space.as_str())
            .or_default()
            .push(Value::String(id.external_id.clone()));
    }
    let mut groups: Vec<Filter> = by_space
        .into_iter()
        .map(|(space, external_ids)| {
            Filter::equals(node_property("space"), space)
                .and(Filter::in_(node_property("externalId"), external_ids))
        })
        .collect();
    match groups.len() {
        1 => groups.remove(0),
        _ => Filter::Or(groups),
    }
}
