//! In-memory data-modeling backend for tests

use crate::dm::filters::{PropertySource, compare_values};
use crate::dm::{
    AggregateRequest, AggregatedGroup, AggregatedValue, AggregationSpec, ApplyRequest,
    DataModelId, DataModelingBackend, DataModelingError, DmResult, Edge, GraphQlResponse,
    HistogramBucket, Instance, InstanceApply, InstanceRef, InstanceSort, InstanceType,
    InstanceWriteResult, InstancesApplyResult, InstancesDeleteResult, ListRequest, ListResponse,
    Node, NodeId, NodeOrEdgeData, PropertyMap, Query, QueryResult, RetrieveRequest,
    SearchRequest, SetExpression, ViewId,
};
use crate::dm::query::{ChainTo, Direction, ResultSetExpression};
use crate::entity::DomainModel;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

const START_TIME: i64 = 1_700_000_000_000;

/// Keeps nodes and edges in memory and answers the backend operations the
/// way the service does: optimistic version checks on apply, filter
/// evaluation, composed queries with offset cursors and cascading deletes.
///
/// Every apply bumps the version of the instances it touches.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    nodes: DashMap<NodeId, Node>,
    edges: DashMap<NodeId, Edge>,
    // view -> views it implements; writes are mirrored into them
    implements: DashMap<ViewId, Vec<ViewId>>,
    graphql_responses: DashMap<String, GraphQlResponse>,
    clock: AtomicI64,
    write_lock: Mutex<()>,
    apply_log: Mutex<Vec<ApplyRequest>>,
    graphql_log: Mutex<Vec<(DataModelId, String)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> i64 {
        START_TIME + self.clock.fetch_add(1_000, Ordering::SeqCst)
    }

    /// Reads through `view` also see data written through its descendants.
    pub fn register_view(&self, view: ViewId, implements: Vec<ViewId>) {
        self.implements.insert(view, implements);
    }

    pub fn register_model<T: DomainModel>(&self) {
        self.register_view(
            T::view_id(),
            T::IMPLEMENTS.iter().map(|v| v.to_view_id()).collect(),
        );
    }

    /// Store a node directly, bypassing version checks. Returns the stored node.
    pub fn put_node(&self, id: NodeId, view: &ViewId, properties: PropertyMap) -> Node {
        let now = self.tick();
        let mut node = self.nodes.get(&id).map(|n| n.value().clone()).unwrap_or_else(|| Node {
            space: id.space.clone(),
            external_id: id.external_id.clone(),
            version: 0,
            last_updated_time: now,
            created_time: now,
            deleted_time: None,
            properties: Default::default(),
        });
        node.version += 1;
        node.last_updated_time = now;
        self.write_properties(&mut node.properties, view, properties, false);
        self.nodes.insert(id, node.clone());
        node
    }

    pub fn set_graphql_response(&self, data_model_external_id: &str, response: GraphQlResponse) {
        self.graphql_responses
            .insert(data_model_external_id.to_string(), response);
    }

    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.nodes.get(id).map(|entry| entry.value().clone())
    }

    pub fn edge(&self, id: &NodeId) -> Option<Edge> {
        self.edges.get(id).map(|entry| entry.value().clone())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges, ordered by id.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges.iter().map(|e| e.value().clone()).collect();
        edges.sort_by(|a, b| a.id().cmp(&b.id()));
        edges
    }

    /// Every apply request received, in order.
    pub fn apply_requests(&self) -> Vec<ApplyRequest> {
        self.apply_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn graphql_queries(&self) -> Vec<(DataModelId, String)> {
        self.graphql_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        self.nodes.clear();
        self.edges.clear();
        if let Ok(mut log) = self.apply_log.lock() {
            log.clear();
        }
    }

    fn write_properties(
        &self,
        target: &mut crate::dm::InstanceProperties,
        view: &ViewId,
        properties: PropertyMap,
        replace: bool,
    ) {
        let mut views = vec![view.clone()];
        if let Some(parents) = self.implements.get(view) {
            views.extend(parents.iter().cloned());
        }
        for view in views {
            let slot = target
                .entry(view.space.clone())
                .or_default()
                .entry(view.property_key())
                .or_default();
            if replace {
                slot.clear();
            }
            slot.extend(properties.clone());
        }
    }

    fn apply_sources(
        &self,
        target: &mut crate::dm::InstanceProperties,
        sources: Vec<NodeOrEdgeData>,
        replace: bool,
    ) {
        for source in sources {
            self.write_properties(target, &source.source, source.properties, replace);
        }
    }

    fn check_version(
        &self,
        instance_type: InstanceType,
        id: &NodeId,
        existing_version: Option<i64>,
    ) -> DmResult<()> {
        let Some(expected) = existing_version else {
            return Ok(());
        };
        let stored = match instance_type {
            InstanceType::Node => self.nodes.get(id).map(|n| n.version),
            InstanceType::Edge => self.edges.get(id).map(|e| e.version),
        };
        match stored {
            Some(actual) if actual != expected => Err(DataModelingError::version_conflict(format!(
                "Existing version {} does not match the current version {} of {}",
                expected, actual, id
            ))),
            _ => Ok(()),
        }
    }

    fn ensure_node(&self, id: &NodeId, now: i64) {
        self.nodes.entry(id.clone()).or_insert_with(|| Node {
            space: id.space.clone(),
            external_id: id.external_id.clone(),
            version: 1,
            last_updated_time: now,
            created_time: now,
            deleted_time: None,
            properties: Default::default(),
        });
    }

    fn sorted_nodes(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self.nodes.iter().map(|e| e.value().clone()).collect();
        nodes.sort_by(|a, b| a.id().cmp(&b.id()));
        nodes
    }

    fn all_instances(&self, instance_type: InstanceType) -> Vec<Instance> {
        match instance_type {
            InstanceType::Node => self.sorted_nodes().into_iter().map(Instance::Node).collect(),
            InstanceType::Edge => self.edges().into_iter().map(Instance::Edge).collect(),
        }
    }

    fn sort_instances(instances: &mut [Instance], sort: &[InstanceSort]) {
        instances.sort_by(|a, b| {
            sort.iter()
                .map(|key| key.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Slice `[cursor, cursor + limit)`; the next cursor is set when more remain.
    fn page<T>(items: Vec<T>, cursor: Option<&str>, limit: Option<usize>) -> (Vec<T>, Option<String>) {
        let offset: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let total = items.len();
        let limit = limit.unwrap_or(usize::MAX);
        let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
        let end = offset + page.len();
        let next = (end < total).then(|| end.to_string());
        (page, next)
    }

    fn matches_query(node: &Node, view: &ViewId, query: Option<&str>, properties: &[String]) -> bool {
        let Some(query) = query.map(str::to_lowercase).filter(|q| !q.is_empty()) else {
            return true;
        };
        let Some(props) = node.view_properties(view) else {
            return false;
        };
        props
            .iter()
            .filter(|(name, _)| properties.is_empty() || properties.contains(name))
            .any(|(_, value)| match value {
                Value::String(text) => text.to_lowercase().contains(&query),
                _ => false,
            })
    }

    fn resolve_set(
        &self,
        expression: &ResultSetExpression,
        query: &Query,
        computed: &HashMap<String, Vec<Instance>>,
    ) -> Vec<Instance> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |instance: Instance, out: &mut Vec<Instance>| {
            if seen.insert((instance.instance_type(), instance.id())) {
                out.push(instance);
            }
        };

        match &expression.expression {
            SetExpression::Nodes(nodes) => {
                let candidates: Vec<Node> = match nodes.from.as_deref() {
                    None => self.sorted_nodes(),
                    Some(from) => {
                        let parents = computed.get(from).map(Vec::as_slice).unwrap_or(&[]);
                        let mut found = Vec::new();
                        if let Some(through) = &nodes.through {
                            for parent in parents {
                                let Instance::Node(parent) = parent else { continue };
                                let target = parent
                                    .property(&through.source, &through.identifier)
                                    .and_then(|v| serde_json::from_value::<NodeId>(v.clone()).ok())
                                    .and_then(|id| self.node(&id));
                                found.extend(target);
                            }
                        } else {
                            let parent_direction = match query.with.get(from).map(|s| &s.expression) {
                                Some(SetExpression::Edges(edges)) => edges.direction.unwrap_or_default(),
                                _ => Direction::Outwards,
                            };
                            let chain_to = match query.with.get(from).map(|s| &s.expression) {
                                Some(SetExpression::Edges(edges)) => edges.chain_to,
                                _ => None,
                            };
                            for parent in parents {
                                let Instance::Edge(edge) = parent else { continue };
                                let target = match (parent_direction, chain_to) {
                                    (Direction::Outwards, Some(ChainTo::Source)) => &edge.start_node,
                                    (Direction::Inwards, Some(ChainTo::Destination)) | (Direction::Inwards, None) => {
                                        &edge.start_node
                                    }
                                    _ => &edge.end_node,
                                };
                                found.extend(self.node(target));
                            }
                        }
                        found
                    }
                };
                for node in candidates {
                    if nodes.filter.as_ref().is_none_or(|f| f.matches(&node)) {
                        push(Instance::Node(node), &mut out);
                    }
                }
            }
            SetExpression::Edges(edges) => {
                let direction = edges.direction.unwrap_or_default();
                let parents: Vec<NodeId> = match edges.from.as_deref() {
                    Some(from) => computed
                        .get(from)
                        .map(|set| {
                            set.iter()
                                .filter(|i| i.instance_type() == InstanceType::Node)
                                .map(Instance::id)
                                .collect()
                        })
                        .unwrap_or_default(),
                    None => Vec::new(),
                };
                for edge in self.edges() {
                    let (near, far) = match direction {
                        Direction::Outwards => (&edge.start_node, &edge.end_node),
                        Direction::Inwards => (&edge.end_node, &edge.start_node),
                    };
                    if edges.from.is_some() && !parents.contains(near) {
                        continue;
                    }
                    if !edges.filter.as_ref().is_none_or(|f| f.matches(&edge)) {
                        continue;
                    }
                    if let Some(node_filter) = &edges.node_filter {
                        match self.node(far) {
                            Some(node) if node_filter.matches(&node) => {}
                            _ => continue,
                        }
                    }
                    push(Instance::Edge(edge), &mut out);
                }
            }
        }

        if !expression.sort.is_empty() {
            Self::sort_instances(&mut out, &expression.sort);
        }
        out
    }
}

#[async_trait]
impl DataModelingBackend for MemoryBackend {
    async fn apply(&self, request: ApplyRequest) -> DmResult<InstancesApplyResult> {
        if let Ok(mut log) = self.apply_log.lock() {
            log.push(request.clone());
        }
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| DataModelingError::api(500, "memory backend lock poisoned"))?;

        // Reject the whole request before touching anything.
        for item in &request.items {
            match item {
                InstanceApply::Node(node) => {
                    self.check_version(InstanceType::Node, &node.id(), node.existing_version)?
                }
                InstanceApply::Edge(edge) => {
                    self.check_version(InstanceType::Edge, &edge.id(), edge.existing_version)?
                }
            }
        }

        let mut results = Vec::with_capacity(request.items.len());
        for item in request.items {
            let now = self.tick();
            match item {
                InstanceApply::Node(apply) => {
                    let id = apply.id();
                    let mut node = self.node(&id).unwrap_or_else(|| Node {
                        space: id.space.clone(),
                        external_id: id.external_id.clone(),
                        version: 0,
                        last_updated_time: now,
                        created_time: now,
                        deleted_time: None,
                        properties: Default::default(),
                    });
                    node.version += 1;
                    node.last_updated_time = now;
                    self.apply_sources(&mut node.properties, apply.sources, request.replace);
                    results.push(InstanceWriteResult {
                        instance_type: InstanceType::Node,
                        space: node.space.clone(),
                        external_id: node.external_id.clone(),
                        version: node.version,
                        was_modified: true,
                        last_updated_time: node.last_updated_time,
                        created_time: node.created_time,
                    });
                    self.nodes.insert(id, node);
                }
                InstanceApply::Edge(apply) => {
                    if request.auto_create_start_nodes {
                        self.ensure_node(&apply.start_node, now);
                    }
                    if request.auto_create_end_nodes {
                        self.ensure_node(&apply.end_node, now);
                    }
                    let id = apply.id();
                    let mut edge = self.edge(&id).unwrap_or_else(|| Edge {
                        space: id.space.clone(),
                        external_id: id.external_id.clone(),
                        edge_type: apply.edge_type.clone(),
                        start_node: apply.start_node.clone(),
                        end_node: apply.end_node.clone(),
                        version: 0,
                        last_updated_time: now,
                        created_time: now,
                        deleted_time: None,
                        properties: Default::default(),
                    });
                    edge.version += 1;
                    edge.last_updated_time = now;
                    edge.edge_type = apply.edge_type;
                    edge.start_node = apply.start_node;
                    edge.end_node = apply.end_node;
                    self.apply_sources(&mut edge.properties, apply.sources, request.replace);
                    results.push(InstanceWriteResult {
                        instance_type: InstanceType::Edge,
                        space: edge.space.clone(),
                        external_id: edge.external_id.clone(),
                        version: edge.version,
                        was_modified: true,
                        last_updated_time: edge.last_updated_time,
                        created_time: edge.created_time,
                    });
                    self.edges.insert(id, edge);
                }
            }
        }
        Ok(InstancesApplyResult { items: results })
    }

    async fn retrieve(&self, request: RetrieveRequest) -> DmResult<Vec<Instance>> {
        Ok(request
            .items
            .iter()
            .filter_map(|item| match item.instance_type {
                InstanceType::Node => self.node(&item.id()).map(Instance::Node),
                InstanceType::Edge => self.edge(&item.id()).map(Instance::Edge),
            })
            .collect())
    }

    async fn list(&self, request: ListRequest) -> DmResult<ListResponse> {
        let mut items: Vec<Instance> = self
            .all_instances(request.instance_type)
            .into_iter()
            .filter(|i| request.filter.as_ref().is_none_or(|f| f.matches(i)))
            .collect();
        Self::sort_instances(&mut items, &request.sort);
        let (items, next_cursor) =
            Self::page(items, request.cursor.as_deref(), Some(request.limit));
        Ok(ListResponse { items, next_cursor })
    }

    async fn search(&self, request: SearchRequest) -> DmResult<Vec<Instance>> {
        Ok(self
            .sorted_nodes()
            .into_iter()
            .filter(|node| node.has_data(&request.view))
            .filter(|node| request.filter.as_ref().is_none_or(|f| f.matches(node)))
            .filter(|node| {
                Self::matches_query(node, &request.view, request.query.as_deref(), &request.properties)
            })
            .take(request.limit)
            .map(Instance::Node)
            .collect())
    }

    async fn aggregate(&self, request: AggregateRequest) -> DmResult<Vec<AggregatedGroup>> {
        let view = &request.view;
        let nodes: Vec<Node> = self
            .sorted_nodes()
            .into_iter()
            .filter(|node| node.has_data(view))
            .filter(|node| request.filter.as_ref().is_none_or(|f| f.matches(node)))
            .filter(|node| {
                Self::matches_query(node, view, request.query.as_deref(), &request.properties)
            })
            .collect();

        let mut groups: BTreeMap<String, (BTreeMap<String, Value>, Vec<&Node>)> = BTreeMap::new();
        for node in &nodes {
            let key: BTreeMap<String, Value> = request
                .group_by
                .iter()
                .map(|prop| {
                    let value = node.property(view, prop).cloned().unwrap_or(Value::Null);
                    (prop.clone(), value)
                })
                .collect();
            let group_key = serde_json::to_string(&key)?;
            groups.entry(group_key).or_insert_with(|| (key, Vec::new())).1.push(node);
        }
        if groups.is_empty() && request.group_by.is_empty() {
            groups.insert(String::new(), (BTreeMap::new(), Vec::new()));
        }

        let groups = groups
            .into_values()
            .take(request.limit.max(1))
            .map(|(group, members)| AggregatedGroup {
                group,
                aggregates: request
                    .aggregates
                    .iter()
                    .map(|spec| aggregate_one(spec, view, &members))
                    .collect(),
            })
            .collect();
        Ok(groups)
    }

    async fn query(&self, query: Query) -> DmResult<QueryResult> {
        let mut computed: HashMap<String, Vec<Instance>> = HashMap::new();
        let mut result = QueryResult::default();
        let mut pending: Vec<&String> = query.with.keys().collect();

        while !pending.is_empty() {
            let ready: Vec<&String> = pending
                .iter()
                .copied()
                .filter(|name| {
                    query.with[name.as_str()]
                        .from()
                        .is_none_or(|from| computed.contains_key(from))
                })
                .collect();
            if ready.is_empty() {
                return Err(DataModelingError::api(
                    400,
                    format!("Unresolvable result set references: {:?}", pending),
                ));
            }
            for name in ready {
                let expression = &query.with[name.as_str()];
                let all = self.resolve_set(expression, &query, &computed);
                let (page, next) =
                    Self::page(all, query.cursors.get(name).map(String::as_str), expression.limit);
                if let Some(next) = next {
                    result.next_cursor.insert(name.clone(), next);
                }
                computed.insert(name.clone(), page.clone());
                result.items.insert(name.clone(), page);
                pending.retain(|p| *p != name);
            }
        }
        Ok(result)
    }

    async fn delete(&self, items: Vec<InstanceRef>) -> DmResult<InstancesDeleteResult> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| DataModelingError::api(500, "memory backend lock poisoned"))?;
        let mut deleted = InstancesDeleteResult::default();
        for item in items {
            let id = item.id();
            match item.instance_type {
                InstanceType::Node => {
                    if self.nodes.remove(&id).is_some() {
                        self.edges
                            .retain(|_, edge| edge.start_node != id && edge.end_node != id);
                        deleted.nodes.push(id);
                    }
                }
                InstanceType::Edge => {
                    if self.edges.remove(&id).is_some() {
                        deleted.edges.push(id);
                    }
                }
            }
        }
        Ok(deleted)
    }

    async fn graphql(
        &self,
        data_model: &DataModelId,
        query: &str,
        _variables: Option<Value>,
    ) -> DmResult<GraphQlResponse> {
        if let Ok(mut log) = self.graphql_log.lock() {
            log.push((data_model.clone(), query.to_string()));
        }
        Ok(self
            .graphql_responses
            .get(&data_model.external_id)
            .map(|r| r.value().clone())
            .unwrap_or_else(|| GraphQlResponse {
                data: Some(Value::Object(Default::default())),
                errors: Vec::new(),
            }))
    }
}

fn numbers(view: &ViewId, property: &str, members: &[&Node]) -> Vec<f64> {
    members
        .iter()
        .filter_map(|node| node.property(view, property))
        .filter_map(Value::as_f64)
        .collect()
}

fn aggregate_one(spec: &AggregationSpec, view: &ViewId, members: &[&Node]) -> AggregatedValue {
    let property = spec.property().to_string();
    match spec {
        AggregationSpec::Count { .. } => {
            let count = if property == "externalId" {
                members.len()
            } else {
                members
                    .iter()
                    .filter(|n| n.property(view, &property).is_some_and(|v| !v.is_null()))
                    .count()
            };
            AggregatedValue::Count {
                property,
                value: Some(count as i64),
            }
        }
        AggregationSpec::Sum { .. } => {
            let values = numbers(view, &property, members);
            AggregatedValue::Sum {
                value: Some(values.iter().sum()),
                property,
            }
        }
        AggregationSpec::Avg { .. } => {
            let values = numbers(view, &property, members);
            let value = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
            AggregatedValue::Avg { property, value }
        }
        AggregationSpec::Min { .. } => {
            let value = numbers(view, &property, members).into_iter().reduce(f64::min);
            AggregatedValue::Min { property, value }
        }
        AggregationSpec::Max { .. } => {
            let value = numbers(view, &property, members).into_iter().reduce(f64::max);
            AggregatedValue::Max { property, value }
        }
        AggregationSpec::Histogram { interval, .. } => {
            let mut buckets: BTreeMap<i64, i64> = BTreeMap::new();
            if *interval > 0.0 {
                for value in numbers(view, &property, members) {
                    *buckets.entry((value / interval).floor() as i64).or_default() += 1;
                }
            }
            AggregatedValue::Histogram {
                property,
                interval: *interval,
                buckets: buckets
                    .into_iter()
                    .map(|(index, count)| HistogramBucket {
                        start: index as f64 * interval,
                        count,
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::{EdgeApply, Filter, NodeApply};
    use serde_json::json;

    fn view() -> ViewId {
        ViewId::new("core", "ShopFile", "1")
    }

    fn props(pairs: &[(&str, Value)]) -> PropertyMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn node_apply(external_id: &str, existing_version: Option<i64>, name: &str) -> InstanceApply {
        InstanceApply::Node(NodeApply {
            space: "sp".into(),
            external_id: external_id.into(),
            existing_version,
            sources: vec![NodeOrEdgeData {
                source: view(),
                properties: props(&[("name", json!(name))]),
            }],
        })
    }

    #[tokio::test]
    async fn test_apply_and_version_conflict() {
        let backend = MemoryBackend::new();
        let result = backend
            .apply(ApplyRequest::new(vec![node_apply("f1", None, "a")], false))
            .await
            .unwrap();
        assert_eq!(result.items[0].version, 1);

        backend
            .apply(ApplyRequest::new(vec![node_apply("f1", Some(1), "b")], false))
            .await
            .unwrap();
        let err = backend
            .apply(ApplyRequest::new(vec![node_apply("f1", Some(1), "c")], false))
            .await
            .unwrap_err();
        assert!(err.is_version_conflict());

        let stored = backend.node(&NodeId::new("sp", "f1")).unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.property(&view(), "name"), Some(&json!("b")));
        assert_eq!(backend.apply_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_merge_and_replace() {
        let backend = MemoryBackend::new();
        backend.put_node(NodeId::new("sp", "f1"), &view(), props(&[("name", json!("a")), ("label", json!("x"))]));
        backend
            .apply(ApplyRequest::new(vec![node_apply("f1", None, "b")], false))
            .await
            .unwrap();
        let merged = backend.node(&NodeId::new("sp", "f1")).unwrap();
        assert_eq!(merged.property(&view(), "label"), Some(&json!("x")));

        backend
            .apply(ApplyRequest::new(vec![node_apply("f1", None, "c")], true))
            .await
            .unwrap();
        let replaced = backend.node(&NodeId::new("sp", "f1")).unwrap();
        assert!(replaced.property(&view(), "label").is_none());
    }

    #[tokio::test]
    async fn test_list_pages_with_cursor() {
        let backend = MemoryBackend::new();
        for i in 0..5 {
            backend.put_node(NodeId::new("sp", format!("f{}", i)), &view(), props(&[("name", json!(i.to_string()))]));
        }
        let request = ListRequest {
            instance_type: InstanceType::Node,
            sources: vec![],
            filter: Some(Filter::has_data(view())),
            sort: vec![],
            limit: 2,
            cursor: None,
        };
        let first = backend.list(request.clone()).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next_cursor.as_deref(), Some("2"));

        let last = backend
            .list(ListRequest {
                cursor: Some("4".into()),
                ..request
            })
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(last.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_edges() {
        let backend = MemoryBackend::new();
        backend
            .apply(ApplyRequest::new(
                vec![InstanceApply::Edge(EdgeApply {
                    space: "sp".into(),
                    external_id: "a:b".into(),
                    existing_version: None,
                    edge_type: NodeId::new("types", "T"),
                    start_node: NodeId::new("sp", "a"),
                    end_node: NodeId::new("sp", "b"),
                    sources: vec![],
                })],
                false,
            ))
            .await
            .unwrap();
        assert_eq!(backend.node_count(), 2);
        assert_eq!(backend.edge_count(), 1);

        let deleted = backend
            .delete(vec![InstanceRef::node(&NodeId::new("sp", "a"))])
            .await
            .unwrap();
        assert_eq!(deleted.nodes, vec![NodeId::new("sp", "a")]);
        assert_eq!(backend.edge_count(), 0);
    }

    #[tokio::test]
    async fn test_aggregate_and_histogram() {
        let backend = MemoryBackend::new();
        for (i, order) in [1, 2, 12].iter().enumerate() {
            backend.put_node(
                NodeId::new("sp", format!("f{}", i)),
                &view(),
                props(&[("name", json!("n")), ("order", json!(order))]),
            );
        }
        let groups = backend
            .aggregate(AggregateRequest {
                view: view(),
                instance_type: InstanceType::Node,
                query: None,
                properties: vec![],
                aggregates: vec![
                    AggregationSpec::Count { property: "externalId".into() },
                    AggregationSpec::Max { property: "order".into() },
                    AggregationSpec::Histogram { property: "order".into(), interval: 10.0 },
                ],
                group_by: vec![],
                filter: None,
                limit: 25,
            })
            .await
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].aggregates[0].value(), Some(3.0));
        assert_eq!(groups[0].aggregates[1].value(), Some(12.0));
        match &groups[0].aggregates[2] {
            AggregatedValue::Histogram { buckets, .. } => {
                assert_eq!(buckets.len(), 2);
                assert_eq!(buckets[0].count, 2);
                assert_eq!(buckets[1].start, 10.0);
            }
            other => panic!("unexpected aggregate {:?}", other),
        }
    }
}
