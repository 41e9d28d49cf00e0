//! Generated view: ShopScenario
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`ShopScenario`]
pub const SHOP_SCENARIO_VIEW: ViewRef = ViewRef::new("power_ops_core", "ShopScenario", "1");

/// Read class for the ShopScenario view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopScenario {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    pub source: Option<String>,
}

/// Write class for the ShopScenario view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShopScenarioWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    pub source: Option<String>,
}

impl Identifiable for ShopScenario {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for ShopScenarioWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for ShopScenarioWrite {
    const VIEW: ViewRef = SHOP_SCENARIO_VIEW;
}

impl DomainModel for ShopScenario {
    type Write = ShopScenarioWrite;

    const VIEW: ViewRef = SHOP_SCENARIO_VIEW;

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            source: props.optional("source")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> ShopScenarioWrite {
        ShopScenarioWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            source: self.source.clone(),
        }
    }
}

impl InstancesWrite for ShopScenarioWrite {
    fn to_instances_write(
        &self,
        cache: &mut VisitedSet,
        options: &WriteOptions,
    ) -> EntityResult<ResourcesWrite> {
        let mut resources = ResourcesWrite::default();
        let id = self.node_id();
        if !cache.visit_node(&id) {
            return Ok(resources);
        }

        let mut writer = PropertyWriter::new(Self::VIEW, options);
        writer.set("name", &self.name)?;
        writer.optional("source", &self.source)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type ShopScenarioList = NodeList<ShopScenario>;
pub type ShopScenarioWriteList = NodeList<ShopScenarioWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopScenarioField {
    Name,
    Source,
}

impl ShopScenarioField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Source => "source",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopScenarioTextField {
    Name,
    Source,
}

impl ShopScenarioTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Source => "source",
        }
    }
}

/// Filter arguments for ShopScenario reads
#[derive(Debug, Clone, Default)]
pub struct ShopScenarioFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub source: Option<OneOrMany<String>>,
    pub source_prefix: Option<String>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for ShopScenario reads from its arguments
pub fn create_shop_scenario_filter(args: ShopScenarioFilter) -> Option<Filter> {
    FilterBuilder::new(SHOP_SCENARIO_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("source", args.source)
        .prefix("source", args.source_prefix.as_deref())
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to ShopScenario nodes
#[derive(Clone)]
pub struct ShopScenarioApi {
    inner: NodeApi<ShopScenario>,
}

impl ShopScenarioApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List ShopScenario nodes matching the filter
    pub async fn list(
        &self,
        filter: ShopScenarioFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<ShopScenarioList> {
        self.inner
            .list(ListOptions {
                filter: create_shop_scenario_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over ShopScenario nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[ShopScenarioTextField],
        filter: ShopScenarioFilter,
        limit: usize,
    ) -> EntityResult<ShopScenarioList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_shop_scenario_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: ShopScenarioField,
        filter: ShopScenarioFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_shop_scenario_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: ShopScenarioField,
        interval: f64,
        filter: ShopScenarioFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_shop_scenario_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: ShopScenarioFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<ShopScenarioList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_shop_scenario_filter(filter), retrieve_connections)
    }
}

impl Deref for ShopScenarioApi {
    type Target = NodeApi<ShopScenario>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
