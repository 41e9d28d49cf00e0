//! Generated view: PriceAreaDayAhead
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`PriceAreaDayAhead`]
pub const PRICE_AREA_DAY_AHEAD_VIEW: ViewRef = ViewRef::new("power_ops_core", "PriceAreaDayAhead", "1");

/// Read class for the PriceAreaDayAhead view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAreaDayAhead {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "defaultMethodDayAhead")]
    pub default_method_day_ahead: Option<String>,
    #[serde(rename = "mainPriceScenario")]
    pub main_price_scenario: Option<String>,
    #[serde(rename = "priceScenarios")]
    pub price_scenarios: Option<Vec<String>>,
}

/// Write class for the PriceAreaDayAhead view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceAreaDayAheadWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "defaultMethodDayAhead")]
    pub default_method_day_ahead: Option<String>,
    #[serde(rename = "mainPriceScenario")]
    pub main_price_scenario: Option<String>,
    #[serde(rename = "priceScenarios")]
    pub price_scenarios: Option<Vec<String>>,
}

impl Identifiable for PriceAreaDayAhead {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PriceAreaDayAheadWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PriceAreaDayAheadWrite {
    const VIEW: ViewRef = PRICE_AREA_DAY_AHEAD_VIEW;
}

impl DomainModel for PriceAreaDayAhead {
    type Write = PriceAreaDayAheadWrite;

    const VIEW: ViewRef = PRICE_AREA_DAY_AHEAD_VIEW;

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            display_name: props.optional("displayName")?,
            default_method_day_ahead: props.optional("defaultMethodDayAhead")?,
            main_price_scenario: props.optional("mainPriceScenario")?,
            price_scenarios: props.optional("priceScenarios")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PriceAreaDayAheadWrite {
        PriceAreaDayAheadWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            default_method_day_ahead: self.default_method_day_ahead.clone(),
            main_price_scenario: self.main_price_scenario.clone(),
            price_scenarios: self.price_scenarios.clone(),
        }
    }
}

impl InstancesWrite for PriceAreaDayAheadWrite {
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
        writer.optional("displayName", &self.display_name)?;
        writer.optional("defaultMethodDayAhead", &self.default_method_day_ahead)?;
        writer.optional("mainPriceScenario", &self.main_price_scenario)?;
        writer.optional("priceScenarios", &self.price_scenarios)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type PriceAreaDayAheadList = NodeList<PriceAreaDayAhead>;
pub type PriceAreaDayAheadWriteList = NodeList<PriceAreaDayAheadWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaDayAheadField {
    Name,
    DisplayName,
    DefaultMethodDayAhead,
    MainPriceScenario,
}

impl PriceAreaDayAheadField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::DefaultMethodDayAhead => "defaultMethodDayAhead",
            Self::MainPriceScenario => "mainPriceScenario",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaDayAheadTextField {
    Name,
    DisplayName,
    DefaultMethodDayAhead,
}

impl PriceAreaDayAheadTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::DefaultMethodDayAhead => "defaultMethodDayAhead",
        }
    }
}

/// Filter arguments for PriceAreaDayAhead reads
#[derive(Debug, Clone, Default)]
pub struct PriceAreaDayAheadFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub display_name: Option<OneOrMany<String>>,
    pub display_name_prefix: Option<String>,
    pub default_method_day_ahead: Option<OneOrMany<String>>,
    pub default_method_day_ahead_prefix: Option<String>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for PriceAreaDayAhead reads from its arguments
pub fn create_price_area_day_ahead_filter(args: PriceAreaDayAheadFilter) -> Option<Filter> {
    FilterBuilder::new(PRICE_AREA_DAY_AHEAD_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("displayName", args.display_name)
        .prefix("displayName", args.display_name_prefix.as_deref())
        .equals_or_in("defaultMethodDayAhead", args.default_method_day_ahead)
        .prefix("defaultMethodDayAhead", args.default_method_day_ahead_prefix.as_deref())
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to PriceAreaDayAhead nodes
#[derive(Clone)]
pub struct PriceAreaDayAheadApi {
    inner: NodeApi<PriceAreaDayAhead>,
}

impl PriceAreaDayAheadApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PriceAreaDayAhead nodes matching the filter
    pub async fn list(
        &self,
        filter: PriceAreaDayAheadFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PriceAreaDayAheadList> {
        self.inner
            .list(ListOptions {
                filter: create_price_area_day_ahead_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PriceAreaDayAhead nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PriceAreaDayAheadTextField],
        filter: PriceAreaDayAheadFilter,
        limit: usize,
    ) -> EntityResult<PriceAreaDayAheadList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_price_area_day_ahead_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PriceAreaDayAheadField,
        filter: PriceAreaDayAheadFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_price_area_day_ahead_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PriceAreaDayAheadField,
        interval: f64,
        filter: PriceAreaDayAheadFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_price_area_day_ahead_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PriceAreaDayAheadFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PriceAreaDayAheadList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_price_area_day_ahead_filter(filter), retrieve_connections)
    }
}

impl Deref for PriceAreaDayAheadApi {
    type Target = NodeApi<PriceAreaDayAhead>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
