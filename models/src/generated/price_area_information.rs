//! Generated view: PriceAreaInformation
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`PriceAreaInformation`]
pub const PRICE_AREA_INFORMATION_VIEW: ViewRef = ViewRef::new("power_ops_core", "PriceAreaInformation", "1");

/// Read class for the PriceAreaInformation view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAreaInformation {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "capacityPriceUp")]
    pub capacity_price_up: Option<String>,
    #[serde(rename = "capacityPriceDown")]
    pub capacity_price_down: Option<String>,
    #[serde(rename = "activationPriceUp")]
    pub activation_price_up: Option<String>,
    #[serde(rename = "activationPriceDown")]
    pub activation_price_down: Option<String>,
    #[serde(rename = "defaultMethodDayAhead")]
    pub default_method_day_ahead: Option<String>,
    #[serde(rename = "mainPriceScenario")]
    pub main_price_scenario: Option<String>,
    #[serde(rename = "priceScenarios")]
    pub price_scenarios: Option<Vec<String>>,
}

/// Write class for the PriceAreaInformation view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceAreaInformationWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "capacityPriceUp")]
    pub capacity_price_up: Option<String>,
    #[serde(rename = "capacityPriceDown")]
    pub capacity_price_down: Option<String>,
    #[serde(rename = "activationPriceUp")]
    pub activation_price_up: Option<String>,
    #[serde(rename = "activationPriceDown")]
    pub activation_price_down: Option<String>,
    #[serde(rename = "defaultMethodDayAhead")]
    pub default_method_day_ahead: Option<String>,
    #[serde(rename = "mainPriceScenario")]
    pub main_price_scenario: Option<String>,
    #[serde(rename = "priceScenarios")]
    pub price_scenarios: Option<Vec<String>>,
}

impl Identifiable for PriceAreaInformation {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PriceAreaInformationWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PriceAreaInformationWrite {
    const VIEW: ViewRef = PRICE_AREA_INFORMATION_VIEW;
}

impl DomainModel for PriceAreaInformation {
    type Write = PriceAreaInformationWrite;

    const VIEW: ViewRef = PRICE_AREA_INFORMATION_VIEW;
    const IMPLEMENTS: &'static [ViewRef] = &[super::price_area_afrr::PRICE_AREA_AFRR_VIEW, super::price_area_day_ahead::PRICE_AREA_DAY_AHEAD_VIEW];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            display_name: props.optional("displayName")?,
            capacity_price_up: props.optional("capacityPriceUp")?,
            capacity_price_down: props.optional("capacityPriceDown")?,
            activation_price_up: props.optional("activationPriceUp")?,
            activation_price_down: props.optional("activationPriceDown")?,
            default_method_day_ahead: props.optional("defaultMethodDayAhead")?,
            main_price_scenario: props.optional("mainPriceScenario")?,
            price_scenarios: props.optional("priceScenarios")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PriceAreaInformationWrite {
        PriceAreaInformationWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            capacity_price_up: self.capacity_price_up.clone(),
            capacity_price_down: self.capacity_price_down.clone(),
            activation_price_up: self.activation_price_up.clone(),
            activation_price_down: self.activation_price_down.clone(),
            default_method_day_ahead: self.default_method_day_ahead.clone(),
            main_price_scenario: self.main_price_scenario.clone(),
            price_scenarios: self.price_scenarios.clone(),
        }
    }
}

impl InstancesWrite for PriceAreaInformationWrite {
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
        writer.optional("capacityPriceUp", &self.capacity_price_up)?;
        writer.optional("capacityPriceDown", &self.capacity_price_down)?;
        writer.optional("activationPriceUp", &self.activation_price_up)?;
        writer.optional("activationPriceDown", &self.activation_price_down)?;
        writer.optional("defaultMethodDayAhead", &self.default_method_day_ahead)?;
        writer.optional("mainPriceScenario", &self.main_price_scenario)?;
        writer.optional("priceScenarios", &self.price_scenarios)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type PriceAreaInformationList = NodeList<PriceAreaInformation>;
pub type PriceAreaInformationWriteList = NodeList<PriceAreaInformationWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaInformationField {
    Name,
    DisplayName,
    CapacityPriceUp,
    CapacityPriceDown,
    ActivationPriceUp,
    ActivationPriceDown,
    DefaultMethodDayAhead,
    MainPriceScenario,
}

impl PriceAreaInformationField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::CapacityPriceUp => "capacityPriceUp",
            Self::CapacityPriceDown => "capacityPriceDown",
            Self::ActivationPriceUp => "activationPriceUp",
            Self::ActivationPriceDown => "activationPriceDown",
            Self::DefaultMethodDayAhead => "defaultMethodDayAhead",
            Self::MainPriceScenario => "mainPriceScenario",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaInformationTextField {
    Name,
    DisplayName,
    DefaultMethodDayAhead,
}

impl PriceAreaInformationTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::DefaultMethodDayAhead => "defaultMethodDayAhead",
        }
    }
}

/// Filter arguments for PriceAreaInformation reads
#[derive(Debug, Clone, Default)]
pub struct PriceAreaInformationFilter {
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

/// Build the filter for PriceAreaInformation reads from its arguments
pub fn create_price_area_information_filter(args: PriceAreaInformationFilter) -> Option<Filter> {
    FilterBuilder::new(PRICE_AREA_INFORMATION_VIEW)
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

/// Typed access to PriceAreaInformation nodes
#[derive(Clone)]
pub struct PriceAreaInformationApi {
    inner: NodeApi<PriceAreaInformation>,
}

impl PriceAreaInformationApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PriceAreaInformation nodes matching the filter
    pub async fn list(
        &self,
        filter: PriceAreaInformationFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PriceAreaInformationList> {
        self.inner
            .list(ListOptions {
                filter: create_price_area_information_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PriceAreaInformation nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PriceAreaInformationTextField],
        filter: PriceAreaInformationFilter,
        limit: usize,
    ) -> EntityResult<PriceAreaInformationList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_price_area_information_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PriceAreaInformationField,
        filter: PriceAreaInformationFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_price_area_information_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PriceAreaInformationField,
        interval: f64,
        filter: PriceAreaInformationFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_price_area_information_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PriceAreaInformationFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PriceAreaInformationList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_price_area_information_filter(filter), retrieve_connections)
    }
}

impl Deref for PriceAreaInformationApi {
    type Target = NodeApi<PriceAreaInformation>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
