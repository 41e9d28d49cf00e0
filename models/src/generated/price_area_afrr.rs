//! Generated view: PriceAreaAFRR
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`PriceAreaAFRR`]
pub const PRICE_AREA_AFRR_VIEW: ViewRef = ViewRef::new("power_ops_core", "PriceAreaAFRR", "1");

/// Read class for the PriceAreaAFRR view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAreaAFRR {
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
}

/// Write class for the PriceAreaAFRR view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceAreaAFRRWrite {
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
}

impl Identifiable for PriceAreaAFRR {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PriceAreaAFRRWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PriceAreaAFRRWrite {
    const VIEW: ViewRef = PRICE_AREA_AFRR_VIEW;
}

impl DomainModel for PriceAreaAFRR {
    type Write = PriceAreaAFRRWrite;

    const VIEW: ViewRef = PRICE_AREA_AFRR_VIEW;

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
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PriceAreaAFRRWrite {
        PriceAreaAFRRWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            capacity_price_up: self.capacity_price_up.clone(),
            capacity_price_down: self.capacity_price_down.clone(),
            activation_price_up: self.activation_price_up.clone(),
            activation_price_down: self.activation_price_down.clone(),
        }
    }
}

impl InstancesWrite for PriceAreaAFRRWrite {
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
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type PriceAreaAFRRList = NodeList<PriceAreaAFRR>;
pub type PriceAreaAFRRWriteList = NodeList<PriceAreaAFRRWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaAFRRField {
    Name,
    DisplayName,
    CapacityPriceUp,
    CapacityPriceDown,
    ActivationPriceUp,
    ActivationPriceDown,
}

impl PriceAreaAFRRField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::CapacityPriceUp => "capacityPriceUp",
            Self::CapacityPriceDown => "capacityPriceDown",
            Self::ActivationPriceUp => "activationPriceUp",
            Self::ActivationPriceDown => "activationPriceDown",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceAreaAFRRTextField {
    Name,
    DisplayName,
}

impl PriceAreaAFRRTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
        }
    }
}

/// Filter arguments for PriceAreaAFRR reads
#[derive(Debug, Clone, Default)]
pub struct PriceAreaAFRRFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub display_name: Option<OneOrMany<String>>,
    pub display_name_prefix: Option<String>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for PriceAreaAFRR reads from its arguments
pub fn create_price_area_afrr_filter(args: PriceAreaAFRRFilter) -> Option<Filter> {
    FilterBuilder::new(PRICE_AREA_AFRR_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("displayName", args.display_name)
        .prefix("displayName", args.display_name_prefix.as_deref())
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to PriceAreaAFRR nodes
#[derive(Clone)]
pub struct PriceAreaAFRRApi {
    inner: NodeApi<PriceAreaAFRR>,
}

impl PriceAreaAFRRApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PriceAreaAFRR nodes matching the filter
    pub async fn list(
        &self,
        filter: PriceAreaAFRRFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PriceAreaAFRRList> {
        self.inner
            .list(ListOptions {
                filter: create_price_area_afrr_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PriceAreaAFRR nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PriceAreaAFRRTextField],
        filter: PriceAreaAFRRFilter,
        limit: usize,
    ) -> EntityResult<PriceAreaAFRRList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_price_area_afrr_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PriceAreaAFRRField,
        filter: PriceAreaAFRRFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_price_area_afrr_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PriceAreaAFRRField,
        interval: f64,
        filter: PriceAreaAFRRFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_price_area_afrr_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PriceAreaAFRRFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PriceAreaAFRRList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_price_area_afrr_filter(filter), retrieve_connections)
    }
}

impl Deref for PriceAreaAFRRApi {
    type Target = NodeApi<PriceAreaAFRR>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
