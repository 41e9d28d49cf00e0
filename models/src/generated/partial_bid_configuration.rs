//! Generated view: PartialBidConfiguration
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;
use super::power_asset::{PowerAsset, PowerAssetWrite};

/// View backing [`PartialBidConfiguration`]
pub const PARTIAL_BID_CONFIGURATION_VIEW: ViewRef = ViewRef::new("power_ops_core", "PartialBidConfiguration", "1");

/// Read class for the PartialBidConfiguration view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialBidConfiguration {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    pub method: Option<String>,
    #[serde(rename = "powerAsset")]
    pub power_asset: Option<Relation<PowerAsset>>,
    #[serde(rename = "addSteps")]
    pub add_steps: Option<bool>,
}

/// Write class for the PartialBidConfiguration view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialBidConfigurationWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    pub method: Option<String>,
    #[serde(rename = "powerAsset")]
    pub power_asset: Option<Relation<PowerAssetWrite>>,
    #[serde(rename = "addSteps")]
    pub add_steps: Option<bool>,
}

impl Identifiable for PartialBidConfiguration {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PartialBidConfigurationWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PartialBidConfigurationWrite {
    const VIEW: ViewRef = PARTIAL_BID_CONFIGURATION_VIEW;
}

impl DomainModel for PartialBidConfiguration {
    type Write = PartialBidConfigurationWrite;

    const VIEW: ViewRef = PARTIAL_BID_CONFIGURATION_VIEW;
    const CONNECTIONS: &'static [ConnectionDef] = &[
        ConnectionDef::direct("powerAsset", super::power_asset::POWER_ASSET_VIEW),
    ];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            method: props.optional("method")?,
            power_asset: props.direct_relation("powerAsset")?,
            add_steps: props.optional("addSteps")?,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "powerAsset" => self.power_asset = Connected::into_single(related)?,
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PartialBidConfigurationWrite {
        PartialBidConfigurationWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            method: self.method.clone(),
            power_asset: self.power_asset.as_ref().map(Relation::as_write),
            add_steps: self.add_steps.clone(),
        }
    }
}

impl InstancesWrite for PartialBidConfigurationWrite {
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
        writer.optional("method", &self.method)?;
        writer.direct_relation("powerAsset", &self.power_asset)?;
        writer.optional("addSteps", &self.add_steps)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));

        if let Some(related) = &self.power_asset {
            resources.extend(related.to_instances_write(cache, options)?);
        }
        Ok(resources)
    }
}

pub type PartialBidConfigurationList = NodeList<PartialBidConfiguration>;
pub type PartialBidConfigurationWriteList = NodeList<PartialBidConfigurationWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialBidConfigurationField {
    Name,
    Method,
    AddSteps,
}

impl PartialBidConfigurationField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Method => "method",
            Self::AddSteps => "addSteps",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialBidConfigurationTextField {
    Name,
    Method,
}

impl PartialBidConfigurationTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Method => "method",
        }
    }
}

/// Filter arguments for PartialBidConfiguration reads
#[derive(Debug, Clone, Default)]
pub struct PartialBidConfigurationFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub method: Option<OneOrMany<String>>,
    pub method_prefix: Option<String>,
    pub power_asset: Option<OneOrMany<NodeId>>,
    pub add_steps: Option<bool>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for PartialBidConfiguration reads from its arguments
pub fn create_partial_bid_configuration_filter(args: PartialBidConfigurationFilter) -> Option<Filter> {
    FilterBuilder::new(PARTIAL_BID_CONFIGURATION_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("method", args.method)
        .prefix("method", args.method_prefix.as_deref())
        .direct_relation("powerAsset", args.power_asset)
        .boolean("addSteps", args.add_steps)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to PartialBidConfiguration nodes
#[derive(Clone)]
pub struct PartialBidConfigurationApi {
    inner: NodeApi<PartialBidConfiguration>,
}

impl PartialBidConfigurationApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PartialBidConfiguration nodes matching the filter
    pub async fn list(
        &self,
        filter: PartialBidConfigurationFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PartialBidConfigurationList> {
        self.inner
            .list(ListOptions {
                filter: create_partial_bid_configuration_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PartialBidConfiguration nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PartialBidConfigurationTextField],
        filter: PartialBidConfigurationFilter,
        limit: usize,
    ) -> EntityResult<PartialBidConfigurationList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_partial_bid_configuration_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PartialBidConfigurationField,
        filter: PartialBidConfigurationFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_partial_bid_configuration_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PartialBidConfigurationField,
        interval: f64,
        filter: PartialBidConfigurationFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_partial_bid_configuration_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PartialBidConfigurationFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PartialBidConfigurationList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_partial_bid_configuration_filter(filter), retrieve_connections)
    }
}

impl Deref for PartialBidConfigurationApi {
    type Target = NodeApi<PartialBidConfiguration>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
