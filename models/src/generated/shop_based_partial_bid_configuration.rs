//! Generated view: ShopBasedPartialBidConfiguration
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;
use super::date_specification::{DateSpecification, DateSpecificationWrite};
use super::power_asset::{PowerAsset, PowerAssetWrite};

/// View backing [`ShopBasedPartialBidConfiguration`]
pub const SHOP_BASED_PARTIAL_BID_CONFIGURATION_VIEW: ViewRef = ViewRef::new("power_ops_core", "ShopBasedPartialBidConfiguration", "1");

/// Read class for the ShopBasedPartialBidConfiguration view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopBasedPartialBidConfiguration {
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
    #[serde(rename = "shopStartSpecification")]
    pub shop_start_specification: Option<Relation<DateSpecification>>,
    #[serde(rename = "shopEndSpecification")]
    pub shop_end_specification: Option<Relation<DateSpecification>>,
}

/// Write class for the ShopBasedPartialBidConfiguration view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShopBasedPartialBidConfigurationWrite {
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
    #[serde(rename = "shopStartSpecification")]
    pub shop_start_specification: Option<Relation<DateSpecificationWrite>>,
    #[serde(rename = "shopEndSpecification")]
    pub shop_end_specification: Option<Relation<DateSpecificationWrite>>,
}

impl Identifiable for ShopBasedPartialBidConfiguration {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for ShopBasedPartialBidConfigurationWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for ShopBasedPartialBidConfigurationWrite {
    const VIEW: ViewRef = SHOP_BASED_PARTIAL_BID_CONFIGURATION_VIEW;
}

impl DomainModel for ShopBasedPartialBidConfiguration {
    type Write = ShopBasedPartialBidConfigurationWrite;

    const VIEW: ViewRef = SHOP_BASED_PARTIAL_BID_CONFIGURATION_VIEW;
    const IMPLEMENTS: &'static [ViewRef] = &[super::partial_bid_configuration::PARTIAL_BID_CONFIGURATION_VIEW];
    const CONNECTIONS: &'static [ConnectionDef] = &[
        ConnectionDef::direct("powerAsset", super::power_asset::POWER_ASSET_VIEW),
        ConnectionDef::direct("shopStartSpecification", super::date_specification::DATE_SPECIFICATION_VIEW),
        ConnectionDef::direct("shopEndSpecification", super::date_specification::DATE_SPECIFICATION_VIEW),
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
            shop_start_specification: props.direct_relation("shopStartSpecification")?,
            shop_end_specification: props.direct_relation("shopEndSpecification")?,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "powerAsset" => self.power_asset = Connected::into_single(related)?,
            "shopStartSpecification" => self.shop_start_specification = Connected::into_single(related)?,
            "shopEndSpecification" => self.shop_end_specification = Connected::into_single(related)?,
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> ShopBasedPartialBidConfigurationWrite {
        ShopBasedPartialBidConfigurationWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            method: self.method.clone(),
            power_asset: self.power_asset.as_ref().map(Relation::as_write),
            add_steps: self.add_steps.clone(),
            shop_start_specification: self.shop_start_specification.as_ref().map(Relation::as_write),
            shop_end_specification: self.shop_end_specification.as_ref().map(Relation::as_write),
        }
    }
}

impl InstancesWrite for ShopBasedPartialBidConfigurationWrite {
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
        writer.direct_relation("shopStartSpecification", &self.shop_start_specification)?;
        writer.direct_relation("shopEndSpecification", &self.shop_end_specification)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));

        if let Some(related) = &self.power_asset {
            resources.extend(related.to_instances_write(cache, options)?);
        }

        if let Some(related) = &self.shop_start_specification {
            resources.extend(related.to_instances_write(cache, options)?);
        }

        if let Some(related) = &self.shop_end_specification {
            resources.extend(related.to_instances_write(cache, options)?);
        }
        Ok(resources)
    }
}

pub type ShopBasedPartialBidConfigurationList = NodeList<ShopBasedPartialBidConfiguration>;
pub type ShopBasedPartialBidConfigurationWriteList = NodeList<ShopBasedPartialBidConfigurationWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopBasedPartialBidConfigurationField {
    Name,
    Method,
    AddSteps,
}

impl ShopBasedPartialBidConfigurationField {
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
pub enum ShopBasedPartialBidConfigurationTextField {
    Name,
    Method,
}

impl ShopBasedPartialBidConfigurationTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Method => "method",
        }
    }
}

/// Filter arguments for ShopBasedPartialBidConfiguration reads
#[derive(Debug, Clone, Default)]
pub struct ShopBasedPartialBidConfigurationFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub method: Option<OneOrMany<String>>,
    pub method_prefix: Option<String>,
    pub power_asset: Option<OneOrMany<NodeId>>,
    pub add_steps: Option<bool>,
    pub shop_start_specification: Option<OneOrMany<NodeId>>,
    pub shop_end_specification: Option<OneOrMany<NodeId>>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for ShopBasedPartialBidConfiguration reads from its arguments
pub fn create_shop_based_partial_bid_configuration_filter(args: ShopBasedPartialBidConfigurationFilter) -> Option<Filter> {
    FilterBuilder::new(SHOP_BASED_PARTIAL_BID_CONFIGURATION_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("method", args.method)
        .prefix("method", args.method_prefix.as_deref())
        .direct_relation("powerAsset", args.power_asset)
        .boolean("addSteps", args.add_steps)
        .direct_relation("shopStartSpecification", args.shop_start_specification)
        .direct_relation("shopEndSpecification", args.shop_end_specification)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to ShopBasedPartialBidConfiguration nodes
#[derive(Clone)]
pub struct ShopBasedPartialBidConfigurationApi {
    inner: NodeApi<ShopBasedPartialBidConfiguration>,
}

impl ShopBasedPartialBidConfigurationApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List ShopBasedPartialBidConfiguration nodes matching the filter
    pub async fn list(
        &self,
        filter: ShopBasedPartialBidConfigurationFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<ShopBasedPartialBidConfigurationList> {
        self.inner
            .list(ListOptions {
                filter: create_shop_based_partial_bid_configuration_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over ShopBasedPartialBidConfiguration nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[ShopBasedPartialBidConfigurationTextField],
        filter: ShopBasedPartialBidConfigurationFilter,
        limit: usize,
    ) -> EntityResult<ShopBasedPartialBidConfigurationList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_shop_based_partial_bid_configuration_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: ShopBasedPartialBidConfigurationField,
        filter: ShopBasedPartialBidConfigurationFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_shop_based_partial_bid_configuration_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: ShopBasedPartialBidConfigurationField,
        interval: f64,
        filter: ShopBasedPartialBidConfigurationFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_shop_based_partial_bid_configuration_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: ShopBasedPartialBidConfigurationFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<ShopBasedPartialBidConfigurationList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_shop_based_partial_bid_configuration_filter(filter), retrieve_connections)
    }
}

impl Deref for ShopBasedPartialBidConfigurationApi {
    type Target = NodeApi<ShopBasedPartialBidConfiguration>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
