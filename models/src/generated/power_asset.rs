//! Generated view: PowerAsset
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`PowerAsset`]
pub const POWER_ASSET_VIEW: ViewRef = ViewRef::new("power_ops_core", "PowerAsset", "1");

/// Read class for the PowerAsset view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerAsset {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub ordering: Option<i32>,
    #[serde(rename = "assetType")]
    pub asset_type: Option<String>,
}

/// Write class for the PowerAsset view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PowerAssetWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub ordering: Option<i32>,
    #[serde(rename = "assetType")]
    pub asset_type: Option<String>,
}

impl Identifiable for PowerAsset {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PowerAssetWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PowerAssetWrite {
    const VIEW: ViewRef = POWER_ASSET_VIEW;
}

impl DomainModel for PowerAsset {
    type Write = PowerAssetWrite;

    const VIEW: ViewRef = POWER_ASSET_VIEW;

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            display_name: props.optional("displayName")?,
            ordering: props.optional("ordering")?,
            asset_type: props.optional("assetType")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PowerAssetWrite {
        PowerAssetWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            ordering: self.ordering.clone(),
            asset_type: self.asset_type.clone(),
        }
    }
}

impl InstancesWrite for PowerAssetWrite {
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
        writer.optional("ordering", &self.ordering)?;
        writer.optional("assetType", &self.asset_type)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type PowerAssetList = NodeList<PowerAsset>;
pub type PowerAssetWriteList = NodeList<PowerAssetWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAssetField {
    Name,
    DisplayName,
    Ordering,
    AssetType,
}

impl PowerAssetField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::Ordering => "ordering",
            Self::AssetType => "assetType",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAssetTextField {
    Name,
    DisplayName,
    AssetType,
}

impl PowerAssetTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::AssetType => "assetType",
        }
    }
}

/// Filter arguments for PowerAsset reads
#[derive(Debug, Clone, Default)]
pub struct PowerAssetFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub display_name: Option<OneOrMany<String>>,
    pub display_name_prefix: Option<String>,
    pub min_ordering: Option<i32>,
    pub max_ordering: Option<i32>,
    pub asset_type: Option<OneOrMany<String>>,
    pub asset_type_prefix: Option<String>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for PowerAsset reads from its arguments
pub fn create_power_asset_filter(args: PowerAssetFilter) -> Option<Filter> {
    FilterBuilder::new(POWER_ASSET_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("displayName", args.display_name)
        .prefix("displayName", args.display_name_prefix.as_deref())
        .range("ordering", args.min_ordering, args.max_ordering)
        .equals_or_in("assetType", args.asset_type)
        .prefix("assetType", args.asset_type_prefix.as_deref())
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to PowerAsset nodes
#[derive(Clone)]
pub struct PowerAssetApi {
    inner: NodeApi<PowerAsset>,
}

impl PowerAssetApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PowerAsset nodes matching the filter
    pub async fn list(
        &self,
        filter: PowerAssetFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PowerAssetList> {
        self.inner
            .list(ListOptions {
                filter: create_power_asset_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PowerAsset nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PowerAssetTextField],
        filter: PowerAssetFilter,
        limit: usize,
    ) -> EntityResult<PowerAssetList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_power_asset_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PowerAssetField,
        filter: PowerAssetFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_power_asset_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PowerAssetField,
        interval: f64,
        filter: PowerAssetFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_power_asset_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PowerAssetFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PowerAssetList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_power_asset_filter(filter), retrieve_connections)
    }
}

impl Deref for PowerAssetApi {
    type Target = NodeApi<PowerAsset>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
