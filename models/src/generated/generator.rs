//! Generated view: Generator
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`Generator`]
pub const GENERATOR_VIEW: ViewRef = ViewRef::new("power_ops_core", "Generator", "1");

/// Read class for the Generator view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generator {
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
    #[serde(rename = "productionMin")]
    pub production_min: Option<f64>,
    #[serde(rename = "productionMax")]
    pub production_max: Option<f64>,
    #[serde(rename = "penaltyLimit")]
    pub penalty_limit: Option<f64>,
    #[serde(rename = "startCost")]
    pub start_cost: Option<f64>,
}

/// Write class for the Generator view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratorWrite {
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
    #[serde(rename = "productionMin")]
    pub production_min: Option<f64>,
    #[serde(rename = "productionMax")]
    pub production_max: Option<f64>,
    #[serde(rename = "penaltyLimit")]
    pub penalty_limit: Option<f64>,
    #[serde(rename = "startCost")]
    pub start_cost: Option<f64>,
}

impl Identifiable for Generator {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for GeneratorWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for GeneratorWrite {
    const VIEW: ViewRef = GENERATOR_VIEW;
}

impl DomainModel for Generator {
    type Write = GeneratorWrite;

    const VIEW: ViewRef = GENERATOR_VIEW;
    const IMPLEMENTS: &'static [ViewRef] = &[super::power_asset::POWER_ASSET_VIEW];

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
            production_min: props.optional("productionMin")?,
            production_max: props.optional("productionMax")?,
            penalty_limit: props.optional("penaltyLimit")?,
            start_cost: props.optional("startCost")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> GeneratorWrite {
        GeneratorWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            ordering: self.ordering.clone(),
            asset_type: self.asset_type.clone(),
            production_min: self.production_min.clone(),
            production_max: self.production_max.clone(),
            penalty_limit: self.penalty_limit.clone(),
            start_cost: self.start_cost.clone(),
        }
    }
}

impl InstancesWrite for GeneratorWrite {
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
        writer.optional("productionMin", &self.production_min)?;
        writer.optional("productionMax", &self.production_max)?;
        writer.optional("penaltyLimit", &self.penalty_limit)?;
        writer.optional("startCost", &self.start_cost)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type GeneratorList = NodeList<Generator>;
pub type GeneratorWriteList = NodeList<GeneratorWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorField {
    Name,
    DisplayName,
    Ordering,
    AssetType,
    ProductionMin,
    ProductionMax,
    PenaltyLimit,
    StartCost,
}

impl GeneratorField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::Ordering => "ordering",
            Self::AssetType => "assetType",
            Self::ProductionMin => "productionMin",
            Self::ProductionMax => "productionMax",
            Self::PenaltyLimit => "penaltyLimit",
            Self::StartCost => "startCost",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorTextField {
    Name,
    DisplayName,
    AssetType,
}

impl GeneratorTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::AssetType => "assetType",
        }
    }
}

/// Filter arguments for Generator reads
#[derive(Debug, Clone, Default)]
pub struct GeneratorFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub display_name: Option<OneOrMany<String>>,
    pub display_name_prefix: Option<String>,
    pub min_ordering: Option<i32>,
    pub max_ordering: Option<i32>,
    pub asset_type: Option<OneOrMany<String>>,
    pub asset_type_prefix: Option<String>,
    pub min_production_min: Option<f64>,
    pub max_production_min: Option<f64>,
    pub min_production_max: Option<f64>,
    pub max_production_max: Option<f64>,
    pub min_penalty_limit: Option<f64>,
    pub max_penalty_limit: Option<f64>,
    pub min_start_cost: Option<f64>,
    pub max_start_cost: Option<f64>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for Generator reads from its arguments
pub fn create_generator_filter(args: GeneratorFilter) -> Option<Filter> {
    FilterBuilder::new(GENERATOR_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("displayName", args.display_name)
        .prefix("displayName", args.display_name_prefix.as_deref())
        .range("ordering", args.min_ordering, args.max_ordering)
        .equals_or_in("assetType", args.asset_type)
        .prefix("assetType", args.asset_type_prefix.as_deref())
        .range("productionMin", args.min_production_min, args.max_production_min)
        .range("productionMax", args.min_production_max, args.max_production_max)
        .range("penaltyLimit", args.min_penalty_limit, args.max_penalty_limit)
        .range("startCost", args.min_start_cost, args.max_start_cost)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to Generator nodes
#[derive(Clone)]
pub struct GeneratorApi {
    inner: NodeApi<Generator>,
}

impl GeneratorApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List Generator nodes matching the filter
    pub async fn list(
        &self,
        filter: GeneratorFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<GeneratorList> {
        self.inner
            .list(ListOptions {
                filter: create_generator_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over Generator nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[GeneratorTextField],
        filter: GeneratorFilter,
        limit: usize,
    ) -> EntityResult<GeneratorList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_generator_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: GeneratorField,
        filter: GeneratorFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_generator_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: GeneratorField,
        interval: f64,
        filter: GeneratorFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_generator_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: GeneratorFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<GeneratorList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_generator_filter(filter), retrieve_connections)
    }
}

impl Deref for GeneratorApi {
    type Target = NodeApi<Generator>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
