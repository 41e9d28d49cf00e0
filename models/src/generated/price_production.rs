//! Generated view: PriceProduction
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;
use super::shop_case::{ShopCase, ShopCaseWrite};

/// View backing [`PriceProduction`]
pub const PRICE_PRODUCTION_VIEW: ViewRef = ViewRef::new("power_ops_core", "PriceProduction", "1");

/// Read class for the PriceProduction view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceProduction {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    pub price: Option<String>,
    pub production: Option<String>,
    #[serde(rename = "shopCase")]
    pub shop_case: Option<Relation<ShopCase>>,
}

/// Write class for the PriceProduction view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceProductionWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    pub price: Option<String>,
    pub production: Option<String>,
    #[serde(rename = "shopCase")]
    pub shop_case: Option<Relation<ShopCaseWrite>>,
}

impl Identifiable for PriceProduction {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for PriceProductionWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for PriceProductionWrite {
    const VIEW: ViewRef = PRICE_PRODUCTION_VIEW;
}

impl DomainModel for PriceProduction {
    type Write = PriceProductionWrite;

    const VIEW: ViewRef = PRICE_PRODUCTION_VIEW;
    const CONNECTIONS: &'static [ConnectionDef] = &[
        ConnectionDef::direct("shopCase", super::shop_case::SHOP_CASE_VIEW),
    ];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            price: props.optional("price")?,
            production: props.optional("production")?,
            shop_case: props.direct_relation("shopCase")?,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "shopCase" => self.shop_case = Connected::into_single(related)?,
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PriceProductionWrite {
        PriceProductionWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            price: self.price.clone(),
            production: self.production.clone(),
            shop_case: self.shop_case.as_ref().map(Relation::as_write),
        }
    }
}

impl InstancesWrite for PriceProductionWrite {
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
        writer.optional("price", &self.price)?;
        writer.optional("production", &self.production)?;
        writer.direct_relation("shopCase", &self.shop_case)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));

        if let Some(related) = &self.shop_case {
            resources.extend(related.to_instances_write(cache, options)?);
        }
        Ok(resources)
    }
}

pub type PriceProductionList = NodeList<PriceProduction>;
pub type PriceProductionWriteList = NodeList<PriceProductionWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceProductionField {
    Name,
    Price,
    Production,
}

impl PriceProductionField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Production => "production",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceProductionTextField {
    Name,
}

impl PriceProductionTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }
}

/// Filter arguments for PriceProduction reads
#[derive(Debug, Clone, Default)]
pub struct PriceProductionFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub shop_case: Option<OneOrMany<NodeId>>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for PriceProduction reads from its arguments
pub fn create_price_production_filter(args: PriceProductionFilter) -> Option<Filter> {
    FilterBuilder::new(PRICE_PRODUCTION_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .direct_relation("shopCase", args.shop_case)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to PriceProduction nodes
#[derive(Clone)]
pub struct PriceProductionApi {
    inner: NodeApi<PriceProduction>,
}

impl PriceProductionApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List PriceProduction nodes matching the filter
    pub async fn list(
        &self,
        filter: PriceProductionFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<PriceProductionList> {
        self.inner
            .list(ListOptions {
                filter: create_price_production_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over PriceProduction nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[PriceProductionTextField],
        filter: PriceProductionFilter,
        limit: usize,
    ) -> EntityResult<PriceProductionList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_price_production_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: PriceProductionField,
        filter: PriceProductionFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_price_production_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: PriceProductionField,
        interval: f64,
        filter: PriceProductionFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_price_production_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: PriceProductionFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<PriceProductionList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_price_production_filter(filter), retrieve_connections)
    }
}

impl Deref for PriceProductionApi {
    type Target = NodeApi<PriceProduction>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
