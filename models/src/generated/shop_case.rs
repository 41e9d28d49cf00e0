//! Generated view: ShopCase
// This file is auto-generated. Do not edit manually.

use chrono::{DateTime, Utc};
use futures::Stream;
use powerops_sdk::dm::{Aggregation, Direction, Filter, HistogramBucket, Node, NodeId, NodeRef, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;
use super::shop_file::{ShopFile, ShopFileWrite};
use super::shop_scenario::{ShopScenario, ShopScenarioWrite};

/// View backing [`ShopCase`]
pub const SHOP_CASE_VIEW: ViewRef = ViewRef::new("power_ops_core", "ShopCase", "1");
pub const SHOP_CASE_SHOP_FILES_EDGE: NodeRef = NodeRef::new("power_ops_types", "ShopCase.shopFiles");

/// Read class for the ShopCase view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopCase {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub scenario: Option<Relation<ShopScenario>>,
    #[serde(rename = "startTime")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "shopFiles")]
    pub shop_files: Option<Vec<Relation<ShopFile>>>,
}

/// Write class for the ShopCase view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShopCaseWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub scenario: Option<Relation<ShopScenarioWrite>>,
    #[serde(rename = "startTime")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "shopFiles")]
    pub shop_files: Option<Vec<Relation<ShopFileWrite>>>,
}

impl Identifiable for ShopCase {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for ShopCaseWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for ShopCaseWrite {
    const VIEW: ViewRef = SHOP_CASE_VIEW;
}

impl DomainModel for ShopCase {
    type Write = ShopCaseWrite;

    const VIEW: ViewRef = SHOP_CASE_VIEW;
    const CONNECTIONS: &'static [ConnectionDef] = &[
        ConnectionDef::direct("scenario", super::shop_scenario::SHOP_SCENARIO_VIEW),
        ConnectionDef::edge("shopFiles", SHOP_CASE_SHOP_FILES_EDGE, Direction::Outwards, super::shop_file::SHOP_FILE_VIEW),
    ];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            scenario: props.direct_relation("scenario")?,
            start_time: props.optional("startTime")?,
            end_time: props.optional("endTime")?,
            shop_files: None,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "scenario" => self.scenario = Connected::into_single(related)?,
            "shopFiles" => self.shop_files = Some(Connected::into_relations(related)?),
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> ShopCaseWrite {
        ShopCaseWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            scenario: self.scenario.as_ref().map(Relation::as_write),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            shop_files: self.shop_files.as_ref().map(|items| items.iter().map(Relation::as_write).collect()),
        }
    }
}

impl InstancesWrite for ShopCaseWrite {
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
        writer.direct_relation("scenario", &self.scenario)?;
        writer.optional("startTime", &self.start_time)?;
        writer.optional("endTime", &self.end_time)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));

        if let Some(related) = &self.scenario {
            resources.extend(related.to_instances_write(cache, options)?);
        }

        for related in self.shop_files.iter().flatten() {
            resources.extend(write_edge(&id, related, SHOP_CASE_SHOP_FILES_EDGE, Direction::Outwards, cache, options)?);
        }
        Ok(resources)
    }
}

pub type ShopCaseList = NodeList<ShopCase>;
pub type ShopCaseWriteList = NodeList<ShopCaseWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopCaseField {
    StartTime,
    EndTime,
}

impl ShopCaseField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        }
    }
}

/// Filter arguments for ShopCase reads
#[derive(Debug, Clone, Default)]
pub struct ShopCaseFilter {
    pub scenario: Option<OneOrMany<NodeId>>,
    pub min_start_time: Option<DateTime<Utc>>,
    pub max_start_time: Option<DateTime<Utc>>,
    pub min_end_time: Option<DateTime<Utc>>,
    pub max_end_time: Option<DateTime<Utc>>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for ShopCase reads from its arguments
pub fn create_shop_case_filter(args: ShopCaseFilter) -> Option<Filter> {
    FilterBuilder::new(SHOP_CASE_VIEW)
        .direct_relation("scenario", args.scenario)
        .range("startTime", args.min_start_time, args.max_start_time)
        .range("endTime", args.min_end_time, args.max_end_time)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to ShopCase nodes
#[derive(Clone)]
pub struct ShopCaseApi {
    inner: NodeApi<ShopCase>,
}

impl ShopCaseApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List ShopCase nodes matching the filter
    pub async fn list(
        &self,
        filter: ShopCaseFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<ShopCaseList> {
        self.inner
            .list(ListOptions {
                filter: create_shop_case_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: ShopCaseField,
        filter: ShopCaseFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_shop_case_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: ShopCaseField,
        interval: f64,
        filter: ShopCaseFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_shop_case_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: ShopCaseFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<ShopCaseList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_shop_case_filter(filter), retrieve_connections)
    }
}

impl Deref for ShopCaseApi {
    type Target = NodeApi<ShopCase>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
