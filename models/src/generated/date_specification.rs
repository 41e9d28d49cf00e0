//! Generated view: DateSpecification
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`DateSpecification`]
pub const DATE_SPECIFICATION_VIEW: ViewRef = ViewRef::new("power_ops_core", "DateSpecification", "1");

/// Relative start and end of a bid or optimization period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSpecification {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    #[serde(rename = "processingTimezone")]
    pub processing_timezone: Option<String>,
    pub resolution: Option<String>,
    #[serde(rename = "startRelativeTime")]
    pub start_relative_time: Option<String>,
    #[serde(rename = "endRelativeTime")]
    pub end_relative_time: Option<String>,
}

/// Write class for the DateSpecification view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateSpecificationWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    #[serde(rename = "processingTimezone")]
    pub processing_timezone: Option<String>,
    pub resolution: Option<String>,
    #[serde(rename = "startRelativeTime")]
    pub start_relative_time: Option<String>,
    #[serde(rename = "endRelativeTime")]
    pub end_relative_time: Option<String>,
}

impl Identifiable for DateSpecification {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for DateSpecificationWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for DateSpecificationWrite {
    const VIEW: ViewRef = DATE_SPECIFICATION_VIEW;
}

impl DomainModel for DateSpecification {
    type Write = DateSpecificationWrite;

    const VIEW: ViewRef = DATE_SPECIFICATION_VIEW;

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            processing_timezone: props.optional("processingTimezone")?,
            resolution: props.optional("resolution")?,
            start_relative_time: props.optional("startRelativeTime")?,
            end_relative_time: props.optional("endRelativeTime")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> DateSpecificationWrite {
        DateSpecificationWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            processing_timezone: self.processing_timezone.clone(),
            resolution: self.resolution.clone(),
            start_relative_time: self.start_relative_time.clone(),
            end_relative_time: self.end_relative_time.clone(),
        }
    }
}

impl InstancesWrite for DateSpecificationWrite {
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
        writer.optional("processingTimezone", &self.processing_timezone)?;
        writer.optional("resolution", &self.resolution)?;
        writer.optional("startRelativeTime", &self.start_relative_time)?;
        writer.optional("endRelativeTime", &self.end_relative_time)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type DateSpecificationList = NodeList<DateSpecification>;
pub type DateSpecificationWriteList = NodeList<DateSpecificationWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpecificationField {
    Name,
    ProcessingTimezone,
    Resolution,
    StartRelativeTime,
    EndRelativeTime,
}

impl DateSpecificationField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ProcessingTimezone => "processingTimezone",
            Self::Resolution => "resolution",
            Self::StartRelativeTime => "startRelativeTime",
            Self::EndRelativeTime => "endRelativeTime",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpecificationTextField {
    Name,
    ProcessingTimezone,
    Resolution,
    StartRelativeTime,
    EndRelativeTime,
}

impl DateSpecificationTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ProcessingTimezone => "processingTimezone",
            Self::Resolution => "resolution",
            Self::StartRelativeTime => "startRelativeTime",
            Self::EndRelativeTime => "endRelativeTime",
        }
    }
}

/// Filter arguments for DateSpecification reads
#[derive(Debug, Clone, Default)]
pub struct DateSpecificationFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub processing_timezone: Option<OneOrMany<String>>,
    pub processing_timezone_prefix: Option<String>,
    pub resolution: Option<OneOrMany<String>>,
    pub resolution_prefix: Option<String>,
    pub start_relative_time: Option<OneOrMany<String>>,
    pub start_relative_time_prefix: Option<String>,
    pub end_relative_time: Option<OneOrMany<String>>,
    pub end_relative_time_prefix: Option<String>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for DateSpecification reads from its arguments
pub fn create_date_specification_filter(args: DateSpecificationFilter) -> Option<Filter> {
    FilterBuilder::new(DATE_SPECIFICATION_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("processingTimezone", args.processing_timezone)
        .prefix("processingTimezone", args.processing_timezone_prefix.as_deref())
        .equals_or_in("resolution", args.resolution)
        .prefix("resolution", args.resolution_prefix.as_deref())
        .equals_or_in("startRelativeTime", args.start_relative_time)
        .prefix("startRelativeTime", args.start_relative_time_prefix.as_deref())
        .equals_or_in("endRelativeTime", args.end_relative_time)
        .prefix("endRelativeTime", args.end_relative_time_prefix.as_deref())
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to DateSpecification nodes
#[derive(Clone)]
pub struct DateSpecificationApi {
    inner: NodeApi<DateSpecification>,
}

impl DateSpecificationApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List DateSpecification nodes matching the filter
    pub async fn list(
        &self,
        filter: DateSpecificationFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<DateSpecificationList> {
        self.inner
            .list(ListOptions {
                filter: create_date_specification_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over DateSpecification nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[DateSpecificationTextField],
        filter: DateSpecificationFilter,
        limit: usize,
    ) -> EntityResult<DateSpecificationList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_date_specification_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: DateSpecificationField,
        filter: DateSpecificationFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_date_specification_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: DateSpecificationField,
        interval: f64,
        filter: DateSpecificationFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_date_specification_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: DateSpecificationFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<DateSpecificationList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_date_specification_filter(filter), retrieve_connections)
    }
}

impl Deref for DateSpecificationApi {
    type Target = NodeApi<DateSpecification>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
