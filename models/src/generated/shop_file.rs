//! Generated view: ShopFile
// This file is auto-generated. Do not edit manually.

use futures::Stream;
use powerops_sdk::dm::{Aggregation, Filter, HistogramBucket, Node, NodeId, ViewRef};
use powerops_sdk::entity::*;
use serde::Serialize;
use std::ops::Deref;

/// View backing [`ShopFile`]
pub const SHOP_FILE_VIEW: ViewRef = ViewRef::new("power_ops_core", "ShopFile", "1");

/// Read class for the ShopFile view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopFile {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecord,
    pub name: String,
    pub label: Option<String>,
    #[serde(rename = "fileReference")]
    pub file_reference: Option<String>,
    pub order: Option<i32>,
    #[serde(rename = "isAscii")]
    pub is_ascii: Option<bool>,
}

/// Write class for the ShopFile view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShopFileWrite {
    pub space: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "dataRecord")]
    pub data_record: DataRecordWrite,
    pub name: String,
    pub label: Option<String>,
    #[serde(rename = "fileReference")]
    pub file_reference: Option<String>,
    pub order: Option<i32>,
    #[serde(rename = "isAscii")]
    pub is_ascii: Option<bool>,
}

impl Identifiable for ShopFile {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl Identifiable for ShopFileWrite {
    fn node_id(&self) -> NodeId {
        NodeId::new(&self.space, &self.external_id)
    }
}

impl DomainModelWrite for ShopFileWrite {
    const VIEW: ViewRef = SHOP_FILE_VIEW;
}

impl DomainModel for ShopFile {
    type Write = ShopFileWrite;

    const VIEW: ViewRef = SHOP_FILE_VIEW;

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            label: props.optional("label")?,
            file_reference: props.optional("fileReference")?,
            order: props.optional("order")?,
            is_ascii: props.optional("isAscii")?,
        })
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> ShopFileWrite {
        ShopFileWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            label: self.label.clone(),
            file_reference: self.file_reference.clone(),
            order: self.order.clone(),
            is_ascii: self.is_ascii.clone(),
        }
    }
}

impl InstancesWrite for ShopFileWrite {
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
        writer.optional("label", &self.label)?;
        writer.optional("fileReference", &self.file_reference)?;
        writer.optional("order", &self.order)?;
        writer.optional("isAscii", &self.is_ascii)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        Ok(resources)
    }
}

pub type ShopFileList = NodeList<ShopFile>;
pub type ShopFileWriteList = NodeList<ShopFileWrite>;

/// Scalar properties usable in aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopFileField {
    Name,
    Label,
    FileReference,
    Order,
    IsAscii,
}

impl ShopFileField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Label => "label",
            Self::FileReference => "fileReference",
            Self::Order => "order",
            Self::IsAscii => "isAscii",
        }
    }
}

/// Text properties usable in search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopFileTextField {
    Name,
    Label,
    FileReference,
}

impl ShopFileTextField {
    pub fn property(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Label => "label",
            Self::FileReference => "fileReference",
        }
    }
}

/// Filter arguments for ShopFile reads
#[derive(Debug, Clone, Default)]
pub struct ShopFileFilter {
    pub name: Option<OneOrMany<String>>,
    pub name_prefix: Option<String>,
    pub label: Option<OneOrMany<String>>,
    pub label_prefix: Option<String>,
    pub file_reference: Option<OneOrMany<String>>,
    pub file_reference_prefix: Option<String>,
    pub min_order: Option<i32>,
    pub max_order: Option<i32>,
    pub is_ascii: Option<bool>,
    pub external_id_prefix: Option<String>,
    pub space: Option<OneOrMany<String>>,
    pub filter: Option<Filter>,
}

/// Build the filter for ShopFile reads from its arguments
pub fn create_shop_file_filter(args: ShopFileFilter) -> Option<Filter> {
    FilterBuilder::new(SHOP_FILE_VIEW)
        .equals_or_in("name", args.name)
        .prefix("name", args.name_prefix.as_deref())
        .equals_or_in("label", args.label)
        .prefix("label", args.label_prefix.as_deref())
        .equals_or_in("fileReference", args.file_reference)
        .prefix("fileReference", args.file_reference_prefix.as_deref())
        .range("order", args.min_order, args.max_order)
        .boolean("isAscii", args.is_ascii)
        .external_id_prefix(args.external_id_prefix.as_deref())
        .space(args.space)
        .extra(args.filter)
        .build()
}

/// Typed access to ShopFile nodes
#[derive(Clone)]
pub struct ShopFileApi {
    inner: NodeApi<ShopFile>,
}

impl ShopFileApi {
    pub fn new(client: &DomainClient) -> Self {
        Self { inner: client.api() }
    }

    /// List ShopFile nodes matching the filter
    pub async fn list(
        &self,
        filter: ShopFileFilter,
        limit: Option<usize>,
        retrieve_connections: RetrieveConnections,
    ) -> EntityResult<ShopFileList> {
        self.inner
            .list(ListOptions {
                filter: create_shop_file_filter(filter),
                limit,
                retrieve_connections,
                ..Default::default()
            })
            .await
    }

    /// Free-text search over ShopFile nodes
    pub async fn search(
        &self,
        query: &str,
        properties: &[ShopFileTextField],
        filter: ShopFileFilter,
        limit: usize,
    ) -> EntityResult<ShopFileList> {
        self.inner
            .search(SearchOptions {
                query: Some(query.to_string()),
                properties: properties.iter().map(|p| p.property().to_string()).collect(),
                filter: create_shop_file_filter(filter),
                limit,
            })
            .await
    }

    /// Single aggregate over the matching nodes
    pub async fn aggregate(
        &self,
        aggregation: Aggregation,
        property: ShopFileField,
        filter: ShopFileFilter,
    ) -> EntityResult<Option<f64>> {
        self.inner
            .aggregate_value(aggregation, property.property(), create_shop_file_filter(filter))
            .await
    }

    pub async fn histogram(
        &self,
        property: ShopFileField,
        interval: f64,
        filter: ShopFileFilter,
    ) -> EntityResult<Vec<HistogramBucket>> {
        self.inner
            .histogram(property.property(), interval, create_shop_file_filter(filter))
            .await
    }

    /// Stream matching nodes in chunks
    pub fn iterate(
        &self,
        chunk_size: usize,
        filter: ShopFileFilter,
        retrieve_connections: RetrieveConnections,
    ) -> impl Stream<Item = EntityResult<ShopFileList>> + Send + 'static {
        self.inner
            .iterate(chunk_size, create_shop_file_filter(filter), retrieve_connections)
    }
}

impl Deref for ShopFileApi {
    type Target = NodeApi<ShopFile>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
