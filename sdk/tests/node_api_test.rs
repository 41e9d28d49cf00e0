//! NodeApi and DomainClient against the in-memory backend, using two
//! hand-written models shaped like generated view modules.

use futures::TryStreamExt;
use powerops_sdk::dm::{Aggregation, Direction, Node, NodeId, NodeRef, ViewRef};
use powerops_sdk::entity::*;
use powerops_sdk::testing::MemoryBackend;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

const SPACE: &str = "instances";
const PLANT_VIEW: ViewRef = ViewRef::new("core", "Plant", "1");
const UNIT_VIEW: ViewRef = ViewRef::new("core", "Unit", "1");
const PLANT_UNITS_EDGE: NodeRef = NodeRef::new("types", "Plant.units");

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Plant {
    space: String,
    external_id: String,
    data_record: DataRecord,
    name: String,
    units: Option<Vec<Relation<Unit>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct PlantWrite {
    space: String,
    external_id: String,
    data_record: DataRecordWrite,
    name: String,
    units: Option<Vec<Relation<UnitWrite>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Unit {
    space: String,
    external_id: String,
    data_record: DataRecord,
    name: String,
    p_max: Option<f64>,
    plant: Option<Relation<Plant>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct UnitWrite {
    space: String,
    external_id: String,
    data_record: DataRecordWrite,
    name: String,
    p_max: Option<f64>,
    plant: Option<Relation<PlantWrite>>,
}

macro_rules! identifiable {
    ($($ty:ty),*) => {
        $(impl Identifiable for $ty {
            fn node_id(&self) -> NodeId {
                NodeId::new(&self.space, &self.external_id)
            }
        })*
    };
}

identifiable!(Plant, PlantWrite, Unit, UnitWrite);

impl DomainModel for Plant {
    type Write = PlantWrite;
    const VIEW: ViewRef = PLANT_VIEW;
    const CONNECTIONS: &'static [ConnectionDef] = &[ConnectionDef::edge(
        "units",
        PLANT_UNITS_EDGE,
        Direction::Outwards,
        UNIT_VIEW,
    )];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            units: None,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "units" => self.units = Some(Connected::into_relations(related)?),
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> PlantWrite {
        PlantWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            units: self
                .units
                .as_ref()
                .map(|items| items.iter().map(Relation::as_write).collect()),
        }
    }
}

impl DomainModel for Unit {
    type Write = UnitWrite;
    const VIEW: ViewRef = UNIT_VIEW;
    const CONNECTIONS: &'static [ConnectionDef] = &[ConnectionDef::direct("plant", PLANT_VIEW)];

    fn from_node(node: &Node) -> EntityResult<Self> {
        let props = NodeProperties::new(node, Self::VIEW);
        Ok(Self {
            space: node.space.clone(),
            external_id: node.external_id.clone(),
            data_record: props.data_record(),
            name: props.required("name")?,
            p_max: props.optional("pMax")?,
            plant: props.direct_relation("plant")?,
        })
    }

    fn connect(&mut self, property: &str, related: Vec<Connected>) -> EntityResult<()> {
        match property {
            "plant" => self.plant = Connected::into_single(related)?,
            _ => return Err(EntityError::unknown_connection(Self::type_name(), property)),
        }
        Ok(())
    }

    fn data_record(&self) -> &DataRecord {
        &self.data_record
    }

    fn as_write(&self) -> UnitWrite {
        UnitWrite {
            space: self.space.clone(),
            external_id: self.external_id.clone(),
            data_record: self.data_record.as_write(),
            name: self.name.clone(),
            p_max: self.p_max,
            plant: self.plant.as_ref().map(Relation::as_write),
        }
    }
}

impl DomainModelWrite for PlantWrite {
    const VIEW: ViewRef = PLANT_VIEW;
}

impl DomainModelWrite for UnitWrite {
    const VIEW: ViewRef = UNIT_VIEW;
}

impl InstancesWrite for PlantWrite {
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
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        for related in self.units.iter().flatten() {
            resources.extend(write_edge(&id, related, PLANT_UNITS_EDGE, Direction::Outwards, cache, options)?);
        }
        Ok(resources)
    }
}

impl InstancesWrite for UnitWrite {
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
        writer.optional("pMax", &self.p_max)?;
        writer.direct_relation("plant", &self.plant)?;
        resources.push_node(node_apply(&id, &self.data_record, Self::VIEW, writer, options));
        if let Some(related) = &self.plant {
            resources.extend(related.to_instances_write(cache, options)?);
        }
        Ok(resources)
    }
}

fn unit(external_id: &str, p_max: f64) -> UnitWrite {
    UnitWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        name: external_id.to_uppercase(),
        p_max: Some(p_max),
        plant: Some(Relation::Id(NodeId::new(SPACE, "plant1"))),
        ..Default::default()
    }
}

async fn seeded() -> (Arc<MemoryBackend>, DomainClient) {
    let backend = Arc::new(MemoryBackend::new());
    let client = DomainClient::new(backend.clone(), SPACE);
    let plant = PlantWrite {
        space: SPACE.into(),
        external_id: "plant1".into(),
        name: "Plant 1".into(),
        units: Some(vec![
            Relation::node(unit("u1", 100.0)),
            Relation::node(unit("u2", 50.0)),
        ]),
        ..Default::default()
    };
    client.upsert(&[&plant], UpsertOptions::default()).await.unwrap();
    (backend, client)
}

#[tokio::test]
async fn test_upsert_nested_edges() {
    let (backend, _client) = seeded().await;
    assert_eq!(backend.node_count(), 3);
    assert_eq!(backend.edge_count(), 2);

    let edges = backend.edges();
    assert!(edges.iter().all(|e| e.edge_type == PLANT_UNITS_EDGE.to_node_id()));
    assert_eq!(edges[0].external_id, "plant1:u1");
    assert_eq!(edges[0].start_node, NodeId::new(SPACE, "plant1"));
}

#[tokio::test]
async fn test_list_with_full_connections() {
    let (_backend, client) = seeded().await;
    let plants = client
        .api::<Plant>()
        .list(ListOptions {
            retrieve_connections: RetrieveConnections::Full,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(plants.len(), 1);
    let units = plants[0].units.as_ref().unwrap();
    let mut names: Vec<&str> = units
        .iter()
        .map(|u| u.as_node().unwrap().name.as_str())
        .collect();
    names.sort();
    assert_eq!(names, vec!["U1", "U2"]);
}

#[tokio::test]
async fn test_list_with_identifiers_only() {
    let (_backend, client) = seeded().await;
    let plants = client
        .api::<Plant>()
        .list(ListOptions {
            retrieve_connections: RetrieveConnections::Identifier,
            ..Default::default()
        })
        .await
        .unwrap();

    let units = plants[0].units.as_ref().unwrap();
    assert_eq!(units.len(), 2);
    assert!(units.iter().all(Relation::is_id));
}

#[tokio::test]
async fn test_direct_relation_read() {
    let (_backend, client) = seeded().await;
    let api = client.api::<Unit>();

    let u1 = api.retrieve("u1").await.unwrap().unwrap();
    assert_eq!(u1.plant, Some(Relation::Id(NodeId::new(SPACE, "plant1"))));

    let full = api
        .retrieve_node(&NodeId::new(SPACE, "u2"), RetrieveConnections::Full)
        .await
        .unwrap()
        .unwrap();
    let plant = full.plant.as_ref().and_then(Relation::as_node).unwrap();
    assert_eq!(plant.name, "Plant 1");

    assert!(api.retrieve("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_iterate_and_aggregate() {
    let (_backend, client) = seeded().await;
    let api = client.api::<Unit>();

    let chunks: Vec<NodeList<Unit>> = api
        .iterate(1, None, RetrieveConnections::Skip)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.len() == 1));

    let total = api.aggregate_value(Aggregation::Sum, "pMax", None).await.unwrap();
    assert_eq!(total, Some(150.0));
    let count = api.aggregate_value(Aggregation::Count, "name", None).await.unwrap();
    assert_eq!(count, Some(2.0));
}

#[tokio::test]
async fn test_stale_version_conflicts() {
    let (_backend, client) = seeded().await;
    let api = client.api::<Unit>();
    let read = api.retrieve("u1").await.unwrap().unwrap();

    let mut first = read.as_write();
    first.p_max = Some(120.0);
    client.upsert(&[&first], UpsertOptions::default()).await.unwrap();

    let err = client.upsert(&[&first], UpsertOptions::default()).await.unwrap_err();
    assert!(err.is_version_conflict());

    let forced = UpsertOptions {
        allow_version_increase: true,
        ..Default::default()
    };
    client.upsert(&[&first], forced).await.unwrap();
}

fn bare_unit(space: &str, external_id: &str) -> UnitWrite {
    UnitWrite {
        space: space.into(),
        external_id: external_id.into(),
        name: external_id.to_uppercase(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_retrieve_many_across_spaces() {
    let backend = Arc::new(MemoryBackend::new());
    let client = DomainClient::new(backend.clone(), SPACE);
    let units = [
        bare_unit("sp1", "a"),
        bare_unit("sp1", "b"),
        bare_unit("sp2", "a"),
        bare_unit("sp2", "b"),
    ];
    let items: Vec<&dyn InstancesWrite> = units.iter().map(|u| u as &dyn InstancesWrite).collect();
    client.upsert(&items, UpsertOptions::default()).await.unwrap();

    let wanted = [NodeId::new("sp1", "a"), NodeId::new("sp2", "b")];
    for connections in [RetrieveConnections::Identifier, RetrieveConnections::Full] {
        let found = client.api::<Unit>().retrieve_many(&wanted, connections).await.unwrap();
        let ids: Vec<NodeId> = found.iter().map(Identifiable::node_id).collect();
        assert_eq!(ids, wanted.to_vec());
    }
}

async fn plant_with_units(client: &DomainClient, external_id: &str, count: usize) {
    let units = (0..count)
        .map(|i| {
            Relation::node(UnitWrite {
                plant: None,
                ..unit(&format!("{}_u{}", external_id, i), i as f64)
            })
        })
        .collect();
    let plant = PlantWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        name: external_id.to_uppercase(),
        units: Some(units),
        ..Default::default()
    };
    client.upsert(&[&plant], UpsertOptions::default()).await.unwrap();
}

#[tokio::test]
async fn test_connections_beyond_one_page() {
    let backend = Arc::new(MemoryBackend::new());
    let client = DomainClient::new(backend.clone(), SPACE);
    plant_with_units(&client, "big", 7).await;
    assert_eq!(backend.edge_count(), 7);

    let api = client.api::<Plant>().with_connection_limit(3);
    for connections in [RetrieveConnections::Identifier, RetrieveConnections::Full] {
        let plant = api
            .retrieve_node(&NodeId::new(SPACE, "big"), connections)
            .await
            .unwrap()
            .unwrap();
        let units = plant.units.unwrap();
        assert_eq!(units.len(), 7);
        let distinct: HashSet<NodeId> = units.iter().map(Relation::node_id).collect();
        assert_eq!(distinct.len(), 7);
    }
}

#[tokio::test]
async fn test_connection_pages_per_root_page() {
    let backend = Arc::new(MemoryBackend::new());
    let client = DomainClient::new(backend.clone(), SPACE);
    plant_with_units(&client, "p1", 5).await;
    plant_with_units(&client, "p2", 2).await;
    plant_with_units(&client, "p3", 4).await;

    let api = client.api::<Plant>().with_connection_limit(2);
    let chunks: Vec<NodeList<Plant>> = api
        .iterate(1, None, RetrieveConnections::Full)
        .try_collect()
        .await
        .unwrap();
    let counts: Vec<(String, usize)> = chunks
        .iter()
        .flat_map(|chunk| chunk.iter())
        .map(|p| (p.external_id.clone(), p.units.as_ref().map_or(0, Vec::len)))
        .collect();
    assert_eq!(
        counts,
        vec![("p1".to_string(), 5), ("p2".to_string(), 2), ("p3".to_string(), 4)]
    );

    let listed = api
        .list(ListOptions {
            limit: None,
            retrieve_connections: RetrieveConnections::Identifier,
            ..Default::default()
        })
        .await
        .unwrap();
    let total: usize = listed.iter().map(|p| p.units.as_ref().map_or(0, Vec::len)).sum();
    assert_eq!(total, 11);
}
