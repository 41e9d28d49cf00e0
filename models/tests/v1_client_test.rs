//! PowerOpsModelsV1Client over the in-memory backend.

use futures::TryStreamExt;
use powerops_models::generated::shop_case::SHOP_CASE_SHOP_FILES_EDGE;
use powerops_models::*;
use powerops_sdk::dm::{
    Aggregation, DataModelingError, Filter, GraphQlError, GraphQlResponse, InstanceApply, NodeId,
    PropertyMap,
};
use powerops_sdk::entity::{
    DomainModel, EntityError, InstancesWrite, Relation, ResourcesWrite, VisitedSet, WriteOptions,
};
use powerops_sdk::testing::MemoryBackend;
use serde_json::json;
use std::sync::Arc;

const SPACE: &str = "power_ops_instances";

fn client() -> (Arc<MemoryBackend>, PowerOpsModelsV1Client) {
    let backend = Arc::new(MemoryBackend::new());
    backend.register_model::<Generator>();
    backend.register_model::<ShopBasedPartialBidConfiguration>();
    backend.register_model::<PriceAreaInformation>();
    let client = PowerOpsModelsV1Client::with_backend(backend.clone());
    (backend, client)
}

fn scenario(external_id: &str) -> ShopScenarioWrite {
    ShopScenarioWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        name: format!("Scenario {}", external_id),
        source: Some("yaml".into()),
        ..Default::default()
    }
}

fn shop_file(external_id: &str, order: i32) -> ShopFileWrite {
    ShopFileWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        name: external_id.to_uppercase(),
        order: Some(order),
        is_ascii: Some(true),
        ..Default::default()
    }
}

fn generator(external_id: &str, production_max: f64) -> GeneratorWrite {
    GeneratorWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        name: external_id.into(),
        asset_type: Some("generator".into()),
        production_min: Some(0.0),
        production_max: Some(production_max),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_retrieve_date_specification() {
    let (backend, client) = client();
    let properties = PropertyMap::from([
        ("name".to_string(), json!("Winter")),
        ("processingTimezone".to_string(), json!("UTC")),
    ]);
    let stored = backend.put_node(
        NodeId::new(SPACE, "ds1"),
        &DATE_SPECIFICATION_VIEW.to_view_id(),
        properties,
    );

    let ds = client
        .shop_based_day_ahead_bid_process
        .date_specification
        .retrieve("ds1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ds.name, "Winter");
    assert_eq!(ds.processing_timezone.as_deref(), Some("UTC"));
    assert_eq!(ds.resolution, None);

    let write = ds.as_write();
    assert_eq!(write.name, "Winter");
    assert_eq!(write.processing_timezone.as_deref(), Some("UTC"));
    assert_eq!(write.data_record.existing_version, Some(stored.version));
}

#[test]
fn test_write_translation_carries_scalars_and_relations() {
    let case = ShopCaseWrite {
        space: SPACE.into(),
        external_id: "case1".into(),
        scenario: Some(Relation::Id(NodeId::new(SPACE, "sc1"))),
        start_time: Some(chrono::Utc::now()),
        ..Default::default()
    };

    let resources = case
        .to_instances_write(&mut VisitedSet::new(), &WriteOptions::default())
        .unwrap();
    assert_eq!(resources.nodes.len(), 1);
    let node = &resources.nodes[0];
    assert_eq!(node.sources[0].source, SHOP_CASE_VIEW.to_view_id());

    let props = &node.sources[0].properties;
    assert_eq!(props["scenario"], json!({"space": SPACE, "externalId": "sc1"}));
    assert!(props.contains_key("startTime"));
    assert!(!props.contains_key("endTime"));

    let with_nulls = WriteOptions {
        write_none: true,
        ..Default::default()
    };
    let resources = case.to_instances_write(&mut VisitedSet::new(), &with_nulls).unwrap();
    assert_eq!(resources.nodes[0].sources[0].properties["endTime"], json!(null));
}

#[tokio::test]
async fn test_upsert_emits_one_edge_per_shop_file() {
    let (backend, client) = client();
    let case = ShopCaseWrite {
        space: SPACE.into(),
        external_id: "case1".into(),
        scenario: Some(Relation::node(scenario("sc1"))),
        shop_files: Some(vec![
            Relation::node(shop_file("f1", 1)),
            Relation::node(shop_file("f2", 2)),
        ]),
        ..Default::default()
    };

    let result = client.upsert(&[&case], UpsertOptions::default()).await.unwrap();
    assert_eq!(result.nodes.len(), 4);
    assert_eq!(result.edges.len(), 2);

    let edges = backend.edges();
    assert!(edges
        .iter()
        .all(|e| e.edge_type == SHOP_CASE_SHOP_FILES_EDGE.to_node_id()));
    assert_eq!(edges[0].start_node, NodeId::new(SPACE, "case1"));
    assert_eq!(edges[0].end_node, NodeId::new(SPACE, "f1"));

    let cases = client
        .shop_based_day_ahead_bid_process
        .shop_case
        .list(ShopCaseFilter::default(), None, RetrieveConnections::Full)
        .await
        .unwrap();
    assert_eq!(cases.len(), 1);
    let mut names: Vec<String> = cases[0]
        .shop_files
        .iter()
        .flatten()
        .filter_map(|f| f.as_node().map(|file| file.name.clone()))
        .collect();
    names.sort();
    assert_eq!(names, vec!["F1", "F2"]);
    let scenario = cases[0].scenario.as_ref().and_then(Relation::as_node).unwrap();
    assert_eq!(scenario.name, "Scenario sc1");
}

#[tokio::test]
async fn test_shared_related_node_written_once() {
    let (backend, client) = client();
    let case = |external_id: &str| ShopCaseWrite {
        space: SPACE.into(),
        external_id: external_id.into(),
        scenario: Some(Relation::node(scenario("shared"))),
        ..Default::default()
    };
    let (first, second) = (case("case1"), case("case2"));

    client
        .upsert(&[&first, &second], UpsertOptions::default())
        .await
        .unwrap();

    let request = backend.apply_requests().pop().unwrap();
    let scenario_writes = request
        .items
        .iter()
        .filter(|item| matches!(item, InstanceApply::Node(node) if node.external_id == "shared"))
        .count();
    assert_eq!(scenario_writes, 1);
    assert_eq!(backend.node_count(), 3);
}

#[tokio::test]
async fn test_stale_write_is_rejected() {
    let (_backend, client) = client();
    let apis = &client.power_asset;
    client
        .upsert(&[&generator("g1", 100.0)], UpsertOptions::default())
        .await
        .unwrap();

    let read = apis.generator.retrieve("g1").await.unwrap().unwrap();
    let mut update = read.as_write();
    update.penalty_limit = Some(12.5);
    client.upsert(&[&update], UpsertOptions::default()).await.unwrap();

    let err = client
        .upsert(&[&update], UpsertOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_version_conflict());

    let forced = UpsertOptions {
        allow_version_increase: true,
        ..Default::default()
    };
    client.upsert(&[&update], forced).await.unwrap();
    let read = apis.generator.retrieve("g1").await.unwrap().unwrap();
    assert_eq!(read.penalty_limit, Some(12.5));
}

#[tokio::test]
async fn test_read_write_round_trip() {
    let (_backend, client) = client();
    let original = generator("g1", 80.0);
    client.upsert(&[&original], UpsertOptions::default()).await.unwrap();

    let read = client
        .power_asset
        .generator
        .retrieve("g1")
        .await
        .unwrap()
        .unwrap();
    let mut write = read.as_write();
    assert_eq!(write.data_record.existing_version, Some(read.data_record.version));
    write.data_record = Default::default();
    assert_eq!(write, original);
}

#[test]
fn test_filter_arguments() {
    let name_ref = SHOP_SCENARIO_VIEW.to_view_id().as_property_ref("name");

    let filter = create_shop_scenario_filter(ShopScenarioFilter {
        name: Some("abc".into()),
        ..Default::default()
    });
    assert_eq!(filter, Some(Filter::equals(name_ref.clone(), "abc")));

    let filter = create_shop_scenario_filter(ShopScenarioFilter {
        name: Some(vec!["a", "b"].into()),
        ..Default::default()
    });
    assert_eq!(
        filter,
        Some(Filter::in_(name_ref.clone(), vec![json!("a"), json!("b")]))
    );

    let filter = create_shop_scenario_filter(ShopScenarioFilter {
        name_prefix: Some("a".into()),
        ..Default::default()
    });
    assert_eq!(filter, Some(Filter::prefix(name_ref.clone(), "a")));

    let extra = Filter::equals(vec!["node".into(), "externalId".into()], "sc1");
    let filter = create_shop_scenario_filter(ShopScenarioFilter {
        name: Some("abc".into()),
        filter: Some(extra.clone()),
        ..Default::default()
    });
    assert_eq!(
        filter,
        Some(Filter::And(vec![Filter::equals(name_ref, "abc"), extra]))
    );

    assert_eq!(create_shop_scenario_filter(ShopScenarioFilter::default()), None);
}

#[tokio::test]
async fn test_filtered_list_and_search() {
    let (_backend, client) = client();
    let a = scenario("sc-winter");
    let mut b = scenario("sc-summer");
    b.source = Some("manual".into());
    client.upsert(&[&a, &b], UpsertOptions::default()).await.unwrap();
    let api = &client.shop_based_day_ahead_bid_process.shop_scenario;

    let manual = api
        .list(
            ShopScenarioFilter {
                source: Some("manual".into()),
                ..Default::default()
            },
            None,
            RetrieveConnections::Skip,
        )
        .await
        .unwrap();
    assert_eq!(manual.len(), 1);
    assert_eq!(manual[0].external_id, "sc-summer");

    let found = api
        .search("WINTER", &[ShopScenarioTextField::Name], ShopScenarioFilter::default(), 10)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Scenario sc-winter");
}

#[tokio::test]
async fn test_generators_read_through_power_asset() {
    let (_backend, client) = client();
    let (g1, g2) = (generator("g1", 100.0), generator("g2", 50.0));
    client.upsert(&[&g1, &g2], UpsertOptions::default()).await.unwrap();
    let apis = &client.power_asset;

    let assets = apis
        .power_asset
        .list(PowerAssetFilter::default(), None, RetrieveConnections::Skip)
        .await
        .unwrap();
    assert_eq!(assets.len(), 2);
    assert!(assets.iter().all(|a| a.asset_type.as_deref() == Some("generator")));

    let total = apis
        .generator
        .aggregate(Aggregation::Sum, GeneratorField::ProductionMax, GeneratorFilter::default())
        .await
        .unwrap();
    assert_eq!(total, Some(150.0));

    let large = apis
        .generator
        .list(
            GeneratorFilter {
                min_production_max: Some(75.0),
                ..Default::default()
            },
            None,
            RetrieveConnections::Skip,
        )
        .await
        .unwrap();
    assert_eq!(large.as_node_ids(), vec![NodeId::new(SPACE, "g1")]);

    let chunks: Vec<GeneratorList> = apis
        .generator
        .iterate(1, GeneratorFilter::default(), RetrieveConnections::Skip)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.len(), 2);
}

#[tokio::test]
async fn test_delete_by_external_id() {
    let (backend, client) = client();
    client
        .upsert(&[&generator("g1", 10.0)], UpsertOptions::default())
        .await
        .unwrap();

    let result = client.delete(&["g1"], None).await.unwrap();
    assert_eq!(result.nodes, vec![NodeId::new(SPACE, "g1")]);
    assert_eq!(backend.node_count(), 0);
    assert!(client.power_asset.generator.retrieve("g1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_graphql_query_per_model() {
    let (backend, client) = client();
    let data = json!({"listPriceProduction": {"items": [{"name": "pp1"}]}});
    backend.set_graphql_response(
        "DayAheadBid",
        GraphQlResponse {
            data: Some(data.clone()),
            errors: Vec::new(),
        },
    );

    let query = "{ listPriceProduction { items { name } } }";
    let result = client.day_ahead_bid.graphql_query(query, None).await.unwrap();
    assert_eq!(result, data);
    let (model, sent) = backend.graphql_queries().pop().unwrap();
    assert_eq!(model, client.day_ahead_bid.data_model_id());
    assert_eq!(sent, query);

    backend.set_graphql_response(
        "PowerAsset",
        GraphQlResponse {
            data: None,
            errors: vec![GraphQlError {
                message: "Field 'foo' not found".into(),
            }],
        },
    );
    let err = client
        .power_asset
        .graphql_query("{ foo }", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EntityError::Backend(DataModelingError::GraphQl(ref m)) if m.len() == 1));
}

#[test]
fn test_empty_resources_for_already_written_node() {
    let file = shop_file("f1", 1);
    let mut cache = VisitedSet::new();
    cache.visit_node(&NodeId::new(SPACE, "f1"));
    let resources: ResourcesWrite = file
        .to_instances_write(&mut cache, &WriteOptions::default())
        .unwrap();
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_node_named_like_an_edge_keeps_the_edge() {
    let (backend, client) = client();
    let lookalike = shop_file("c1:f1", 2);
    let case = ShopCaseWrite {
        space: SPACE.into(),
        external_id: "c1".into(),
        shop_files: Some(vec![Relation::node(shop_file("f1", 1))]),
        ..Default::default()
    };
    client
        .upsert(&[&lookalike, &case], UpsertOptions::default())
        .await
        .unwrap();

    assert_eq!(backend.node_count(), 3);
    assert_eq!(backend.edge_count(), 1);
    assert_eq!(backend.edges()[0].external_id, "c1:f1");
}

#[tokio::test]
async fn test_case_with_more_shop_files_than_one_page() {
    let (backend, client) = client();
    let files: Vec<Relation<ShopFileWrite>> = (0..10_005)
        .map(|i| Relation::node(shop_file(&format!("f{}", i), i)))
        .collect();
    let case = ShopCaseWrite {
        space: SPACE.into(),
        external_id: "c1".into(),
        shop_files: Some(files),
        ..Default::default()
    };
    client.upsert(&[&case], UpsertOptions::default()).await.unwrap();
    assert_eq!(backend.edge_count(), 10_005);

    let read = client
        .shop_based_day_ahead_bid_process
        .shop_case
        .retrieve("c1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read.shop_files.map(|files| files.len()), Some(10_005));
}
