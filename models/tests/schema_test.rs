//! The checked-in view modules must match what the schema generates.

use powerops_sdk::entity::codegen::ViewCodeGenerator;
use powerops_sdk::entity::{SchemaParser, SchemaValidator};
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;

fn schema_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/schema/power_ops_v1.graphql"))
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".rs"))
        .collect()
}

#[test]
fn test_schema_is_valid() {
    let schema = SchemaParser::new("power_ops_core", "1")
        .parse_file(schema_path())
        .unwrap();
    assert_eq!(schema.view_count(), 12);

    let result = SchemaValidator::new().validate(&schema).unwrap();
    assert!(result.is_valid(), "{:?}", result.errors);

    let info = schema.get_view("PriceAreaInformation").unwrap();
    assert_eq!(info.implements, vec!["PriceAreaAFRR", "PriceAreaDayAhead"]);
    let ancestors: Vec<&str> = schema
        .ancestors("ShopBasedPartialBidConfiguration")
        .iter()
        .map(|view| view.name.as_str())
        .collect();
    assert_eq!(ancestors, vec!["PartialBidConfiguration"]);
}

#[test]
fn test_generated_modules_are_current() {
    let generator = ViewCodeGenerator::new().with_sdk_path("powerops_sdk");
    let schema = generator.parser().parse_file(schema_path()).unwrap();
    let out = TempDir::new().unwrap();
    generator.write_schema(&schema, out.path()).unwrap();

    let checked_in = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/src/generated"));
    assert_eq!(file_names(out.path()), file_names(checked_in));

    for view in ["ShopCase", "PriceAreaInformation"] {
        let name = format!("{}.rs", ViewCodeGenerator::module_name(view));
        let generated = std::fs::read_to_string(out.path().join(&name)).unwrap();
        let current = std::fs::read_to_string(checked_in.join(&name)).unwrap();
        for marker in [
            format!("pub struct {} {{", view),
            format!("pub struct {}Write {{", view),
            format!("pub struct {}Api {{", view),
            format!("impl DomainModel for {} {{", view),
        ] {
            assert!(generated.contains(&marker), "{} missing from generated {}", marker, name);
            assert!(current.contains(&marker), "{} missing from checked-in {}", marker, name);
        }
    }
}
