//! Types managed by the legacy clients

use super::error::{LegacyError, LegacyResult};
use crate::dm::{Node, PropertyMap, ViewId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

const EXTERNAL_ID_KEY: &str = "externalId";

/// A flat record stored as one node in the view named `TYPE_NAME`.
///
/// Properties are the camelCase serde representation of the type minus its
/// external id.
pub trait LegacyModel: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    fn external_id(&self) -> &str;

    fn to_properties(&self) -> LegacyResult<PropertyMap> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter(|(k, v)| k != EXTERNAL_ID_KEY && !v.is_null())
                .collect()),
            other => Err(LegacyError::invalid(
                Self::TYPE_NAME,
                format!("expected an object, got {}", other),
            )),
        }
    }

    fn from_node(node: &Node, view: &ViewId) -> LegacyResult<Self> {
        let mut map = serde_json::Map::new();
        if let Some(props) = node.view_properties(view) {
            map.extend(props.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        map.insert(EXTERNAL_ID_KEY.to_string(), Value::String(node.external_id.clone()));
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// A SHOP run setup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub model_template: Option<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub shop_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shop_end: Option<DateTime<Utc>>,
}

/// One execution of a scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub external_id: String,
    /// External id of the scenario this case runs
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub case_file: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub external_id: String,
    /// SHOP attribute path, e.g. `/Reservoir/Lake/inflow`
    pub path: String,
    #[serde(default)]
    pub timeseries_external_id: Option<String>,
    /// External ids of the transformations applied in order
    #[serde(default)]
    pub transformations: Vec<String>,
    #[serde(default)]
    pub retrieve: Option<String>,
    #[serde(default)]
    pub aggregation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    pub external_id: String,
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
    #[serde(default)]
    pub order: i32,
}

macro_rules! legacy_model {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl LegacyModel for $ty {
                const TYPE_NAME: &'static str = $name;

                fn external_id(&self) -> &str {
                    &self.external_id
                }
            }
        )*
    };
}

legacy_model!(
    Case => "Case",
    Mapping => "Mapping",
    Scenario => "Scenario",
    Transformation => "Transformation",
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::InstanceProperties;
    use serde_json::json;

    #[test]
    fn test_properties_round_trip_through_node() {
        let mapping = Mapping {
            external_id: "m1".into(),
            path: "/Reservoir/Lake/inflow".into(),
            timeseries_external_id: Some("ts_inflow".into()),
            transformations: vec!["t1".into(), "t2".into()],
            ..Default::default()
        };
        let props = mapping.to_properties().unwrap();
        assert!(!props.contains_key("externalId"));
        assert!(!props.contains_key("retrieve"));
        assert_eq!(props["timeseriesExternalId"], json!("ts_inflow"));

        let view = ViewId::new("power_ops", "Mapping", "1");
        let mut properties = InstanceProperties::new();
        properties
            .entry(view.space.clone())
            .or_default()
            .insert(view.property_key(), props);
        let node = Node {
            space: "power_ops".into(),
            external_id: "m1".into(),
            version: 1,
            last_updated_time: 0,
            created_time: 0,
            deleted_time: None,
            properties,
        };
        assert_eq!(Mapping::from_node(&node, &view).unwrap(), mapping);
    }

    #[test]
    fn test_missing_required_property() {
        let view = ViewId::new("power_ops", "Scenario", "1");
        let node = Node {
            space: "power_ops".into(),
            external_id: "s1".into(),
            version: 1,
            last_updated_time: 0,
            created_time: 0,
            deleted_time: None,
            properties: InstanceProperties::new(),
        };
        assert!(matches!(
            Scenario::from_node(&node, &view),
            Err(LegacyError::Serialization(_))
        ));
    }
}
