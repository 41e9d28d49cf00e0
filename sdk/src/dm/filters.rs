//! Filter and sort expressions understood by the instances endpoints.

use super::ids::ViewId;
use super::instances::{Edge, Instance, Node};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::cmp::Ordering;

/// A property reference, e.g. `["node", "externalId"]` or
/// `["power_ops_core", "ShopFile/1", "name"]`.
pub type PropertyRef = Vec<String>;

pub fn node_property(name: &str) -> PropertyRef {
    vec!["node".to_string(), name.to_string()]
}

pub fn edge_property(name: &str) -> PropertyRef {
    vec!["edge".to_string(), name.to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    Equals {
        property: PropertyRef,
        value: Value,
    },
    In {
        property: PropertyRef,
        values: Vec<Value>,
    },
    Prefix {
        property: PropertyRef,
        value: Value,
    },
    Range {
        property: PropertyRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gt: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gte: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lt: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lte: Option<Value>,
    },
    Exists {
        property: PropertyRef,
    },
    HasData(Vec<ViewId>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn equals(property: PropertyRef, value: impl Into<Value>) -> Self {
        Filter::Equals {
            property,
            value: value.into(),
        }
    }

    pub fn in_(property: PropertyRef, values: Vec<Value>) -> Self {
        Filter::In { property, values }
    }

    pub fn prefix(property: PropertyRef, value: impl Into<Value>) -> Self {
        Filter::Prefix {
            property,
            value: value.into(),
        }
    }

    pub fn has_data(view: ViewId) -> Self {
        Filter::HasData(vec![view])
    }

    /// Combines filters with `and`. A single filter is returned as is.
    pub fn and_all(mut filters: Vec<Filter>) -> Option<Filter> {
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::And(filters)),
        }
    }

    /// `self AND other`, flattening an existing `and` on the left.
    pub fn and(self, other: Filter) -> Filter {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            filter => Filter::And(vec![filter, other]),
        }
    }

    /// Evaluates the filter against an instance.
    pub fn matches<S: PropertySource + ?Sized>(&self, source: &S) -> bool {
        match self {
            Filter::Equals { property, value } => source.resolve(property).as_ref() == Some(value),
            Filter::In { property, values } => source
                .resolve(property)
                .is_some_and(|actual| values.contains(&actual)),
            Filter::Prefix { property, value } => match (source.resolve(property), value) {
                (Some(Value::String(actual)), Value::String(prefix)) => actual.starts_with(prefix),
                _ => false,
            },
            Filter::Range {
                property,
                gt,
                gte,
                lt,
                lte,
            } => {
                let Some(actual) = source.resolve(property) else {
                    return false;
                };
                let check = |bound: &Option<Value>, accept: fn(Ordering) -> bool| {
                    bound
                        .as_ref()
                        .is_none_or(|b| compare_values(&actual, b).is_some_and(accept))
                };
                check(gt, Ordering::is_gt)
                    && check(gte, Ordering::is_ge)
                    && check(lt, Ordering::is_lt)
                    && check(lte, Ordering::is_le)
            }
            Filter::Exists { property } => {
                source.resolve(property).is_some_and(|value| !value.is_null())
            }
            Filter::HasData(views) => views.iter().any(|view| source.has_data(view)),
            Filter::And(filters) => filters.iter().all(|f| f.matches(source)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(source)),
            Filter::Not(filter) => !filter.matches(source),
        }
    }
}

/// Orders numbers numerically and strings lexically; other pairs are unordered.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Anything a filter can be evaluated against.
pub trait PropertySource {
    fn resolve(&self, property: &[String]) -> Option<Value>;
    fn has_data(&self, view: &ViewId) -> bool;
}

fn view_lookup(
    properties: &super::instances::InstanceProperties,
    property: &[String],
) -> Option<Value> {
    match property {
        [space, view, name] => properties.get(space)?.get(view)?.get(name).cloned(),
        _ => None,
    }
}

impl PropertySource for Node {
    fn resolve(&self, property: &[String]) -> Option<Value> {
        match property {
            [scope, name] if scope == "node" => match name.as_str() {
                "externalId" => Some(Value::String(self.external_id.clone())),
                "space" => Some(Value::String(self.space.clone())),
                "version" => Some(json!(self.version)),
                "lastUpdatedTime" => Some(json!(self.last_updated_time)),
                "createdTime" => Some(json!(self.created_time)),
                _ => None,
            },
            _ => view_lookup(&self.properties, property),
        }
    }

    fn has_data(&self, view: &ViewId) -> bool {
        self.view_properties(view).is_some()
    }
}

impl PropertySource for Edge {
    fn resolve(&self, property: &[String]) -> Option<Value> {
        match property {
            [scope, name] if scope == "edge" => match name.as_str() {
                "externalId" => Some(Value::String(self.external_id.clone())),
                "space" => Some(Value::String(self.space.clone())),
                "type" => serde_json::to_value(&self.edge_type).ok(),
                "startNode" => serde_json::to_value(&self.start_node).ok(),
                "endNode" => serde_json::to_value(&self.end_node).ok(),
                _ => None,
            },
            _ => view_lookup(&self.properties, property),
        }
    }

    fn has_data(&self, view: &ViewId) -> bool {
        self.properties
            .get(&view.space)
            .is_some_and(|views| views.contains_key(&view.property_key()))
    }
}

impl PropertySource for Instance {
    fn resolve(&self, property: &[String]) -> Option<Value> {
        match self {
            Instance::Node(node) => node.resolve(property),
            Instance::Edge(edge) => edge.resolve(property),
        }
    }

    fn has_data(&self, view: &ViewId) -> bool {
        match self {
            Instance::Node(node) => node.has_data(view),
            Instance::Edge(edge) => edge.has_data(view),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSort {
    pub property: PropertyRef,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub nulls_first: bool,
}

impl InstanceSort {
    pub fn new(property: PropertyRef, direction: SortDirection) -> Self {
        Self {
            property,
            direction,
            nulls_first: false,
        }
    }

    /// Orders two instances by this sort key.
    pub fn compare<S: PropertySource>(&self, left: &S, right: &S) -> Ordering {
        let ordering = match (left.resolve(&self.property), right.resolve(&self.property)) {
            (Some(a), Some(b)) => compare_values(&a, &b).unwrap_or(Ordering::Equal),
            (None, None) => return Ordering::Equal,
            (None, Some(_)) if self.nulls_first => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) if self.nulls_first => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::instances::InstanceProperties;

    fn node(external_id: &str, name: &str, order: i64) -> Node {
        let mut properties = InstanceProperties::new();
        properties.entry("core".into()).or_default().insert(
            "ShopFile/1".into(),
            [("name".to_string(), json!(name)), ("order".to_string(), json!(order))]
                .into_iter()
                .collect(),
        );
        Node {
            space: "sp".into(),
            external_id: external_id.into(),
            version: 1,
            last_updated_time: 0,
            created_time: 0,
            deleted_time: None,
            properties,
        }
    }

    fn name_ref() -> PropertyRef {
        ViewId::new("core", "ShopFile", "1").as_property_ref("name")
    }

    #[test]
    fn test_filter_wire_format() {
        let filter = Filter::equals(name_ref(), "abc").and(Filter::prefix(node_property("externalId"), "f"));
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            value,
            json!({"and": [
                {"equals": {"property": ["core", "ShopFile/1", "name"], "value": "abc"}},
                {"prefix": {"property": ["node", "externalId"], "value": "f"}}
            ]})
        );
    }

    #[test]
    fn test_has_data_wire_format() {
        let filter = Filter::has_data(ViewId::new("core", "ShopFile", "1"));
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["hasData"][0]["type"], "view");
    }

    #[test]
    fn test_matches() {
        let n = node("f1", "water", 3);
        assert!(Filter::equals(name_ref(), "water").matches(&n));
        assert!(Filter::in_(name_ref(), vec![json!("a"), json!("water")]).matches(&n));
        assert!(Filter::prefix(name_ref(), "wat").matches(&n));
        assert!(!Filter::prefix(name_ref(), "x").matches(&n));

        let order = ViewId::new("core", "ShopFile", "1").as_property_ref("order");
        let range = Filter::Range {
            property: order,
            gt: None,
            gte: Some(json!(3)),
            lt: Some(json!(4)),
            lte: None,
        };
        assert!(range.matches(&n));
        assert!(Filter::Not(Box::new(range)).matches(&node("f2", "x", 7)));
    }

    #[test]
    fn test_and_all() {
        assert!(Filter::and_all(vec![]).is_none());
        let single = Filter::and_all(vec![Filter::equals(name_ref(), "a")]).unwrap();
        assert!(matches!(single, Filter::Equals { .. }));
        let both = Filter::and_all(vec![
            Filter::equals(name_ref(), "a"),
            Filter::equals(name_ref(), "b"),
        ])
        .unwrap();
        assert!(matches!(both, Filter::And(ref f) if f.len() == 2));
    }

    #[test]
    fn test_sort() {
        let sort = InstanceSort::new(name_ref(), SortDirection::Descending);
        let a = node("a", "alpha", 1);
        let b = node("b", "beta", 2);
        assert_eq!(sort.compare(&a, &b), Ordering::Greater);
    }
}
