//! Building view filters from named arguments

use crate::dm::filters::node_property;
use crate::dm::{Filter, NodeId, ViewId, ViewRef};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};

/// A value usable on the right-hand side of a filter.
pub trait ToFilterValue {
    fn to_filter_value(&self) -> Value;
}

impl ToFilterValue for String {
    fn to_filter_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToFilterValue for &str {
    fn to_filter_value(&self) -> Value {
        Value::String((*self).to_string())
    }
}

impl ToFilterValue for i64 {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

impl ToFilterValue for i32 {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

impl ToFilterValue for f64 {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

impl ToFilterValue for f32 {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

impl ToFilterValue for bool {
    fn to_filter_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToFilterValue for NodeId {
    fn to_filter_value(&self) -> Value {
        json!({"space": self.space, "externalId": self.external_id})
    }
}

impl ToFilterValue for DateTime<Utc> {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

impl ToFilterValue for NaiveDate {
    fn to_filter_value(&self) -> Value {
        json!(self)
    }
}

/// A single value or a list of values for an equality argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: ToFilterValue> OneOrMany<T> {
    fn into_filter(self, property: Vec<String>) -> Filter {
        match self {
            OneOrMany::One(value) => Filter::equals(property, value.to_filter_value()),
            OneOrMany::Many(values) => Filter::in_(
                property,
                values.iter().map(ToFilterValue::to_filter_value).collect(),
            ),
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OneOrMany<String> {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<NodeId> for OneOrMany<NodeId> {
    fn from(value: NodeId) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<NodeId>> for OneOrMany<NodeId> {
    fn from(values: Vec<NodeId>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<(&str, &str)> for OneOrMany<NodeId> {
    fn from(value: (&str, &str)) -> Self {
        OneOrMany::One(NodeId::from(value))
    }
}

/// Accumulates filter clauses for one view; clauses are ANDed.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    view: ViewId,
    filters: Vec<Filter>,
}

impl FilterBuilder {
    pub fn new(view: ViewRef) -> Self {
        Self {
            view: view.into(),
            filters: Vec::new(),
        }
    }

    fn property(&self, name: &str) -> Vec<String> {
        self.view.as_property_ref(name)
    }

    /// One value gives `equals`, several give `in`.
    pub fn equals_or_in<T: ToFilterValue>(&mut self, name: &str, value: Option<OneOrMany<T>>) -> &mut Self {
        if let Some(value) = value {
            let filter = value.into_filter(self.property(name));
            self.filters.push(filter);
        }
        self
    }

    pub fn prefix(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            let filter = Filter::prefix(self.property(name), value);
            self.filters.push(filter);
        }
        self
    }

    /// Inclusive range; either end may be open.
    pub fn range<T: ToFilterValue>(&mut self, name: &str, min: Option<T>, max: Option<T>) -> &mut Self {
        if min.is_some() || max.is_some() {
            let filter = Filter::Range {
                property: self.property(name),
                gt: None,
                gte: min.map(|v| v.to_filter_value()),
                lt: None,
                lte: max.map(|v| v.to_filter_value()),
            };
            self.filters.push(filter);
        }
        self
    }

    pub fn boolean(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            let filter = Filter::equals(self.property(name), value);
            self.filters.push(filter);
        }
        self
    }

    pub fn direct_relation(&mut self, name: &str, value: Option<OneOrMany<NodeId>>) -> &mut Self {
        self.equals_or_in(name, value)
    }

    pub fn external_id_prefix(&mut self, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.filters.push(Filter::prefix(node_property("externalId"), value));
        }
        self
    }

    pub fn space(&mut self, value: Option<OneOrMany<String>>) -> &mut Self {
        if let Some(value) = value {
            self.filters.push(value.into_filter(node_property("space")));
        }
        self
    }

    /// A caller-supplied filter ANDed with the generated clauses.
    pub fn extra(&mut self, filter: Option<Filter>) -> &mut Self {
        if let Some(filter) = filter {
            self.filters.push(filter);
        }
        self
    }

    /// `None` when no argument was given; a lone clause is returned bare.
    pub fn build(&mut self) -> Option<Filter> {
        Filter::and_all(std::mem::take(&mut self.filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: ViewRef = ViewRef::new("power_ops_core", "ShopScenario", "1");

    fn name_ref() -> Vec<String> {
        vec!["power_ops_core".into(), "ShopScenario/1".into(), "name".into()]
    }

    #[test]
    fn test_single_value_is_equals() {
        let filter = FilterBuilder::new(VIEW)
            .equals_or_in("name", Some(OneOrMany::from("abc")))
            .build();
        assert_eq!(filter, Some(Filter::equals(name_ref(), "abc")));
    }

    #[test]
    fn test_list_is_in() {
        let filter = FilterBuilder::new(VIEW)
            .equals_or_in("name", Some(OneOrMany::from(vec!["a", "b"])))
            .build();
        assert_eq!(filter, Some(Filter::in_(name_ref(), vec![json!("a"), json!("b")])));
    }

    #[test]
    fn test_prefix_and_extra_are_anded() {
        let extra = Filter::equals(node_property("space"), "sp");
        let filter = FilterBuilder::new(VIEW)
            .prefix("name", Some("a"))
            .extra(Some(extra.clone()))
            .build();
        assert_eq!(
            filter,
            Some(Filter::And(vec![Filter::prefix(name_ref(), "a"), extra]))
        );
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(FilterBuilder::new(VIEW).equals_or_in::<String>("name", None).build(), None);
    }

    #[test]
    fn test_range_and_relation() {
        let filter = FilterBuilder::new(VIEW)
            .range("order", Some(1i64), None)
            .direct_relation("scenario", Some(("sp", "s1").into()))
            .build()
            .unwrap();
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["and"][0]["range"]["gte"], 1);
        assert!(value["and"][0]["range"].get("lte").is_none());
        assert_eq!(
            value["and"][1]["equals"]["value"],
            json!({"space": "sp", "externalId": "s1"})
        );
    }
}
