//! Graph query expressions for the `instances/query` endpoint.

use super::filters::{Filter, InstanceSort};
use super::ids::ViewId;
use super::instances::Instance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Outwards,
    Inwards,
}

/// Which end of an edge the next result set continues from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainTo {
    Source,
    Destination,
}

/// A direct-relation property to traverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPropertyId {
    pub source: ViewId,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<ViewPropertyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_to: Option<ChainTo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_to: Option<ChainTo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetExpression {
    Nodes(NodeExpression),
    Edges(EdgeExpression),
}

/// One named result set of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetExpression {
    #[serde(flatten)]
    pub expression: SetExpression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<InstanceSort>,
}

impl ResultSetExpression {
    pub fn nodes(expression: NodeExpression) -> Self {
        Self {
            expression: SetExpression::Nodes(expression),
            limit: None,
            sort: Vec::new(),
        }
    }

    pub fn edges(expression: EdgeExpression) -> Self {
        Self {
            expression: SetExpression::Edges(expression),
            limit: None,
            sort: Vec::new(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: Vec<InstanceSort>) -> Self {
        self.sort = sort;
        self
    }

    /// Name of the result set this one continues from.
    pub fn from(&self) -> Option<&str> {
        match &self.expression {
            SetExpression::Nodes(nodes) => nodes.from.as_deref(),
            SetExpression::Edges(edges) => edges.from.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSelector {
    pub source: ViewId,
    pub properties: Vec<String>,
}

impl SourceSelector {
    /// Selects every property of the view.
    pub fn all(source: ViewId) -> Self {
        Self {
            source,
            properties: vec!["*".to_string()],
        }
    }
}

/// Properties returned for a result set. An empty select returns identifiers only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Select {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceSelector>,
}

impl Select {
    pub fn view(view: ViewId) -> Self {
        Self {
            sources: vec![SourceSelector::all(view)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub with: BTreeMap<String, ResultSetExpression>,
    pub select: BTreeMap<String, Select>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cursors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub items: BTreeMap<String, Vec<Instance>>,
    #[serde(default)]
    pub next_cursor: BTreeMap<String, String>,
}

impl QueryResult {
    pub fn result_set(&self, name: &str) -> &[Instance] {
        self.items.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_wire_format() {
        let view = ViewId::new("core", "ShopCase", "1");
        let mut query = Query::default();
        query.with.insert(
            "root".into(),
            ResultSetExpression::nodes(NodeExpression {
                filter: Some(Filter::has_data(view.clone())),
                ..Default::default()
            })
            .with_limit(25),
        );
        query.with.insert(
            "root_shopFiles".into(),
            ResultSetExpression::edges(EdgeExpression {
                from: Some("root".into()),
                direction: Some(Direction::Outwards),
                max_distance: Some(1),
                chain_to: Some(ChainTo::Destination),
                ..Default::default()
            }),
        );
        query.select.insert("root".into(), Select::view(view));
        query.select.insert("root_shopFiles".into(), Select::default());

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["with"]["root"]["limit"], 25);
        assert!(value["with"]["root"]["nodes"]["filter"]["hasData"].is_array());
        assert_eq!(value["with"]["root_shopFiles"]["edges"]["chainTo"], "destination");
        assert_eq!(value["select"]["root_shopFiles"], json!({}));
        assert_eq!(value["select"]["root"]["sources"][0]["properties"], json!(["*"]));

        let back: Query = serde_json::from_value(value).unwrap();
        assert_eq!(back.with["root_shopFiles"].from(), Some("root"));
    }
}
