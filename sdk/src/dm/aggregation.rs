//! Aggregation requests and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Aggregate function applied to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregation {
    pub fn on(self, property: impl Into<String>) -> AggregationSpec {
        let property = property.into();
        match self {
            Aggregation::Count => AggregationSpec::Count { property },
            Aggregation::Sum => AggregationSpec::Sum { property },
            Aggregation::Avg => AggregationSpec::Avg { property },
            Aggregation::Min => AggregationSpec::Min { property },
            Aggregation::Max => AggregationSpec::Max { property },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationSpec {
    Count { property: String },
    Sum { property: String },
    Avg { property: String },
    Min { property: String },
    Max { property: String },
    Histogram { property: String, interval: f64 },
}

impl AggregationSpec {
    pub fn property(&self) -> &str {
        match self {
            AggregationSpec::Count { property }
            | AggregationSpec::Sum { property }
            | AggregationSpec::Avg { property }
            | AggregationSpec::Min { property }
            | AggregationSpec::Max { property }
            | AggregationSpec::Histogram { property, .. } => property,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub start: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "aggregate", rename_all = "camelCase")]
pub enum AggregatedValue {
    Count {
        property: String,
        #[serde(default)]
        value: Option<i64>,
    },
    Sum {
        property: String,
        #[serde(default)]
        value: Option<f64>,
    },
    Avg {
        property: String,
        #[serde(default)]
        value: Option<f64>,
    },
    Min {
        property: String,
        #[serde(default)]
        value: Option<f64>,
    },
    Max {
        property: String,
        #[serde(default)]
        value: Option<f64>,
    },
    Histogram {
        property: String,
        interval: f64,
        #[serde(default)]
        buckets: Vec<HistogramBucket>,
    },
}

impl AggregatedValue {
    /// Numeric value of a scalar aggregate. Histograms have none.
    pub fn value(&self) -> Option<f64> {
        match self {
            AggregatedValue::Count { value, .. } => value.map(|v| v as f64),
            AggregatedValue::Sum { value, .. }
            | AggregatedValue::Avg { value, .. }
            | AggregatedValue::Min { value, .. }
            | AggregatedValue::Max { value, .. } => *value,
            AggregatedValue::Histogram { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedGroup {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub group: BTreeMap<String, Value>,
    pub aggregates: Vec<AggregatedValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_wire_format() {
        let spec = Aggregation::Count.on("externalId");
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"count": {"property": "externalId"}})
        );
    }

    #[test]
    fn test_parse_aggregates() {
        let group: AggregatedGroup = serde_json::from_value(json!({
            "aggregates": [
                {"aggregate": "count", "property": "externalId", "value": 4},
                {"aggregate": "histogram", "property": "order", "interval": 10.0,
                 "buckets": [{"start": 0.0, "count": 3}]}
            ]
        }))
        .unwrap();
        assert_eq!(group.aggregates[0].value(), Some(4.0));
        match &group.aggregates[1] {
            AggregatedValue::Histogram { buckets, .. } => assert_eq!(buckets[0].count, 3),
            other => panic!("unexpected aggregate {other:?}"),
        }
    }
}
