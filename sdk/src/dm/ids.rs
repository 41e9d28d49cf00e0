//! Identifiers used by the data-modeling service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a node (or edge) by the pair of space and external id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeId {
    pub space: String,
    pub external_id: String,
}

impl NodeId {
    pub fn new(space: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.space, self.external_id)
    }
}

impl From<NodeRef> for NodeId {
    fn from(node: NodeRef) -> Self {
        Self::new(node.space, node.external_id)
    }
}

impl From<(&str, &str)> for NodeId {
    fn from((space, external_id): (&str, &str)) -> Self {
        Self::new(space, external_id)
    }
}

/// Reference to a versioned view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename = "view", rename_all = "camelCase")]
pub struct ViewId {
    pub space: String,
    pub external_id: String,
    pub version: String,
}

impl ViewId {
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            version: version.into(),
        }
    }

    /// Key under which the view's properties are stored in a node:
    /// `"<externalId>/<version>"`.
    pub fn property_key(&self) -> String {
        format!("{}/{}", self.external_id, self.version)
    }

    /// Property reference `[space, "<view>/<version>", property]` for filters.
    pub fn as_property_ref(&self, property: &str) -> Vec<String> {
        vec![
            self.space.clone(),
            self.property_key(),
            property.to_string(),
        ]
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.space, self.external_id, self.version)
    }
}

/// Compile-time view reference for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewRef {
    pub space: &'static str,
    pub external_id: &'static str,
    pub version: &'static str,
}

impl ViewRef {
    pub const fn new(space: &'static str, external_id: &'static str, version: &'static str) -> Self {
        Self {
            space,
            external_id,
            version,
        }
    }

    pub fn to_view_id(&self) -> ViewId {
        ViewId::new(self.space, self.external_id, self.version)
    }
}

impl From<ViewRef> for ViewId {
    fn from(view: ViewRef) -> Self {
        view.to_view_id()
    }
}

/// Compile-time node reference, used for edge types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub space: &'static str,
    pub external_id: &'static str,
}

impl NodeRef {
    pub const fn new(space: &'static str, external_id: &'static str) -> Self {
        Self { space, external_id }
    }

    pub fn to_node_id(&self) -> NodeId {
        NodeId::from(*self)
    }
}

/// Reference to a versioned data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelId {
    pub space: String,
    pub external_id: String,
    pub version: String,
}

impl DataModelId {
    pub fn new(
        space: impl Into<String>,
        external_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            external_id: external_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for DataModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.space, self.external_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_id_serializes_camel_case() {
        let id = NodeId::new("sp", "ds1");
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            json!({"space": "sp", "externalId": "ds1"})
        );
    }

    #[test]
    fn test_view_id_carries_type_tag() {
        let view = ViewId::new("power_ops_core", "ShopCase", "1");
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["type"], "view");
        assert_eq!(value["externalId"], "ShopCase");

        let back: ViewId = serde_json::from_value(value).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_property_ref() {
        let view = ViewRef::new("power_ops_core", "ShopFile", "1").to_view_id();
        assert_eq!(view.property_key(), "ShopFile/1");
        assert_eq!(
            view.as_property_ref("name"),
            vec!["power_ops_core", "ShopFile/1", "name"]
        );
    }
}
