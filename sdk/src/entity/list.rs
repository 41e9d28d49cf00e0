//! Ordered collections of data classes

use super::traits::{DomainModel, Identifiable, InstancesWrite};
use super::types::{EntityResult, ResourcesWrite, VisitedSet, WriteOptions};
use crate::dm::NodeId;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeList<T>(Vec<T>);

impl<T> NodeList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Identifiable> NodeList<T> {
    pub fn as_node_ids(&self) -> Vec<NodeId> {
        self.0.iter().map(Identifiable::node_id).collect()
    }

    /// First item with the given external id.
    pub fn get_by_external_id(&self, external_id: &str) -> Option<&T> {
        self.0
            .iter()
            .find(|item| item.node_id().external_id == external_id)
    }
}

impl<T: DomainModel> NodeList<T> {
    pub fn as_write(&self) -> NodeList<T::Write> {
        self.0.iter().map(DomainModel::as_write).collect()
    }
}

impl<T: InstancesWrite> InstancesWrite for NodeList<T> {
    fn to_instances_write(
        &self,
        cache: &mut VisitedSet,
        options: &WriteOptions,
    ) -> EntityResult<ResourcesWrite> {
        let mut resources = ResourcesWrite::default();
        for item in &self.0 {
            resources.extend(item.to_instances_write(cache, options)?);
        }
        Ok(resources)
    }
}

impl<T> Deref for NodeList<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for NodeList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_ids() {
        let list: NodeList<NodeId> = vec![NodeId::new("sp", "a"), NodeId::new("sp", "b")].into();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get_by_external_id("b"), Some(&NodeId::new("sp", "b")));
        assert!(list.get_by_external_id("c").is_none());
        assert_eq!(list.as_node_ids()[0].external_id, "a");
    }
}
