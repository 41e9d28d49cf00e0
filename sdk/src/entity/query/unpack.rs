//! Rebuilds typed object graphs from query results

use super::step::{QueryStep, edge_step_name, target_step_name};
use crate::dm::{Direction, Instance, Node, NodeId};
use crate::entity::traits::{Connected, ConnectionKind, DomainModel};
use crate::entity::types::EntityResult;
use std::collections::HashMap;

/// Matches child result sets to their parent nodes by connection property.
pub struct QueryUnpacker<'a> {
    root_name: &'a str,
    steps: HashMap<&'a str, &'a QueryStep>,
}

impl<'a> QueryUnpacker<'a> {
    pub fn new(root_name: &'a str, steps: &'a [QueryStep]) -> Self {
        Self {
            root_name,
            steps: steps.iter().map(|s| (s.name.as_str(), s)).collect(),
        }
    }

    fn nodes_of(&self, name: &str) -> HashMap<NodeId, &'a Node> {
        self.steps
            .get(name)
            .map(|step| {
                step.results
                    .iter()
                    .filter_map(|instance| match instance {
                        Instance::Node(node) => Some((node.id(), node)),
                        Instance::Edge(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The root nodes as typed models with their connections attached.
    pub fn unpack<T: DomainModel>(&self) -> EntityResult<Vec<T>> {
        let Some(root) = self.steps.get(self.root_name) else {
            return Ok(Vec::new());
        };
        let roots: Vec<&Node> = root
            .results
            .iter()
            .filter_map(|instance| match instance {
                Instance::Node(node) => Some(node),
                Instance::Edge(_) => None,
            })
            .collect();

        let mut models = roots
            .iter()
            .map(|node| T::from_node(node))
            .collect::<EntityResult<Vec<T>>>()?;

        let view = T::view_id();
        for connection in T::CONNECTIONS {
            match connection.kind {
                ConnectionKind::Edge { direction, .. } => {
                    let edge_name = edge_step_name(self.root_name, connection.property);
                    let Some(edge_step) = self.steps.get(edge_name.as_str()) else {
                        continue;
                    };
                    let targets =
                        self.nodes_of(&target_step_name(self.root_name, connection.property));

                    let mut by_owner: HashMap<NodeId, Vec<Connected>> = HashMap::new();
                    for instance in &edge_step.results {
                        let Instance::Edge(edge) = instance else {
                            continue;
                        };
                        let (owner, other) = match direction {
                            Direction::Outwards => (&edge.start_node, &edge.end_node),
                            Direction::Inwards => (&edge.end_node, &edge.start_node),
                        };
                        let related = match targets.get(other) {
                            Some(node) => Connected::Node((*node).clone()),
                            None => Connected::Id(other.clone()),
                        };
                        by_owner.entry(owner.clone()).or_default().push(related);
                    }

                    for model in &mut models {
                        let related = by_owner.remove(&model.node_id()).unwrap_or_default();
                        model.connect(connection.property, related)?;
                    }
                }
                ConnectionKind::DirectRelation => {
                    let name = edge_step_name(self.root_name, connection.property);
                    if !self.steps.contains_key(name.as_str()) {
                        continue;
                    }
                    let targets = self.nodes_of(&name);
                    for (model, node) in models.iter_mut().zip(&roots) {
                        let target = node
                            .property(&view, connection.property)
                            .and_then(|value| serde_json::from_value::<NodeId>(value.clone()).ok())
                            .and_then(|id| targets.get(&id));
                        if let Some(target) = target {
                            model.connect(connection.property, vec![Connected::Node((*target).clone())])?;
                        }
                    }
                }
            }
        }
        Ok(models)
    }
}
