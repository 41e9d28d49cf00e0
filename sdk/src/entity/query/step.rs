//! Query steps and the factory that derives them from a model's declared connections

use crate::dm::filters::edge_property;
use crate::dm::{
    ChainTo, Direction, EdgeExpression, Filter, Instance, InstanceSort, NodeExpression,
    ResultSetExpression, Select, ViewPropertyId, ViewRef,
};
use crate::entity::traits::{ConnectionDef, ConnectionKind, DomainModel};
use crate::entity::types::RetrieveConnections;

/// Page size of connection steps; further pages are followed by cursor.
pub const DEFAULT_CONNECTION_LIMIT: usize = 10_000;

pub const ROOT_STEP: &str = "root";

pub fn edge_step_name(from: &str, property: &str) -> String {
    format!("{}_{}", from, property)
}

pub fn target_step_name(from: &str, property: &str) -> String {
    format!("{}_{}_target", from, property)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Root,
    /// Edges leaving the parent step
    Edge,
    /// Nodes at the far end of an edge step
    EdgeTarget,
    /// Nodes reached through a direct-relation property
    DirectRelation,
}

/// One named result set plus the results gathered for it.
#[derive(Debug, Clone)]
pub struct QueryStep {
    pub name: String,
    pub kind: StepKind,
    pub expression: ResultSetExpression,
    pub select: Select,
    /// Connection property on the parent step this step resolves
    pub property: Option<&'static str>,
    pub max_retrieve_limit: Option<usize>,
    pub cursor: Option<String>,
    pub results: Vec<Instance>,
}

impl QueryStep {
    fn new(name: String, kind: StepKind, expression: ResultSetExpression, select: Select) -> Self {
        Self {
            name,
            kind,
            expression,
            select,
            property: None,
            max_retrieve_limit: None,
            cursor: None,
            results: Vec::new(),
        }
    }

    pub fn from(&self) -> Option<&str> {
        self.expression.from()
    }
}

/// Derives the steps needed to read a model and, optionally, its relations.
#[derive(Debug, Clone)]
pub struct QueryStepFactory {
    root_name: String,
    view: ViewRef,
    connections: &'static [ConnectionDef],
    connection_limit: usize,
}

impl QueryStepFactory {
    pub fn new(view: ViewRef, connections: &'static [ConnectionDef]) -> Self {
        Self {
            root_name: ROOT_STEP.to_string(),
            view,
            connections,
            connection_limit: DEFAULT_CONNECTION_LIMIT,
        }
    }

    /// Page size of every connection step.
    pub fn with_connection_limit(mut self, limit: usize) -> Self {
        self.connection_limit = limit.max(1);
        self
    }

    pub fn for_model<T: DomainModel>() -> Self {
        Self::new(T::VIEW, T::CONNECTIONS)
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Nodes with data in the view, narrowed by `filter`.
    pub fn root(&self, filter: Option<Filter>, sort: Vec<InstanceSort>, limit: Option<usize>) -> QueryStep {
        let has_data = Filter::has_data(self.view.into());
        let filter = match filter {
            Some(filter) => has_data.and(filter),
            None => has_data,
        };
        let expression = ResultSetExpression::nodes(NodeExpression {
            filter: Some(filter),
            ..Default::default()
        })
        .with_sort(sort);

        let mut step = QueryStep::new(
            self.root_name.clone(),
            StepKind::Root,
            expression,
            Select::view(self.view.into()),
        );
        step.max_retrieve_limit = limit;
        step
    }

    /// Steps for every declared connection, in declaration order.
    pub fn connections(&self, mode: RetrieveConnections) -> Vec<QueryStep> {
        if mode == RetrieveConnections::Skip {
            return Vec::new();
        }

        let mut steps = Vec::new();
        for connection in self.connections {
            match connection.kind {
                ConnectionKind::Edge {
                    edge_type,
                    direction,
                } => {
                    let edge_step = self.edge_step(connection, edge_type.to_node_id(), direction);
                    let edge_name = edge_step.name.clone();
                    steps.push(edge_step);
                    if mode == RetrieveConnections::Full {
                        steps.push(self.target_step(connection, &edge_name));
                    }
                }
                // The identifier is already a property of the root node.
                ConnectionKind::DirectRelation if mode == RetrieveConnections::Identifier => {}
                ConnectionKind::DirectRelation => steps.push(self.direct_step(connection)),
            }
        }
        steps
    }

    fn edge_step(
        &self,
        connection: &ConnectionDef,
        edge_type: crate::dm::NodeId,
        direction: Direction,
    ) -> QueryStep {
        let type_filter = Filter::equals(
            edge_property("type"),
            serde_json::json!({"space": edge_type.space, "externalId": edge_type.external_id}),
        );
        let expression = ResultSetExpression::edges(EdgeExpression {
            from: Some(self.root_name.clone()),
            filter: Some(type_filter),
            max_distance: Some(1),
            direction: Some(direction),
            chain_to: Some(ChainTo::Destination),
            ..Default::default()
        });
        let mut step = QueryStep::new(
            edge_step_name(&self.root_name, connection.property),
            StepKind::Edge,
            expression,
            Select::default(),
        );
        step.property = Some(connection.property);
        step.max_retrieve_limit = Some(self.connection_limit);
        step
    }

    fn target_step(&self, connection: &ConnectionDef, edge_name: &str) -> QueryStep {
        let expression = ResultSetExpression::nodes(NodeExpression {
            from: Some(edge_name.to_string()),
            filter: Some(Filter::has_data(connection.target.into())),
            ..Default::default()
        });
        let mut step = QueryStep::new(
            target_step_name(&self.root_name, connection.property),
            StepKind::EdgeTarget,
            expression,
            Select::view(connection.target.into()),
        );
        step.property = Some(connection.property);
        step.max_retrieve_limit = Some(self.connection_limit);
        step
    }

    fn direct_step(&self, connection: &ConnectionDef) -> QueryStep {
        let expression = ResultSetExpression::nodes(NodeExpression {
            from: Some(self.root_name.clone()),
            through: Some(ViewPropertyId {
                source: self.view.into(),
                identifier: connection.property.to_string(),
            }),
            direction: Some(Direction::Outwards),
            ..Default::default()
        });
        let mut step = QueryStep::new(
            edge_step_name(&self.root_name, connection.property),
            StepKind::DirectRelation,
            expression,
            Select::view(connection.target.into()),
        );
        step.property = Some(connection.property);
        step.max_retrieve_limit = Some(self.connection_limit);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::{NodeRef, SetExpression};

    const CASE: ViewRef = ViewRef::new("core", "ShopCase", "1");
    const FILE: ViewRef = ViewRef::new("core", "ShopFile", "1");
    const SCENARIO: ViewRef = ViewRef::new("core", "ShopScenario", "1");
    const CONNECTIONS: &[ConnectionDef] = &[
        ConnectionDef::direct("scenario", SCENARIO),
        ConnectionDef::edge(
            "shopFiles",
            NodeRef::new("types", "ShopCase.shopFiles"),
            Direction::Outwards,
            FILE,
        ),
    ];

    fn names(steps: &[QueryStep]) -> Vec<&str> {
        steps.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_skip_has_no_connection_steps() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS);
        assert!(factory.connections(RetrieveConnections::Skip).is_empty());
    }

    #[test]
    fn test_identifier_steps() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS);
        let steps = factory.connections(RetrieveConnections::Identifier);
        assert_eq!(names(&steps), vec!["root_shopFiles"]);
        assert!(steps[0].select.is_empty());
        assert_eq!(steps[0].from(), Some("root"));
    }

    #[test]
    fn test_full_steps_in_declaration_order() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS);
        let steps = factory.connections(RetrieveConnections::Full);
        assert_eq!(
            names(&steps),
            vec!["root_scenario", "root_shopFiles", "root_shopFiles_target"]
        );
        assert_eq!(steps[0].kind, StepKind::DirectRelation);
        assert_eq!(steps[2].from(), Some("root_shopFiles"));
        assert_eq!(steps[2].select, Select::view(FILE.into()));
        assert!(steps.iter().all(|s| s.max_retrieve_limit == Some(DEFAULT_CONNECTION_LIMIT)));
    }

    #[test]
    fn test_connection_limit_override() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS).with_connection_limit(3);
        let steps = factory.connections(RetrieveConnections::Full);
        assert!(steps.iter().all(|s| s.max_retrieve_limit == Some(3)));
        assert_eq!(factory.root(None, Vec::new(), Some(5)).max_retrieve_limit, Some(5));
    }

    #[test]
    fn test_root_filter_includes_has_data() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS);
        let extra = Filter::prefix(crate::dm::filters::node_property("externalId"), "c");
        let root = factory.root(Some(extra.clone()), Vec::new(), Some(5));
        assert_eq!(root.max_retrieve_limit, Some(5));
        match &root.expression.expression {
            SetExpression::Nodes(nodes) => assert_eq!(
                nodes.filter,
                Some(Filter::And(vec![Filter::has_data(CASE.into()), extra]))
            ),
            other => panic!("unexpected expression {:?}", other),
        }
    }
}
