//! Composes query steps into a single request

use super::step::QueryStep;
use crate::dm::{DataModelingBackend, DmResult, Query};
use std::collections::HashSet;
use tracing::debug;

/// Ordered set of query steps executed as one request.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    steps: Vec<QueryStep>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: QueryStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = QueryStep>) -> &mut Self {
        self.steps.extend(steps);
        self
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn get(&self, name: &str) -> Option<&QueryStep> {
        self.steps.iter().find(|step| step.name == name)
    }

    pub fn build(&self) -> Query {
        let mut query = Query::default();
        for step in &self.steps {
            let mut expression = step.expression.clone();
            expression.limit = step.max_retrieve_limit;
            query.with.insert(step.name.clone(), expression);
            query.select.insert(step.name.clone(), step.select.clone());
            if let Some(cursor) = &step.cursor {
                query.cursors.insert(step.name.clone(), cursor.clone());
            }
        }
        query
    }

    /// Runs the query for the current root page. Connection steps that come
    /// back with a cursor are followed on the same root page until exhausted,
    /// and their further results are appended.
    pub async fn execute(&mut self, backend: &dyn DataModelingBackend) -> DmResult<()> {
        let page_cursor = self.root_cursor().map(str::to_string);
        self.run(backend, None).await?;
        let next_root = self.root_cursor().map(str::to_string);

        while self.steps.iter().skip(1).any(|step| step.cursor.is_some()) {
            let continuing = self.continuing_steps();
            if let Some(root) = self.steps.first_mut() {
                root.cursor = page_cursor.clone();
            }
            debug!("Following connection cursors for {:?}", continuing);
            self.run(backend, Some(&continuing)).await?;
        }

        if let Some(root) = self.steps.first_mut() {
            root.cursor = next_root;
        }
        Ok(())
    }

    /// Sends the query. With `continuing` set, only those steps take the new
    /// results (appended) and cursors; every other step keeps its state.
    async fn run(
        &mut self,
        backend: &dyn DataModelingBackend,
        continuing: Option<&HashSet<String>>,
    ) -> DmResult<()> {
        let query = self.build();
        debug!(
            "Executing query with steps: {:?}",
            self.steps.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
        let mut result = backend.query(query).await?;

        for step in &mut self.steps {
            let items = result.items.remove(&step.name).unwrap_or_default();
            let cursor = result.next_cursor.remove(&step.name);
            match continuing {
                None => {
                    step.results = items;
                    step.cursor = cursor;
                }
                Some(names) if names.contains(&step.name) => {
                    step.results.extend(items);
                    step.cursor = cursor;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Connection steps with more results pending, plus every step fed by
    /// one of them. A fed step restarts from its first page.
    fn continuing_steps(&mut self) -> HashSet<String> {
        let mut continuing: HashSet<String> = HashSet::new();
        for step in self.steps.iter_mut().skip(1) {
            let parent_continues = step.from().is_some_and(|from| continuing.contains(from));
            if parent_continues {
                step.cursor = None;
            }
            if parent_continues || step.cursor.is_some() {
                continuing.insert(step.name.clone());
            }
        }
        continuing
    }

    /// Cursor of the first step, if more pages remain.
    pub fn root_cursor(&self) -> Option<&str> {
        self.steps.first().and_then(|step| step.cursor.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::{Direction, NodeRef, ViewRef};
    use crate::entity::query::step::QueryStepFactory;
    use crate::entity::traits::ConnectionDef;
    use crate::entity::types::RetrieveConnections;

    const CASE: ViewRef = ViewRef::new("core", "ShopCase", "1");
    const CONNECTIONS: &[ConnectionDef] = &[ConnectionDef::edge(
        "shopFiles",
        NodeRef::new("types", "ShopCase.shopFiles"),
        Direction::Outwards,
        ViewRef::new("core", "ShopFile", "1"),
    )];

    #[test]
    fn test_build_query() {
        let factory = QueryStepFactory::new(CASE, CONNECTIONS);
        let mut builder = QueryBuilder::new();
        let mut root = factory.root(None, Vec::new(), Some(25));
        root.cursor = Some("abc".into());
        builder
            .push(root)
            .extend(factory.connections(RetrieveConnections::Full));

        let query = builder.build();
        assert_eq!(query.with.len(), 3);
        assert_eq!(query.with["root"].limit, Some(25));
        assert_eq!(query.with["root_shopFiles"].limit, Some(10_000));
        assert_eq!(query.cursors.get("root").map(String::as_str), Some("abc"));
        assert_eq!(builder.root_cursor(), Some("abc"));
    }
}
