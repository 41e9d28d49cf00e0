//! HTTP implementation of the data-modeling backend

use super::aggregation::AggregatedGroup;
use super::backend::{
    AggregateRequest, ApplyRequest, DataModelingBackend, GraphQlResponse, ListRequest,
    ListResponse, RetrieveRequest, SearchRequest,
};
use super::credentials::TokenProvider;
use super::error::{DataModelingError, DmResult};
use super::ids::{DataModelId, NodeId};
use super::instances::{
    Instance, InstanceRef, InstanceType, InstanceWriteResult, InstancesApplyResult,
    InstancesDeleteResult,
};
use super::query::{Query, QueryResult};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

#[derive(Serialize)]
struct ItemsRequest<'a, T> {
    items: &'a [T],
}

/// Statuses worth retrying: throttling and server-side failures.
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Talks to `{base_url}/api/v1/projects/{project}/models/...` over HTTPS.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    project: String,
    client_name: String,
    max_retries: u32,
    tokens: TokenProvider,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> DmResult<Self> {
        config
            .validate()
            .map_err(|e| DataModelingError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("{}/{}", config.client_name, env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            tokens: TokenProvider::new(config.credentials.clone(), client.clone()),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
            client_name: config.client_name.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    fn instances_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/projects/{}/models/instances{}",
            self.base_url, self.project, suffix
        )
    }

    fn graphql_url(&self, data_model: &DataModelId) -> String {
        format!(
            "{}/api/v1/projects/{}/userapis/spaces/{}/datamodels/{}/versions/{}/graphql",
            self.base_url, self.project, data_model.space, data_model.external_id, data_model.version
        )
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> DmResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let token = self.tokens.bearer_token().await?;
        let request = self
            .client
            .post(url)
            .bearer_auth(token)
            .header("x-cdp-app", &self.client_name)
            .json(body);

        let response = self.execute_with_retry(request).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(DataModelingError::from_response(status.as_u16(), &text))
        }
    }

    /// Execute a request with retry logic
    async fn execute_with_retry(
        &self,
        request: reqwest::RequestBuilder,
    ) -> DmResult<reqwest::Response> {
        let mut attempt = 0;
        loop {
            let current = request.try_clone().ok_or_else(|| {
                DataModelingError::Config("request body cannot be retried".to_string())
            })?;

            match current.send().await {
                Ok(response) if is_retryable_status(response.status()) && attempt < self.max_retries => {
                    warn!(
                        "Request returned {}, retrying (attempt {}/{})",
                        response.status(),
                        attempt + 1,
                        self.max_retries
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < self.max_retries => {
                    warn!("Request failed: {}, retrying", e);
                }
                Err(e) => return Err(e.into()),
            }

            // Exponential backoff
            let delay = Duration::from_millis(500 * 2_u64.pow(attempt));
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl DataModelingBackend for HttpBackend {
    async fn apply(&self, request: ApplyRequest) -> DmResult<InstancesApplyResult> {
        debug!("Applying {} instances", request.items.len());
        let result: Items<InstanceWriteResult> =
            self.post(&self.instances_url(""), &request).await?;
        Ok(InstancesApplyResult {
            items: result.items,
        })
    }

    async fn retrieve(&self, request: RetrieveRequest) -> DmResult<Vec<Instance>> {
        debug!("Retrieving {} instances", request.items.len());
        let result: Items<Instance> = self.post(&self.instances_url("/byids"), &request).await?;
        Ok(result.items)
    }

    async fn list(&self, request: ListRequest) -> DmResult<ListResponse> {
        self.post(&self.instances_url("/list"), &request).await
    }

    async fn search(&self, request: SearchRequest) -> DmResult<Vec<Instance>> {
        let result: Items<Instance> = self.post(&self.instances_url("/search"), &request).await?;
        Ok(result.items)
    }

    async fn aggregate(&self, request: AggregateRequest) -> DmResult<Vec<AggregatedGroup>> {
        let result: Items<AggregatedGroup> =
            self.post(&self.instances_url("/aggregate"), &request).await?;
        Ok(result.items)
    }

    async fn query(&self, query: Query) -> DmResult<QueryResult> {
        debug!("Querying with {} result sets", query.with.len());
        self.post(&self.instances_url("/query"), &query).await
    }

    async fn delete(&self, items: Vec<InstanceRef>) -> DmResult<InstancesDeleteResult> {
        debug!("Deleting {} instances", items.len());
        let result: Items<InstanceRef> = self
            .post(&self.instances_url("/delete"), &ItemsRequest { items: &items })
            .await?;

        let mut deleted = InstancesDeleteResult::default();
        for item in result.items {
            let id = NodeId::new(item.space, item.external_id);
            match item.instance_type {
                InstanceType::Node => deleted.nodes.push(id),
                InstanceType::Edge => deleted.edges.push(id),
            }
        }
        Ok(deleted)
    }

    async fn graphql(
        &self,
        data_model: &DataModelId,
        query: &str,
        variables: Option<Value>,
    ) -> DmResult<GraphQlResponse> {
        let body = json!({
            "query": query,
            "variables": variables.unwrap_or_else(|| json!({})),
        });
        self.post(&self.graphql_url(data_model), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dm::credentials::Credentials;

    fn create_test_backend() -> HttpBackend {
        let config = ClientConfig::builder()
            .project("power-ops-test")
            .base_url("https://westeurope-1.cognitedata.com/")
            .credentials(Credentials::Token("token".into()))
            .max_retries(1u32)
            .build()
            .unwrap();
        HttpBackend::new(&config).unwrap()
    }

    #[test]
    fn test_urls() {
        let backend = create_test_backend();
        assert_eq!(
            backend.instances_url("/byids"),
            "https://westeurope-1.cognitedata.com/api/v1/projects/power-ops-test/models/instances/byids"
        );
        let model = DataModelId::new("power_ops_core", "power_asset", "1");
        assert_eq!(
            backend.graphql_url(&model),
            "https://westeurope-1.cognitedata.com/api/v1/projects/power-ops-test/userapis/spaces/power_ops_core/datamodels/power_asset/versions/1/graphql"
        );
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::CONFLICT));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::builder()
            .project("")
            .base_url("https://example.com")
            .credentials(Credentials::Token("t".into()))
            .build()
            .unwrap();
        assert!(matches!(
            HttpBackend::new(&config),
            Err(DataModelingError::Config(_))
        ));
    }
}
