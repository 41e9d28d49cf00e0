//! `PowerOpsModelsV1Client`: the generated view APIs grouped by data model

use crate::generated::*;
use powerops_sdk::config::ConfigError;
use powerops_sdk::dm::{DataModelId, DataModelingBackend, DataModelingError, InstancesDeleteResult};
use powerops_sdk::entity::{
    DomainClient, EntityResult, InstancesWrite, ResourcesWriteResult, UpsertOptions,
};
use powerops_sdk::{ClientConfig, HttpBackend};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Space holding the PowerOps data models and views
pub const MODEL_SPACE: &str = "power_ops_core";
pub const MODEL_VERSION: &str = "1";
/// Space new instances are written to unless told otherwise
pub const DEFAULT_INSTANCE_SPACE: &str = "power_ops_instances";

#[derive(Error, Debug)]
pub enum ClientInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] DataModelingError),
}

macro_rules! model_group {
    (
        $(#[$meta:meta])*
        $group:ident, $model:literal { $($field:ident: $api:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $group {
            $(pub $field: $api,)*
            client: DomainClient,
        }

        impl $group {
            fn new(client: &DomainClient) -> Self {
                Self {
                    $($field: $api::new(client),)*
                    client: client.clone(),
                }
            }

            pub fn data_model_id(&self) -> DataModelId {
                DataModelId::new(MODEL_SPACE, $model, MODEL_VERSION)
            }

            /// Run a GraphQL query against this data model and return its `data` member.
            pub async fn graphql_query(&self, query: &str, variables: Option<Value>) -> EntityResult<Value> {
                self.client
                    .graphql_query(&self.data_model_id(), query, variables)
                    .await
            }
        }
    };
}

model_group!(
    /// Views of the ShopBasedDayAheadBidProcess data model
    ShopBasedDayAheadBidProcessApis, "ShopBasedDayAheadBidProcess" {
        date_specification: DateSpecificationApi,
        shop_scenario: ShopScenarioApi,
        shop_file: ShopFileApi,
        shop_case: ShopCaseApi,
        shop_based_partial_bid_configuration: ShopBasedPartialBidConfigurationApi,
    }
);

model_group!(
    /// Views of the PowerAsset data model
    PowerAssetApis, "PowerAsset" {
        power_asset: PowerAssetApi,
        generator: GeneratorApi,
        price_area_afrr: PriceAreaAFRRApi,
        price_area_day_ahead: PriceAreaDayAheadApi,
        price_area_information: PriceAreaInformationApi,
    }
);

model_group!(
    /// Views of the DayAheadBid data model
    DayAheadBidApis, "DayAheadBid" {
        partial_bid_configuration: PartialBidConfigurationApi,
        price_production: PriceProductionApi,
    }
);

/// Client for the PowerOps v1 data models.
///
/// ```ignore
/// let client = PowerOpsModelsV1Client::from_toml("config.toml", None)?;
/// let cases = client
///     .shop_based_day_ahead_bid_process
///     .shop_case
///     .list(ShopCaseFilter::default(), Some(10), RetrieveConnections::Identifier)
///     .await?;
/// ```
#[derive(Clone)]
pub struct PowerOpsModelsV1Client {
    pub shop_based_day_ahead_bid_process: ShopBasedDayAheadBidProcessApis,
    pub power_asset: PowerAssetApis,
    pub day_ahead_bid: DayAheadBidApis,
    client: DomainClient,
}

impl PowerOpsModelsV1Client {
    /// Connect over HTTP with the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientInitError> {
        let backend = HttpBackend::new(config)?;
        debug!("PowerOps client for project {}", backend.project());
        Ok(Self::with_backend(Arc::new(backend)))
    }

    pub fn with_backend(backend: Arc<dyn DataModelingBackend>) -> Self {
        Self::with_instance_space(backend, DEFAULT_INSTANCE_SPACE)
    }

    pub fn with_instance_space(
        backend: Arc<dyn DataModelingBackend>,
        instance_space: impl Into<String>,
    ) -> Self {
        let client = DomainClient::new(backend, instance_space);
        Self {
            shop_based_day_ahead_bid_process: ShopBasedDayAheadBidProcessApis::new(&client),
            power_asset: PowerAssetApis::new(&client),
            day_ahead_bid: DayAheadBidApis::new(&client),
            client,
        }
    }

    pub fn azure_project(
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
        cdf_cluster: &str,
        project: &str,
    ) -> Result<Self, ClientInitError> {
        let config =
            ClientConfig::azure_project(tenant_id, client_id, client_secret, cdf_cluster, project)?;
        Self::new(&config)
    }

    /// Load the connection from a TOML file; `section` defaults to `cognite`.
    pub fn from_toml<P: AsRef<Path>>(path: P, section: Option<&str>) -> Result<Self, ClientInitError> {
        let config = ClientConfig::from_toml(path, section)?;
        Self::new(&config)
    }

    pub fn instance_space(&self) -> &str {
        self.client.default_space()
    }

    pub fn domain_client(&self) -> &DomainClient {
        &self.client
    }

    /// Create or update the items together with every nested related item.
    pub async fn upsert(
        &self,
        items: &[&dyn InstancesWrite],
        options: UpsertOptions,
    ) -> EntityResult<ResourcesWriteResult> {
        self.client.upsert(items, options).await
    }

    /// Delete nodes by external id; `space` defaults to the instance space.
    pub async fn delete(
        &self,
        external_ids: &[&str],
        space: Option<&str>,
    ) -> EntityResult<InstancesDeleteResult> {
        self.client.delete(external_ids, space).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerops_sdk::testing::MemoryBackend;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_groups_share_the_instance_space() {
        let client = PowerOpsModelsV1Client::with_instance_space(Arc::new(MemoryBackend::new()), "sandbox");
        assert_eq!(client.instance_space(), "sandbox");
        assert_eq!(
            client.shop_based_day_ahead_bid_process.shop_case.default_space(),
            "sandbox"
        );
        assert_eq!(
            client.power_asset.data_model_id(),
            DataModelId::new("power_ops_core", "PowerAsset", "1")
        );
    }

    #[test]
    fn test_from_toml_reports_missing_section() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[other]\nproject = \"p\"").unwrap();
        let err = PowerOpsModelsV1Client::from_toml(file.path(), None)
            .err()
            .unwrap();
        assert!(matches!(err, ClientInitError::Config(ConfigError::MissingSection(_))));
    }

    #[test]
    fn test_azure_project_rejects_empty_project() {
        let result = PowerOpsModelsV1Client::azure_project("tenant", "client", "secret", "westeurope-1", "");
        assert!(matches!(result, Err(ClientInitError::Config(_))));
    }
}
