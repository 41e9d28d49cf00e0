//! Legacy `retrieve`/`update`/`delete` clients

use super::api::{LegacyDomainApi, ViewBackedApi};
use super::cache::SimpleCache;
use super::error::{LegacyError, LegacyResult};
use super::models::{Case, LegacyModel, Mapping, Scenario, Transformation};
use super::settings::Settings;
use crate::config::ClientConfig;
use crate::dm::{DataModelingBackend, HttpBackend};
use std::sync::Arc;
use tracing::{debug, warn};

/// Single-type client over a [`LegacyDomainApi`].
pub struct DmClientBase<T: LegacyModel> {
    api: Arc<dyn LegacyDomainApi<T>>,
}

impl<T: LegacyModel> Clone for DmClientBase<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: LegacyModel> DmClientBase<T> {
    pub fn new(api: Arc<dyn LegacyDomainApi<T>>) -> Self {
        Self { api }
    }

    pub fn from_backend(backend: Arc<dyn DataModelingBackend>, settings: &Settings) -> Self {
        Self::new(Arc::new(ViewBackedApi::<T>::new(backend, settings)))
    }

    /// The one item with `external_id`.
    pub async fn retrieve(&self, external_id: &str) -> LegacyResult<T> {
        debug!("Retrieving {} '{}'", T::TYPE_NAME, external_id);
        let mut items = self
            .api
            .list_by_external_ids(&[external_id.to_string()])
            .await?;
        match items.len() {
            0 => Err(LegacyError::not_found(T::TYPE_NAME, external_id)),
            1 => Ok(items.remove(0)),
            count => {
                warn!("{} {} items share external_id '{}'", count, T::TYPE_NAME, external_id);
                Err(LegacyError::duplicate(T::TYPE_NAME, external_id))
            }
        }
    }

    pub async fn update(&self, item: &T) -> LegacyResult<()> {
        debug!("Updating {} '{}'", T::TYPE_NAME, item.external_id());
        self.api.apply(std::slice::from_ref(item)).await
    }

    pub async fn delete(&self, item: &T) -> LegacyResult<()> {
        self.delete_by_external_id(item.external_id()).await
    }

    pub async fn delete_by_external_id(&self, external_id: &str) -> LegacyResult<()> {
        debug!("Deleting {} '{}'", T::TYPE_NAME, external_id);
        self.api.delete(&[external_id.to_string()]).await
    }
}

pub type CaseClient = DmClientBase<Case>;
pub type MappingClient = DmClientBase<Mapping>;
pub type ScenarioClient = DmClientBase<Scenario>;
pub type TransformationClient = DmClientBase<Transformation>;

/// The four legacy clients sharing one backend and one [`Settings`].
#[derive(Clone)]
pub struct PowerOpsDmClient {
    pub cases: CaseClient,
    pub mappings: MappingClient,
    pub scenarios: ScenarioClient,
    pub transformations: TransformationClient,
    settings: Settings,
}

impl PowerOpsDmClient {
    pub fn new(backend: Arc<dyn DataModelingBackend>, settings: Settings) -> Self {
        Self {
            cases: CaseClient::from_backend(backend.clone(), &settings),
            mappings: MappingClient::from_backend(backend.clone(), &settings),
            scenarios: ScenarioClient::from_backend(backend.clone(), &settings),
            transformations: TransformationClient::from_backend(backend, &settings),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Hands out one [`PowerOpsDmClient`] per distinct [`Settings`].
pub struct PowerOpsDmClientFactory {
    backend: Arc<dyn DataModelingBackend>,
    clients: SimpleCache<Settings, Arc<PowerOpsDmClient>>,
}

impl PowerOpsDmClientFactory {
    pub fn new(backend: Arc<dyn DataModelingBackend>) -> Self {
        Self {
            backend,
            clients: SimpleCache::new(),
        }
    }

    /// Factory talking to the service described by `config`.
    pub fn from_config(config: &ClientConfig) -> LegacyResult<Self> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::new(Arc::new(backend)))
    }

    pub fn client(&self, settings: &Settings) -> Arc<PowerOpsDmClient> {
        self.clients.get_or_insert_with(settings.clone(), || {
            debug!("Creating legacy client for space '{}'", settings.space);
            Arc::new(PowerOpsDmClient::new(self.backend.clone(), settings.clone()))
        })
    }

    pub fn cached_clients(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryBackend;
    use async_trait::async_trait;

    /// Returns a fixed item list for every lookup.
    struct FixedApi(Vec<Case>);

    #[async_trait]
    impl LegacyDomainApi<Case> for FixedApi {
        async fn list_by_external_ids(&self, _external_ids: &[String]) -> LegacyResult<Vec<Case>> {
            Ok(self.0.clone())
        }

        async fn apply(&self, _items: &[Case]) -> LegacyResult<()> {
            Ok(())
        }

        async fn delete(&self, _external_ids: &[String]) -> LegacyResult<()> {
            Ok(())
        }
    }

    fn case(external_id: &str) -> Case {
        Case {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_retrieve_missing_is_not_found() {
        let client = CaseClient::new(Arc::new(FixedApi(vec![])));
        let err = client.retrieve("missing").await.unwrap_err();
        assert!(matches!(err, LegacyError::NotFound { .. }));
        assert_eq!(err.to_string(), "Could not find Case with external_id 'missing'");
    }

    #[tokio::test]
    async fn test_retrieve_duplicate() {
        let client = CaseClient::new(Arc::new(FixedApi(vec![case("dup"), case("dup")])));
        let err = client.retrieve("dup").await.unwrap_err();
        assert!(matches!(err, LegacyError::Duplicate { .. }));
        assert!(err.to_string().starts_with("Multiple items found"));
    }

    #[tokio::test]
    async fn test_update_retrieve_delete_over_backend() {
        let backend = Arc::new(MemoryBackend::new());
        let settings = Settings::default();
        let client = ScenarioClient::from_backend(backend.clone(), &settings);

        let scenario = Scenario {
            external_id: "s1".into(),
            name: "Base".into(),
            commands: vec!["penalty flag /on".into()],
            ..Default::default()
        };
        client.update(&scenario).await.unwrap();
        assert_eq!(client.retrieve("s1").await.unwrap(), scenario);

        let mut changed = scenario.clone();
        changed.source = Some("manual".into());
        client.update(&changed).await.unwrap();
        assert_eq!(client.retrieve("s1").await.unwrap().source.as_deref(), Some("manual"));

        client.delete(&changed).await.unwrap();
        assert!(client.retrieve("s1").await.unwrap_err().to_string().contains("Could not find"));
    }

    #[tokio::test]
    async fn test_factory_caches_per_settings() {
        let factory = PowerOpsDmClientFactory::new(Arc::new(MemoryBackend::new()));
        let a = factory.client(&Settings::default());
        let b = factory.client(&Settings::default());
        let c = factory.client(&Settings::new("other", "dm", "1"));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(factory.cached_clients(), 2);
        assert_eq!(c.settings().space, "other");
    }
}
