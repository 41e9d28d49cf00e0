//! Hand-written clients for the older PowerOps domain model
//!
//! `Case`, `Mapping`, `Scenario` and `Transformation` records are stored as
//! nodes of one view each, in the space named by [`Settings`]. The clients
//! run on the same [`crate::dm::DataModelingBackend`] as the generated API.

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod settings;

pub use api::{LegacyDomainApi, ViewBackedApi};
pub use cache::SimpleCache;
pub use client::{
    CaseClient, DmClientBase, MappingClient, PowerOpsDmClient, PowerOpsDmClientFactory,
    ScenarioClient, TransformationClient,
};
pub use error::{LegacyError, LegacyResult};
pub use models::{Case, LegacyModel, Mapping, Scenario, Transformation};
pub use settings::Settings;
