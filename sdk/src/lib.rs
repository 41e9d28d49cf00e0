//! Typed client SDK for the PowerOps data model
//!
//! - [`dm`]: wire types and backends for the data-modeling service
//! - [`config`]: connection settings from code or TOML
//! - [`entity`]: the typed layer generated view modules build on
//! - [`codegen`]: generates view modules from GraphQL data-model schemas
//! - [`legacy`]: hand-written clients for the older domain model
//! - [`testing`]: in-memory backend for tests

pub mod codegen;
pub mod config;
pub mod dm;
pub mod entity;
pub mod legacy;
pub mod testing;

pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use dm::{DataModelId, DataModelingBackend, DataModelingError, HttpBackend, NodeId, ViewId};

// Re-export async_trait macro for convenience
pub use async_trait::async_trait;

pub use entity::{
    DomainClient, DomainModel, DomainModelWrite, EntityError, EntityResult, NodeApi, NodeList,
    RetrieveConnections, UpsertOptions,
};

// Re-export codegen components for build scripts
pub use codegen::{codegen, Codegen, CodeGenerator, CodegenResult};
