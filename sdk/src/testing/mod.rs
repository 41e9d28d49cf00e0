//! Testing support for code built on the SDK
//!
//! [`MemoryBackend`] implements [`crate::dm::DataModelingBackend`] in memory:
//! nodes and edges live in concurrent maps, every apply bumps the node
//! version and rejects stale `existing_version` values, and list, search,
//! aggregate and graph queries are evaluated locally. It lets generated
//! APIs, the query composer and the legacy clients be tested without a
//! network connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use powerops_sdk::testing::MemoryBackend;
//!
//! #[tokio::test]
//! async fn test_my_model() {
//!     let backend = Arc::new(MemoryBackend::new());
//!     backend.register_model::<MyView>();
//!     let client = DomainClient::new(backend.clone(), "my_space");
//!     // upsert, list and query as against the live service
//! }
//! ```

pub mod memory_backend;

pub use memory_backend::*;
