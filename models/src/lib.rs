//! Typed client for the PowerOps v1 data models
//!
//! The modules under [`generated`] are produced from
//! `schema/power_ops_v1.graphql` by `cargo powerops generate`; regenerate
//! them instead of editing by hand.

pub mod client;
pub mod generated;

pub use client::{
    ClientInitError, DayAheadBidApis, PowerAssetApis, PowerOpsModelsV1Client,
    ShopBasedDayAheadBidProcessApis, DEFAULT_INSTANCE_SPACE,
};
pub use generated::*;
pub use powerops_sdk::entity::{RetrieveConnections, UpsertOptions};
