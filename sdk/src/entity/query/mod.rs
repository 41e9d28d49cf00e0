//! Multi-hop query composition and result unpacking

pub mod builder;
pub mod step;
pub mod unpack;

pub use builder::QueryBuilder;
pub use step::{DEFAULT_CONNECTION_LIMIT, QueryStep, QueryStepFactory, ROOT_STEP, StepKind};
pub use unpack::QueryUnpacker;
