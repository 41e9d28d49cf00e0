pub mod generate;
pub mod graphql;
pub mod validate;

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self) -> Result<()>;
}
