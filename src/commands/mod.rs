use crate::{errors::ServiceError, repositories::ProductRepository};
use async_trait::async_trait;

/// Command trait for implementing the Command Pattern
///
/// A command carries everything one write operation needs and runs it against
/// the product gateway.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    async fn execute(
        &self,
        repository: &dyn ProductRepository,
    ) -> Result<Self::Result, ServiceError>;
}

pub mod products;
