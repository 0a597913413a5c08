use async_trait::async_trait;

use crate::{errors::ServiceError, repositories::ProductRepository};

pub mod product_queries;

pub use product_queries::{GetProductQuery, ListProductsQuery};

/// Trait representing a generic asynchronous read.
#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    /// Executes the query against the product gateway
    async fn execute(&self, repository: &dyn ProductRepository)
        -> Result<Self::Result, ServiceError>;
}
