pub mod common;
pub mod products;

use crate::{
    repositories::ProductRepository,
    services::{ProductCommandService, ProductCommands, ProductQueries, ProductQueryService},
};
use std::sync::Arc;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub product_queries: Arc<dyn ProductQueryService>,
    pub product_commands: Arc<dyn ProductCommandService>,
}

impl AppServices {
    /// Wires both catalog services over one product gateway
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            product_queries: Arc::new(ProductQueries::new(repository.clone())),
            product_commands: Arc::new(ProductCommands::new(repository)),
        }
    }

    pub fn from_parts(
        product_queries: Arc<dyn ProductQueryService>,
        product_commands: Arc<dyn ProductCommandService>,
    ) -> Self {
        Self {
            product_queries,
            product_commands,
        }
    }
}
