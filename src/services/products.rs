use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    commands::{products::UpdateProductDescriptionCommand, Command},
    dto::{PagedResult, ProductView, ALL_ITEMS_PAGE_SIZE},
    errors::ServiceError,
    queries::{GetProductQuery, ListProductsQuery, Query},
    repositories::ProductRepository,
};

/// Read side of the catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQueryService: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<ProductView>, ServiceError>;

    /// One page of the catalog ordered by id.
    async fn get_page(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<PagedResult<ProductView>, ServiceError>;

    /// The whole catalog, served through the paged path as a single page.
    async fn get_all(&self) -> Result<PagedResult<ProductView>, ServiceError> {
        self.get_page(1, ALL_ITEMS_PAGE_SIZE).await
    }
}

/// Write side of the catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommandService: Send + Sync {
    /// Returns `false` when no product has `id`.
    async fn update_description(
        &self,
        id: i32,
        description: Option<String>,
    ) -> Result<bool, ServiceError>;
}

/// Query service over a product gateway
#[derive(Clone)]
pub struct ProductQueries {
    repository: Arc<dyn ProductRepository>,
}

impl ProductQueries {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductQueryService for ProductQueries {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<ProductView>, ServiceError> {
        GetProductQuery { product_id: id }
            .execute(self.repository.as_ref())
            .await
    }

    #[instrument(skip(self))]
    async fn get_page(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<PagedResult<ProductView>, ServiceError> {
        ListProductsQuery::page(page_number, page_size)
            .execute(self.repository.as_ref())
            .await
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<PagedResult<ProductView>, ServiceError> {
        ListProductsQuery::all()
            .execute(self.repository.as_ref())
            .await
    }
}

/// Command service over a product gateway
#[derive(Clone)]
pub struct ProductCommands {
    repository: Arc<dyn ProductRepository>,
}

impl ProductCommands {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductCommandService for ProductCommands {
    #[instrument(skip(self, description))]
    async fn update_description(
        &self,
        id: i32,
        description: Option<String>,
    ) -> Result<bool, ServiceError> {
        UpdateProductDescriptionCommand {
            product_id: id,
            description,
        }
        .execute(self.repository.as_ref())
        .await
    }
}
