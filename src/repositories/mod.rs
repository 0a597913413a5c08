use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::product;
use crate::errors::ServiceError;

pub mod product_repository;

pub use product_repository::SeaOrmProductRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Fields of a product that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub image_uri: String,
    pub price: Decimal,
    pub description: Option<String>,
}

/// Storage gateway for catalog products.
///
/// The only component that talks to the database. Callers validate paging
/// arguments; the gateway does not clamp them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, ordered by id.
    async fn get_all(&self) -> Result<Vec<product::Model>, ServiceError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<product::Model>, ServiceError>;

    /// One page ordered by id ascending, with the unfiltered row count.
    async fn get_paged(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<(Vec<product::Model>, u64), ServiceError>;

    /// Sets only the description of product `id`. Returns `false` when no
    /// product has that id.
    async fn update_description(
        &self,
        id: i32,
        description: Option<String>,
    ) -> Result<bool, ServiceError>;

    async fn create(&self, product: NewProduct) -> Result<product::Model, ServiceError>;

    /// Overwrites every column of an existing product.
    async fn update(&self, product: product::Model) -> Result<product::Model, ServiceError>;

    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub type DynProductRepository = Arc<dyn ProductRepository>;
