use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::entities::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, NewProduct, ProductRepository, Repository};

/// Largest value accepted for `LIMIT`/`OFFSET` by every supported backend.
const MAX_SQL_ROWS: u64 = i64::MAX as u64;

fn database_error(operation: &'static str) -> impl Fn(DbErr) -> ServiceError {
    move |e| {
        error!(operation, error = %e, "product query failed");
        ServiceError::DatabaseError(e)
    }
}

/// Rows skipped before `page_number`, saturating instead of overflowing.
pub(crate) fn page_offset(page_number: u64, page_size: u64) -> u64 {
    page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(MAX_SQL_ROWS)
}

/// [`ProductRepository`] backed by a sea-orm connection pool
#[derive(Debug, Clone)]
pub struct SeaOrmProductRepository {
    base: BaseRepository,
}

impl SeaOrmProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Product::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(database_error("get_all"))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError> {
        Product::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(database_error("get_by_id"))
    }

    #[instrument(skip(self))]
    async fn get_paged(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<(Vec<ProductModel>, u64), ServiceError> {
        let db = self.base.get_db();

        let total = Product::find()
            .count(db)
            .await
            .map_err(database_error("get_paged.count"))?;

        let products = Product::find()
            .order_by_asc(Column::Id)
            .limit(page_size.min(MAX_SQL_ROWS))
            .offset(page_offset(page_number, page_size))
            .all(db)
            .await
            .map_err(database_error("get_paged.fetch"))?;

        debug!(returned = products.len(), total, "fetched product page");
        Ok((products, total))
    }

    #[instrument(skip(self, description))]
    async fn update_description(
        &self,
        id: i32,
        description: Option<String>,
    ) -> Result<bool, ServiceError> {
        let result = Product::update_many()
            .col_expr(Column::Description, Expr::value(description))
            .filter(Column::Id.eq(id))
            .exec(self.base.get_db())
            .await
            .map_err(database_error("update_description"))?;

        debug!(rows_affected = result.rows_affected, "description updated");
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: NewProduct) -> Result<ProductModel, ServiceError> {
        ProductActiveModel {
            name: Set(product.name),
            image_uri: Set(product.image_uri),
            price: Set(product.price),
            description: Set(product.description),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
        .map_err(database_error("create"))
    }

    #[instrument(skip(self, product), fields(id = product.id))]
    async fn update(&self, product: ProductModel) -> Result<ProductModel, ServiceError> {
        let id = product.id;
        match product
            .into_active_model()
            .reset_all()
            .update(self.base.get_db())
            .await
        {
            Ok(updated) => Ok(updated),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Err(
                ServiceError::NotFound(format!("Product with ID {} not found", id)),
            ),
            Err(e) => Err(database_error("update")(e)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let result = Product::delete_by_id(id)
            .exec(self.base.get_db())
            .await
            .map_err(database_error("delete"))?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(0, 10), 0);
    }

    #[test]
    fn later_pages_skip_whole_pages() {
        assert_eq!(page_offset(3, 2), 4);
        assert_eq!(page_offset(10, 100), 900);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        assert_eq!(page_offset(u64::MAX, u64::MAX), MAX_SQL_ROWS);
        assert_eq!(page_offset(2, MAX_SQL_ROWS), MAX_SQL_ROWS);
    }
}
