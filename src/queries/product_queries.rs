use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    dto::{PagedResult, ProductView, ALL_ITEMS_PAGE_SIZE},
    errors::ServiceError,
    mapping,
    queries::Query,
    repositories::ProductRepository,
};

/// Struct to get a specific product by ID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetProductQuery {
    pub product_id: i32,
}

#[async_trait]
impl Query for GetProductQuery {
    type Result = Option<ProductView>;

    #[instrument(skip(self, repository), fields(product_id = self.product_id))]
    async fn execute(
        &self,
        repository: &dyn ProductRepository,
    ) -> Result<Self::Result, ServiceError> {
        debug!("Executing GetProductQuery");
        Ok(repository
            .get_by_id(self.product_id)
            .await?
            .map(mapping::to_view))
    }
}

/// Struct to list one page of the catalog, ordered by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProductsQuery {
    pub page_number: u64,
    pub page_size: u64,
}

impl ListProductsQuery {
    pub fn page(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// The whole catalog as page 1.
    pub fn all() -> Self {
        Self::page(1, ALL_ITEMS_PAGE_SIZE)
    }
}

#[async_trait]
impl Query for ListProductsQuery {
    type Result = PagedResult<ProductView>;

    #[instrument(skip(self, repository), fields(page_number = self.page_number, page_size = self.page_size))]
    async fn execute(
        &self,
        repository: &dyn ProductRepository,
    ) -> Result<Self::Result, ServiceError> {
        debug!("Executing ListProductsQuery");
        let (products, total_count) = repository
            .get_paged(self.page_number, self.page_size)
            .await?;

        Ok(PagedResult::new(
            mapping::to_views(products),
            self.page_number,
            self.page_size,
            total_count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::product;
    use crate::repositories::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn model(id: i32) -> product::Model {
        product::Model {
            id,
            name: format!("Speaker {id}"),
            image_uri: format!("https://img.test/{id}.jpg"),
            price: dec!(99.90),
            description: None,
        }
    }

    #[tokio::test]
    async fn get_product_maps_hit() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(2))
            .times(1)
            .returning(|id| Ok(Some(model(id))));

        let view = GetProductQuery { product_id: 2 }
            .execute(&repo)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.id, 2);
        assert_eq!(view.name, "Speaker 2");
    }

    #[tokio::test]
    async fn get_product_miss_is_none() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let result = GetProductQuery { product_id: 999 }
            .execute(&repo)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_all_requests_first_page_with_max_size() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_paged()
            .with(eq(1), eq(ALL_ITEMS_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(((1..=3).map(model).collect(), 3)));

        let page = ListProductsQuery::all().execute(&repo).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_number, 1);
    }

    #[tokio::test]
    async fn list_page_wraps_gateway_total() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_paged()
            .with(eq(3), eq(2))
            .returning(|_, _| Ok((vec![model(5)], 5)));

        let page = ListProductsQuery::page(3, 2).execute(&repo).await.unwrap();
        assert_eq!(page.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn gateway_failure_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_paged().returning(|_, _| {
            Err(ServiceError::DatabaseError(sea_orm::DbErr::Custom(
                "connection reset".into(),
            )))
        });

        let err = ListProductsQuery::page(1, 10)
            .execute(&repo)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }
}
