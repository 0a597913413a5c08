use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{commands::Command, errors::ServiceError, repositories::ProductRepository};

/// Replaces the description of one product.
///
/// Length limits are enforced by the HTTP layer before the command is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductDescriptionCommand {
    pub product_id: i32,
    pub description: Option<String>,
}

#[async_trait]
impl Command for UpdateProductDescriptionCommand {
    /// `false` when the product does not exist
    type Result = bool;

    #[instrument(skip(self, repository), fields(product_id = self.product_id))]
    async fn execute(
        &self,
        repository: &dyn ProductRepository,
    ) -> Result<Self::Result, ServiceError> {
        let updated = repository
            .update_description(self.product_id, self.description.clone())
            .await?;

        if updated {
            info!(product_id = self.product_id, "Product description updated");
        } else {
            info!(product_id = self.product_id, "Product not found for description update");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockProductRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn passes_found_signal_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_update_description()
            .with(eq(1), eq(Some("New text".to_string())))
            .times(1)
            .returning(|_, _| Ok(true));

        let command = UpdateProductDescriptionCommand {
            product_id: 1,
            description: Some("New text".into()),
        };
        assert!(command.execute(&repo).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_product_returns_false() {
        let mut repo = MockProductRepository::new();
        repo.expect_update_description()
            .returning(|_, _| Ok(false));

        let command = UpdateProductDescriptionCommand {
            product_id: 999,
            description: Some("X".into()),
        };
        assert!(!command.execute(&repo).await.unwrap());
    }

    #[tokio::test]
    async fn never_reads_before_writing() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_get_paged().never();
        repo.expect_update_description()
            .with(eq(3), eq(None))
            .returning(|_, _| Ok(true));

        let command = UpdateProductDescriptionCommand {
            product_id: 3,
            description: None,
        };
        assert!(command.execute(&repo).await.unwrap());
    }
}
