use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::{PagedResult, ProductView, UpdateProductDescriptionRequest};
use crate::errors::ErrorResponse;

pub const V1_DOC_PATH: &str = "/api-docs/v1/openapi.json";
pub const V2_DOC_PATH: &str = "/api-docs/v2/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eshop Catalog API",
        version = "1.0",
        description = r#"
# Eshop Catalog API v1

Read the product catalog and maintain product descriptions.

`GET /products` returns the whole catalog as a single page. Unknown product ids
answer `404` with an empty body.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "Version 1")
    ),
    tags(
        (name = "Products", description = "Catalog products")
    ),
    paths(
        crate::handlers::products::list_products_v1,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product_description,
    ),
    components(
        schemas(
            ProductView,
            PagedResult<ProductView>,
            UpdateProductDescriptionRequest,
            ErrorResponse,
        )
    )
)]
pub struct ApiDocV1;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eshop Catalog API",
        version = "2.0",
        description = r#"
# Eshop Catalog API v2

Same operations as v1, except that `GET /products` is paged through
`pageNumber` (from 1) and `pageSize` (1 to 100, default 10).
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v2", description = "Version 2")
    ),
    tags(
        (name = "Products", description = "Catalog products")
    ),
    paths(
        crate::handlers::products::list_products_v2,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product_description,
    ),
    components(
        schemas(
            ProductView,
            PagedResult<ProductView>,
            UpdateProductDescriptionRequest,
            ErrorResponse,
        )
    )
)]
pub struct ApiDocV2;

/// Swagger UI serving one document per API version
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url(V1_DOC_PATH, ApiDocV1::openapi())
        .url(V2_DOC_PATH, ApiDocV2::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_document_lists_product_paths() {
        let json = serde_json::to_string(&ApiDocV1::openapi()).unwrap();
        assert!(json.contains("Eshop Catalog API"));
        assert!(json.contains("/products/{id}/description"));
        assert!(json.contains("/api/v1"));

        let doc = ApiDocV1::openapi();
        let list = doc
            .paths
            .paths
            .get("/products")
            .and_then(|item| item.get.as_ref())
            .unwrap();
        assert!(list.parameters.as_ref().map_or(true, Vec::is_empty));
    }

    #[test]
    fn v2_document_declares_paging_parameters() {
        let doc = ApiDocV2::openapi();
        let list = doc
            .paths
            .paths
            .get("/products")
            .and_then(|item| item.get.as_ref())
            .unwrap();
        let names: Vec<_> = list
            .parameters
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["pageNumber", "pageSize"]);
    }
}
