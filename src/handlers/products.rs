use crate::handlers::common::{
    map_json_rejection, map_path_rejection, map_query_rejection, map_service_error,
    no_content_response, not_found_response, success_response, validate_input,
};
use crate::{
    dto::{PagedResult, ProductView, UpdateProductDescriptionRequest},
    errors::ApiError,
    versioning::ApiVersion,
    AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    response::Response,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;
use validator::Validate;

/// Creates the router for product endpoints of one API version
pub fn products_routes(version: ApiVersion) -> Router<AppState> {
    let list = match version {
        ApiVersion::V1 => get(list_products_v1),
        ApiVersion::V2 => get(list_products_v2),
    };

    Router::new()
        .route("/", list)
        .route("/:id", get(get_product))
        .route(
            "/:id/description",
            put(update_product_description).patch(update_product_description),
        )
}

/// Paging parameters accepted by the v2 listing
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// 1-based page number, defaults to 1
    #[validate(range(min = 1))]
    #[param(minimum = 1, example = 1)]
    pub page_number: Option<i64>,

    /// Items per page, defaults to 10
    #[validate(range(min = 1))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub page_size: Option<i64>,
}

impl ListProductsParams {
    /// Applies defaults and bounds, yielding `(page_number, page_size)`.
    pub fn resolve(&self, default_page_size: u64, max_page_size: u64) -> Result<(u64, u64), ApiError> {
        validate_input(self)?;

        let page_number = self.page_number.map_or(Ok(1), u64::try_from);
        let page_size = self.page_size.map_or(Ok(default_page_size), u64::try_from);
        let (Ok(page_number), Ok(page_size)) = (page_number, page_size) else {
            return Err(ApiError::ValidationError(
                "pageNumber and pageSize must be positive".to_string(),
            ));
        };

        if page_size > max_page_size {
            return Err(ApiError::ValidationError(format!(
                "pageSize cannot exceed {max_page_size}"
            )));
        }

        Ok((page_number, page_size))
    }
}

/// List every product
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products as a single page", body = PagedResult<ProductView>),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products_v1(State(state): State<AppState>) -> Result<Response, ApiError> {
    let page = state
        .services
        .product_queries
        .get_all()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(page))
}

/// List products one page at a time
#[utoipa::path(
    get,
    path = "/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Requested page of products", body = PagedResult<ProductView>),
        (status = 400, description = "Invalid paging parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products_v2(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(map_query_rejection)?;
    let (page_number, page_size) = params.resolve(
        state.config.api_default_page_size,
        state.config.api_max_page_size,
    )?;

    let page = state
        .services
        .product_queries
        .get_page(page_number, page_size)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(page))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductView),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(map_path_rejection)?;

    let product = state
        .services
        .product_queries
        .get_by_id(id)
        .await
        .map_err(map_service_error)?;

    Ok(match product {
        Some(view) => success_response(view),
        None => not_found_response(),
    })
}

/// Replace a product's description
#[utoipa::path(
    method(put, patch),
    path = "/products/{id}/description",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductDescriptionRequest,
    responses(
        (status = 204, description = "Description updated"),
        (status = 400, description = "Description too long or malformed body", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product_description(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateProductDescriptionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(map_path_rejection)?;
    let Json(payload) = payload.map_err(map_json_rejection)?;

    let max_len = state.config.max_description_length;
    if payload.description_len() > max_len {
        debug!(product_id = id, length = payload.description_len(), "description rejected");
        return Err(ApiError::ValidationError(format!(
            "description must be at most {max_len} characters"
        )));
    }

    let updated = state
        .services
        .product_commands
        .update_description(id, payload.description)
        .await
        .map_err(map_service_error)?;

    Ok(if updated {
        no_content_response()
    } else {
        not_found_response()
    })
}
