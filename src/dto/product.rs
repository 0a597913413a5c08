use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public read view of a catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Apple HomePod mini biely")]
    pub name: String,
    #[schema(example = "https://image.alza.cz/products/JA041a1/JA041a1.jpg?width=500&height=500")]
    pub image_uri: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 125.9)]
    pub price: Decimal,
    pub description: Option<String>,
}

/// Body of `PUT|PATCH /products/{id}/description`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductDescriptionRequest {
    /// New description; `null` clears it
    #[schema(example = "Smart speaker with room-filling sound.")]
    pub description: Option<String>,
}

impl UpdateProductDescriptionRequest {
    /// Length in characters, zero when cleared.
    pub fn description_len(&self) -> usize {
        self.description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0)
    }
}
