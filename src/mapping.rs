//! Projection from persisted products to their public view.

use crate::{dto::ProductView, entities::product};

/// Field-for-field copy of a stored product into its read contract.
pub fn to_view(model: product::Model) -> ProductView {
    ProductView {
        id: model.id,
        name: model.name,
        image_uri: model.image_uri,
        price: model.price,
        description: model.description,
    }
}

/// Maps each product independently, preserving order.
pub fn to_views(models: Vec<product::Model>) -> Vec<ProductView> {
    models.into_iter().map(to_view).collect()
}
