use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted catalog product.
///
/// The HTTP surface only ever changes `description`, through
/// [`crate::repositories::ProductRepository::update_description`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name (max 100 characters)
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub name: String,

    /// Absolute URI of the product image (max 500 characters)
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub image_uri: String,

    /// Unit price. SQLite stores it as `DECIMAL(16, 2)`, see
    /// [`crate::migrator::price_precision`].
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,

    /// Free-form marketing description
    #[sea_orm(column_type = "String(StringLen::N(10000))", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
