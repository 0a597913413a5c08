use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251114_000001_create_products_table::Migration),
            Box::new(m20251114_000002_seed_products::Migration),
        ]
    }
}

/// `DECIMAL(precision, scale)` of `products.price` for `backend`.
///
/// SQLite's column builder rejects precisions above 16.
pub fn price_precision(backend: DbBackend) -> (u32, u32) {
    match backend {
        DbBackend::Sqlite => (16, 2),
        _ => (18, 2),
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    ImageUri,
    Price,
    Description,
}

mod m20251114_000001_create_products_table {
    use super::{price_precision, Products};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251114_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let (precision, scale) = price_precision(manager.get_database_backend());
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Products::ImageUri)
                                .string_len(500)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::Price)
                                .decimal_len(precision, scale)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::Description)
                                .string_len(10000)
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }
}

mod m20251114_000002_seed_products {
    use super::Products;
    use crate::entities::product;
    use rust_decimal_macros::dec;
    use sea_orm::{ActiveValue::Set, ConnectionTrait, DbBackend, EntityTrait, Statement};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251114_000002_seed_products"
        }
    }

    pub(super) fn catalog() -> Vec<product::ActiveModel> {
        vec![
            product::ActiveModel {
                id: Set(1),
                name: Set("Apple HomePod mini biely".to_string()),
                image_uri: Set(
                    "https://image.alza.cz/products/JA041a1/JA041a1.jpg?width=500&height=500"
                        .to_string(),
                ),
                price: Set(dec!(125.90)),
                description: Set(Some(
                    "Hlasový asistent Siri – v angličtine, kompatibilná aplikácia Apple Home, \
                     podpora iOS, pripojenie cez WiFi 2,4 GHz a bluetooth, otvorený systém, \
                     fungovanie samostatne, ovládanie domácnosti, kamera, 2 mikrofóny na \
                     snímanie okolitého zvuku, podporuje Apple Music, basový reproduktor"
                        .to_string(),
                )),
            },
            product::ActiveModel {
                id: Set(2),
                name: Set("Amazon Echo Spot Glacier White".to_string()),
                image_uri: Set(
                    "https://image.alza.cz/products/AME1047/AME1047.jpg?width=500&height=500"
                        .to_string(),
                ),
                price: Set(dec!(83.90)),
                description: Set(Some(
                    "Hlasový asistent Amazon Alexa – kompatibilný s aplikáciami výrobcu, \
                     podpora Android a iOS, pripojenie cez WiFi 2,4 GHz, otvorený systém, \
                     fungovanie samostatne, ovládanie domácnosti, tvorba scenárov, displej, \
                     hodiny a tlačidlo na odpojenie mikrofónu, dotykové ovládanie"
                        .to_string(),
                )),
            },
            product::ActiveModel {
                id: Set(3),
                name: Set("Google Nest Audio Chalk".to_string()),
                image_uri: Set(
                    "https://image.alza.cz/products/GOOGnestA1/GOOGnestA1.jpg?width=500&height=500"
                        .to_string(),
                ),
                price: Set(dec!(92.99)),
                description: Set(Some(
                    "Hlasový asistent Google Assistant – v angličtine, kompatibilná aplikácia \
                     google Home, podpora Android a iOS, pripojenie cez WiFi 2,4 GHz a \
                     bluetooth, otvorený systém, fungovanie samostatne, ovládanie domácnosti, \
                     3 mikrofóny na snímanie okolitého zvuku, podporuje Spotify, basový a \
                     výškový reproduktor"
                        .to_string(),
                )),
            },
        ]
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let db = manager.get_connection();
            product::Entity::insert_many(catalog()).exec(db).await?;

            // Explicit ids leave the Postgres serial behind
            if manager.get_database_backend() == DbBackend::Postgres {
                db.execute(Statement::from_string(
                    DbBackend::Postgres,
                    "SELECT setval(pg_get_serial_sequence('products', 'id'), \
                     (SELECT MAX(id) FROM products))",
                ))
                .await?;
            }
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Products::Table)
                        .and_where(Expr::col(Products::Id).is_in([1, 2, 3]))
                        .to_owned(),
                )
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::product;
    use sea_orm::{Database, EntityTrait, QueryOrder};

    #[test]
    fn price_precision_stays_within_sqlite_limit() {
        assert_eq!(price_precision(DbBackend::Sqlite), (16, 2));
        assert_eq!(price_precision(DbBackend::Postgres), (18, 2));
    }

    #[test]
    fn seed_catalog_has_three_products() {
        let catalog = m20251114_000002_seed_products::catalog();
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn up_creates_and_seeds_products() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let products = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(
            products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec![
                "Apple HomePod mini biely",
                "Amazon Echo Spot Glacier White",
                "Google Nest Audio Chalk"
            ]
        );
        assert!(products.iter().all(|p| p.description.is_some()));
    }

    #[tokio::test]
    async fn down_removes_seed_and_table() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, Some(1)).await.unwrap();
        assert_eq!(
            product::Entity::find().all(&db).await.unwrap().len(),
            0
        );
        Migrator::down(&db, None).await.unwrap();
        assert!(product::Entity::find().all(&db).await.is_err());
    }
}
