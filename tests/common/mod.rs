#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use eshop_catalog::{
    config::AppConfig,
    db,
    entities::product::{self, Entity as Product},
    AppState,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde_json::Value;
use tower::ServiceExt;

/// Products every test starts from, in id order.
pub fn mock_products() -> Vec<product::Model> {
    let rows: [(i32, &str, &str, Decimal, Option<&str>); 5] = [
        (
            1,
            "Apple HomePod mini white",
            "https://example.com/images/homepod-mini-white.png",
            dec!(99.00),
            Some("Compact smart speaker with room-filling sound."),
        ),
        (
            2,
            "Amazon Echo Spot",
            "https://example.com/images/echo-spot.png",
            dec!(79.99),
            Some("Smart alarm clock with Alexa."),
        ),
        (
            3,
            "Google Nest Audio",
            "https://example.com/images/nest-audio.png",
            dec!(89.50),
            Some("Smart speaker with Google Assistant."),
        ),
        (
            4,
            "Budget Speaker",
            "https://example.com/images/budget-speaker.png",
            dec!(19.99),
            None,
        ),
        (
            5,
            "Premium Audio System",
            "https://example.com/images/premium-audio.png",
            dec!(1499.00),
            Some("Multi-room audio with studio-grade drivers."),
        ),
    ];

    rows.into_iter()
        .map(|(id, name, image_uri, price, description)| product::Model {
            id,
            name: name.to_string(),
            image_uri: image_uri.to_string(),
            price,
            description: description.map(str::to_string),
        })
        .collect()
}

/// Fresh in-memory database holding exactly [`mock_products`].
pub async fn seeded_database() -> DatabaseConnection {
    let mut cfg = test_config();
    cfg.db_max_connections = 1;
    cfg.db_min_connections = 1;

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .expect("failed to create test database");
    db::run_migrations(&pool)
        .await
        .expect("failed to run migrations in tests");

    Product::delete_many()
        .exec(&pool)
        .await
        .expect("failed to clear seeded products");

    let rows = mock_products().into_iter().map(|p| product::ActiveModel {
        id: Set(p.id),
        name: Set(p.name),
        image_uri: Set(p.image_uri),
        price: Set(p.price),
        description: Set(p.description),
    });
    Product::insert_many(rows)
        .exec(&pool)
        .await
        .expect("failed to insert mock products");

    pool
}

pub fn test_config() -> AppConfig {
    AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        18_080,
        "development".to_string(),
    )
}

/// Helper harness for driving the full router against an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(cfg: AppConfig) -> Self {
        let pool = seeded_database().await;
        let state = AppState::new(Arc::new(pool), cfg);
        let router = eshop_catalog::build_router(state.clone());
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn raw_json(&self, method: Method, uri: &str, body: impl Into<Body>) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .expect("failed to build request");
        self.send(request).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> Response {
        let bytes = serde_json::to_vec(body).expect("failed to serialize json request body");
        self.raw_json(Method::PUT, uri, bytes).await
    }

    pub async fn patch_json(&self, uri: &str, body: &Value) -> Response {
        let bytes = serde_json::to_vec(body).expect("failed to serialize json request body");
        self.raw_json(Method::PATCH, uri, bytes).await
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes()
        .to_vec()
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Ids of the `items` array of a paged response.
pub fn item_ids(page: &Value) -> Vec<i64> {
    page["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["id"].as_i64().expect("numeric id"))
        .collect()
}
