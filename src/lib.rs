//! Eshop Catalog Library
//!
//! Product catalog service: paged reads, single-product lookup and atomic
//! description updates, exposed through versioned REST endpoints.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod commands;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod mapping;
pub mod migrator;
pub mod openapi;
pub mod queries;
pub mod repositories;
pub mod services;
pub mod telemetry;
pub mod versioning;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use std::{any::Any, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{error, info, warn};

use crate::{
    config::AppConfig,
    errors::ErrorResponse,
    handlers::products::products_routes,
    repositories::SeaOrmProductRepository,
    versioning::ApiVersion,
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Composes the catalog services over a sea-orm backed gateway
    pub fn new(db: Arc<DatabaseConnection>, config: AppConfig) -> Self {
        let repository = Arc::new(SeaOrmProductRepository::new(db.clone()));
        Self::with_services(db, config, handlers::AppServices::new(repository))
    }

    /// State over externally built services
    pub fn with_services(
        db: Arc<DatabaseConnection>,
        config: AppConfig,
        services: handlers::AppServices,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            services,
        }
    }
}

/// Version 1 routes: unpaged product listing
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().nest("/products", products_routes(ApiVersion::V1))
}

/// Version 2 routes: paged product listing
pub fn api_v2_routes() -> Router<AppState> {
    Router::new().nest("/products", products_routes(ApiVersion::V2))
}

/// Builds the CORS layer from configured origins
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    } else if cfg.should_allow_permissive_cors() {
        info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        CorsLayer::permissive()
    } else {
        warn!("No CORS origins configured; cross-origin requests will be rejected");
        CorsLayer::new()
    }
}

/// Renders a handler panic as the standard 500 document
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %details, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(Some(details))),
    )
        .into_response()
}

/// Full application router: versioned API, health, docs and the HTTP stack
pub fn build_router(state: AppState) -> Router {
    let cfg = state.config.clone();

    let versioned = Router::new()
        .nest(&ApiVersion::V1.prefix(), api_v1_routes())
        .nest(&ApiVersion::V2.prefix(), api_v2_routes())
        .layer(axum::middleware::from_fn(
            versioning::api_version_middleware,
        ));

    let mut app = Router::<AppState>::new()
        .route("/", get(|| async { "eshop-catalog up" }))
        .merge(versioned)
        .nest("/health", health::health_routes(state.db.clone()));

    if cfg.swagger_enabled() {
        app = app.merge(openapi::swagger_ui());
    }

    app.layer(TimeoutLayer::new(cfg.request_timeout()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(telemetry::configure_http_tracing())
        .layer(cors_layer(&cfg))
        .layer(axum::middleware::from_fn_with_state(
            cfg.expose_error_details(),
            errors::error_details_middleware,
        ))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(telemetry::request_id_middleware))
        .with_state(state)
}
