// src/lib.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;
pub mod tools;

pub use crate::config::AppState;

/// Monta o router completo; o `main` e os testes usam o mesmo.
pub fn build_router(app_state: AppState) -> Router {
    let ledger_routes = Router::new()
        .route("/"
               ,get(handlers::orders::index)
               .post(handlers::orders::submit_entry)
        )
        .route("/api/catalogs", get(handlers::orders::get_catalogs));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(ledger_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}
