// src/handlers/orders.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        catalog::Catalogs,
        ledger::{InventoryEntry, LedgerRow, TIME_FORMAT},
    },
    tools::template,
};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerResponse {
    pub data: Vec<LedgerRow>,
}

// ---
// Página do formulário
// ---
pub fn render_index(catalogs: &Catalogs, now: &str) -> Result<String, AppError> {
    let catalogs_json = serde_json::to_string(catalogs)
        .map_err(|e| AppError::InvalidPayload(e.to_string()))?
        // Evita que um nome do catálogo feche a tag <script>.
        .replace('<', "\\u003c");

    Ok(template::fill(
        INDEX_TEMPLATE,
        &[("catalogs", catalogs_json.as_str()), ("now", now)],
    ))
}

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Ledger",
    responses(
        (status = 200, description = "Formulário com os catálogos e a hora atual", body = String, content_type = "text/html")
    )
)]
pub async fn index() -> Result<impl IntoResponse, AppError> {
    let now = chrono::Local::now().format(TIME_FORMAT).to_string();
    let page = render_index(&Catalogs::all(), &now)?;
    Ok(Html(page))
}

// GET /api/catalogs
#[utoipa::path(
    get,
    path = "/api/catalogs",
    tag = "Ledger",
    responses(
        (status = 200, description = "Catálogos de produto, empresa e depósito", body = Catalogs)
    )
)]
pub async fn get_catalogs() -> impl IntoResponse {
    Json(Catalogs::all())
}

// POST /
#[utoipa::path(
    post,
    path = "/",
    tag = "Ledger",
    request_body = InventoryEntry,
    responses(
        (status = 200, description = "Conteúdo completo da tabela do dia", body = LedgerResponse),
        (status = 400, description = "Validação ou persistência falhou")
    )
)]
pub async fn submit_entry(
    State(app_state): State<AppState>,
    WithRejection(Json(entry), _): WithRejection<Json<InventoryEntry>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // Quantidade primeiro, depois bill_id, antes de tocar no banco
    let entry = entry.into_ledger_entry()?;

    let data = app_state
        .ledger_service
        .record_entry(&entry)
        .await?;

    Ok((StatusCode::OK, Json(LedgerResponse { data })))
}
