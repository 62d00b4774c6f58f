// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- LEDGER ---
        handlers::orders::index,
        handlers::orders::submit_entry,
        handlers::orders::get_catalogs,
    ),
    components(
        schemas(
            // --- Ledger ---
            models::ledger::InventoryEntry,
            models::ledger::LedgerRow,
            handlers::orders::LedgerResponse,

            // --- Catálogos ---
            models::catalog::Catalogs,
        )
    ),
    tags(
        (name = "Ledger", description = "Movimentações de estoque por produto e por dia")
    )
)]
pub struct ApiDoc;
