// src/common/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;
use thiserror::Error;

// Ordem em que os campos validados são reportados: a quantidade vence todos os outros.
const VALIDATION_PRIORITY: [&str; 7] = [
    "quantity",
    "bill_id",
    "create_time",
    "product_id",
    "drcr",
    "company_id",
    "warehouse_id",
];

// ---
// Erros da aplicação web
// ---
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Payload inválido: {0}")]
    InvalidPayload(String),

    #[error("Nome de tabela inválido: {0}")]
    InvalidTableName(String),

    // O driver já traz a mensagem detalhada; ela vai para o cliente como está.
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    /// Mensagem única exposta ao cliente.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let field_errors = errors.field_errors();
                VALIDATION_PRIORITY
                    .iter()
                    .filter_map(|field| field_errors.get(*field))
                    .chain(field_errors.values())
                    .flat_map(|errs| errs.iter())
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Um ou mais campos são inválidos.".to_string())
            }
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de persistência: {}", e);
            }
            other => {
                tracing::debug!("Requisição rejeitada: {}", other);
            }
        }

        // Toda falha (validação ou persistência) vira 400 com uma única mensagem.
        let body = Json(json!({ "error": self.client_message() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

// ---
// Erros das ferramentas de linha de comando
// ---
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Arquivo não encontrado: {0}")]
    NotFound(String),

    #[error("Formato inválido: {0}")]
    Malformed(String),

    #[error("Erro de E/S: {0}")]
    Io(#[from] io::Error),
}

impl ToolError {
    /// Código de saída do processo para cada tipo de falha.
    /// O `1` fica reservado para uso incorreto dos argumentos.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::NotFound(_) => 2,
            ToolError::Malformed(_) => 3,
            ToolError::Io(_) => 4,
        }
    }

    pub(crate) fn from_io(err: io::Error, path: &str) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ToolError::NotFound(path.to_string())
        } else {
            ToolError::Io(err)
        }
    }
}
