// src/config.rs

use crate::{db::LedgerRepository, services::ledger_service::LedgerService};
use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::{env, time::Duration};

// ---
// Conexão com o banco (as cinco opções reconhecidas)
// ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "stock_ledger".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Lê DB_HOST, DB_PORT, DB_USER, DB_PASSWORD e DB_NAME; o que faltar usa o padrão.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_PORT inválida: {:?}", raw))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    fn pool_options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }
}

// ---
// Estado compartilhado
// ---
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub ledger_service: LedgerService,
}

impl AppState {
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let db_pool = DatabaseConfig::pool_options()
            .connect_with(config.connect_options())
            .await
            .with_context(|| {
                format!(
                    "Falha ao conectar em {}:{}/{}",
                    config.host, config.port, config.database
                )
            })?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool))
    }

    /// Pool sem conexão imediata; a primeira consulta é quem conecta.
    pub fn lazy(config: &DatabaseConfig) -> Self {
        Self::with_pool(DatabaseConfig::pool_options().connect_lazy_with(config.connect_options()))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool) -> Self {
        let ledger_repo = LedgerRepository::new(db_pool.clone());
        let ledger_service = LedgerService::new(ledger_repo);

        Self {
            db_pool,
            ledger_service,
        }
    }
}
