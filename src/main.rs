//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use stock_ledger::{
    build_router,
    config::{AppState, DatabaseConfig, ServerConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // O .env vem antes do logger para que RUST_LOG possa vir dele.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Configuração lida uma única vez, na subida do processo
    let db_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env();

    let app_state = AppState::new(&db_config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&server_config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", server_config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("Erro no servidor Axum")?;

    Ok(())
}
