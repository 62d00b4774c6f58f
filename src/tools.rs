// Utilitários de linha de comando, sem relação com o fluxo web.
pub mod exports;
pub mod template;

use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

/// Logger das ferramentas: vai para o stderr para não misturar com a saída.
pub fn init_cli_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Argumentos errados saem com 1; --help e --version saem com 0.
pub fn parse_args<C: Parser>() -> Result<C, ExitCode> {
    C::try_parse().map_err(|e| {
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::from(1),
        }
    })
}
