// src/bin/list_exports.rs

use std::process::ExitCode;

use clap::Parser;

use stock_ledger::tools::{init_cli_logging, parse_args};
use stock_ledger::tools::exports::{expand_env, list_exports, Exports};

#[derive(Parser)]
#[command(name = "list-exports")]
#[command(about = "Lista os símbolos exportados por um módulo binário (DLL/PE)", long_about = None)]
struct Cli {
    /// Caminho do módulo; aceita $VAR, ${VAR} e %VAR%
    dll_path: String,
}

fn main() -> ExitCode {
    init_cli_logging();

    let cli: Cli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let path = expand_env(&cli.dll_path);
    tracing::debug!("Lendo exportações de {}", path);

    match list_exports(&path) {
        Ok(Exports::None) => {
            println!("No exports found in {}", path);
            ExitCode::SUCCESS
        }
        Ok(Exports::Named(names)) => {
            for name in names {
                println!("{}", name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
