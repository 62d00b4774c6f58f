// src/bin/fill_template.rs

use std::process::ExitCode;

use clap::Parser;

use stock_ledger::tools::{init_cli_logging, parse_args};
use stock_ledger::tools::template::{fill_file, parse_assignment};

#[derive(Parser)]
#[command(name = "fill-template")]
#[command(about = "Preenche os placeholders {nome} de um template de texto", long_about = None)]
struct Cli {
    /// Arquivo de template
    #[arg(default_value = "templates/greeting.txt")]
    path: String,

    /// Valor de um placeholder (nome=valor); pode repetir
    #[arg(long = "set", value_parser = parse_assignment)]
    values: Vec<(String, String)>,
}

// Usado quando nenhum --set é informado.
fn sample_values() -> Vec<(String, String)> {
    [("name", "Ana"), ("count", "3"), ("product", "apple")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> ExitCode {
    init_cli_logging();

    let cli: Cli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    let values = if cli.values.is_empty() {
        sample_values()
    } else {
        cli.values
    };

    match fill_file(&cli.path, &values) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
