// src/tools/exports.rs

use std::env;
use std::fs;
use std::sync::LazyLock;

use goblin::pe::PE;
use regex::{Captures, Regex};

use crate::common::error::ToolError;

// $VAR, ${VAR} e %VAR%
static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(\w+)\}|\$(\w+)|%(\w+)%").expect("regex de variável de ambiente")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exports {
    /// O binário não tem diretório de exportação.
    None,
    /// Nomes exportados, na ordem da tabela. Exportações só por ordinal são omitidas.
    Named(Vec<String>),
}

/// Expande variáveis de ambiente no caminho; variáveis desconhecidas ficam intactas.
pub fn expand_env(raw: &str) -> String {
    expand_with(raw, |name| env::var(name).ok())
}

pub fn expand_with<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_VAR_RE
        .replace_all(raw, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Abre o módulo em `path` e lista os símbolos exportados.
pub fn list_exports(path: &str) -> Result<Exports, ToolError> {
    let bytes = fs::read(path).map_err(|e| ToolError::from_io(e, path))?;
    parse_exports(&bytes)
}

pub fn parse_exports(bytes: &[u8]) -> Result<Exports, ToolError> {
    let pe = PE::parse(bytes).map_err(|e| ToolError::Malformed(e.to_string()))?;

    if pe.export_data.is_none() {
        return Ok(Exports::None);
    }

    let names = pe
        .exports
        .iter()
        .filter_map(|export| export.name.map(str::to_string))
        .collect();
    Ok(Exports::Named(names))
}
