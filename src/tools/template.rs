// src/tools/template.rs

use std::fmt::Display;
use std::fs;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::common::error::ToolError;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("regex de placeholder"));

/// Substitui cada `{nome}` pelo valor correspondente.
///
/// A substituição é literal e feita em uma única passada: o texto inserido não é
/// reprocessado, e placeholders sem valor ficam como estão.
pub fn fill<K, V>(text: &str, values: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: Display,
{
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            match values.iter().find(|(k, _)| k.as_ref() == name) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Lê o template do disco e aplica [`fill`].
pub fn fill_file<K, V>(path: &str, values: &[(K, V)]) -> Result<String, ToolError>
where
    K: AsRef<str>,
    V: Display,
{
    let text = fs::read_to_string(path).map_err(|e| ToolError::from_io(e, path))?;
    Ok(fill(&text, values))
}

/// Interpreta um argumento `nome=valor`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("esperado nome=valor, recebido {:?}", raw)),
    }
}
