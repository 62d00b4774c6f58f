// src/models/ledger.rs

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

/// Formato de `create_time` na entrada e na saída.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Prefixo do documento seguido de exatamente 12 dígitos (casamento pelo início).
static BILL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(IN|OUT|CONTRACT)\d{12}").expect("regex de bill_id"));

// Único formato de identificador que aceitamos interpolar no SQL.
static TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^t_[A-Za-z]+_[0-9]{8}$").expect("regex de tabela"));

// ---
// 1. InventoryEntry (a "Movimentação" enviada pelo formulário)
// ---
// Só a quantidade é estrita na desserialização; os demais campos chegam como Option
// para que a checagem de quantidade aconteça primeiro, seja qual for o resto do corpo.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct InventoryEntry {
    #[validate(required(message = "O campo 'product_id' é obrigatório."))]
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "apple001")]
    pub product_id: Option<String>,

    #[validate(range(min = 1, max = 10, message = "A quantidade deve estar entre 1 e 10."))]
    #[serde(deserialize_with = "coerce_int")]
    pub quantity: i64,

    // 1 = IN, -1 = OUT, 0 = CONTRACT
    #[validate(required(message = "O campo 'drcr' deve ser um número inteiro."))]
    #[serde(default, deserialize_with = "lenient_int")]
    #[schema(value_type = i64, example = 1)]
    pub drcr: Option<i64>,

    #[validate(required(message = "O campo 'company_id' é obrigatório."))]
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "CMPN001")]
    pub company_id: Option<String>,

    #[validate(required(message = "O campo 'warehouse_id' é obrigatório."))]
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "WRHS001")]
    pub warehouse_id: Option<String>,

    #[validate(
        required(message = "O campo 'bill_id' é obrigatório."),
        regex(
            path = *BILL_ID_RE,
            message = "O bill_id deve ser IN, OUT ou CONTRACT seguido de 12 dígitos."
        )
    )]
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "IN202405011000")]
    pub bill_id: Option<String>,

    #[validate(
        required(message = "O campo 'create_time' é obrigatório."),
        custom(function = "validate_create_time")
    )]
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "2024-05-01 10:00:00")]
    pub create_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = String, example = "IN-APPLE001")]
    pub description: Option<String>,
}

impl InventoryEntry {
    /// Valida e converte para a forma gravável.
    pub fn into_ledger_entry(self) -> Result<LedgerEntry, AppError> {
        self.validate()?;

        let raw_time = required(self.create_time, "create_time")?;
        let create_time = parse_time(&raw_time).ok_or_else(|| {
            AppError::InvalidPayload(format!("create_time inválido: {:?}", raw_time))
        })?;

        Ok(LedgerEntry {
            product_id: required(self.product_id, "product_id")?,
            quantity: self.quantity,
            drcr: self.drcr.ok_or_else(|| AppError::InvalidPayload("drcr ausente".into()))?,
            company_id: required(self.company_id, "company_id")?,
            warehouse_id: required(self.warehouse_id, "warehouse_id")?,
            bill_id: required(self.bill_id, "bill_id")?,
            create_time,
            description: self.description.unwrap_or_default(),
        })
    }
}

// Depois de validate() os campos obrigatórios estão presentes.
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::InvalidPayload(format!("campo ausente: {}", field)))
}

fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

fn validate_create_time(raw: &str) -> Result<(), ValidationError> {
    if parse_time(raw).is_none() {
        let mut err = ValidationError::new("format");
        err.message = Some("O create_time deve seguir o formato YYYY-MM-DD HH:MM:SS.".into());
        return Err(err);
    }
    Ok(())
}

/// Movimentação validada, pronta para o repositório.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub product_id: String,
    pub quantity: i64,
    pub drcr: i64,
    pub company_id: String,
    pub warehouse_id: String,
    pub bill_id: String,
    pub create_time: NaiveDateTime,
    pub description: String,
}

// ---
// 2. LedgerRow (uma linha de uma tabela t_<familia>_<data>)
// ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LedgerRow {
    pub id: i64,
    pub name: String,
    pub product_id: String,
    pub quantity: i64,
    pub drcr: i64,
    pub company_id: String,
    pub warehouse_id: String,
    pub bill_id: String,
    #[serde(with = "ledger_time")]
    #[schema(value_type = String, example = "2024-05-01 10:00:00")]
    pub create_time: NaiveDateTime,
    pub description: String,
}

// ---
// 3. LedgerTable (o nome de tabela já validado)
// ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTable(String);

impl LedgerTable {
    pub fn new(family: &str, date_stamp: &str) -> Result<Self, AppError> {
        let name = format!("t_{}_{}", family, date_stamp);
        if !TABLE_NAME_RE.is_match(&name) {
            return Err(AppError::InvalidTableName(name));
        }
        Ok(Self(name))
    }

    pub fn for_entry(entry: &LedgerEntry) -> Result<Self, AppError> {
        let stamp = date_stamp(&entry.create_time.format(TIME_FORMAT).to_string());
        Self::new(product_family(&entry.product_id), &stamp)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identificador entre aspas, pronto para o texto SQL.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequência alfabética inicial do produto: `apple001` -> `apple`.
pub fn product_family(product_id: &str) -> &str {
    let end = product_id
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(product_id.len());
    &product_id[..end]
}

/// Produto sem os dígitos finais: `ab12cd34` -> `ab12cd`.
pub fn short_name(product_id: &str) -> &str {
    product_id.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// `2024-05-01 10:00:00` -> `20240501`.
pub fn date_stamp(create_time: &str) -> String {
    create_time
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(8)
        .collect()
}

// ---
// Serde helpers
// ---

// Mesmas regras de int(): inteiros, textos numéricos, floats sem parte fracionária e booleanos.
fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// A quantidade é o único campo cujo tipo errado derruba a requisição.
fn coerce_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    int_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("valor não numérico: {}", value)))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| int_from_value(&v)))
}

// Texto livre: números e booleanos viram texto, null/objetos/listas contam como ausentes.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

mod ledger_time {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIME_FORMAT))
    }
}
