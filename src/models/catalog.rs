// src/models/catalog.rs

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

// Catálogos fixos exibidos no formulário: nome de exibição -> código.
// A ordem aqui é a ordem em que as opções aparecem na página.

pub static PRODUCTS: &[(&str, &str)] = &[
    ("apple", "apple001"),
    ("banana", "banana001"),
    ("strawberry", "strawberry001"),
];

pub static COMPANIES: &[(&str, &str)] = &[
    ("沃尔玛", "CMPN001"),
    ("亚马逊", "CMPN002"),
];

pub static WAREHOUSES: &[(&str, &str)] = &[
    ("北京京邦达贸易有限公司", "WRHS001"),
    ("顺丰控股股份有限公司", "WRHS002"),
];

// Sentido da movimentação: rótulo -> valor de drcr enviado no formulário.
pub static DRCR_OPTIONS: &[(&str, &str)] = &[("IN", "1"), ("OUT", "-1"), ("CONTRACT", "0")];

/// Rótulo de um valor de `drcr` (`1`, `-1` ou `0`).
pub fn drcr_label(drcr: i64) -> Option<&'static str> {
    let value = drcr.to_string();
    DRCR_OPTIONS
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(label, _)| *label)
}

/// Um catálogo serializado como objeto JSON, preservando a ordem.
#[derive(Debug, Clone, Copy)]
pub struct Catalog(pub &'static [(&'static str, &'static str)]);

impl Catalog {
    pub fn code_of(&self, name: &str) -> Option<&'static str> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, code)| *code)
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct Catalogs {
    #[schema(value_type = std::collections::HashMap<String, String>)]
    pub products: Catalog,
    #[schema(value_type = std::collections::HashMap<String, String>)]
    pub companies: Catalog,
    #[schema(value_type = std::collections::HashMap<String, String>)]
    pub warehouses: Catalog,
    #[schema(value_type = std::collections::HashMap<String, String>)]
    pub drcr: Catalog,
}

impl Catalogs {
    pub fn all() -> Self {
        Self {
            products: Catalog(PRODUCTS),
            companies: Catalog(COMPANIES),
            warehouses: Catalog(WAREHOUSES),
            drcr: Catalog(DRCR_OPTIONS),
        }
    }
}
