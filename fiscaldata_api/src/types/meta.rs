use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One flat dataset record as returned by the service. Every field value is
/// a JSON string (numbers and dates included); downstream coercion owns the
/// typing.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Page metadata. The service spells the map keys in camelCase and the
/// totals in kebab-case.
#[derive(Serialize, Deserialize)]
pub struct Meta {
    pub count: i64,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(rename = "dataTypes", default)]
    pub data_types: HashMap<String, String>,
    #[serde(rename = "dataFormats", default)]
    pub data_formats: HashMap<String, String>,
    #[serde(rename = "total-count")]
    pub total_count: i64,
    #[serde(rename = "total-pages")]
    pub total_pages: i64,
}

/// Absolute page links reported alongside each page.
#[derive(Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

/// The dataset response envelope: `{ "data": [...], "meta": {...}, "links": {...} }`.
///
/// Only `data` is required; `meta` and `links` decode when present so that
/// minimal payloads (and fixtures) stay valid.
#[derive(Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub links: Option<Links>,
}
