pub mod client;
pub mod query;

pub use client::ConseilClient;
pub use query::{ ConseilOperator, ConseilQuery, Predicate };

use crate::core::IndexerResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Result row from the `big_map_contents` entity. Conseil returns `key` and
/// `value` as whatever JSON scalar the indexer stored, so both are kept raw
/// and coerced to text on access.
#[derive(Debug, Clone, Deserialize)]
pub struct BigMapRow {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub key_hash: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl BigMapRow {
    pub fn key_text(&self) -> String {
        text_of(&self.key)
    }

    pub fn value_text(&self) -> String {
        text_of(&self.value)
    }

    pub fn key_hash_text(&self) -> &str {
        self.key_hash.as_deref().unwrap_or("")
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
pub trait BigMapSource {
    async fn big_map_rows(&self, query: &ConseilQuery) -> IndexerResult<Vec<BigMapRow>>;
}
