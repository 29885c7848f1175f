use serde::{ Deserialize, Serialize };
use std::collections::HashMap;

/// One ledger row: a token held by the queried address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedObjkt {
    pub token_id: u64,
    pub amount: u64,
}

/// Extension attribute value: the token map stores either a single string or
/// a comma-separated list per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Single(String),
    Many(Vec<String>),
}

/// Token detail record decoded from the token big map value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjktDetails {
    pub extras: HashMap<String, ExtraValue>,
    pub price: u64,
    pub artifact_hash: String,
    pub owner: String,
    pub on_sale: bool,
    pub on_auction: bool,
    pub collection_id: u64,
    pub creator: String,
    pub royalty: u64,
    pub edition_index: u64,
    pub edition_size: u64,
}

/// Ownership record merged with whatever detail and metadata rows matched.
/// Tokens the detail or metadata maps know nothing about keep `None` there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub token_id: u64,
    pub amount: u64,
    pub details: Option<ObjktDetails>,
    pub metadata_hash: Option<String>,
}

impl CollectionEntry {
    pub fn bare(owned: &OwnedObjkt) -> Self {
        Self {
            token_id: owned.token_id,
            amount: owned.amount,
            details: None,
            metadata_hash: None,
        }
    }
}
