//! Assembles the collection held by an address: one ledger query, then
//! batched detail and metadata lookups fanned out concurrently and merged
//! per token id.

use crate::address::pack_address;
use crate::collection::parse::{ parse_details, parse_metadata_hash, parse_owned_row };
use crate::collection::types::{ CollectionEntry, ObjktDetails };
use crate::config::MapsConfig;
use crate::conseil::{ BigMapSource, ConseilOperator, ConseilQuery };
use crate::core::IndexerResult;
use futures::future::join_all;
use serde_json::json;
use std::collections::HashMap;

/// Upper bound on ledger rows fetched for one address.
const MAX_COLLECTION_ROWS: usize = 10_000;

/// Detail and metadata lookups are fanned out in batches of this many ids.
const BATCH_SIZE: usize = 50;

pub struct CollectionAssembler<S> {
    source: S,
    maps: MapsConfig,
}

impl<S: BigMapSource + Sync> CollectionAssembler<S> {
    pub fn new(source: S, maps: MapsConfig) -> Self {
        Self { source, maps }
    }

    /// Assemble the collection held by `address`: every token with a
    /// non-zero ledger balance, merged with whatever detail and metadata
    /// rows the token and metadata maps hold for it.
    ///
    /// Request failures fail the whole call; rows that fail to decode are
    /// logged and dropped from their map instead.
    pub async fn collection_for_address(
        &self,
        address: &str
    ) -> IndexerResult<Vec<CollectionEntry>> {
        let packed = pack_address(address)?;

        let ledger_query = ConseilQuery::new()
            .fields(["key", "value"])
            .predicate("big_map_id", ConseilOperator::Eq, vec![json!(self.maps.ledger)])
            .predicate(
                "key",
                ConseilOperator::StartsWith,
                vec![json!(format!("Pair 0x{}", packed))]
            )
            .exclude("value", ConseilOperator::Eq, vec![json!(0)])
            .limit(MAX_COLLECTION_ROWS);

        let rows = self.source.big_map_rows(&ledger_query).await?;

        let mut owned = Vec::with_capacity(rows.len());
        for row in &rows {
            match parse_owned_row(row) {
                Some(objkt) => owned.push(objkt),
                None =>
                    log::warn!(
                        "Ledger row {} did not match the expected shape: {}",
                        row.key_text(),
                        row.value_text()
                    ),
            }
        }

        log::info!("Address {} holds {} tokens", address, owned.len());

        let ids: Vec<u64> = owned
            .iter()
            .map(|o| o.token_id)
            .collect();
        let batches = chunked(&ids, BATCH_SIZE);

        let (details, metadata) = tokio::join!(
            self.fetch_details(&batches),
            self.fetch_metadata(&batches)
        );
        let (details, metadata) = (details?, metadata?);

        let entries = owned
            .iter()
            .map(|o| CollectionEntry {
                token_id: o.token_id,
                amount: o.amount,
                details: details.get(&o.token_id).cloned(),
                metadata_hash: metadata.get(&o.token_id).cloned(),
            })
            .collect();

        Ok(entries)
    }

    fn batch_query(&self, big_map_id: u64, ids: &[u64]) -> ConseilQuery {
        // Conseil rejects `in` with a single operand
        let operator = if ids.len() > 1 { ConseilOperator::In } else { ConseilOperator::Eq };
        let set = ids
            .iter()
            .map(|id| json!(id.to_string()))
            .collect();

        ConseilQuery::new()
            .fields(["key", "key_hash", "value"])
            .predicate("big_map_id", ConseilOperator::Eq, vec![json!(big_map_id)])
            .predicate("key", operator, set)
            .limit(ids.len())
    }

    async fn fetch_details(
        &self,
        batches: &[Vec<u64>]
    ) -> IndexerResult<HashMap<u64, ObjktDetails>> {
        let queries: Vec<ConseilQuery> = batches
            .iter()
            .map(|batch| self.batch_query(self.maps.tokens, batch))
            .collect();
        let results = join_all(queries.iter().map(|q| self.source.big_map_rows(q))).await;

        let mut details = HashMap::new();
        for rows in results {
            for row in rows? {
                let key = row.key_text();
                let token_id: u64 = match key.parse() {
                    Ok(id) => id,
                    Err(_) => {
                        log::warn!("Token row key is not a token id: {}", key);
                        continue;
                    }
                };

                match parse_details(&row.value_text()) {
                    Ok(record) => {
                        details.insert(token_id, record);
                    }
                    Err(e) =>
                        log::warn!("Token {} at {} skipped: {}", token_id, row.key_hash_text(), e),
                }
            }
        }

        Ok(details)
    }

    async fn fetch_metadata(&self, batches: &[Vec<u64>]) -> IndexerResult<HashMap<u64, String>> {
        let queries: Vec<ConseilQuery> = batches
            .iter()
            .map(|batch| self.batch_query(self.maps.metadata, batch))
            .collect();
        let results = join_all(queries.iter().map(|q| self.source.big_map_rows(q))).await;

        let mut metadata = HashMap::new();
        for rows in results {
            for row in rows? {
                let key = row.key_text();
                let token_id: u64 = match key.parse() {
                    Ok(id) => id,
                    Err(_) => {
                        log::warn!("Metadata row key is not a token id: {}", key);
                        continue;
                    }
                };

                match parse_metadata_hash(&row.value_text()) {
                    Ok(hash) => {
                        metadata.insert(token_id, hash);
                    }
                    Err(e) =>
                        log::warn!("Token {} at {} skipped: {}", token_id, row.key_hash_text(), e),
                }
            }
        }

        Ok(metadata)
    }
}

fn chunked(ids: &[u64], chunk_size: usize) -> Vec<Vec<u64>> {
    ids.chunks(chunk_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}
