pub mod assembler;
pub mod parse;
pub mod types;

pub use assembler::CollectionAssembler;
pub use types::{ CollectionEntry, ExtraValue, ObjktDetails, OwnedObjkt };

use crate::config::Config;
use crate::conseil::ConseilClient;
use crate::core::IndexerResult;

/// Assemble the collection held by `address` against the configured Conseil
/// deployment. Fails if the indexer is unreachable or rejects a query.
pub async fn collection_for_address(
    config: &Config,
    address: &str
) -> IndexerResult<Vec<CollectionEntry>> {
    let client = ConseilClient::new(&config.conseil)?;

    CollectionAssembler::new(client, config.maps.clone()).collection_for_address(address).await
}
