//! OBJKT collection assembly over the Conseil indexer.
//!
//! Given a Tezos address, the crate queries three big maps through Conseil's
//! `/v2/data` endpoint - the ownership ledger, the token detail map and the
//! token metadata map - decodes the Michelson text blobs each row carries,
//! and merges the three result sets into one entry per held token.
//!
//! ```no_run
//! use objktscan::{ collection, Config };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load("configs.json")?;
//! let entries = collection::collection_for_address(&config, "tz1...").await?;
//! for entry in entries {
//!     println!("{} x{}", entry.token_id, entry.amount);
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod collection;
pub mod config;
pub mod conseil;
pub mod core;

pub use crate::collection::{
    CollectionAssembler,
    CollectionEntry,
    ExtraValue,
    ObjktDetails,
    OwnedObjkt,
};
pub use crate::config::{ Config, ConseilConfig, MapsConfig };
pub use crate::conseil::{ BigMapRow, BigMapSource, ConseilClient, ConseilOperator, ConseilQuery };
pub use crate::core::{ IndexerError, IndexerResult };
