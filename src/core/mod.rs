pub mod error;

pub use error::{IndexerError, IndexerResult};
