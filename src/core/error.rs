use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Configuration error: {0}")] Config(String),

    #[error("Network error: {0}")] Network(String),

    #[error("Conseil API error: {0}")] Api(String),

    #[error("Parse error: {0}")] Parse(String),

    #[error("Invalid address: {0}")] InvalidAddress(String),

    #[error("Serialization error: {0}")] Serialization(#[from] serde_json::Error),
}

pub type IndexerResult<T> = Result<T, IndexerError>;
