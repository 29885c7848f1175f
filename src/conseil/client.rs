use crate::config::ConseilConfig;
use crate::conseil::{ BigMapRow, BigMapSource, ConseilQuery };
use crate::core::{ IndexerError, IndexerResult };
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The one Conseil entity this crate reads.
pub const BIG_MAP_CONTENTS: &str = "big_map_contents";

pub struct ConseilClient {
    client: Client,
    server: String,
    api_key: String,
    network: String,
}

impl ConseilClient {
    /// Create a new ConseilClient with default settings
    pub fn new(config: &ConseilConfig) -> IndexerResult<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Create a new ConseilClient with custom timeout
    pub fn with_timeout(config: &ConseilConfig, timeout: Duration) -> IndexerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("objktscan/0.1")
            .build()
            .map_err(|e| IndexerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            server: config.server.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            network: config.network.clone(),
        })
    }

    fn entity_url(&self, entity: &str) -> String {
        format!("{}/v2/data/tezos/{}/{}", self.server, self.network, entity)
    }

    /// POST a query against a Conseil entity and decode the result rows.
    pub async fn select<T>(&self, entity: &str, query: &ConseilQuery) -> IndexerResult<Vec<T>>
        where T: DeserializeOwned
    {
        let url = self.entity_url(entity);

        log::debug!("Querying Conseil entity {} at {}", entity, url);

        let response = self.client
            .post(&url)
            .header("apiKey", &self.api_key)
            .json(query)
            .send().await
            .map_err(|e| IndexerError::Network(format!("Conseil request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Conseil query for {} failed with status {}: {}", entity, status, body);
            return Err(
                IndexerError::Api(format!("{} returned status {}: {}", entity, status, body))
            );
        }

        let rows: Vec<T> = response
            .json().await
            .map_err(|e| IndexerError::Parse(format!("Failed to decode {} rows: {}", entity, e)))?;

        log::debug!("Conseil returned {} rows for {}", rows.len(), entity);

        Ok(rows)
    }
}

#[async_trait]
impl BigMapSource for ConseilClient {
    async fn big_map_rows(&self, query: &ConseilQuery) -> IndexerResult<Vec<BigMapRow>> {
        self.select(BIG_MAP_CONTENTS, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conseil::ConseilOperator;
    use serde_json::json;

    fn test_config() -> ConseilConfig {
        ConseilConfig {
            server: "https://conseil-prod.cryptonomic-infra.tech/".to_string(),
            api_key: "test_key".to_string(),
            network: "mainnet".to_string(),
        }
    }

    #[test]
    fn test_entity_url_shape() {
        let client = ConseilClient::new(&test_config()).unwrap();
        assert_eq!(
            client.entity_url(BIG_MAP_CONTENTS),
            "https://conseil-prod.cryptonomic-infra.tech/v2/data/tezos/mainnet/big_map_contents"
        );
    }

    // Needs a real API key and network access, skipped in CI
    #[tokio::test]
    #[ignore]
    async fn test_select_live() {
        let mut config = test_config();
        config.api_key = std::env::var("CONSEIL_API_KEY").unwrap_or_default();

        let client = ConseilClient::new(&config).unwrap();
        let query = ConseilQuery::new()
            .fields(["key", "value"])
            .predicate("big_map_id", ConseilOperator::Eq, vec![json!(511)])
            .limit(5);

        let rows = client.big_map_rows(&query).await.unwrap();
        assert!(rows.len() <= 5);
    }
}
