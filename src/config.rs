use anyhow::{ Context, Result };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub conseil: ConseilConfig,
    pub maps: MapsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConseilConfig {
    pub server: String,
    pub api_key: String,
    pub network: String,
}

/// The three big map ids the assembler reads: ownership ledger, token
/// details, token metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    pub ledger: u64,
    pub tokens: u64,
    pub metadata: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conseil: ConseilConfig {
                server: "https://conseil-prod.cryptonomic-infra.tech".to_string(),
                api_key: String::new(),
                network: "mainnet".to_string(),
            },
            maps: MapsConfig {
                ledger: 511,
                tokens: 514,
                metadata: 522,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs
            ::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = serde_json
            ::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        // Validate required fields
        if config.conseil.api_key.is_empty() {
            return Err(anyhow::anyhow!("conseil.api_key is required in config"));
        }

        Url::parse(&config.conseil.server).with_context(||
            format!("conseil.server is not a valid URL: {}", config.conseil.server)
        )?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json
            ::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    pub fn reload(&mut self, path: &str) -> Result<()> {
        *self = Self::load(path)?;
        Ok(())
    }
}
