//! cli configuration file

use anyhow::{Context, Result};
use chain_client::{ChainConfig, TransactWeights};
use private_transfer::{AssetId, Network, RegisteredAsset, SubmissionPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::signer::DEFAULT_SIGNER_URL;

/// `shielded-pay.toml`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub network: Network,
    pub signer_url: String,
    /// public account that signs submitted batches
    pub signer: String,
    pub policy: SubmissionPolicy,
    /// overrides the network preset
    pub chain: Option<ChainConfig>,
    pub relay: TransactWeights,
    /// registry entries for the dry-run client
    pub assets: Vec<AssetEntry>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            signer_url: DEFAULT_SIGNER_URL.into(),
            signer: String::new(),
            policy: SubmissionPolicy::default(),
            chain: None,
            relay: TransactWeights::default(),
            assets: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetEntry {
    /// decimal asset id
    pub id: String,
    pub registered: RegisteredAsset,
}

impl AssetEntry {
    pub fn asset_id(&self) -> Result<AssetId> {
        self.id
            .parse()
            .with_context(|| format!("invalid asset id in config: {}", self.id))
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn chain(&self) -> ChainConfig {
        self.chain
            .clone()
            .unwrap_or_else(|| ChainConfig::for_network(self.network))
    }
}
