//! dry-run chain client
//!
//! encodes calls exactly as they would go on chain and records submissions
//! instead of broadcasting them. used by the cli when no node is wired in,
//! and as the reference `ChainClient` implementation.

use crate::{
    config::{ChainConfig, ClientConfig},
    encode::{blake2_256, CallEncoder, ScaleExtrinsic},
    error::{ChainError, Result},
};

use async_trait::async_trait;
use private_transfer::{
    AssetId, BatchMode, ChainClient, Extrinsic, LedgerCall, RegisteredAsset, SubmissionError,
    TxStatus,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// connection state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected { best: u32 },
}

/// what was submitted, by whom, and where it landed
#[derive(Clone, Debug)]
pub struct SubmittedExtrinsic {
    pub signer: String,
    pub extrinsic: ScaleExtrinsic,
    pub block: u32,
}

pub struct DryRunClient {
    config: ClientConfig,
    encoder: CallEncoder,
    state: Arc<RwLock<ConnectionState>>,
    assets: Arc<RwLock<HashMap<AssetId, RegisteredAsset>>>,
    submitted: Arc<RwLock<Vec<SubmittedExtrinsic>>>,
}

impl DryRunClient {
    /// create new client with config
    pub fn new(config: ClientConfig) -> Self {
        Self {
            encoder: CallEncoder::new(config.chain.pallets),
            config,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            assets: Arc::new(RwLock::new(HashMap::new())),
            submitted: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// create and connect
    pub async fn connect_to(chain: ChainConfig) -> Result<Self> {
        let client = Self::new(ClientConfig::with_chain(chain));
        client.connect().await?;
        Ok(client)
    }

    pub async fn connect(&self) -> Result<()> {
        *self.state.write().await = ConnectionState::Connecting;
        tracing::info!(
            "connecting to {} at {} (dry run)",
            self.config.chain.name,
            self.config.chain.rpc_endpoint
        );
        *self.state.write().await = ConnectionState::Connected { best: 0 };
        Ok(())
    }

    pub async fn state(&self) -> ConnectionState {
        self.state.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.read().await, ConnectionState::Connected { .. })
    }

    /// add an asset to the simulated registry
    pub async fn register_asset(&self, id: AssetId, asset: RegisteredAsset) {
        tracing::debug!("registering asset {} as {:?}", id, asset);
        self.assets.write().await.insert(id, asset);
    }

    pub async fn submitted(&self) -> Vec<SubmittedExtrinsic> {
        self.submitted.read().await.clone()
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.config.chain
    }

    async fn include(&self, extrinsic: &ScaleExtrinsic, signer: &str) -> Result<TxStatus> {
        let block = {
            let mut state = self.state.write().await;
            match &mut *state {
                ConnectionState::Connected { best } => {
                    *best += 1;
                    *best
                }
                _ => return Err(ChainError::NotConnected),
            }
        };

        self.submitted.write().await.push(SubmittedExtrinsic {
            signer: signer.to_string(),
            extrinsic: extrinsic.clone(),
            block,
        });

        Ok(TxStatus::InBlock {
            tx_hash: extrinsic.hash(),
            block_hash: blake2_256(&block.to_le_bytes()),
        })
    }
}

#[async_trait]
impl ChainClient for DryRunClient {
    type Extrinsic = ScaleExtrinsic;

    async fn registered_asset(
        &self,
        id: &AssetId,
    ) -> std::result::Result<Option<RegisteredAsset>, SubmissionError> {
        if !self.is_connected().await {
            return Err(ChainError::NotConnected.into());
        }
        Ok(self.assets.read().await.get(id).cloned())
    }

    fn build_call(
        &self,
        call: &LedgerCall,
    ) -> std::result::Result<ScaleExtrinsic, SubmissionError> {
        let bytes = self.encoder.encode_call(call)?;
        tracing::debug!("encoded {} ({} bytes)", call.name(), bytes.len());
        Ok(ScaleExtrinsic::from_call(bytes))
    }

    fn build_batch(
        &self,
        calls: Vec<ScaleExtrinsic>,
        mode: BatchMode,
    ) -> std::result::Result<ScaleExtrinsic, SubmissionError> {
        if calls.is_empty() {
            return Err(ChainError::EncodingError("empty batch".into()).into());
        }
        let bytes = self
            .encoder
            .encode_batch(calls.iter().map(|c| c.call_data()), mode);
        Ok(ScaleExtrinsic::from_call(bytes))
    }

    async fn submit_and_watch(
        &self,
        extrinsic: &ScaleExtrinsic,
        signer: &str,
    ) -> std::result::Result<TxStatus, SubmissionError> {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let status = tokio::time::timeout(timeout, self.include(extrinsic, signer))
            .await
            .map_err(|_| ChainError::Timeout("inclusion".into()))??;
        tracing::info!(
            "{} included, tx 0x{}",
            signer,
            hex::encode(status.tx_hash())
        );
        Ok(status)
    }
}
