//! chain client boundary
//!
//! turning a [`LedgerCall`] into runtime call bytes, wrapping calls in a
//! utility batch and submitting are all the chain client's business. the
//! pipeline only relies on the capabilities below.

use crate::asset_id::AssetId;
use crate::classify::LedgerCall;
use crate::error::SubmissionError;
use crate::intent::RegisteredAsset;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// which utility call wraps a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchMode {
    /// `utility.batch`
    #[default]
    Batch,
    /// `utility.batch_all`, reverts every call if one fails
    BatchAll,
}

/// inclusion status returned once a submission is accepted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    InBlock {
        tx_hash: [u8; 32],
        block_hash: [u8; 32],
    },
    Finalized {
        tx_hash: [u8; 32],
        block_hash: [u8; 32],
    },
}

impl TxStatus {
    pub fn tx_hash(&self) -> &[u8; 32] {
        match self {
            TxStatus::InBlock { tx_hash, .. } | TxStatus::Finalized { tx_hash, .. } => tx_hash,
        }
    }
}

/// a built, not yet signed, extrinsic
pub trait Extrinsic {
    /// bare runtime call bytes (pallet index, call index, arguments)
    fn call_data(&self) -> &[u8];

    /// hex of the full encoded extrinsic
    fn to_hex(&self) -> String;
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    type Extrinsic: Extrinsic + Send + Sync;

    /// registry entry for `id`, `None` if the asset is unknown
    async fn registered_asset(
        &self,
        id: &AssetId,
    ) -> Result<Option<RegisteredAsset>, SubmissionError>;

    /// build one extrinsic from a ledger call
    fn build_call(&self, call: &LedgerCall) -> Result<Self::Extrinsic, SubmissionError>;

    /// wrap extrinsics, in order, into one batch extrinsic
    fn build_batch(
        &self,
        calls: Vec<Self::Extrinsic>,
        mode: BatchMode,
    ) -> Result<Self::Extrinsic, SubmissionError>;

    /// sign with `signer`, submit, and wait until the chain accepts it
    async fn submit_and_watch(
        &self,
        extrinsic: &Self::Extrinsic,
        signer: &str,
    ) -> Result<TxStatus, SubmissionError>;
}
