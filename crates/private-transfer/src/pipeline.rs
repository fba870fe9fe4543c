//! submission / extraction facade
//!
//! ```text
//! intent ─► descriptor ─► ProvingService::sign ─► wire::adapt ─► Classifier
//!                                                                   │
//!                       submit (in order, best effort) ◄── batches ◄┘
//!                       extract (single batch -> relay call bytes)
//! ```

use crate::asset_id::AssetId;
use crate::batch::{into_batches, single_batch, Batch};
use crate::chain::{BatchMode, ChainClient, Extrinsic, TxStatus};
use crate::classify::{Classifier, LedgerCall};
use crate::config::{PipelineConfig, SubmissionPolicy};
use crate::error::{Result, SubmissionError, TransferError};
use crate::intent::{AssetClass, AssetMetadata, TransferDescriptor, TransferIntent, NFT_AMOUNT};
use crate::post::SignedPost;
use crate::prover::{ProvingService, SignRequest};
use crate::wire::{self, Asset};
use tracing::{debug, error, info};

/// output of the signing half of the pipeline, nothing submitted yet
#[derive(Clone, Debug)]
pub struct Prepared {
    /// posts exactly as the proving module returned them
    pub posts: Vec<SignedPost>,
    pub batches: Vec<Batch>,
}

impl Prepared {
    pub fn call_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }
}

/// result of one batch submission
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    pub index: usize,
    pub calls: usize,
    pub result: std::result::Result<TxStatus, SubmissionError>,
}

/// per-batch results of a submission run
#[derive(Clone, Debug, Default)]
pub struct SubmissionReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl SubmissionReport {
    pub fn all_included(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// first failure as an error, for callers that want all-or-nothing semantics
    pub fn into_result(self) -> Result<Vec<TxStatus>> {
        self.outcomes
            .into_iter()
            .map(|o| o.result.map_err(TransferError::from))
            .collect()
    }
}

/// relay-ready call bytes of a single batch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayPayload(pub Vec<u8>);

impl RelayPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `0x`-prefixed hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

pub struct TransferPipeline<P, C> {
    prover: P,
    chain: C,
    config: PipelineConfig,
}

impl<P: ProvingService, C: ChainClient> TransferPipeline<P, C> {
    pub fn new(prover: P, chain: C, config: PipelineConfig) -> Self {
        Self {
            prover,
            chain,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// sign, adapt, classify and batch without touching the chain's state
    pub async fn prepare(&self, intent: TransferIntent, class: AssetClass) -> Result<Prepared> {
        let network = self.config.network;
        let descriptor = TransferDescriptor::build(&intent, class);
        info!(
            kind = intent.kind(),
            %class,
            asset = %intent.asset_id(),
            value = descriptor.asset().value,
            %network,
            "built transfer descriptor"
        );

        let asset_metadata = if intent.needs_metadata() {
            Some(self.asset_metadata(intent.asset_id(), class).await?)
        } else {
            None
        };

        let request = SignRequest {
            descriptor,
            asset_metadata,
            network,
        };
        let posts = self.prover.sign(&request).await?;
        info!(posts = posts.len(), "proving module returned posts");

        let adapted = wire::adapt_all(&posts)?;
        let calls = self.classifier(&intent, class).await?.classify_all(adapted)?;

        let batches = match self.config.policy {
            SubmissionPolicy::BestEffort => into_batches(calls),
            SubmissionPolicy::Atomic => single_batch(calls),
        };
        debug!(batches = batches.len(), "batched calls");

        Ok(Prepared { posts, batches })
    }

    /// prepare and submit
    pub async fn transfer(
        &self,
        intent: TransferIntent,
        class: AssetClass,
    ) -> Result<SubmissionReport> {
        let prepared = self.prepare(intent, class).await?;
        Ok(self.submit(prepared.batches).await)
    }

    /// prepare and extract relay bytes instead of submitting
    pub async fn transfer_payload(
        &self,
        intent: TransferIntent,
        class: AssetClass,
    ) -> Result<RelayPayload> {
        let prepared = self.prepare(intent, class).await?;
        self.extract(prepared.batches)
    }

    /// submit batches one after another, waiting for each to be accepted
    ///
    /// a failed batch is logged and recorded; later batches are still attempted
    pub async fn submit(&self, batches: Vec<Batch>) -> SubmissionReport {
        let mode = self.batch_mode();
        let total = batches.len();
        let mut report = SubmissionReport::default();

        for (index, batch) in batches.into_iter().enumerate() {
            let calls = batch.len();
            let result = self.submit_batch(batch, mode).await;
            match &result {
                Ok(status) => info!(
                    batch = index + 1,
                    total,
                    calls,
                    tx = %hex::encode(status.tx_hash()),
                    "batch accepted"
                ),
                Err(e) => error!(batch = index + 1, total, calls, error = %e, "batch failed"),
            }
            report.outcomes.push(BatchOutcome {
                index,
                calls,
                result,
            });
        }

        report
    }

    /// call bytes of the single batch, for remote execution on another chain
    pub fn extract(&self, batches: Vec<Batch>) -> Result<RelayPayload> {
        let batch = match <[Batch; 1]>::try_from(batches) {
            Ok([batch]) => batch,
            Err(batches) => {
                return Err(TransferError::Relay(format!(
                    "relay needs exactly one batch, got {}",
                    batches.len()
                )))
            }
        };

        let extrinsic = self.build_batch(batch, self.batch_mode())?;
        let payload = RelayPayload(extrinsic.call_data().to_vec());
        debug!(bytes = payload.0.len(), "extracted relay payload");
        Ok(payload)
    }

    /// move a public balance to another public account, no proof involved
    pub async fn public_transfer(
        &self,
        asset_id: AssetId,
        amount: u128,
        class: AssetClass,
        destination: [u8; 32],
    ) -> SubmissionReport {
        let value = if class.is_fungible() { amount } else { NFT_AMOUNT };
        let call = LedgerCall::PublicTransfer {
            asset: Asset::new(asset_id, value),
            destination,
        };
        self.submit(into_batches(vec![call])).await
    }

    async fn asset_metadata(&self, id: &AssetId, class: AssetClass) -> Result<AssetMetadata> {
        let registered = self
            .chain
            .registered_asset(id)
            .await
            .map_err(|e| TransferError::Metadata(e.to_string()))?
            .ok_or_else(|| TransferError::Metadata(format!("asset {} is not registered", id)))?;
        let metadata =
            AssetMetadata::for_class(class, &registered).map_err(TransferError::Metadata)?;
        debug!(decimals = metadata.decimals, symbol = %metadata.symbol, "asset metadata");
        Ok(metadata)
    }

    async fn classifier(&self, intent: &TransferIntent, class: AssetClass) -> Result<Classifier> {
        // deposits only mint; anything spending shielded notes may emit private transfers
        if class != AssetClass::SoulBound || matches!(intent, TransferIntent::ToPrivate { .. }) {
            return Ok(Classifier::new(class));
        }
        let sender = self.prover.address(self.config.network).await?;
        Ok(Classifier::soul_bound(*intent.asset_id(), &sender))
    }

    fn batch_mode(&self) -> BatchMode {
        match self.config.policy {
            SubmissionPolicy::BestEffort => BatchMode::Batch,
            SubmissionPolicy::Atomic => BatchMode::BatchAll,
        }
    }

    fn build_batch(
        &self,
        batch: Batch,
        mode: BatchMode,
    ) -> std::result::Result<C::Extrinsic, SubmissionError> {
        let calls = batch
            .calls()
            .iter()
            .map(|call| self.chain.build_call(call))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.chain.build_batch(calls, mode)
    }

    async fn submit_batch(
        &self,
        batch: Batch,
        mode: BatchMode,
    ) -> std::result::Result<TxStatus, SubmissionError> {
        let extrinsic = self.build_batch(batch, mode)?;
        self.chain
            .submit_and_watch(&extrinsic, &self.config.signer)
            .await
    }
}
