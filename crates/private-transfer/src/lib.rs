//! private-transfer: payload assembly for shielded ledger calls
//!
//! turns a transfer intent into proving-module requests, reshapes the signed
//! posts it gets back into the runtime's `TransferPost` layout, maps each post
//! to a ledger call and groups the calls into batches for submission or relay.
//!
//! ## usage
//!
//! ```rust,ignore
//! let config = PipelineConfig::new(Network::Dolphin, "alice");
//! let pipeline = TransferPipeline::new(prover, chain, config);
//!
//! // submit directly
//! let report = pipeline.transfer(intent, AssetClass::Fungible).await?;
//!
//! // or hand the call bytes to another chain
//! let payload = pipeline.transfer_payload(intent, AssetClass::Fungible).await?;
//! ```

pub mod address;
pub mod asset_id;
pub mod batch;
pub mod chain;
pub mod classify;
pub mod config;
pub mod error;
pub mod fixed_bytes;
pub mod intent;
pub mod pipeline;
pub mod post;
pub mod prover;
pub mod wire;

pub use address::{AddressDigest, ShieldedAddress};
pub use asset_id::{asset_id_to_number, number_to_asset_id, AssetId};
pub use batch::{into_batches, single_batch, Batch, MAX_BATCH};
pub use chain::{BatchMode, ChainClient, Extrinsic, TxStatus};
pub use classify::{CallKind, Classifier, LedgerCall, Shape, SoulBoundTag};
pub use config::{Network, PipelineConfig, SubmissionPolicy};
pub use error::*;
pub use intent::{
    parse_amount, AssetClass, AssetMetadata, RegisteredAsset, TransferDescriptor, TransferIntent,
    NFT_AMOUNT,
};
pub use pipeline::{BatchOutcome, Prepared, RelayPayload, SubmissionReport, TransferPipeline};
pub use post::SignedPost;
pub use prover::{ProvingService, SignRequest};
pub use wire::{adapt, adapt_all, AdaptedPost};
