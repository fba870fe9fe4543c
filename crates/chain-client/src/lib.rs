//! chain-client: substrate side of shielded transfers
//!
//! encodes MantaPay and utility calls, submits them (dry run by default) and
//! packages relay payloads for xcm remote transact
//!
//! ## presets
//!
//! - dolphin: `wss://ws.dolphin.engineering`
//! - calamari: `wss://ws.calamari.systems`
//! - manta: `wss://ws.manta.systems`
//!
//! ## usage
//!
//! ```rust,ignore
//! let chain = DryRunClient::connect_to(ChainConfig::calamari()).await?;
//! let pipeline = TransferPipeline::new(prover, chain, config);
//! ```

pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod xcm;

pub use client::*;
pub use config::*;
pub use encode::*;
pub use error::*;
pub use xcm::{RemoteTransact, TransactWeights};
