//! SCALE encoding of shielded transfer calls
//!
//! call layout: `pallet index ++ call index ++ args`. every MantaPay call takes
//! the asset type first; the soul-bound private transfer additionally carries
//! the asset id (u128) and the sender's address digest.

use crate::config::PalletIndices;
use crate::error::{ChainError, Result};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use parity_scale_codec::{Compact, Encode};
use private_transfer::{BatchMode, Extrinsic, LedgerCall};

/// unsigned extrinsic format version
pub const EXTRINSIC_VERSION: u8 = 4;

type Blake2b256 = Blake2b<U32>;

pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// a runtime call, encoded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleExtrinsic {
    call: Vec<u8>,
}

impl ScaleExtrinsic {
    pub fn from_call(call: Vec<u8>) -> Self {
        Self { call }
    }

    /// `compact(len) ++ 0x04 ++ call`
    pub fn encode_unsigned(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.call.len() + 1);
        body.push(EXTRINSIC_VERSION);
        body.extend_from_slice(&self.call);
        body.encode()
    }

    pub fn hash(&self) -> [u8; 32] {
        blake2_256(&self.encode_unsigned())
    }
}

impl Extrinsic for ScaleExtrinsic {
    fn call_data(&self) -> &[u8] {
        &self.call
    }

    fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode_unsigned()))
    }
}

/// builds call bytes from the chain's pallet indices
#[derive(Clone, Copy, Debug)]
pub struct CallEncoder {
    pallets: PalletIndices,
}

impl CallEncoder {
    pub fn new(pallets: PalletIndices) -> Self {
        Self { pallets }
    }

    pub fn encode_call(&self, call: &LedgerCall) -> Result<Vec<u8>> {
        let p = &self.pallets;
        let mut out = vec![p.manta_pay];
        match call {
            LedgerCall::Mint { class, post } => {
                out.push(p.to_private);
                class.encode_to(&mut out);
                post.encode_to(&mut out);
            }
            LedgerCall::PrivateTransfer {
                class,
                post,
                soul_bound: None,
            } => {
                out.push(p.private_transfer);
                class.encode_to(&mut out);
                post.encode_to(&mut out);
            }
            LedgerCall::PrivateTransfer {
                class,
                post,
                soul_bound: Some(tag),
            } => {
                let asset_id = tag.asset_id.to_u128().ok_or_else(|| {
                    ChainError::EncodingError(format!(
                        "asset id {} does not fit the runtime's u128",
                        tag.asset_id
                    ))
                })?;
                out.push(p.private_transfer_asset);
                asset_id.encode_to(&mut out);
                class.encode_to(&mut out);
                tag.address_digest.encode_to(&mut out);
                post.encode_to(&mut out);
            }
            LedgerCall::Reclaim { class, post } => {
                out.push(p.to_public);
                class.encode_to(&mut out);
                post.encode_to(&mut out);
            }
            LedgerCall::PublicTransfer { asset, destination } => {
                out.push(p.public_transfer);
                asset.encode_to(&mut out);
                destination.encode_to(&mut out);
            }
        }
        Ok(out)
    }

    /// `utility.batch(calls)` or `utility.batch_all(calls)`
    pub fn encode_batch<'a, I>(&self, calls: I, mode: BatchMode) -> Vec<u8>
    where
        I: ExactSizeIterator<Item = &'a [u8]>,
    {
        let p = &self.pallets;
        let index = match mode {
            BatchMode::Batch => p.batch,
            BatchMode::BatchAll => p.batch_all,
        };
        let mut out = vec![p.utility, index];
        Compact(calls.len() as u32).encode_to(&mut out);
        for call in calls {
            out.extend_from_slice(call);
        }
        out
    }
}
