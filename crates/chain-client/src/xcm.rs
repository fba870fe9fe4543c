//! xcm remote transact
//!
//! a relay payload is executed on the shielded chain by an account on another
//! parachain through the xcm-transactor precompile
//! (`transactThroughSignedMultilocation`). this module packages the call bytes
//! together with the destination location and the weight / fee knobs.

use crate::error::{ChainError, Result};
use parity_scale_codec::{Decode, Encode};
use private_transfer::RelayPayload;
use serde::{Deserialize, Serialize};

/// multi-location for xcm
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct MultiLocation {
    pub parents: u8,
    pub interior: Junctions,
}

/// junction types, variant indices as in xcm v3
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum Junctions {
    #[codec(index = 1)]
    X1(Junction),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum Junction {
    Parachain(u32),
}

impl Junction {
    /// selector-prefixed byte form used by the xcm precompiles
    ///
    /// `Parachain(2084)` becomes `0x00 00000824`
    pub fn to_precompile_bytes(&self) -> Vec<u8> {
        match self {
            Junction::Parachain(id) => {
                let mut out = vec![0x00];
                out.extend_from_slice(&id.to_be_bytes());
                out
            }
        }
    }
}

impl MultiLocation {
    /// sibling parachain as seen from another parachain
    pub fn sibling(para_id: u32) -> Self {
        Self {
            parents: 1,
            interior: Junctions::X1(Junction::Parachain(para_id)),
        }
    }

    pub fn junctions(&self) -> Vec<&Junction> {
        match &self.interior {
            Junctions::X1(a) => vec![a],
        }
    }

    pub fn to_precompile(&self) -> PrecompileLocation {
        PrecompileLocation {
            parents: self.parents,
            interior: self
                .junctions()
                .into_iter()
                .map(|j| format!("0x{}", hex::encode(j.to_precompile_bytes())))
                .collect(),
        }
    }
}

/// `(parents, interior[])` tuple accepted by the precompile, junctions as hex
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecompileLocation {
    pub parents: u8,
    pub interior: Vec<String>,
}

/// caller-supplied weight and fee limits for a remote transact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactWeights {
    /// `transact_required_weight_at_most`
    pub transact_weight: u64,
    pub fee_amount: u128,
    pub overall_weight: u64,
}

impl Default for TransactWeights {
    fn default() -> Self {
        Self {
            transact_weight: 90_000_000_000,
            fee_amount: 100_000_000_000_000,
            overall_weight: 100_000_000_000,
        }
    }
}

/// arguments of one `transactThroughSignedMultilocation` call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTransact {
    pub destination: PrecompileLocation,
    pub fee_location: PrecompileLocation,
    pub transact_required_weight_at_most: u64,
    /// `0x`-prefixed call bytes
    pub call: String,
    pub fee_amount: u128,
    pub overall_weight: u64,
}

impl RemoteTransact {
    /// transact `payload` on `para_id`, paying fees in that chain's native asset
    pub fn new(para_id: u32, payload: &RelayPayload, weights: TransactWeights) -> Result<Self> {
        if payload.as_bytes().is_empty() {
            return Err(ChainError::XcmError("empty relay payload".into()));
        }
        let destination = MultiLocation::sibling(para_id).to_precompile();
        tracing::debug!(
            para_id,
            bytes = payload.as_bytes().len(),
            "built remote transact"
        );
        Ok(Self {
            fee_location: destination.clone(),
            destination,
            transact_required_weight_at_most: weights.transact_weight,
            call: payload.to_hex(),
            fee_amount: weights.fee_amount,
            overall_weight: weights.overall_weight,
        })
    }
}
