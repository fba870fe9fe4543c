//! asset identifier codec
//!
//! the ledger stores asset ids as `[u8; 32]` read as a little-endian
//! unsigned integer (index 0 is the least significant byte). both
//! directions use that one convention, so
//! `asset_id_to_number(number_to_asset_id(n)) == n` for every `n < 2^256`.

use crate::error::EncodingError;
use num_bigint::BigUint;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// width of an asset id in bytes
pub const ASSET_ID_LEN: usize = 32;

/// ledger asset identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub struct AssetId(pub [u8; ASSET_ID_LEN]);

impl AssetId {
    /// encode an arbitrary-precision integer, rejecting anything wider than 32 bytes
    pub fn from_number(n: &BigUint) -> Result<Self, EncodingError> {
        let le = n.to_bytes_le();
        if le.len() > ASSET_ID_LEN {
            return Err(EncodingError::Overflow { bytes: le.len() });
        }
        let mut bytes = [0u8; ASSET_ID_LEN];
        bytes[..le.len()].copy_from_slice(&le);
        Ok(Self(bytes))
    }

    pub fn from_u128(n: u128) -> Self {
        let mut bytes = [0u8; ASSET_ID_LEN];
        bytes[..16].copy_from_slice(&n.to_le_bytes());
        Self(bytes)
    }

    pub fn to_number(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }

    /// narrow to the runtime's `u128` asset id, `None` if the upper half is set
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[16..].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[..16]);
        Some(u128::from_le_bytes(low))
    }

    pub fn as_bytes(&self) -> &[u8; ASSET_ID_LEN] {
        &self.0
    }
}

impl From<[u8; ASSET_ID_LEN]> for AssetId {
    fn from(bytes: [u8; ASSET_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for AssetId {
    type Err = EncodingError;

    /// parse a decimal asset number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = BigUint::from_str(s.trim())
            .map_err(|e| EncodingError::InvalidNumber(format!("{}: {}", s, e)))?;
        Self::from_number(&n)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_number())
    }
}

/// user-facing number to ledger asset id
pub fn number_to_asset_id(n: &BigUint) -> Result<AssetId, EncodingError> {
    AssetId::from_number(n)
}

/// ledger asset id to user-facing number
pub fn asset_id_to_number(id: &AssetId) -> BigUint {
    id.to_number()
}
