//! shielded (zk) addresses
//!
//! a shielded address is the base-58 encoding of a 32-byte receiving key

use crate::error::EncodingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub const RECEIVING_KEY_LEN: usize = 32;

/// base-58 shielded address, validated on construction
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShieldedAddress {
    encoded: String,
    receiving_key: [u8; RECEIVING_KEY_LEN],
}

impl ShieldedAddress {
    pub fn parse(encoded: &str) -> Result<Self, EncodingError> {
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| EncodingError::InvalidAddress(format!("{}: {}", encoded, e)))?;
        let receiving_key: [u8; RECEIVING_KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            EncodingError::InvalidAddress(format!(
                "{}: receiving key is {} bytes, expected {}",
                encoded,
                b.len(),
                RECEIVING_KEY_LEN
            ))
        })?;
        Ok(Self {
            encoded: encoded.to_string(),
            receiving_key,
        })
    }

    pub fn from_receiving_key(receiving_key: [u8; RECEIVING_KEY_LEN]) -> Self {
        Self {
            encoded: bs58::encode(receiving_key).into_string(),
            receiving_key,
        }
    }

    pub fn receiving_key(&self) -> &[u8; RECEIVING_KEY_LEN] {
        &self.receiving_key
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// SHA-256 over the UTF-8 address string
    pub fn digest(&self) -> AddressDigest {
        AddressDigest(Sha256::digest(self.encoded.as_bytes()).into())
    }
}

impl FromStr for ShieldedAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShieldedAddress {
    type Error = EncodingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ShieldedAddress> for String {
    fn from(address: ShieldedAddress) -> Self {
        address.encoded
    }
}

impl fmt::Display for ShieldedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// 32-byte digest identifying the sender of a soul-bound transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub struct AddressDigest(pub [u8; 32]);
