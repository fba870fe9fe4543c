//! signed posts as the proving module emits them
//!
//! the proving module and the runtime are versioned independently. posts
//! arrive as JSON and stay opaque until the wire adapter decodes them into
//! the typed layout below and reshapes them into [`crate::wire::AdaptedPost`].

use crate::asset_id::AssetId;
use serde::{Deserialize, Serialize};

pub const PROOF_LEN: usize = 128;
pub const OUTGOING_CIPHERTEXT_LEN: usize = 64;
pub const LIGHT_CIPHERTEXT_LEN: usize = 96;

/// one proof bundle returned by the proving module
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedPost(pub serde_json::Value);

impl SignedPost {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for SignedPost {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// typed proving-module layout of a post
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverPost {
    pub authorization_signature: Option<ProverAuthorization>,
    pub asset_id: Option<AssetId>,
    pub sources: Vec<u128>,
    pub sender_posts: Vec<ProverSenderPost>,
    pub receiver_posts: Vec<ProverReceiverPost>,
    pub sinks: Vec<u128>,
    #[serde(default)]
    pub sink_accounts: Vec<[u8; 32]>,
    #[serde(with = "crate::fixed_bytes")]
    pub proof: [u8; PROOF_LEN],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverAuthorization {
    pub authorization_key: [u8; 32],
    pub signature: SchnorrSignature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrSignature {
    pub scalar: [u8; 32],
    pub nonce_point: [u8; 32],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverSenderPost {
    pub utxo_accumulator_output: [u8; 32],
    pub nullifier: ProverNullifier,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverNullifier {
    pub nullifier: NullifierCommitment,
    pub outgoing_note: ProverOutgoingNote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullifierCommitment {
    pub commitment: [u8; 32],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverOutgoingNote {
    #[serde(default)]
    pub header: serde_json::Value,
    pub ciphertext: OutgoingCiphertext,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingCiphertext {
    pub ephemeral_public_key: [u8; 32],
    #[serde(with = "crate::fixed_bytes")]
    pub ciphertext: [u8; OUTGOING_CIPHERTEXT_LEN],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverReceiverPost {
    pub utxo: ProverUtxo,
    pub note: ProverNote,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverUtxo {
    pub is_transparent: bool,
    pub public_asset: ProverAsset,
    pub commitment: [u8; 32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverAsset {
    pub id: AssetId,
    pub value: u128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverNote {
    #[serde(default)]
    pub address_partition: u8,
    pub incoming_note: ProverIncomingNote,
    pub light_incoming_note: ProverLightIncomingNote,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverIncomingNote {
    #[serde(default)]
    pub header: serde_json::Value,
    pub ciphertext: IncomingCiphertext,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingCiphertext {
    pub ephemeral_public_key: [u8; 32],
    pub ciphertext: IncomingMessage,
}

/// `message` is nested one level deeper than the runtime expects
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub tag: [u8; 32],
    pub message: Vec<Vec<[u8; 32]>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverLightIncomingNote {
    #[serde(default)]
    pub header: serde_json::Value,
    pub ciphertext: LightCiphertext,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightCiphertext {
    pub ephemeral_public_key: [u8; 32],
    #[serde(with = "crate::fixed_bytes")]
    pub ciphertext: [u8; LIGHT_CIPHERTEXT_LEN],
}
