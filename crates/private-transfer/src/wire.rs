//! wire adapter: proving-module post layout -> runtime post layout
//!
//! per post, with no state shared between posts:
//! - authorization signature `{scalar, nonce_point}` becomes `[scalar, nonce_point]`
//! - receiver posts: the incoming ciphertext message is flattened one level,
//!   `tag` and `ephemeral_public_key` move onto the note, headers are dropped,
//!   the light note's 96-byte ciphertext becomes three 32-byte blocks, the
//!   public asset value becomes 16 little-endian bytes and `note` is renamed
//!   `full_incoming_note`
//! - sender posts: the 64-byte outgoing ciphertext becomes two 32-byte blocks
//!   and only the nullifier commitment survives, as `nullifier_commitment`
//!
//! the adapter is not idempotent. feeding it a post that is already in
//! runtime layout is refused with [`ShapeError::Layout`].

use crate::asset_id::AssetId;
use crate::error::ShapeError;
use crate::post::{
    ProverAuthorization, ProverNote, ProverPost, ProverReceiverPost, ProverSenderPost, SignedPost,
    PROOF_LEN,
};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// blocks in a runtime incoming-note ciphertext
pub const INCOMING_BLOCKS: usize = 3;

/// post in the ledger runtime's `TransferPost` layout
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct AdaptedPost {
    pub authorization_signature: Option<AuthorizationSignature>,
    pub asset_id: Option<AssetId>,
    pub sources: Vec<u128>,
    pub sender_posts: Vec<SenderPost>,
    pub receiver_posts: Vec<ReceiverPost>,
    pub sinks: Vec<u128>,
    pub sink_accounts: Vec<[u8; 32]>,
    #[serde(with = "crate::fixed_bytes")]
    pub proof: [u8; PROOF_LEN],
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct AuthorizationSignature {
    pub authorization_key: [u8; 32],
    /// `(scalar, nonce_point)`
    pub signature: ([u8; 32], [u8; 32]),
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct SenderPost {
    pub utxo_accumulator_output: [u8; 32],
    pub nullifier_commitment: [u8; 32],
    pub outgoing_note: OutgoingNote,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct OutgoingNote {
    pub ephemeral_public_key: [u8; 32],
    pub ciphertext: [[u8; 32]; 2],
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct ReceiverPost {
    pub utxo: Utxo,
    pub full_incoming_note: FullIncomingNote,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Utxo {
    pub is_transparent: bool,
    pub public_asset: Asset,
    pub commitment: [u8; 32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    /// little-endian u128
    pub value: [u8; 16],
}

impl Asset {
    pub fn new(id: AssetId, value: u128) -> Self {
        Self {
            id,
            value: value.to_le_bytes(),
        }
    }

    pub fn amount(&self) -> u128 {
        u128::from_le_bytes(self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct FullIncomingNote {
    pub address_partition: u8,
    pub incoming_note: IncomingNote,
    pub light_incoming_note: LightIncomingNote,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct IncomingNote {
    pub ephemeral_public_key: [u8; 32],
    pub tag: [u8; 32],
    pub ciphertext: [[u8; 32]; INCOMING_BLOCKS],
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct LightIncomingNote {
    pub ephemeral_public_key: [u8; 32],
    pub ciphertext: [[u8; 32]; 3],
}

/// split an exact multiple of 32 bytes into 32-byte blocks
fn blocks<const K: usize>(bytes: &[u8]) -> [[u8; 32]; K] {
    debug_assert_eq!(bytes.len(), 32 * K);
    let mut out = [[0u8; 32]; K];
    for (dst, src) in out.iter_mut().zip(bytes.chunks_exact(32)) {
        dst.copy_from_slice(src);
    }
    out
}

impl From<ProverAuthorization> for AuthorizationSignature {
    fn from(auth: ProverAuthorization) -> Self {
        Self {
            authorization_key: auth.authorization_key,
            signature: (auth.signature.scalar, auth.signature.nonce_point),
        }
    }
}

impl From<ProverSenderPost> for SenderPost {
    fn from(post: ProverSenderPost) -> Self {
        let outgoing = post.nullifier.outgoing_note.ciphertext;
        Self {
            utxo_accumulator_output: post.utxo_accumulator_output,
            nullifier_commitment: post.nullifier.nullifier.commitment,
            outgoing_note: OutgoingNote {
                ephemeral_public_key: outgoing.ephemeral_public_key,
                ciphertext: blocks::<2>(&outgoing.ciphertext),
            },
        }
    }
}

impl TryFrom<ProverNote> for FullIncomingNote {
    type Error = ShapeError;

    fn try_from(note: ProverNote) -> Result<Self, Self::Error> {
        let incoming = note.incoming_note.ciphertext;
        let flat: Vec<[u8; 32]> = incoming.ciphertext.message.into_iter().flatten().collect();
        let ciphertext: [[u8; 32]; INCOMING_BLOCKS] = flat.try_into().map_err(|v: Vec<_>| {
            ShapeError::Layout(format!(
                "incoming note ciphertext has {} blocks, runtime expects {}",
                v.len(),
                INCOMING_BLOCKS
            ))
        })?;

        let light = note.light_incoming_note.ciphertext;
        Ok(Self {
            address_partition: note.address_partition,
            incoming_note: IncomingNote {
                ephemeral_public_key: incoming.ephemeral_public_key,
                tag: incoming.ciphertext.tag,
                ciphertext,
            },
            light_incoming_note: LightIncomingNote {
                ephemeral_public_key: light.ephemeral_public_key,
                ciphertext: blocks::<3>(&light.ciphertext),
            },
        })
    }
}

impl TryFrom<ProverReceiverPost> for ReceiverPost {
    type Error = ShapeError;

    fn try_from(post: ProverReceiverPost) -> Result<Self, Self::Error> {
        let asset = post.utxo.public_asset;
        Ok(Self {
            utxo: Utxo {
                is_transparent: post.utxo.is_transparent,
                public_asset: Asset::new(asset.id, asset.value),
                commitment: post.utxo.commitment,
            },
            full_incoming_note: post.note.try_into()?,
        })
    }
}

impl TryFrom<ProverPost> for AdaptedPost {
    type Error = ShapeError;

    fn try_from(post: ProverPost) -> Result<Self, Self::Error> {
        let receiver_posts = post
            .receiver_posts
            .into_iter()
            .map(ReceiverPost::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            authorization_signature: post.authorization_signature.map(Into::into),
            asset_id: post.asset_id,
            sources: post.sources,
            sender_posts: post.sender_posts.into_iter().map(Into::into).collect(),
            receiver_posts,
            sinks: post.sinks,
            sink_accounts: post.sink_accounts,
            proof: post.proof,
        })
    }
}

/// true if `post` already carries runtime-only fields
pub fn is_runtime_layout(post: &Value) -> bool {
    let has_key = |list: &str, key: &str| {
        post.get(list)
            .and_then(Value::as_array)
            .map(|items| items.iter().any(|item| item.get(key).is_some()))
            .unwrap_or(false)
    };
    let signature_is_pair = post
        .pointer("/authorization_signature/signature")
        .map(Value::is_array)
        .unwrap_or(false);

    has_key("receiver_posts", "full_incoming_note")
        || has_key("sender_posts", "nullifier_commitment")
        || signature_is_pair
}

/// reshape one signed post into the runtime layout
pub fn adapt(post: &SignedPost) -> Result<AdaptedPost, ShapeError> {
    if is_runtime_layout(post.as_json()) {
        return Err(ShapeError::Layout(
            "post is already in runtime layout".into(),
        ));
    }
    let decoded: ProverPost = serde_json::from_value(post.as_json().clone())
        .map_err(|e| ShapeError::Layout(e.to_string()))?;
    AdaptedPost::try_from(decoded)
}

/// adapt every post, failing on the first malformed one
pub fn adapt_all(posts: &[SignedPost]) -> Result<Vec<AdaptedPost>, ShapeError> {
    posts.iter().map(adapt).collect()
}
