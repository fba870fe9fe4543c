//! call classifier: structural shape of an adapted post -> ledger call

use crate::address::{AddressDigest, ShieldedAddress};
use crate::asset_id::AssetId;
use crate::error::ShapeError;
use crate::intent::AssetClass;
use crate::wire::{AdaptedPost, Asset};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// (sources, senders, receivers, sinks)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub sources: usize,
    pub senders: usize,
    pub receivers: usize,
    pub sinks: usize,
}

/// the three ledger entry points a post can map to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// to_private
    Mint,
    PrivateTransfer,
    /// to_public
    Reclaim,
}

impl Shape {
    pub const MINT: Shape = Shape::new(1, 0, 1, 0);
    pub const PRIVATE_TRANSFER: Shape = Shape::new(0, 2, 2, 0);
    pub const RECLAIM: Shape = Shape::new(0, 2, 1, 1);

    pub const fn new(sources: usize, senders: usize, receivers: usize, sinks: usize) -> Self {
        Self {
            sources,
            senders,
            receivers,
            sinks,
        }
    }

    pub fn of(post: &AdaptedPost) -> Self {
        Self::new(
            post.sources.len(),
            post.sender_posts.len(),
            post.receiver_posts.len(),
            post.sinks.len(),
        )
    }

    pub fn kind(&self) -> Result<CallKind, ShapeError> {
        match *self {
            Shape::MINT => Ok(CallKind::Mint),
            Shape::PRIVATE_TRANSFER => Ok(CallKind::PrivateTransfer),
            Shape::RECLAIM => Ok(CallKind::Reclaim),
            Shape {
                sources,
                senders,
                receivers,
                sinks,
            } => Err(ShapeError::UnknownShape {
                sources,
                senders,
                receivers,
                sinks,
            }),
        }
    }
}

/// soul-bound transfers name the asset and the sender's address digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoulBoundTag {
    pub asset_id: AssetId,
    pub address_digest: AddressDigest,
}

/// one submittable ledger call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    Mint {
        class: AssetClass,
        post: AdaptedPost,
    },
    PrivateTransfer {
        class: AssetClass,
        post: AdaptedPost,
        /// set only for soul-bound assets
        soul_bound: Option<SoulBoundTag>,
    },
    Reclaim {
        class: AssetClass,
        post: AdaptedPost,
    },
    /// public-to-public move, no proof involved
    PublicTransfer {
        asset: Asset,
        destination: [u8; 32],
    },
}

impl LedgerCall {
    pub fn kind(&self) -> Option<CallKind> {
        match self {
            LedgerCall::Mint { .. } => Some(CallKind::Mint),
            LedgerCall::PrivateTransfer { .. } => Some(CallKind::PrivateTransfer),
            LedgerCall::Reclaim { .. } => Some(CallKind::Reclaim),
            LedgerCall::PublicTransfer { .. } => None,
        }
    }

    pub fn post(&self) -> Option<&AdaptedPost> {
        match self {
            LedgerCall::Mint { post, .. }
            | LedgerCall::PrivateTransfer { post, .. }
            | LedgerCall::Reclaim { post, .. } => Some(post),
            LedgerCall::PublicTransfer { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedgerCall::Mint { .. } => "to_private",
            LedgerCall::PrivateTransfer {
                soul_bound: Some(_), ..
            } => "private_transfer_asset",
            LedgerCall::PrivateTransfer { .. } => "private_transfer",
            LedgerCall::Reclaim { .. } => "to_public",
            LedgerCall::PublicTransfer { .. } => "public_transfer",
        }
    }
}

/// maps adapted posts of one transfer to ledger calls
#[derive(Clone, Debug)]
pub struct Classifier {
    class: AssetClass,
    soul_bound: Option<SoulBoundTag>,
}

impl Classifier {
    pub fn new(class: AssetClass) -> Self {
        Self {
            class,
            soul_bound: None,
        }
    }

    /// soul-bound classifier; the digest is the SHA-256 of the sender's shielded address
    pub fn soul_bound(asset_id: AssetId, sender: &ShieldedAddress) -> Self {
        Self {
            class: AssetClass::SoulBound,
            soul_bound: Some(SoulBoundTag {
                asset_id,
                address_digest: sender.digest(),
            }),
        }
    }

    pub fn class(&self) -> AssetClass {
        self.class
    }

    pub fn classify(&self, post: AdaptedPost) -> Result<LedgerCall, ShapeError> {
        let shape = Shape::of(&post);
        let kind = shape.kind()?;
        debug!(?shape, ?kind, class = %self.class, "classified post");

        let class = self.class;
        Ok(match kind {
            CallKind::Mint => LedgerCall::Mint { class, post },
            CallKind::PrivateTransfer => {
                let soul_bound = match class {
                    AssetClass::SoulBound => {
                        Some(self.soul_bound.ok_or(ShapeError::MissingAddressDigest)?)
                    }
                    _ => None,
                };
                LedgerCall::PrivateTransfer {
                    class,
                    post,
                    soul_bound,
                }
            }
            CallKind::Reclaim => LedgerCall::Reclaim { class, post },
        })
    }

    pub fn classify_all(&self, posts: Vec<AdaptedPost>) -> Result<Vec<LedgerCall>, ShapeError> {
        posts.into_iter().map(|post| self.classify(post)).collect()
    }
}
