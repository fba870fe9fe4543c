//! proving module boundary
//!
//! the proving module owns the shielded wallet state, generates proofs and
//! encrypts notes. the pipeline only sees it through [`ProvingService`].

use crate::address::ShieldedAddress;
use crate::config::Network;
use crate::error::ProvingError;
use crate::intent::{AssetMetadata, TransferDescriptor};
use crate::post::SignedPost;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// one sign call: descriptor, optional asset metadata, network tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub descriptor: TransferDescriptor,
    pub asset_metadata: Option<AssetMetadata>,
    pub network: Network,
}

/// proving module capabilities the pipeline depends on
///
/// `sign` may run for a long time; it either returns every post of the
/// transfer or fails as a whole.
#[async_trait]
pub trait ProvingService: Send + Sync {
    /// sign a transfer, returning its posts in submission order
    async fn sign(&self, request: &SignRequest) -> Result<Vec<SignedPost>, ProvingError>;

    /// shielded address of the wallet held by the proving module
    async fn address(&self, network: Network) -> Result<ShieldedAddress, ProvingError>;
}

#[async_trait]
impl<T: ProvingService + ?Sized> ProvingService for std::sync::Arc<T> {
    async fn sign(&self, request: &SignRequest) -> Result<Vec<SignedPost>, ProvingError> {
        (**self).sign(request).await
    }

    async fn address(&self, network: Network) -> Result<ShieldedAddress, ProvingError> {
        (**self).address(network).await
    }
}
