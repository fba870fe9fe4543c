//! shared fixtures: prover-layout posts, a scripted proving module and an
//! in-memory chain

#![allow(dead_code)]

use async_trait::async_trait;
use private_transfer::{
    AssetId, BatchMode, ChainClient, Extrinsic, LedgerCall, Network, ProvingError,
    ProvingService, RegisteredAsset, ShieldedAddress, SignRequest, SignedPost, SubmissionError,
    TxStatus,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// 32 bytes of `b`
pub fn bytes(b: u8) -> Vec<u8> {
    vec![b; 32]
}

/// 32 bytes counting up from `start`
pub fn counting(start: u8, len: usize) -> Vec<u8> {
    (0..len).map(|i| start.wrapping_add(i as u8)).collect()
}

pub fn sender_json(seed: u8) -> Value {
    json!({
        "utxo_accumulator_output": bytes(seed),
        "nullifier": {
            "nullifier": { "commitment": bytes(seed + 1) },
            "outgoing_note": {
                "header": null,
                "ciphertext": {
                    "ephemeral_public_key": bytes(seed + 2),
                    "ciphertext": counting(seed, 64),
                }
            }
        }
    })
}

pub fn receiver_json(seed: u8, asset_id: &AssetId, value: u128) -> Value {
    json!({
        "utxo": {
            "is_transparent": false,
            "public_asset": { "id": asset_id.as_bytes().to_vec(), "value": value },
            "commitment": bytes(seed),
        },
        "note": {
            "address_partition": seed,
            "incoming_note": {
                "header": {},
                "ciphertext": {
                    "ephemeral_public_key": bytes(seed + 1),
                    "ciphertext": {
                        "tag": bytes(seed + 2),
                        "message": [[bytes(seed + 3)], [bytes(seed + 4), bytes(seed + 5)]],
                    }
                }
            },
            "light_incoming_note": {
                "header": {},
                "ciphertext": {
                    "ephemeral_public_key": bytes(seed + 6),
                    "ciphertext": counting(seed, 96),
                }
            }
        }
    })
}

/// prover-layout post with the given (sources, senders, receivers, sinks) counts
pub fn prover_post(
    shape: (usize, usize, usize, usize),
    asset_id: &AssetId,
    value: u128,
) -> Value {
    let (sources, senders, receivers, sinks) = shape;
    let authorization = if senders > 0 {
        json!({
            "authorization_key": bytes(0xa0),
            "signature": { "scalar": bytes(0xa1), "nonce_point": bytes(0xa2) },
        })
    } else {
        Value::Null
    };
    let public_asset = if sources + sinks > 0 {
        json!(asset_id.as_bytes().to_vec())
    } else {
        Value::Null
    };
    let sender_posts: Vec<Value> = (0..senders)
        .map(|i| sender_json(0x10 + 0x10 * i as u8))
        .collect();
    let receiver_posts: Vec<Value> = (0..receivers)
        .map(|i| receiver_json(0x50 + 0x10 * i as u8, asset_id, value))
        .collect();
    json!({
        "authorization_signature": authorization,
        "asset_id": public_asset,
        "sources": vec![value; sources],
        "sender_posts": sender_posts,
        "receiver_posts": receiver_posts,
        "sinks": vec![value; sinks],
        "sink_accounts": vec![bytes(0xee); sinks],
        "proof": counting(0x80, 128),
    })
}

pub fn mint_post(asset_id: &AssetId, value: u128) -> SignedPost {
    SignedPost::new(prover_post((1, 0, 1, 0), asset_id, value))
}

pub fn private_transfer_post(asset_id: &AssetId, value: u128) -> SignedPost {
    SignedPost::new(prover_post((0, 2, 2, 0), asset_id, value))
}

pub fn reclaim_post(asset_id: &AssetId, value: u128) -> SignedPost {
    SignedPost::new(prover_post((0, 2, 1, 1), asset_id, value))
}

/// proving module that returns a fixed list of posts and records each request
pub struct MockProver {
    posts: Vec<SignedPost>,
    address: ShieldedAddress,
    fail: Option<ProvingError>,
    pub requests: Mutex<Vec<SignRequest>>,
}

impl MockProver {
    pub fn new(posts: Vec<SignedPost>) -> Self {
        Self {
            posts,
            address: ShieldedAddress::from_receiving_key([0x42; 32]),
            fail: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProvingError) -> Self {
        Self {
            fail: Some(error),
            ..Self::new(Vec::new())
        }
    }

    pub fn wallet_address(&self) -> &ShieldedAddress {
        &self.address
    }

    pub fn last_request(&self) -> Option<SignRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProvingService for MockProver {
    async fn sign(&self, request: &SignRequest) -> Result<Vec<SignedPost>, ProvingError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.fail {
            Some(error) => Err(error.clone()),
            None => Ok(self.posts.clone()),
        }
    }

    async fn address(&self, _network: Network) -> Result<ShieldedAddress, ProvingError> {
        Ok(self.address.clone())
    }
}

/// extrinsic that just remembers which calls it carries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockExtrinsic {
    pub names: Vec<&'static str>,
    pub mode: Option<BatchMode>,
    pub data: Vec<u8>,
}

impl Extrinsic for MockExtrinsic {
    fn call_data(&self) -> &[u8] {
        &self.data
    }

    fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

/// in-memory chain: asset registry, per-submission failure injection and a
/// log of what was submitted
#[derive(Default)]
pub struct MockChain {
    pub assets: HashMap<AssetId, RegisteredAsset>,
    /// zero-based submission indices that get rejected
    pub reject: HashSet<usize>,
    pub built: Mutex<Vec<LedgerCall>>,
    pub submitted: Mutex<Vec<MockExtrinsic>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, id: AssetId, asset: RegisteredAsset) -> Self {
        self.assets.insert(id, asset);
        self
    }

    pub fn rejecting(mut self, index: usize) -> Self {
        self.reject.insert(index);
        self
    }

    pub fn submitted(&self) -> Vec<MockExtrinsic> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn built(&self) -> Vec<LedgerCall> {
        self.built.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    type Extrinsic = MockExtrinsic;

    async fn registered_asset(
        &self,
        id: &AssetId,
    ) -> Result<Option<RegisteredAsset>, SubmissionError> {
        Ok(self.assets.get(id).cloned())
    }

    fn build_call(&self, call: &LedgerCall) -> Result<MockExtrinsic, SubmissionError> {
        self.built.lock().unwrap().push(call.clone());
        Ok(MockExtrinsic {
            names: vec![call.name()],
            mode: None,
            data: call.name().as_bytes().to_vec(),
        })
    }

    fn build_batch(
        &self,
        calls: Vec<MockExtrinsic>,
        mode: BatchMode,
    ) -> Result<MockExtrinsic, SubmissionError> {
        let mut data = vec![match mode {
            BatchMode::Batch => 0u8,
            BatchMode::BatchAll => 2u8,
        }];
        for call in &calls {
            data.push(call.data.len() as u8);
            data.extend_from_slice(&call.data);
        }
        Ok(MockExtrinsic {
            names: calls.iter().flat_map(|c| c.names.clone()).collect(),
            mode: Some(mode),
            data,
        })
    }

    async fn submit_and_watch(
        &self,
        extrinsic: &MockExtrinsic,
        _signer: &str,
    ) -> Result<TxStatus, SubmissionError> {
        let mut submitted = self.submitted.lock().unwrap();
        let index = submitted.len();
        submitted.push(extrinsic.clone());
        if self.reject.contains(&index) {
            return Err(SubmissionError::Rejected(format!("submission {} rejected", index)));
        }
        Ok(TxStatus::InBlock {
            tx_hash: [index as u8; 32],
            block_hash: [0xbb; 32],
        })
    }
}
