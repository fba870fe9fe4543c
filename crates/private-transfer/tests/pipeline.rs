//! end-to-end pipeline runs against a scripted proving module and an
//! in-memory chain

mod common;

use common::{mint_post, private_transfer_post, reclaim_post, MockChain, MockProver};
use private_transfer::{
    AssetClass, AssetId, AssetMetadata, BatchMode, LedgerCall, Network, PipelineConfig,
    ProvingError, RegisteredAsset, ShieldedAddress, SubmissionError, SubmissionPolicy,
    TransferDescriptor, TransferError, TransferIntent, TransferPipeline, NFT_AMOUNT,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

const SIGNER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

fn config() -> PipelineConfig {
    PipelineConfig::new(Network::Dolphin, SIGNER)
}

fn dol() -> (AssetId, RegisteredAsset) {
    (
        AssetId::from_u128(1),
        RegisteredAsset::Fungible {
            decimals: 18,
            symbol: "DOL".into(),
        },
    )
}

#[tokio::test]
async fn test_to_private_fungible() {
    let id = AssetId::from_u128(5);
    let prover = Arc::new(MockProver::new(vec![mint_post(&id, 100)]));
    let pipeline = TransferPipeline::new(prover.clone(), MockChain::new(), config());

    let report = pipeline
        .transfer(
            TransferIntent::ToPrivate {
                asset_id: id,
                amount: 100,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap();

    assert!(report.all_included());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].calls, 1);

    let submitted = pipeline.chain().submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].names, vec!["to_private"]);
    assert_eq!(submitted[0].mode, Some(BatchMode::Batch));

    // deposits are signed without metadata
    let request = prover.last_request().unwrap();
    assert_eq!(request.asset_metadata, None);
    assert_eq!(request.network, Network::Dolphin);
    assert!(matches!(request.descriptor, TransferDescriptor::ToPrivate(v) if v.value == 100));
}

#[tokio::test]
async fn test_soul_bound_private_transfer_carries_address_digest() {
    let id = AssetId::from_u128(9001);
    let prover = Arc::new(MockProver::new(vec![private_transfer_post(&id, NFT_AMOUNT)]));
    let chain =
        MockChain::new().with_asset(id, RegisteredAsset::SoulBound { name: "badge".into() });
    let pipeline = TransferPipeline::new(prover.clone(), chain, config());

    let destination = ShieldedAddress::from_receiving_key([7u8; 32]);
    let prepared = pipeline
        .prepare(
            TransferIntent::PrivateTransfer {
                asset_id: id,
                amount: 1,
                destination,
            },
            AssetClass::SoulBound,
        )
        .await
        .unwrap();

    assert_eq!(prepared.call_count(), 1);
    match &prepared.batches[0].calls()[0] {
        LedgerCall::PrivateTransfer {
            soul_bound: Some(tag),
            class: AssetClass::SoulBound,
            ..
        } => {
            let expected: [u8; 32] =
                Sha256::digest(prover.wallet_address().as_str().as_bytes()).into();
            assert_eq!(tag.address_digest.0, expected);
            assert_eq!(tag.asset_id, id);
        }
        other => panic!("expected soul-bound private transfer, got {:?}", other),
    }

    let request = prover.last_request().unwrap();
    assert_eq!(
        request.asset_metadata,
        Some(AssetMetadata {
            decimals: 12,
            symbol: "SBTbadge".into()
        })
    );
    assert_eq!(request.descriptor.asset().value, NFT_AMOUNT);
}

#[tokio::test]
async fn test_five_posts_make_three_batches() {
    let (id, asset) = dol();
    let mut posts: Vec<_> = (0..4).map(|_| private_transfer_post(&id, 10)).collect();
    posts.push(reclaim_post(&id, 10));
    let pipeline = TransferPipeline::new(
        MockProver::new(posts),
        MockChain::new().with_asset(id, asset),
        config(),
    );

    let report = pipeline
        .transfer(
            TransferIntent::ToPublic {
                asset_id: id,
                amount: 50,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap();

    let sizes: Vec<usize> = report.outcomes.iter().map(|o| o.calls).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    let names: Vec<Vec<&str>> = pipeline
        .chain()
        .submitted()
        .into_iter()
        .map(|e| e.names)
        .collect();
    assert_eq!(
        names,
        vec![
            vec!["private_transfer", "private_transfer"],
            vec!["private_transfer", "private_transfer"],
            vec!["to_public"],
        ]
    );
}

#[tokio::test]
async fn test_failed_batch_does_not_stop_later_batches() {
    let (id, asset) = dol();
    let posts: Vec<_> = (0..5).map(|_| private_transfer_post(&id, 10)).collect();
    let chain = MockChain::new().with_asset(id, asset).rejecting(1);
    let pipeline = TransferPipeline::new(MockProver::new(posts), chain, config());

    let destination = ShieldedAddress::from_receiving_key([1u8; 32]);
    let report = pipeline
        .transfer(
            TransferIntent::PrivateTransfer {
                asset_id: id,
                amount: 50,
                destination,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert!(!report.all_included());
    let failed: Vec<usize> = report.failures().map(|o| o.index).collect();
    assert_eq!(failed, vec![1]);
    assert!(report.outcomes[2].result.is_ok());
    assert_eq!(pipeline.chain().submitted().len(), 3);

    assert!(matches!(
        report.into_result(),
        Err(TransferError::Submission(SubmissionError::Rejected(_)))
    ));
}

#[tokio::test]
async fn test_atomic_policy_uses_one_batch_all() {
    let (id, asset) = dol();
    let posts: Vec<_> = (0..3).map(|_| private_transfer_post(&id, 10)).collect();
    let pipeline = TransferPipeline::new(
        MockProver::new(posts),
        MockChain::new().with_asset(id, asset),
        config().with_policy(SubmissionPolicy::Atomic),
    );

    let destination = ShieldedAddress::from_receiving_key([1u8; 32]);
    let report = pipeline
        .transfer(
            TransferIntent::PrivateTransfer {
                asset_id: id,
                amount: 30,
                destination,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 1);
    let submitted = pipeline.chain().submitted();
    assert_eq!(submitted[0].mode, Some(BatchMode::BatchAll));
    assert_eq!(submitted[0].names.len(), 3);
}

#[tokio::test]
async fn test_extract_single_batch() {
    let id = AssetId::from_u128(5);
    let pipeline = TransferPipeline::new(
        MockProver::new(vec![mint_post(&id, 42)]),
        MockChain::new(),
        config(),
    );

    let payload = pipeline
        .transfer_payload(
            TransferIntent::ToPrivate {
                asset_id: id,
                amount: 42,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap();

    let mut expected = vec![0u8, 10];
    expected.extend_from_slice(b"to_private");
    assert_eq!(payload.as_bytes(), &expected[..]);
    assert!(payload.to_hex().starts_with("0x000a"));
    // extraction never submits
    assert!(pipeline.chain().submitted().is_empty());
}

#[tokio::test]
async fn test_extract_refuses_multiple_batches() {
    let (id, asset) = dol();
    let posts: Vec<_> = (0..3).map(|_| private_transfer_post(&id, 10)).collect();
    let pipeline = TransferPipeline::new(
        MockProver::new(posts),
        MockChain::new().with_asset(id, asset),
        config(),
    );

    let err = pipeline
        .transfer_payload(
            TransferIntent::ToPublic {
                asset_id: id,
                amount: 30,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Relay(_)));
}

#[tokio::test]
async fn test_unregistered_asset_is_metadata_error() {
    let id = AssetId::from_u128(404);
    let prover = Arc::new(MockProver::new(vec![reclaim_post(&id, 1)]));
    let pipeline = TransferPipeline::new(prover.clone(), MockChain::new(), config());

    let err = pipeline
        .prepare(
            TransferIntent::ToPublic {
                asset_id: id,
                amount: 1,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Metadata(_)));
    // the proving module was never asked
    assert!(prover.last_request().is_none());
}

#[tokio::test]
async fn test_prover_failure_aborts_before_submission() {
    let pipeline = TransferPipeline::new(
        MockProver::failing(ProvingError::Rejected("insufficient balance".into())),
        MockChain::new(),
        config(),
    );

    let err = pipeline
        .transfer(
            TransferIntent::ToPrivate {
                asset_id: AssetId::from_u128(1),
                amount: 1,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Proving(ProvingError::Rejected(_))));
    assert!(pipeline.chain().submitted().is_empty());
}

#[tokio::test]
async fn test_unknown_shape_aborts_before_submission() {
    let id = AssetId::from_u128(1);
    let odd = private_transfer::SignedPost::new(common::prover_post((1, 1, 1, 1), &id, 1));
    let pipeline = TransferPipeline::new(MockProver::new(vec![odd]), MockChain::new(), config());

    let err = pipeline
        .transfer(
            TransferIntent::ToPrivate {
                asset_id: id,
                amount: 1,
            },
            AssetClass::Fungible,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Shape(_)));
    assert!(pipeline.chain().built().is_empty());
}

#[tokio::test]
async fn test_public_transfer_non_fungible_amount() {
    let pipeline = TransferPipeline::new(MockProver::new(Vec::new()), MockChain::new(), config());

    let report = pipeline
        .public_transfer(AssetId::from_u128(3), 5, AssetClass::NonFungible, [9u8; 32])
        .await;
    assert!(report.all_included());

    match &pipeline.chain().built()[0] {
        LedgerCall::PublicTransfer { asset, destination } => {
            assert_eq!(asset.amount(), NFT_AMOUNT);
            assert_eq!(destination, &[9u8; 32]);
        }
        other => panic!("expected public transfer, got {:?}", other),
    }
}
