//! transfer intents and the proving-module request descriptors built from them

use crate::address::ShieldedAddress;
use crate::asset_id::AssetId;
use crate::error::EncodingError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// amount used for non-fungible and soul-bound assets: one indivisible unit
/// in the fungible-shaped ledger schema
pub const NFT_AMOUNT: u128 = 1_000_000_000_000;

/// decimals reported to the proving module for non-fungible assets
pub const NFT_DECIMALS: u8 = 12;

/// symbol prefix marking a fungible asset as shielded
pub const PRIVATE_ASSET_PREFIX: &str = "p";

/// asset family; encodes as the runtime's `AssetType` (FT=0, NFT=1, SBT=2)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum AssetClass {
    #[default]
    Fungible,
    NonFungible,
    SoulBound,
}

impl AssetClass {
    pub fn is_fungible(&self) -> bool {
        matches!(self, AssetClass::Fungible)
    }

    /// runtime tag name
    pub fn tag(&self) -> &'static str {
        match self {
            AssetClass::Fungible => "FT",
            AssetClass::NonFungible => "NFT",
            AssetClass::SoulBound => "SBT",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ft" | "fungible" => Ok(AssetClass::Fungible),
            "nft" | "non-fungible" => Ok(AssetClass::NonFungible),
            "sbt" | "soul-bound" => Ok(AssetClass::SoulBound),
            other => Err(format!("unknown asset class: {}", other)),
        }
    }
}

/// parse a decimal transfer amount; the ledger balance type is 128 bits
pub fn parse_amount(s: &str) -> Result<u128, EncodingError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidNumber(s.to_string()));
    }
    s.parse::<u128>()
        .map_err(|_| EncodingError::AmountOverflow(s.to_string()))
}

/// what the user asked for; consumed once by the pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferIntent {
    /// public balance into the shielded pool
    ToPrivate { asset_id: AssetId, amount: u128 },
    /// shielded to shielded
    PrivateTransfer {
        asset_id: AssetId,
        amount: u128,
        destination: ShieldedAddress,
    },
    /// shielded balance back to public
    ToPublic { asset_id: AssetId, amount: u128 },
}

impl TransferIntent {
    pub fn asset_id(&self) -> &AssetId {
        match self {
            TransferIntent::ToPrivate { asset_id, .. }
            | TransferIntent::PrivateTransfer { asset_id, .. }
            | TransferIntent::ToPublic { asset_id, .. } => asset_id,
        }
    }

    pub fn amount(&self) -> u128 {
        match self {
            TransferIntent::ToPrivate { amount, .. }
            | TransferIntent::PrivateTransfer { amount, .. }
            | TransferIntent::ToPublic { amount, .. } => *amount,
        }
    }

    /// only deposits into the pool are signed without asset metadata
    pub fn needs_metadata(&self) -> bool {
        !matches!(self, TransferIntent::ToPrivate { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransferIntent::ToPrivate { .. } => "ToPrivate",
            TransferIntent::PrivateTransfer { .. } => "PrivateTransfer",
            TransferIntent::ToPublic { .. } => "ToPublic",
        }
    }
}

/// `{id, value}` pair as the proving module reads it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetValue {
    pub id: AssetId,
    pub value: u128,
}

/// destination wrapper for a private transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivingKey {
    pub receiving_key: [u8; 32],
}

/// tagged transfer descriptor accepted by the proving module
///
/// serialises as `{"ToPrivate": {id, value}}`,
/// `{"PrivateTransfer": [{id, value}, {receiving_key}]}` or
/// `{"ToPublic": {id, value}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDescriptor {
    ToPrivate(AssetValue),
    PrivateTransfer(AssetValue, ReceivingKey),
    ToPublic(AssetValue),
}

impl TransferDescriptor {
    /// build the descriptor for `intent`; non-fungible classes always move `NFT_AMOUNT`
    pub fn build(intent: &TransferIntent, class: AssetClass) -> Self {
        let value = if class.is_fungible() {
            intent.amount()
        } else {
            NFT_AMOUNT
        };
        let asset = AssetValue {
            id: *intent.asset_id(),
            value,
        };

        match intent {
            TransferIntent::ToPrivate { .. } => TransferDescriptor::ToPrivate(asset),
            TransferIntent::PrivateTransfer { destination, .. } => {
                TransferDescriptor::PrivateTransfer(
                    asset,
                    ReceivingKey {
                        receiving_key: *destination.receiving_key(),
                    },
                )
            }
            TransferIntent::ToPublic { .. } => TransferDescriptor::ToPublic(asset),
        }
    }

    pub fn asset(&self) -> &AssetValue {
        match self {
            TransferDescriptor::ToPrivate(asset)
            | TransferDescriptor::PrivateTransfer(asset, _)
            | TransferDescriptor::ToPublic(asset) => asset,
        }
    }
}

/// asset entry as registered on chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisteredAsset {
    Fungible { decimals: u8, symbol: String },
    NonFungible { name: String },
    SoulBound { name: String },
}

/// `{decimals, symbol}` handed to the proving module next to the descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub decimals: u8,
    pub symbol: String,
}

impl AssetMetadata {
    /// derive the shielded metadata for `class` from its registry entry
    pub fn for_class(class: AssetClass, registered: &RegisteredAsset) -> Result<Self, String> {
        match (class, registered) {
            (AssetClass::Fungible, RegisteredAsset::Fungible { decimals, symbol }) => Ok(Self {
                decimals: *decimals,
                symbol: format!("{}{}", PRIVATE_ASSET_PREFIX, symbol),
            }),
            (AssetClass::NonFungible, RegisteredAsset::NonFungible { name })
            | (AssetClass::SoulBound, RegisteredAsset::SoulBound { name }) => Ok(Self {
                decimals: NFT_DECIMALS,
                symbol: format!("{}{}", class.tag(), name),
            }),
            (class, registered) => Err(format!(
                "asset registered as {:?} cannot be moved as {}",
                registered, class
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_private_descriptor_json() {
        let intent = TransferIntent::ToPrivate {
            asset_id: AssetId::from_u128(5),
            amount: 100,
        };
        let descriptor = TransferDescriptor::build(&intent, AssetClass::Fungible);
        let json = serde_json::to_value(&descriptor).unwrap();

        let mut id = vec![0u8; 32];
        id[0] = 5;
        assert_eq!(json, json!({ "ToPrivate": { "id": id, "value": 100 } }));
    }

    #[test]
    fn test_private_transfer_descriptor_json() {
        let destination = ShieldedAddress::from_receiving_key([4u8; 32]);
        let intent = TransferIntent::PrivateTransfer {
            asset_id: AssetId::from_u128(1),
            amount: 42,
            destination,
        };
        let descriptor = TransferDescriptor::build(&intent, AssetClass::Fungible);
        let json = serde_json::to_value(&descriptor).unwrap();

        let pair = json["PrivateTransfer"].as_array().unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0]["value"], 42);
        assert_eq!(pair[1], json!({ "receiving_key": vec![4u8; 32] }));
    }

    #[test]
    fn test_non_fungible_uses_sentinel_amount() {
        let intent = TransferIntent::ToPublic {
            asset_id: AssetId::from_u128(77),
            amount: 1,
        };
        for class in [AssetClass::NonFungible, AssetClass::SoulBound] {
            let descriptor = TransferDescriptor::build(&intent, class);
            assert_eq!(descriptor.asset().value, NFT_AMOUNT);
        }
        let descriptor = TransferDescriptor::build(&intent, AssetClass::Fungible);
        assert_eq!(descriptor.asset().value, 1);
    }

    #[test]
    fn test_descriptor_is_parseable() {
        let intent = TransferIntent::ToPublic {
            asset_id: AssetId::from_u128(3),
            amount: u128::MAX,
        };
        let descriptor = TransferDescriptor::build(&intent, AssetClass::Fungible);
        let text = serde_json::to_string(&descriptor).unwrap();
        let back: TransferDescriptor = serde_json::from_str(&text).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_metadata_for_class() {
        let ft = RegisteredAsset::Fungible {
            decimals: 18,
            symbol: "KMA".into(),
        };
        let md = AssetMetadata::for_class(AssetClass::Fungible, &ft).unwrap();
        assert_eq!(md, AssetMetadata { decimals: 18, symbol: "pKMA".into() });

        let nft = RegisteredAsset::NonFungible { name: "3#1".into() };
        let md = AssetMetadata::for_class(AssetClass::NonFungible, &nft).unwrap();
        assert_eq!(md, AssetMetadata { decimals: 12, symbol: "NFT3#1".into() });

        let sbt = RegisteredAsset::SoulBound { name: "badge".into() };
        let md = AssetMetadata::for_class(AssetClass::SoulBound, &sbt).unwrap();
        assert_eq!(md.symbol, "SBTbadge");

        assert!(AssetMetadata::for_class(AssetClass::Fungible, &nft).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Ok(100));
        assert_eq!(parse_amount(&u128::MAX.to_string()), Ok(u128::MAX));
        assert!(matches!(
            parse_amount("340282366920938463463374607431768211456"),
            Err(EncodingError::AmountOverflow(_))
        ));
        assert!(matches!(parse_amount("1.5"), Err(EncodingError::InvalidNumber(_))));
        assert!(matches!(parse_amount(""), Err(EncodingError::InvalidNumber(_))));
    }
}
