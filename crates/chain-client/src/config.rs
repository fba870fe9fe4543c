//! chain configuration and endpoints

use crate::error::ChainError;
use private_transfer::Network;
use serde::{Deserialize, Serialize};

/// pallet and call indices needed to encode shielded transfer calls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletIndices {
    pub utility: u8,
    pub batch: u8,
    pub batch_all: u8,
    pub manta_pay: u8,
    pub to_private: u8,
    pub to_public: u8,
    pub private_transfer: u8,
    pub public_transfer: u8,
    pub private_transfer_asset: u8,
}

impl Default for PalletIndices {
    fn default() -> Self {
        Self {
            utility: 40,
            batch: 0,
            batch_all: 2,
            manta_pay: 45,
            to_private: 0,
            to_public: 1,
            private_transfer: 2,
            public_transfer: 3,
            private_transfer_asset: 4,
        }
    }
}

/// known chain configurations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// chain name
    pub name: String,
    /// rpc websocket endpoint
    pub rpc_endpoint: String,
    /// ss58 address prefix
    pub ss58_prefix: u16,
    /// token decimals
    pub decimals: u8,
    /// token symbol
    pub symbol: String,
    /// para id (for parachains)
    pub para_id: Option<u32>,
    #[serde(default)]
    pub pallets: PalletIndices,
}

impl ChainConfig {
    /// dolphin testnet
    pub fn dolphin() -> Self {
        Self {
            name: "dolphin".into(),
            rpc_endpoint: "wss://ws.dolphin.engineering".into(),
            ss58_prefix: 78,
            decimals: 18,
            symbol: "DOL".into(),
            para_id: Some(2084),
            pallets: PalletIndices::default(),
        }
    }

    /// calamari (kusama)
    pub fn calamari() -> Self {
        Self {
            name: "calamari".into(),
            rpc_endpoint: "wss://ws.calamari.systems".into(),
            ss58_prefix: 78,
            decimals: 12,
            symbol: "KMA".into(),
            para_id: Some(2084),
            pallets: PalletIndices::default(),
        }
    }

    /// manta (polkadot)
    pub fn manta() -> Self {
        Self {
            name: "manta".into(),
            rpc_endpoint: "wss://ws.manta.systems".into(),
            ss58_prefix: 77,
            decimals: 18,
            symbol: "MANTA".into(),
            para_id: Some(2104),
            pallets: PalletIndices::default(),
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Dolphin => Self::dolphin(),
            Network::Calamari => Self::calamari(),
            Network::Manta => Self::manta(),
        }
    }

    /// look up a preset by name
    pub fn by_name(name: &str) -> Result<Self, ChainError> {
        name.parse::<Network>()
            .map(Self::for_network)
            .map_err(ChainError::UnknownNetwork)
    }
}

/// client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// chain to connect to
    pub chain: ChainConfig,
    /// seconds to wait for a submission to be included
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::dolphin(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            chain: ChainConfig::for_network(network),
            ..Default::default()
        }
    }

    pub fn with_chain(chain: ChainConfig) -> Self {
        Self {
            chain,
            ..Default::default()
        }
    }
}
