//! pipeline configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// networks the proving module knows how to sign for
///
/// serialises as its bare name, which is also the `network` string of a
/// proving-module request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[default]
    Dolphin,
    Calamari,
    Manta,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Dolphin => "Dolphin",
            Network::Calamari => "Calamari",
            Network::Manta => "Manta",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dolphin" => Ok(Network::Dolphin),
            "calamari" => Ok(Network::Calamari),
            "manta" => Ok(Network::Manta),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// how a multi-batch transfer is submitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionPolicy {
    /// batches of two, in order; a failed batch is logged and the rest still go out
    #[default]
    BestEffort,
    /// every call in one `batch_all`, all or nothing
    Atomic,
}

/// per-run pipeline settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// network tag passed to the proving module
    pub network: Network,
    /// public account that signs and pays for submitted batches
    pub signer: String,
    #[serde(default)]
    pub policy: SubmissionPolicy,
}

impl PipelineConfig {
    pub fn new(network: Network, signer: impl Into<String>) -> Self {
        Self {
            network,
            signer: signer.into(),
            policy: SubmissionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.policy = policy;
        self
    }
}
