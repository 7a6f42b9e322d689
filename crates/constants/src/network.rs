use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The list of known networks as a string.
const KNOWN_NETWORKS: &str = "mainnet, bsc-mainnet";

/// Error type for parsing a [`RelayNetwork`] from a network name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNetworkError {
    /// The network name is not supported.
    #[error("network name {0} is not parseable. supported networks: {KNOWN_NETWORKS}")]
    NetworkNotSupported(String),
}

/// Networks served by the relay.
///
/// Serializes to the `blockchain_network` value the relay expects in request
/// params.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayNetwork {
    /// Ethereum mainnet.
    #[default]
    #[serde(rename = "Mainnet")]
    Mainnet,
    /// BNB Smart Chain mainnet.
    #[serde(rename = "BSC-Mainnet")]
    BscMainnet,
}

impl RelayNetwork {
    /// All known networks.
    pub const ALL: [Self; 2] = [Self::Mainnet, Self::BscMainnet];

    /// The `blockchain_network` identifier sent to the relay.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::BscMainnet => "BSC-Mainnet",
        }
    }

    /// Path segment of the bundle trace endpoint for this network.
    pub const fn trace_path(&self) -> &'static str {
        match self {
            Self::Mainnet => "bundletrace",
            Self::BscMainnet => "bscbundletrace",
        }
    }
}

impl fmt::Display for RelayNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelayNetwork {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "mainnet" | "eth" | "ethereum" => Ok(Self::Mainnet),
            "bsc-mainnet" | "bsc" => Ok(Self::BscMainnet),
            _ => Err(ParseNetworkError::NetworkNotSupported(s)),
        }
    }
}
