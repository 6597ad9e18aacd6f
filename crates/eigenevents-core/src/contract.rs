//! The fixed EigenLayer contract set and its mainnet deployments.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// One of the four EigenLayer core contracts this client indexes.
///
/// Deployment addresses are compile-time constants; they are not
/// configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Contract {
    DelegationManager,
    StrategyManager,
    EigenPodManager,
    #[serde(rename = "AVSDirectory")]
    AvsDirectory,
}

impl Contract {
    /// Every contract, in a stable order.
    pub const ALL: [Contract; 4] = [
        Contract::DelegationManager,
        Contract::StrategyManager,
        Contract::EigenPodManager,
        Contract::AvsDirectory,
    ];

    /// Canonical contract name, matching the Solidity source file.
    pub fn name(&self) -> &'static str {
        match self {
            Contract::DelegationManager => "DelegationManager",
            Contract::StrategyManager => "StrategyManager",
            Contract::EigenPodManager => "EigenPodManager",
            Contract::AvsDirectory => "AVSDirectory",
        }
    }

    /// Ethereum mainnet proxy address.
    pub fn mainnet_address(&self) -> Address {
        match self {
            Contract::DelegationManager => address!("39053D51B77DC0d36036Fc1fCc8Cb819df8Ef37A"),
            Contract::StrategyManager => address!("858646372CC42E1A627fcE94aa7A7033e7CF075A"),
            Contract::EigenPodManager => address!("91E677b07F7AF907ec9a428aafA9fc14a0d3A338"),
            Contract::AvsDirectory => address!("135DDa560e946695d6f155dACaFC6f1F25C1F5AF"),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Contract {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Contract::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| RegistryError::UnknownContract { name: s.to_string() })
    }
}
