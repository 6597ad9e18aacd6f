//! Human-readable messages for decoded events.
//!
//! Every supported event name maps to one [`EventKind`]; each kind has a
//! fixed template that interpolates decoded values. Strategy and token
//! addresses are shown as their asset symbol when known.

use eigenevents_core::types::ReturnValues;
use std::fmt;
use std::str::FromStr;

use crate::symbols::SymbolTable;

/// The closed set of events this client knows how to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // DelegationManager
    OperatorRegistered,
    OperatorMetadataUriUpdated,
    MinWithdrawalDelayBlocksSet,
    OperatorDetailsModified,
    OperatorSharesDecreased,
    OperatorSharesIncreased,
    StakerDelegated,
    StakerForceUndelegated,
    StakerUndelegated,
    StrategyWithdrawalDelayBlocksSet,
    WithdrawalCompleted,
    WithdrawalMigrated,
    WithdrawalQueued,
    // StrategyManager
    Deposit,
    OwnershipTransferred,
    StrategyAddedToDepositWhitelist,
    StrategyRemovedFromDepositWhitelist,
    StrategyWhitelisterChanged,
    UpdatedThirdPartyTransfersForbidden,
    // EigenPodManager
    BeaconChainEthDeposited,
    BeaconChainEthWithdrawalCompleted,
    BeaconOracleUpdated,
    PodDeployed,
    PodSharesUpdated,
    // AVSDirectory
    OperatorAvsRegistrationStatusUpdated,
    AvsMetadataUriUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 26] = [
        EventKind::OperatorRegistered,
        EventKind::OperatorMetadataUriUpdated,
        EventKind::MinWithdrawalDelayBlocksSet,
        EventKind::OperatorDetailsModified,
        EventKind::OperatorSharesDecreased,
        EventKind::OperatorSharesIncreased,
        EventKind::StakerDelegated,
        EventKind::StakerForceUndelegated,
        EventKind::StakerUndelegated,
        EventKind::StrategyWithdrawalDelayBlocksSet,
        EventKind::WithdrawalCompleted,
        EventKind::WithdrawalMigrated,
        EventKind::WithdrawalQueued,
        EventKind::Deposit,
        EventKind::OwnershipTransferred,
        EventKind::StrategyAddedToDepositWhitelist,
        EventKind::StrategyRemovedFromDepositWhitelist,
        EventKind::StrategyWhitelisterChanged,
        EventKind::UpdatedThirdPartyTransfersForbidden,
        EventKind::BeaconChainEthDeposited,
        EventKind::BeaconChainEthWithdrawalCompleted,
        EventKind::BeaconOracleUpdated,
        EventKind::PodDeployed,
        EventKind::PodSharesUpdated,
        EventKind::OperatorAvsRegistrationStatusUpdated,
        EventKind::AvsMetadataUriUpdated,
    ];

    /// The Solidity event name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::OperatorRegistered => "OperatorRegistered",
            EventKind::OperatorMetadataUriUpdated => "OperatorMetadataURIUpdated",
            EventKind::MinWithdrawalDelayBlocksSet => "MinWithdrawalDelayBlocksSet",
            EventKind::OperatorDetailsModified => "OperatorDetailsModified",
            EventKind::OperatorSharesDecreased => "OperatorSharesDecreased",
            EventKind::OperatorSharesIncreased => "OperatorSharesIncreased",
            EventKind::StakerDelegated => "StakerDelegated",
            EventKind::StakerForceUndelegated => "StakerForceUndelegated",
            EventKind::StakerUndelegated => "StakerUndelegated",
            EventKind::StrategyWithdrawalDelayBlocksSet => "StrategyWithdrawalDelayBlocksSet",
            EventKind::WithdrawalCompleted => "WithdrawalCompleted",
            EventKind::WithdrawalMigrated => "WithdrawalMigrated",
            EventKind::WithdrawalQueued => "WithdrawalQueued",
            EventKind::Deposit => "Deposit",
            EventKind::OwnershipTransferred => "OwnershipTransferred",
            EventKind::StrategyAddedToDepositWhitelist => "StrategyAddedToDepositWhitelist",
            EventKind::StrategyRemovedFromDepositWhitelist => "StrategyRemovedFromDepositWhitelist",
            EventKind::StrategyWhitelisterChanged => "StrategyWhitelisterChanged",
            EventKind::UpdatedThirdPartyTransfersForbidden => "UpdatedThirdPartyTransfersForbidden",
            EventKind::BeaconChainEthDeposited => "BeaconChainETHDeposited",
            EventKind::BeaconChainEthWithdrawalCompleted => "BeaconChainETHWithdrawalCompleted",
            EventKind::BeaconOracleUpdated => "BeaconOracleUpdated",
            EventKind::PodDeployed => "PodDeployed",
            EventKind::PodSharesUpdated => "PodSharesUpdated",
            EventKind::OperatorAvsRegistrationStatusUpdated => "OperatorAVSRegistrationStatusUpdated",
            EventKind::AvsMetadataUriUpdated => "AVSMetadataURIUpdated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an event name is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event '{}'", self.0)
    }
}

impl std::error::Error for UnknownEvent {}

impl FromStr for EventKind {
    type Err = UnknownEvent;

    /// Exact, case-sensitive match on the Solidity name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Render the message for `event`. Unknown events render as `""`.
///
/// Depends only on `event` and `values`: `OwnershipTransferred` names
/// StrategyManager.sol whichever contract emitted it.
pub fn render(event: &str, values: &ReturnValues) -> String {
    match event.parse::<EventKind>() {
        Ok(kind) => render_kind(kind, values),
        Err(_) => String::new(),
    }
}

fn render_kind(kind: EventKind, v: &ReturnValues) -> String {
    let f = |name: &str| v.get(name).map(ToString::to_string).unwrap_or_default();
    let strategy = |name: &str| SymbolTable::STRATEGIES.display(v.get(name));
    let token = |name: &str| SymbolTable::TOKENS.display(v.get(name));
    let withdrawal = |name: &str| {
        v.get("withdrawal")
            .and_then(|w| w.field(name))
            .map(ToString::to_string)
            .unwrap_or_default()
    };

    match kind {
        EventKind::OperatorRegistered => format!("{} registered as an Operator.", f("operator")),
        EventKind::OperatorMetadataUriUpdated => format!(
            "{} updated their metadata URI to {}.",
            f("operator"),
            f("metadataURI")
        ),
        EventKind::MinWithdrawalDelayBlocksSet => format!(
            "MinWithdrawalDelayBlocks set from {} to {}.",
            f("previousValue"),
            f("newValue")
        ),
        EventKind::OperatorDetailsModified => format!("{} modified their details.", f("operator")),
        EventKind::OperatorSharesDecreased => format!(
            "{} shares in {} decreased to {} due to undelegation from {}",
            f("operator"),
            strategy("strategy"),
            f("shares"),
            f("staker")
        ),
        EventKind::OperatorSharesIncreased => format!(
            "{} shares in {} increased to {} due to delegation from {}",
            f("operator"),
            strategy("strategy"),
            f("shares"),
            f("staker")
        ),
        EventKind::StakerDelegated => {
            format!("{} delegated stake to {}", f("staker"), f("operator"))
        }
        EventKind::StakerForceUndelegated => format!(
            "{} has been forcibly undelegated by {}.",
            f("staker"),
            f("operator")
        ),
        EventKind::StakerUndelegated => {
            format!("{} undelegated stake from {}", f("staker"), f("operator"))
        }
        EventKind::StrategyWithdrawalDelayBlocksSet => format!(
            "WithdrawalDelayBlocks for {} changed from {} to {}.",
            strategy("strategy"),
            f("previousValue"),
            f("newValue")
        ),
        EventKind::WithdrawalCompleted => format!("Withdrawal completed: {}", f("withdrawalRoot")),
        EventKind::WithdrawalMigrated => format!(
            "Withdrawal migrated from {} to {}.",
            f("oldWithdrawalRoot"),
            f("newWithdrawalRoot")
        ),
        EventKind::WithdrawalQueued => format!(
            "Withdrawal from {} to {}",
            withdrawal("staker"),
            withdrawal("withdrawer")
        ),

        EventKind::Deposit => format!(
            "{} deposited {} for {} shares",
            f("staker"),
            token("token"),
            f("shares")
        ),
        EventKind::OwnershipTransferred => format!(
            "Ownership of StrategyManager.sol transferred from {} to {}",
            f("previousOwner"),
            f("newOwner")
        ),
        EventKind::StrategyAddedToDepositWhitelist
        | EventKind::StrategyRemovedFromDepositWhitelist
        | EventKind::StrategyWhitelisterChanged
        | EventKind::UpdatedThirdPartyTransfersForbidden => String::new(),

        EventKind::BeaconChainEthDeposited => format!(
            "{} deposited Beacon Chain ETH of amount {}",
            f("podOwner"),
            f("amount")
        ),
        EventKind::BeaconChainEthWithdrawalCompleted => format!(
            "{} Beacon Chain ETH of amount {} completed",
            f("podOwner"),
            f("shares")
        ),
        EventKind::BeaconOracleUpdated => {
            format!("Beacon Chain Oracle updated to {}", f("newOracleAddress"))
        }
        EventKind::PodDeployed => format!(
            "New EigenPod deployed by {} at {}",
            f("podOwner"),
            f("eigenPod")
        ),
        EventKind::PodSharesUpdated => format!(
            "EigenPod shares of {} changed by {}",
            f("podOwner"),
            f("sharesDelta")
        ),

        EventKind::OperatorAvsRegistrationStatusUpdated => format!(
            "Operator {} updated registration status with AVS {}",
            f("operator"),
            f("avs")
        ),
        EventKind::AvsMetadataUriUpdated => format!(
            "{} (AVS) updated their metadata to {}.",
            f("avs"),
            f("metadataURI")
        ),
    }
}
