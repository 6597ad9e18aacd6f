//! `AbiRegistry`: immutable `(contract, event) → schema` lookup.

use alloy_primitives::Address;
use eigenevents_core::{
    contract::Contract,
    error::RegistryError,
    event::EventFingerprint,
    schema::EventSchema,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::abi::{self, parse_interface, ContractInterface};
use crate::fingerprint::keccak256_signature;

/// Read-only registry of contract interfaces.
///
/// Built once, then shared (typically behind an `Arc`) by the decoder and
/// the client. There is no mutation API.
#[derive(Debug, Clone)]
pub struct AbiRegistry {
    interfaces: IndexMap<Contract, ContractInterface>,
}

impl AbiRegistry {
    /// The four EigenLayer core contracts on Ethereum mainnet, bound to their
    /// embedded ABIs.
    pub fn mainnet() -> Result<Self, RegistryError> {
        let sources = [
            (Contract::DelegationManager, abi::DELEGATION_MANAGER_ABI),
            (Contract::StrategyManager, abi::STRATEGY_MANAGER_ABI),
            (Contract::EigenPodManager, abi::EIGEN_POD_MANAGER_ABI),
            (Contract::AvsDirectory, abi::AVS_DIRECTORY_ABI),
        ];
        let interfaces = sources
            .into_iter()
            .map(|(contract, json)| parse_interface(contract, contract.mainnet_address(), json))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_interfaces(interfaces)
    }

    /// Build a registry from explicit interfaces. Each contract may appear
    /// at most once.
    pub fn from_interfaces(
        interfaces: impl IntoIterator<Item = ContractInterface>,
    ) -> Result<Self, RegistryError> {
        let mut map = IndexMap::new();
        for iface in interfaces {
            let contract = iface.contract;
            debug!(%contract, events = iface.events.len(), "registering contract interface");
            if map.insert(contract, iface).is_some() {
                return Err(RegistryError::DuplicateInterface {
                    contract: contract.to_string(),
                });
            }
        }
        Ok(Self { interfaces: map })
    }

    /// The interface bound to `contract`.
    pub fn interface(&self, contract: Contract) -> Result<&ContractInterface, RegistryError> {
        self.interfaces
            .get(&contract)
            .ok_or_else(|| RegistryError::UnknownContract {
                name: contract.to_string(),
            })
    }

    /// Deployment address of `contract`.
    pub fn address_of(&self, contract: Contract) -> Result<Address, RegistryError> {
        Ok(self.interface(contract)?.address)
    }

    /// Look up the schema of `event` on `contract`.
    pub fn schema_for(&self, contract: Contract, event: &str) -> Result<&EventSchema, RegistryError> {
        self.interface(contract)?
            .event(event)
            .ok_or_else(|| RegistryError::SchemaNotFound {
                contract: contract.to_string(),
                event: event.to_string(),
            })
    }

    /// keccak256 of the canonical signature of `event` on `contract`.
    pub fn signature_hash_for(
        &self,
        contract: Contract,
        event: &str,
    ) -> Result<EventFingerprint, RegistryError> {
        let schema = self.schema_for(contract, event)?;
        Ok(keccak256_signature(&schema.signature()))
    }

    /// Contracts with a registered interface, in registration order.
    pub fn contracts(&self) -> impl Iterator<Item = Contract> + '_ {
        self.interfaces.keys().copied()
    }

    /// All event schemas of `contract`.
    pub fn events(&self, contract: Contract) -> Result<&[EventSchema], RegistryError> {
        Ok(&self.interface(contract)?.events)
    }
}
