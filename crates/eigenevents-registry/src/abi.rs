//! Contract interfaces: ABI JSON → [`EventSchema`] trees.

use alloy_json_abi::{EventParam, JsonAbi, Param as AbiParam};
use alloy_primitives::Address;
use eigenevents_core::{
    contract::Contract,
    error::RegistryError,
    schema::{EventSchema, Param},
};

pub(crate) const DELEGATION_MANAGER_ABI: &str = include_str!("../abi/DelegationManager.json");
pub(crate) const STRATEGY_MANAGER_ABI: &str = include_str!("../abi/StrategyManager.json");
pub(crate) const EIGEN_POD_MANAGER_ABI: &str = include_str!("../abi/EigenPodManager.json");
pub(crate) const AVS_DIRECTORY_ABI: &str = include_str!("../abi/AVSDirectory.json");

/// The interface of one deployed contract: where it lives and which events
/// it can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    pub contract: Contract,
    pub address: Address,
    /// Event schemas in ABI order (alphabetical for compiler output)
    pub events: Vec<EventSchema>,
}

impl ContractInterface {
    pub fn new(contract: Contract, address: Address, events: Vec<EventSchema>) -> Self {
        Self {
            contract,
            address,
            events,
        }
    }

    /// Find an event schema by exact name.
    pub fn event(&self, name: &str) -> Option<&EventSchema> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// Parse a JSON ABI document and keep its event entries.
pub fn parse_interface(
    contract: Contract,
    address: Address,
    abi_json: &str,
) -> Result<ContractInterface, RegistryError> {
    let abi = JsonAbi::from_json_str(abi_json).map_err(|e| RegistryError::InvalidAbi {
        contract: contract.to_string(),
        reason: e.to_string(),
    })?;

    let events = abi
        .events()
        .map(|ev| EventSchema {
            contract,
            name: ev.name.clone(),
            anonymous: ev.anonymous,
            params: ev.inputs.iter().map(from_event_param).collect(),
        })
        .collect();

    Ok(ContractInterface::new(contract, address, events))
}

fn from_event_param(p: &EventParam) -> Param {
    Param {
        name: non_empty(&p.name),
        ty: p.ty.clone(),
        indexed: p.indexed,
        components: p.components.iter().map(from_component).collect(),
    }
}

fn from_component(p: &AbiParam) -> Param {
    Param {
        name: non_empty(&p.name),
        ty: p.ty.clone(),
        indexed: false,
        components: p.components.iter().map(from_component).collect(),
    }
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
