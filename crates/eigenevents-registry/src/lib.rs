//! # eigenevents-registry
//!
//! The ABI registry: for each of the four EigenLayer contracts, the set of
//! event schemas (parsed from embedded ABI JSON) and the deployment address.
//!
//! The registry is loaded once at construction and never mutated afterwards.
//! Lookups are by `(contract, event name)`; [`AbiRegistry::signature_hash_for`]
//! yields the topics[0] value used to build log filters.

pub mod abi;
pub mod fingerprint;
pub mod registry;

pub use abi::{parse_interface, ContractInterface};
pub use fingerprint::keccak256_signature;
pub use registry::AbiRegistry;
