//! # eigenevents-core
//!
//! Core types shared across all EigenEvents crates: the contract set, the
//! ABI parameter tree, raw and decoded log records, and the error taxonomy.
//! The registry, decoder, and client crates are all built on the
//! definitions here.

pub mod contract;
pub mod error;
pub mod event;
pub mod schema;
pub mod types;

pub use contract::Contract;
pub use error::{DecodeError, RegistryError};
pub use event::{DecodedEvent, EventFingerprint, RawLog};
pub use schema::{EventSchema, Param};
pub use types::{DecodedValue, ReturnValues};
