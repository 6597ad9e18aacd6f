//! Raw and decoded log types.

use crate::types::ReturnValues;
use serde::{Deserialize, Serialize};

/// A raw, undecoded log as received from `eth_getLogs` or a `logs`
/// subscription. This is the input to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// Transaction hash, 0x-prefixed hex
    pub tx_hash: String,
    pub block_number: u64,
    /// Log index within the block
    pub log_index: u64,
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event signature hash; topics[1..] are indexed params
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed parameters
    pub data: Vec<u8>,
}

impl RawLog {
    /// Indexed-parameter topics, i.e. everything after the signature topic.
    pub fn indexed_topics(&self) -> &[String] {
        self.topics.get(1..).unwrap_or(&[])
    }
}

/// keccak256 hash of an event's canonical signature, 0x-prefixed lowercase
/// hex. Used as topics[0] in subscription and `eth_getLogs` filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventFingerprint(pub String);

impl EventFingerprint {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully decoded event, the primary output of EigenEvents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEvent {
    pub transaction_hash: String,
    pub block_number: u64,
    pub log_index: u64,
    /// Emitting contract address
    pub address: String,
    /// Event name, e.g. "WithdrawalQueued"
    pub event: String,
    /// Named parameters only, in ABI order
    pub return_values: ReturnValues,
    /// Human-readable summary; empty when the event has no template
    pub message: String,
}

impl DecodedEvent {
    /// Get a decoded parameter by name.
    pub fn value(&self, name: &str) -> Option<&crate::types::DecodedValue> {
        self.return_values.get(name)
    }
}
