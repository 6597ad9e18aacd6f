//! Historical query parameters.

use eigenevents_core::contract::Contract;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A block reference in a log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Number(u64),
    Latest,
    Earliest,
    Pending,
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Number(n) => write!(f, "0x{n:x}"),
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Pending => f.write_str("pending"),
        }
    }
}

/// JSON-RPC form: hex quantity or tag name.
impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u64> for BlockTag {
    fn from(n: u64) -> Self {
        BlockTag::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid block tag '{0}': expected a number, 0x-hex, latest, earliest or pending")]
pub struct ParseBlockTagError(pub String);

impl FromStr for BlockTag {
    type Err = ParseBlockTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseBlockTagError(s.to_string());
        match s.to_ascii_lowercase().as_str() {
            "latest" => Ok(BlockTag::Latest),
            "earliest" => Ok(BlockTag::Earliest),
            "pending" => Ok(BlockTag::Pending),
            other => match other.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16).map(BlockTag::Number).map_err(|_| err()),
                None => other.parse::<u64>().map(BlockTag::Number).map_err(|_| err()),
            },
        }
    }
}

/// One historical fetch: all logs of `event` emitted by `contract` in a
/// block range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub contract: Contract,
    pub event: String,
    /// `None` → the client's `default_from_block`
    pub from_block: Option<BlockTag>,
    /// `None` → `latest`
    pub to_block: Option<BlockTag>,
}

impl EventQuery {
    pub fn new(contract: Contract, event: impl Into<String>) -> Self {
        Self {
            contract,
            event: event.into(),
            from_block: None,
            to_block: None,
        }
    }

    pub fn from_block(mut self, block: impl Into<BlockTag>) -> Self {
        self.from_block = Some(block.into());
        self
    }

    pub fn to_block(mut self, block: impl Into<BlockTag>) -> Self {
        self.to_block = Some(block.into());
        self
    }
}
