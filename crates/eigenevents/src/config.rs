//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// First block searched by historical queries that give no `from_block`.
pub const DEFAULT_FROM_BLOCK: u64 = 19_492_759;

/// How the client talks to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    /// Request/response only; live subscriptions are unavailable.
    #[default]
    Http,
    /// WebSocket; supports `eth_subscribe`.
    Ws,
}

impl ConnectionKind {
    /// Infer from the URL scheme: `ws://` and `wss://` mean WebSocket.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("ws://") || lower.starts_with("wss://") {
            Self::Ws
        } else {
            Self::Http
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint, e.g. "https://eth-mainnet.example.org" or "wss://..."
    pub provider_url: String,
    #[serde(default)]
    pub connection: ConnectionKind,
    /// Used when an `EventQuery` has no `from_block`
    #[serde(default = "default_from_block")]
    pub default_from_block: u64,
    /// Capacity of the bounded channel between socket and delivery task
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Maximum in-flight transforms in `fetch_with`
    #[serde(default = "default_sink_concurrency")]
    pub sink_concurrency: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_from_block() -> u64 { DEFAULT_FROM_BLOCK }
fn default_channel_capacity() -> usize { 1_024 }
fn default_sink_concurrency() -> usize { 16 }
fn default_request_timeout_secs() -> u64 { 30 }

impl ClientConfig {
    /// Config for `url`, with the connection kind taken from its scheme.
    pub fn new(provider_url: impl Into<String>) -> Self {
        let provider_url = provider_url.into();
        Self {
            connection: ConnectionKind::from_url(&provider_url),
            provider_url,
            default_from_block: default_from_block(),
            channel_capacity: default_channel_capacity(),
            sink_concurrency: default_sink_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn http(provider_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionKind::Http,
            ..Self::new(provider_url)
        }
    }

    pub fn ws(provider_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionKind::Ws,
            ..Self::new(provider_url)
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.provider_url.trim().is_empty() {
            return Err(ClientError::Config("provider_url is empty".into()));
        }
        if self.channel_capacity == 0 {
            return Err(ClientError::Config("channel_capacity must be > 0".into()));
        }
        if self.sink_concurrency == 0 {
            return Err(ClientError::Config("sink_concurrency must be > 0".into()));
        }
        Ok(())
    }
}
