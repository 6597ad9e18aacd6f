//! Transport-level error types.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors raised while talking to an Ethereum node.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-2xx status, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// WebSocket connect/send/receive error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The connection was closed before a response arrived.
    #[error("Connection closed")]
    Closed,

    /// The transport cannot perform this operation (e.g. subscriptions over HTTP).
    #[error("Unsupported by {transport} transport: {operation}")]
    Unsupported {
        transport: &'static str,
        operation: String,
    },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// `true` for failures reaching the node, as opposed to the node
    /// rejecting the call.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::WebSocket(_) | Self::Timeout { .. } | Self::Closed
        )
    }

    /// `true` if the node itself returned an error object.
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, Self::Rpc(_))
    }
}
