//! eigenevents-rpc: the JSON-RPC transport layer.
//!
//! - [`RpcTransport`]: the async trait both transports implement
//! - [`HttpRpcClient`]: request/response over HTTP(S), one attempt per call
//! - [`WsRpcClient`]: a single WebSocket connection multiplexing requests
//!   and `eth_subscribe` notifications
//!
//! Neither transport retries or reconnects. A dropped WebSocket ends every
//! subscription stream opened on it.

pub mod error;
pub mod http;
pub mod request;
pub mod subscriptions;
pub mod transport;
pub mod ws;

pub use error::TransportError;
pub use http::HttpRpcClient;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use subscriptions::{SubscriptionId, SubscriptionManager};
pub use transport::RpcTransport;
pub use ws::WsRpcClient;
