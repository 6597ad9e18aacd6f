//! `LogProvider`: where raw logs come from.

use alloy_primitives::Address;
use async_trait::async_trait;
use eigenevents_core::error::DecodeError;
use eigenevents_core::event::{EventFingerprint, RawLog};
use eigenevents_rpc::{HttpRpcClient, RpcTransport, SubscriptionId, TransportError, WsRpcClient};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::ClientError;
use crate::query::BlockTag;

/// An `eth_getLogs` / `eth_subscribe("logs")` filter on one contract and one
/// event signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(serialize_with = "checksummed")]
    pub address: Address,
    /// `[signature hash]`
    pub topics: Vec<EventFingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockTag>,
}

fn checksummed<S: serde::Serializer>(addr: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&addr.to_checksum(None))
}

impl LogFilter {
    /// Filter for live subscriptions: no block range.
    pub fn new(address: Address, signature: EventFingerprint) -> Self {
        Self {
            address,
            topics: vec![signature],
            from_block: None,
            to_block: None,
        }
    }

    pub fn with_range(mut self, from: BlockTag, to: BlockTag) -> Self {
        self.from_block = Some(from);
        self.to_block = Some(to);
        self
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A live log feed opened by [`LogProvider::subscribe_logs`].
#[derive(Debug)]
pub struct LogSubscription {
    /// Node-assigned subscription id
    pub id: String,
    /// Logs in arrival order; closes when the transport drops
    pub logs: mpsc::Receiver<RawLog>,
}

/// Source of raw logs. Implemented for JSON-RPC nodes by
/// [`RpcLogProvider`]; tests inject their own.
#[async_trait]
pub trait LogProvider: Send + Sync + 'static {
    /// All logs matching `filter`, in node order. A malformed entry in the
    /// node's answer fails the whole call.
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, ClientError>;

    /// Open a live feed. The returned channel is bounded by `capacity`.
    async fn subscribe_logs(
        &self,
        filter: &LogFilter,
        capacity: usize,
    ) -> Result<LogSubscription, ClientError>;

    /// Cancel a live feed on the node side. Returns whether the node knew it.
    async fn unsubscribe(&self, _id: &str) -> Result<bool, ClientError> {
        Ok(false)
    }
}

/// JSON-RPC backed provider.
pub enum RpcLogProvider {
    Http(HttpRpcClient),
    Ws(WsRpcClient),
}

impl RpcLogProvider {
    pub fn url(&self) -> &str {
        match self {
            RpcLogProvider::Http(c) => c.url(),
            RpcLogProvider::Ws(c) => c.url(),
        }
    }
}

#[async_trait]
impl LogProvider for RpcLogProvider {
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, ClientError> {
        let params = vec![filter.to_json()];
        let entries: Vec<Value> = match self {
            RpcLogProvider::Http(c) => c.call("eth_getLogs", params).await?,
            RpcLogProvider::Ws(c) => c.call("eth_getLogs", params).await?,
        };
        debug!(url = %self.url(), count = entries.len(), "eth_getLogs returned");

        let logs = entries
            .iter()
            .filter_map(|entry| parse_rpc_log(entry).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    async fn subscribe_logs(
        &self,
        filter: &LogFilter,
        capacity: usize,
    ) -> Result<LogSubscription, ClientError> {
        let ws = match self {
            RpcLogProvider::Ws(ws) => ws,
            RpcLogProvider::Http(_) => {
                return Err(TransportError::Unsupported {
                    transport: "HTTP",
                    operation: "eth_subscribe".into(),
                }
                .into())
            }
        };

        let (id, mut notifications) = ws
            .subscribe("logs", vec![filter.to_json()], capacity)
            .await?;
        debug!(subscription = %id, active = ws.active_subscriptions(), "log subscription opened");
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let sub_id = id.clone();
        tokio::spawn(async move {
            while let Some(payload) = notifications.recv().await {
                let log = match parse_rpc_log(&payload) {
                    Ok(Some(log)) => log,
                    Ok(None) => continue,
                    Err(e) => {
                        error!(subscription = %sub_id, error = %e, "malformed log notification, skipping");
                        continue;
                    }
                };
                if tx.send(log).await.is_err() {
                    break;
                }
            }
            debug!(subscription = %sub_id, "log feed ended");
        });

        Ok(LogSubscription { id: id.0, logs: rx })
    }

    async fn unsubscribe(&self, id: &str) -> Result<bool, ClientError> {
        match self {
            // nothing to cancel once the socket is gone
            RpcLogProvider::Ws(ws) if ws.is_closed() => Ok(false),
            RpcLogProvider::Ws(ws) => Ok(ws.unsubscribe(&SubscriptionId(id.to_string())).await?),
            RpcLogProvider::Http(_) => Ok(false),
        }
    }
}

fn is_removed(entry: &Value) -> bool {
    entry.get("removed").and_then(Value::as_bool).unwrap_or(false)
}

/// Parse one JSON-RPC log object.
///
/// `Ok(None)` for removed (reorged) logs. A required field that is missing
/// or malformed is [`DecodeError::InvalidRawLog`]; nothing is defaulted.
pub fn parse_rpc_log(entry: &Value) -> Result<Option<RawLog>, DecodeError> {
    if is_removed(entry) {
        return Ok(None);
    }

    let topics = entry
        .get("topics")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing topics"))?
        .iter()
        .map(|t| t.as_str().map(String::from).ok_or_else(|| invalid("non-string topic")))
        .collect::<Result<Vec<_>, _>>()?;

    let data_hex = str_field(entry, "data")?;
    let data = hex::decode(data_hex.strip_prefix("0x").unwrap_or(data_hex))
        .map_err(|e| invalid(format!("data is not hex: {e}")))?;

    Ok(Some(RawLog {
        tx_hash: str_field(entry, "transactionHash")?.to_string(),
        block_number: hex_quantity(entry, "blockNumber")?,
        log_index: hex_quantity(entry, "logIndex")?,
        address: str_field(entry, "address")?.to_string(),
        topics,
        data,
    }))
}

fn invalid(reason: impl Into<String>) -> DecodeError {
    DecodeError::InvalidRawLog {
        reason: reason.into(),
    }
}

fn str_field<'a>(entry: &'a Value, field: &str) -> Result<&'a str, DecodeError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("missing {field}")))
}

fn hex_quantity(entry: &Value, field: &str) -> Result<u64, DecodeError> {
    let h = str_field(entry, field)?;
    u64::from_str_radix(h.strip_prefix("0x").unwrap_or(h), 16)
        .map_err(|e| invalid(format!("{field} '{h}': {e}")))
}
