//! WebSocket JSON-RPC client with `eth_subscribe` support.
//!
//! One background task owns the socket. Callers talk to it over a command
//! channel. The task stamps every outgoing request with the next id from its
//! own counter, so ids never repeat on a socket whoever built the request.
//! Responses are matched back by that id and subscription notifications are
//! routed through the [`SubscriptionManager`].
//!
//! There is no reconnect. When the socket closes, in-flight requests fail
//! with [`TransportError::Closed`] and every subscription stream ends.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};
use crate::subscriptions::{SubscriptionId, SubscriptionManager};
use crate::transport::RpcTransport;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type ResponseTx = oneshot::Sender<Result<JsonRpcResponse, TransportError>>;
type SubscribeTx = oneshot::Sender<Result<(SubscriptionId, mpsc::Receiver<Value>), TransportError>>;

/// A request waiting for its response.
enum Pending {
    Call(ResponseTx),
    /// `eth_subscribe`: the channel is registered inside the socket task
    /// before any later notification can be dispatched.
    Subscribe { tx: SubscribeTx, capacity: usize },
}

enum WsCommand {
    Send { req: JsonRpcRequest, tx: ResponseTx },
    Subscribe { req: JsonRpcRequest, capacity: usize, tx: SubscribeTx },
    Close,
}

/// WebSocket JSON-RPC client.
pub struct WsRpcClient {
    url: String,
    cmd_tx: mpsc::UnboundedSender<WsCommand>,
    subscriptions: SubscriptionManager,
}

impl WsRpcClient {
    /// Open the connection and start the background task.
    pub async fn connect(url: impl Into<String>) -> Result<Self, TransportError> {
        let url = url.into();
        tracing::info!(url = %url, "connecting via WebSocket");

        let (ws_stream, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| TransportError::WebSocket(format!("connect to {url} failed: {e}")))?;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<WsCommand>();
        let subscriptions = SubscriptionManager::new();

        tokio::spawn(ws_task(url.clone(), ws_stream, cmd_rx, subscriptions.clone()));

        Ok(Self {
            url,
            cmd_tx,
            subscriptions,
        })
    }

    /// `eth_subscribe(kind, ...params)`. Returns the subscription id and
    /// the stream of notification payloads (`params.result`), buffered up
    /// to `capacity`. Notifications arriving while the buffer is full are
    /// dropped.
    pub async fn subscribe(
        &self,
        kind: &str,
        params: Vec<Value>,
        capacity: usize,
    ) -> Result<(SubscriptionId, mpsc::Receiver<Value>), TransportError> {
        let params = std::iter::once(Value::String(kind.to_string()))
            .chain(params)
            .collect();
        let req = JsonRpcRequest::new("eth_subscribe", params);

        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(WsCommand::Subscribe { req, capacity, tx })
            .map_err(|_| TransportError::Closed)?;
        rx.await.map_err(|_| TransportError::Closed)?
    }

    /// `eth_unsubscribe`. The local stream ends immediately, whatever the
    /// node answers.
    pub async fn unsubscribe(&self, id: &SubscriptionId) -> Result<bool, TransportError> {
        self.subscriptions.remove(id);
        self.call("eth_unsubscribe", vec![Value::String(id.0.clone())]).await
    }

    /// `true` once the socket task has exited.
    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Drop for WsRpcClient {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(WsCommand::Close);
    }
}

#[async_trait]
impl RpcTransport for WsRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(WsCommand::Send { req, tx })
            .map_err(|_| TransportError::Closed)?;
        rx.await.map_err(|_| TransportError::Closed)?
    }

    fn url(&self) -> &str {
        &self.url
    }
}

async fn ws_task(
    url: String,
    ws_stream: WsStream,
    mut cmd_rx: mpsc::UnboundedReceiver<WsCommand>,
    subscriptions: SubscriptionManager,
) {
    let (mut sink, mut stream) = ws_stream.split();
    let mut pending: HashMap<u64, Pending> = HashMap::new();
    let mut next_id: u64 = 1;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let (req, entry) = match cmd {
                    None | Some(WsCommand::Close) => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                    Some(WsCommand::Send { req, tx }) => (req, Pending::Call(tx)),
                    Some(WsCommand::Subscribe { req, capacity, tx }) => {
                        (req, Pending::Subscribe { tx, capacity })
                    }
                };
                let id = next_id;
                next_id += 1;
                let req = req.with_id(id);
                let text = match serde_json::to_string(&req) {
                    Ok(text) => text,
                    Err(e) => {
                        fail(entry, TransportError::Deserialization(e));
                        continue;
                    }
                };
                pending.insert(id, entry);
                if let Err(e) = sink.send(Message::Text(text)).await {
                    tracing::warn!(url = %url, error = %e, "WS send failed");
                    break;
                }
            }
            msg = stream.next() => {
                match msg {
                    None | Some(Ok(Message::Close(_))) => {
                        tracing::warn!(url = %url, "WS connection closed by peer");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(url = %url, error = %e, "WS receive error");
                        break;
                    }
                    Some(Ok(Message::Text(text))) => {
                        handle_message(&text, &mut pending, &subscriptions);
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    for (_, entry) in pending.drain() {
        fail(entry, TransportError::Closed);
    }
    if !subscriptions.is_empty() {
        tracing::warn!(url = %url, count = subscriptions.len(), "WS closed, ending subscriptions");
    }
    subscriptions.close_all();
}

fn fail(entry: Pending, err: TransportError) {
    match entry {
        Pending::Call(tx) => {
            let _ = tx.send(Err(err));
        }
        Pending::Subscribe { tx, .. } => {
            let _ = tx.send(Err(err));
        }
    }
}

fn handle_message(
    text: &str,
    pending: &mut HashMap<u64, Pending>,
    subscriptions: &SubscriptionManager,
) {
    let Ok(val) = serde_json::from_str::<Value>(text) else {
        tracing::debug!("failed to parse WS message as JSON");
        return;
    };

    if val.get("method").and_then(Value::as_str) == Some("eth_subscription") {
        let params = &val["params"];
        if let Some(id) = params["subscription"].as_str() {
            subscriptions.dispatch(&SubscriptionId(id.to_string()), params["result"].clone());
        }
        return;
    }

    let resp = match serde_json::from_value::<JsonRpcResponse>(val) {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(error = %e, "unrecognised WS message");
            return;
        }
    };
    let Some(entry) = resp.id.as_number().and_then(|id| pending.remove(&id)) else {
        return;
    };

    match entry {
        Pending::Call(tx) => {
            let _ = tx.send(Ok(resp));
        }
        Pending::Subscribe { tx, capacity } => {
            let outcome = match resp.into_result() {
                Err(e) => Err(TransportError::Rpc(e)),
                Ok(Value::String(id)) => {
                    let id = SubscriptionId(id);
                    let rx = subscriptions.register(id.clone(), capacity);
                    tracing::debug!(subscription = %id, "subscription registered");
                    Ok((id, rx))
                }
                Ok(other) => Err(TransportError::Other(format!(
                    "unexpected eth_subscribe result: {other}"
                ))),
            };
            let _ = tx.send(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subscribe_response_registers_before_notifications() {
        let subs = SubscriptionManager::new();
        let mut pending = HashMap::new();
        let (tx, mut rx) = oneshot::channel();
        pending.insert(3, Pending::Subscribe { tx, capacity: 8 });

        handle_message(r#"{"jsonrpc":"2.0","id":3,"result":"0xabc"}"#, &mut pending, &subs);
        handle_message(
            r#"{"jsonrpc":"2.0","method":"eth_subscription","params":{"subscription":"0xabc","result":{"logIndex":"0x2"}}}"#,
            &mut pending,
            &subs,
        );

        let (id, mut notes) = rx.try_recv().unwrap().unwrap();
        assert_eq!(id, SubscriptionId("0xabc".into()));
        assert_eq!(notes.try_recv().unwrap(), json!({"logIndex": "0x2"}));
        assert!(pending.is_empty());
    }

    #[test]
    fn subscribe_error_is_rpc_error() {
        let subs = SubscriptionManager::new();
        let mut pending = HashMap::new();
        let (tx, mut rx) = oneshot::channel();
        pending.insert(1, Pending::Subscribe { tx, capacity: 8 });

        handle_message(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"notifications not supported"}}"#,
            &mut pending,
            &subs,
        );
        assert!(matches!(rx.try_recv().unwrap(), Err(TransportError::Rpc(_))));
        assert!(subs.is_empty());
    }

    #[test]
    fn call_response_matched_by_id() {
        let subs = SubscriptionManager::new();
        let mut pending = HashMap::new();
        let (tx1, mut rx1) = oneshot::channel();
        let (tx2, mut rx2) = oneshot::channel();
        pending.insert(1, Pending::Call(tx1));
        pending.insert(2, Pending::Call(tx2));

        handle_message(r#"{"jsonrpc":"2.0","id":2,"result":"0x2a"}"#, &mut pending, &subs);

        let resp = rx2.try_recv().unwrap().unwrap();
        assert_eq!(resp.into_result().unwrap(), json!("0x2a"));
        assert!(rx1.try_recv().is_err());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn garbage_is_ignored() {
        let subs = SubscriptionManager::new();
        let mut pending = HashMap::new();
        handle_message("not json", &mut pending, &subs);
        handle_message(r#"{"hello":"world"}"#, &mut pending, &subs);
        assert!(pending.is_empty());
    }

    /// Serves one connection, answering each request with its own id.
    /// `eth_subscribe` gets `"0xsub"`, anything else its method name.
    /// Resolves to the ids seen once the client goes away.
    async fn echo_server() -> (String, tokio::task::JoinHandle<Vec<u64>>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
            let mut seen = Vec::new();
            while let Some(Ok(msg)) = ws.next().await {
                let Message::Text(text) = msg else { continue };
                let req: Value = serde_json::from_str(&text).unwrap();
                let id = req["id"].as_u64().unwrap();
                seen.push(id);
                let result = match req["method"].as_str() {
                    Some("eth_subscribe") => json!("0xsub"),
                    other => json!(other),
                };
                let reply = json!({"jsonrpc": "2.0", "id": id, "result": result});
                if ws.send(Message::Text(reply.to_string())).await.is_err() {
                    break;
                }
            }
            seen
        });
        (format!("ws://{addr}"), server)
    }

    #[tokio::test]
    async fn concurrent_requests_never_share_an_id() {
        let (url, server) = echo_server().await;
        let client = WsRpcClient::connect(url).await.unwrap();

        // same caller-chosen id on both; the socket task replaces it
        let (chain, block, sub) = tokio::join!(
            client.send(JsonRpcRequest::new("eth_chainId", vec![]).with_id(1)),
            client.send(JsonRpcRequest::new("eth_blockNumber", vec![]).with_id(1)),
            client.subscribe("logs", vec![json!({"address": "0x01"})], 4),
        );
        assert_eq!(chain.unwrap().into_result().unwrap(), json!("eth_chainId"));
        assert_eq!(block.unwrap().into_result().unwrap(), json!("eth_blockNumber"));
        let (id, _notes) = sub.unwrap();
        assert_eq!(id, SubscriptionId("0xsub".into()));
        assert_eq!(client.active_subscriptions(), 1);

        let echoed: String = client.call("eth_getLogs", vec![]).await.unwrap();
        assert_eq!(echoed, "eth_getLogs");

        drop(client);
        let mut seen = server.await.unwrap();
        assert_eq!(seen.len(), 4);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[tokio::test]
    async fn peer_close_fails_requests_and_closes_client() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
            let _ = ws.close(None).await;
        });

        let client = WsRpcClient::connect(format!("ws://{addr}")).await.unwrap();
        let closed = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while !client.is_closed() {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(closed.is_ok());
        assert!(matches!(
            client.call::<Value>("eth_chainId", vec![]).await,
            Err(TransportError::Closed)
        ));
    }

    #[tokio::test]
    async fn connect_failure_is_websocket_error() {
        let err = WsRpcClient::connect("ws://127.0.0.1:9").await.err().unwrap();
        assert!(matches!(err, TransportError::WebSocket(_)));
    }
}
