//! `EigenEvents`: the public entry point.

use eigenevents_core::{
    contract::Contract,
    event::{DecodedEvent, RawLog},
    schema::EventSchema,
};
use eigenevents_evm::LogDecoder;
use eigenevents_registry::{keccak256_signature, AbiRegistry};
use eigenevents_rpc::{HttpRpcClient, WsRpcClient};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::{ClientConfig, ConnectionKind};
use crate::error::ClientError;
use crate::provider::{LogFilter, LogProvider, RpcLogProvider};
use crate::query::{BlockTag, EventQuery};
use crate::sink::{ConsoleSink, EventSink};
use crate::subscription::Subscription;

/// Fetches and streams decoded EigenLayer events.
///
/// Cheap to clone; clones share the provider and registry.
#[derive(Clone)]
pub struct EigenEvents {
    config: ClientConfig,
    registry: Arc<AbiRegistry>,
    decoder: LogDecoder,
    provider: Arc<dyn LogProvider>,
}

impl EigenEvents {
    /// Connect to the node named in `config`, bound to the mainnet
    /// contract registry.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let registry = Arc::new(AbiRegistry::mainnet()?);

        let provider = match config.connection {
            ConnectionKind::Http => RpcLogProvider::Http(HttpRpcClient::new(
                config.provider_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?),
            ConnectionKind::Ws => {
                RpcLogProvider::Ws(WsRpcClient::connect(config.provider_url.clone()).await?)
            }
        };
        info!(url = %config.provider_url, connection = ?config.connection, "EigenEvents connected");

        Self::with_provider(registry, Arc::new(provider), config)
    }

    /// Build a client over any log source.
    pub fn with_provider(
        registry: Arc<AbiRegistry>,
        provider: Arc<dyn LogProvider>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            decoder: LogDecoder::new(registry.clone()),
            config,
            registry,
            provider,
        })
    }

    pub fn registry(&self) -> &Arc<AbiRegistry> {
        &self.registry
    }

    pub fn decoder(&self) -> &LogDecoder {
        &self.decoder
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Schema lookup that treats an unknown event as a soft miss.
    fn schema(&self, contract: Contract, event: &str) -> Result<Option<&EventSchema>, ClientError> {
        match self.registry.schema_for(contract, event) {
            Ok(schema) => Ok(Some(schema)),
            Err(e) if e.is_schema_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn filter_for(&self, contract: Contract, schema: &EventSchema) -> Result<LogFilter, ClientError> {
        let address = self.registry.address_of(contract)?;
        Ok(LogFilter::new(address, keccak256_signature(&schema.signature())))
    }

    /// All past occurrences of `query.event` on `query.contract`, decoded,
    /// in the order the node returned them.
    ///
    /// An event missing from the contract's ABI yields an empty result.
    pub async fn fetch(&self, query: EventQuery) -> Result<Vec<DecodedEvent>, ClientError> {
        let Some(schema) = self.schema(query.contract, &query.event)? else {
            warn!(contract = %query.contract, event = %query.event, "no ABI entry for event, nothing to fetch");
            return Ok(Vec::new());
        };

        let from = query
            .from_block
            .unwrap_or(BlockTag::Number(self.config.default_from_block));
        let to = query.to_block.unwrap_or(BlockTag::Latest);
        let filter = self.filter_for(query.contract, schema)?.with_range(from, to);

        debug!(contract = %query.contract, event = %query.event, %from, %to, "fetching logs");
        let logs = self.provider.get_logs(&filter).await?;
        if logs.is_empty() {
            return Ok(Vec::new());
        }

        let decoder = self.decoder.clone();
        let schema = schema.clone();
        let events =
            tokio::task::spawn_blocking(move || decoder.decode_batch(&logs, &schema)).await??;

        info!(contract = %query.contract, event = %query.event, count = events.len(), "fetched events");
        Ok(events)
    }

    /// [`fetch`](Self::fetch), then pipe every event through `transform`.
    /// Up to `sink_concurrency` transforms run at once; the output keeps
    /// fetch order.
    pub async fn fetch_with<F, Fut, T>(
        &self,
        query: EventQuery,
        transform: F,
    ) -> Result<Vec<T>, ClientError>
    where
        F: FnMut(DecodedEvent) -> Fut,
        Fut: Future<Output = T>,
    {
        let events = self.fetch(query).await?;
        Ok(stream::iter(events)
            .map(transform)
            .buffered(self.config.sink_concurrency)
            .collect()
            .await)
    }

    /// Stream new occurrences of `event` on `contract` into `sink`
    /// (stdout JSON when `None`).
    ///
    /// Returns `Ok(None)` if the event is unknown or the node refuses the
    /// subscription; both are logged. The stream ends when the connection
    /// drops.
    pub async fn subscribe(
        &self,
        contract: Contract,
        event: &str,
        sink: Option<Arc<dyn EventSink>>,
    ) -> Result<Option<Subscription>, ClientError> {
        let Some(schema) = self.schema(contract, event)? else {
            error!(%contract, event, "cannot subscribe: no ABI entry for event");
            return Ok(None);
        };
        let filter = self.filter_for(contract, schema)?;

        let feed = match self
            .provider
            .subscribe_logs(&filter, self.config.channel_capacity)
            .await
        {
            Ok(feed) => feed,
            Err(e) => {
                error!(%contract, event, error = %e, "failed to open log subscription");
                return Ok(None);
            }
        };
        info!(%contract, event, subscription = %feed.id, "subscribed");

        let sink = sink.unwrap_or_else(|| Arc::new(ConsoleSink));
        let task = tokio::spawn(deliver(
            self.decoder.clone(),
            schema.clone(),
            feed.logs,
            sink,
            self.provider.clone(),
        ));

        Ok(Some(Subscription::new(feed.id, task, self.provider.clone())))
    }
}

/// Decode, render and hand over each live log, one at a time.
async fn deliver(
    decoder: LogDecoder,
    schema: EventSchema,
    mut logs: mpsc::Receiver<RawLog>,
    sink: Arc<dyn EventSink>,
    // keeps the transport alive for as long as the feed runs
    _provider: Arc<dyn LogProvider>,
) {
    while let Some(raw) = logs.recv().await {
        match decoder.decode_log(&raw, &schema) {
            Ok(event) => sink.deliver(event).await,
            Err(e) => error!(
                event = %schema.name,
                tx = %raw.tx_hash,
                log_index = raw.log_index,
                error = %e,
                "failed to decode live log, skipping"
            ),
        }
    }
    info!(event = %schema.name, "subscription stream ended");
}
