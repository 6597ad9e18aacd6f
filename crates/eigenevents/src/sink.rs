//! Consumers of live decoded events.

use async_trait::async_trait;
use eigenevents_core::event::DecodedEvent;
use std::future::Future;
use std::io::Write;
use tracing::warn;

/// Receives each decoded event of a live subscription. Calls are awaited
/// one at a time, in arrival order.
#[async_trait]
pub trait EventSink: Send + Sync + 'static {
    async fn deliver(&self, event: DecodedEvent);
}

/// Writes every event to stdout as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

#[async_trait]
impl EventSink for ConsoleSink {
    async fn deliver(&self, event: DecodedEvent) {
        match serde_json::to_string_pretty(&event) {
            Ok(json) => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{json}") {
                    warn!(error = %e, "failed to write event to stdout");
                }
            }
            Err(e) => warn!(error = %e, event = %event.event, "failed to serialize event"),
        }
    }
}

/// Adapts an async closure into an [`EventSink`].
///
/// ```no_run
/// # use eigenevents::FnSink;
/// let sink = FnSink::new(|ev: eigenevents::DecodedEvent| async move {
///     println!("{}", ev.message);
/// });
/// ```
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> EventSink for FnSink<F>
where
    F: Fn(DecodedEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn deliver(&self, event: DecodedEvent) {
        (self.f)(event).await
    }
}
