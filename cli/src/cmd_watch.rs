//! `eigenevents watch`: live events over `eth_subscribe`.

use anyhow::{bail, Context, Result};
use eigenevents::{ClientConfig, ConnectionKind, Contract, DecodedEvent, EigenEvents, EventSink, FnSink};
use std::sync::Arc;
use tracing::info;

use crate::cmd_fetch::summary_line;

pub async fn run(config: ClientConfig, contract: Contract, event: &str, as_json: bool) -> Result<()> {
    if config.connection != ConnectionKind::Ws {
        bail!(
            "watch needs a WebSocket provider (ws:// or wss://), got '{}'",
            config.provider_url
        );
    }
    let url = config.provider_url.clone();
    let client = EigenEvents::connect(config)
        .await
        .with_context(|| format!("connecting to {url}"))?;

    // None selects the JSON console sink
    let sink: Option<Arc<dyn EventSink>> = if as_json {
        None
    } else {
        Some(Arc::new(FnSink::new(|ev: DecodedEvent| async move {
            println!("{}", summary_line(&ev));
        })))
    };

    let Some(mut sub) = client.subscribe(contract, event, sink).await? else {
        bail!("could not subscribe to {contract}.{event}, see log for details");
    };
    eprintln!("watching {contract}.{event} (subscription {}), Ctrl-C to stop", sub.id());

    let interrupted = tokio::select! {
        res = sub.wait() => {
            res?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        info!(subscription = %sub.id(), "interrupted, unsubscribing");
        sub.close().await;
    } else {
        eprintln!("connection closed");
    }
    Ok(())
}
