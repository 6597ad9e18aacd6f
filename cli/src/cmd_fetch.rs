//! `eigenevents fetch`: historical events over `eth_getLogs`.

use anyhow::{Context, Result};
use eigenevents::{BlockTag, ClientConfig, Contract, DecodedEvent, EigenEvents, EventQuery};

pub async fn run(
    config: ClientConfig,
    contract: Contract,
    event: &str,
    from: Option<BlockTag>,
    to: Option<BlockTag>,
    as_json: bool,
) -> Result<()> {
    let url = config.provider_url.clone();
    let client = EigenEvents::connect(config)
        .await
        .with_context(|| format!("connecting to {url}"))?;

    let mut query = EventQuery::new(contract, event);
    if let Some(from) = from {
        query = query.from_block(from);
    }
    if let Some(to) = to {
        query = query.to_block(to);
    }

    let events = client
        .fetch(query)
        .await
        .with_context(|| format!("fetching {contract}.{event}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        for ev in &events {
            println!("{}", summary_line(ev));
        }
        eprintln!("{} event(s)", events.len());
    }
    Ok(())
}

/// `block:log_index  tx  message`, with the event name standing in for an
/// empty message.
pub fn summary_line(ev: &DecodedEvent) -> String {
    let text = if ev.message.is_empty() { ev.event.as_str() } else { ev.message.as_str() };
    format!("{}:{}  {}  {}", ev.block_number, ev.log_index, ev.transaction_hash, text)
}
