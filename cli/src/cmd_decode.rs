//! `eigenevents decode-log`: decode and render one raw log offline.

use anyhow::{anyhow, Context, Result};
use eigenevents::{AbiRegistry, Contract, DecodedEvent, RawLog};
use eigenevents_evm::LogDecoder;
use std::sync::Arc;

pub fn run(contract: Contract, event: &str, topics: &[String], data: &str, as_json: bool) -> Result<()> {
    let decoded = decode(contract, event, topics, data)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
    } else {
        println!("Event:   {}.{}", contract, decoded.event);
        println!("Fields:");
        for (name, val) in &decoded.return_values {
            println!("  {}: {}", name, val);
        }
        if !decoded.message.is_empty() {
            println!("Message: {}", decoded.message);
        }
    }
    Ok(())
}

pub fn decode(contract: Contract, event: &str, topics: &[String], data: &str) -> Result<DecodedEvent> {
    let data = hex::decode(data.strip_prefix("0x").unwrap_or(data)).context("invalid data hex")?;

    let raw = RawLog {
        tx_hash: "0x0".into(),
        block_number: 0,
        log_index: 0,
        address: contract.mainnet_address().to_checksum(None),
        topics: topics.to_vec(),
        data,
    };

    let decoder = LogDecoder::new(Arc::new(AbiRegistry::mainnet()?));
    decoder
        .format_event(&raw, contract, event)?
        .ok_or_else(|| anyhow!("{contract} has no event named '{event}'"))
}
