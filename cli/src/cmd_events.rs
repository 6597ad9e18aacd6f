//! `eigenevents events`: list the events each contract's ABI declares.

use anyhow::Result;
use eigenevents::{AbiRegistry, Contract};
use eigenevents_evm::EventKind;
use eigenevents_registry::keccak256_signature;

pub fn run(only: Option<Contract>) -> Result<()> {
    let registry = AbiRegistry::mainnet()?;

    for contract in registry.contracts().filter(|c| only.map_or(true, |o| o == *c)) {
        let address = registry.address_of(contract)?;
        println!("{} ({})", contract, address.to_checksum(None));

        for schema in registry.events(contract)? {
            let signature = schema.signature();
            let topic = keccak256_signature(&signature);
            let rendered = if schema.name.parse::<EventKind>().is_ok() { "msg" } else { "   " };
            println!("  {rendered}  {signature}");
            println!("         {topic}");
        }
        println!();
    }
    Ok(())
}
