//! EigenEvents CLI.
//!
//! # Commands
//! ```text
//! eigenevents events      [--contract <C>]
//! eigenevents fetch       --contract <C> --event <E> [--from N] [--to N|latest] [--rpc URL] [--json]
//! eigenevents watch       --contract <C> --event <E> [--rpc wss://...] [--json]
//! eigenevents decode-log  --contract <C> --event <E> --topics <...> --data <hex>
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use eigenevents::{BlockTag, Contract};
use eigenevents_observability::init_tracing;
use std::path::PathBuf;

mod cmd_decode;
mod cmd_events;
mod cmd_fetch;
mod cmd_watch;
mod config;

use config::{CliConfig, RPC_URL_ENV};

#[derive(Parser, Debug)]
#[command(
    name = "eigenevents",
    about = "Fetch, stream and decode EigenLayer contract events",
    long_about = "
EigenEvents CLI: historical and live events of the EigenLayer DelegationManager,
StrategyManager, EigenPodManager and AVSDirectory contracts on Ethereum mainnet,
decoded and rendered as human-readable messages.

ENVIRONMENT VARIABLES:
  EIGENEVENTS_RPC_URL   JSON-RPC endpoint (http(s):// or ws(s)://), overrides the config file
  RUST_LOG              tracing filter, overrides the configured log levels
",
    version
)]
struct Cli {
    /// YAML config file with `client` and `log` sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known events with their signatures and topic hashes
    Events {
        /// Only this contract, e.g. StrategyManager
        #[arg(long)]
        contract: Option<Contract>,
    },

    /// Fetch past events
    Fetch {
        #[arg(long)]
        contract: Contract,
        /// Event name, e.g. Deposit
        #[arg(long)]
        event: String,
        /// First block (decimal, 0x-hex, or earliest|latest|pending)
        #[arg(long)]
        from: Option<BlockTag>,
        /// Last block (default: latest)
        #[arg(long)]
        to: Option<BlockTag>,
        /// Provider URL (overrides env and config)
        #[arg(long)]
        rpc: Option<String>,
        /// Print full decoded events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Stream new events until interrupted (needs a ws:// or wss:// provider)
    Watch {
        #[arg(long)]
        contract: Contract,
        #[arg(long)]
        event: String,
        #[arg(long)]
        rpc: Option<String>,
        /// Print full decoded events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a raw log offline
    #[command(name = "decode-log")]
    DecodeLog {
        #[arg(long)]
        contract: Contract,
        #[arg(long)]
        event: String,
        /// topics[0] = event signature hash, topics[1..] = indexed params
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
        /// Non-indexed params (hex, 0x-prefixed)
        #[arg(long, default_value = "0x")]
        data: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = CliConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        cfg.log.level = "debug".into();
    }
    init_tracing(&cfg.log);

    let env_url = std::env::var(RPC_URL_ENV).ok();

    match cli.command {
        Commands::Events { contract } => cmd_events::run(contract),

        Commands::Fetch { contract, event, from, to, rpc, json } => {
            let client = cfg.client_config(rpc.as_deref(), env_url)?;
            cmd_fetch::run(client, contract, &event, from, to, json).await
        }

        Commands::Watch { contract, event, rpc, json } => {
            let client = cfg.client_config(rpc.as_deref(), env_url)?;
            cmd_watch::run(client, contract, &event, json).await
        }

        Commands::DecodeLog { contract, event, topics, data, json } => {
            cmd_decode::run(contract, &event, &topics, &data, json)
        }
    }
}
