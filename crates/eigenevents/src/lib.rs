//! # eigenevents
//!
//! Client for the events of the EigenLayer core contracts
//! (DelegationManager, StrategyManager, EigenPodManager, AVSDirectory).
//!
//! Two retrieval modes share one decode path:
//!
//! ```text
//! EventQuery ──► LogFilter ──► LogProvider::get_logs ──► LogDecoder::decode_batch (rayon) ──► Vec<DecodedEvent>
//!
//! subscribe  ──► LogFilter ──► LogProvider::subscribe_logs
//!                                   │  bounded mpsc
//!                                   ▼
//!                           delivery task: decode → render → EventSink::deliver (in arrival order)
//! ```
//!
//! Every [`DecodedEvent`] carries the named return values and a one-line
//! human-readable `message`.

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod query;
pub mod sink;
pub mod subscription;

pub use client::EigenEvents;
pub use config::{ClientConfig, ConnectionKind};
pub use error::ClientError;
pub use provider::{LogFilter, LogProvider, LogSubscription, RpcLogProvider};
pub use query::{BlockTag, EventQuery};
pub use sink::{ConsoleSink, EventSink, FnSink};
pub use subscription::Subscription;

pub use eigenevents_core::{Contract, DecodedEvent, DecodedValue, RawLog};
pub use eigenevents_registry::AbiRegistry;
