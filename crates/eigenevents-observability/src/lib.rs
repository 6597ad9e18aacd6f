//! # eigenevents-observability
//!
//! Structured logging for EigenEvents binaries.
//!
//! Logs go to stderr so that stdout stays reserved for event output.
//! Levels are configurable globally and per component (crate name), and
//! `RUST_LOG` wins over both when set.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, try_init_tracing, LogConfig};
