//! # eigenevents-evm
//!
//! The decoding and rendering engine.
//!
//! ## Implementation notes
//! - Uses `alloy-core` dyn-abi for the byte-level ABI decode
//! - topics[0] → event signature hash (never decoded)
//! - topics[1..] → indexed parameters (each 32 bytes; reference types are hashed)
//! - `data` → non-indexed parameters (ABI-encoded parameter sequence)
//! - Tuple values are rebuilt as ordered maps keyed by component name;
//!   anonymous parameters are dropped at every level
//! - [`render`] turns decoded values into a one-line summary per event kind

pub mod decoder;
pub mod normalizer;
pub mod render;
pub mod symbols;

pub use decoder::LogDecoder;
pub use render::{render, EventKind, UnknownEvent};
pub use symbols::SymbolTable;
