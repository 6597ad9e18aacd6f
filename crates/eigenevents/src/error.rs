use eigenevents_core::error::{DecodeError, RegistryError};
use eigenevents_rpc::TransportError;
use thiserror::Error;

/// Errors surfaced by [`EigenEvents`](crate::EigenEvents).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A background decode or delivery task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
