//! Error types for the registry and decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single log.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The contract handed to the decoder has no interface description bound
    /// to it. Fatal for that call.
    #[error("Contract {contract} has no interface description")]
    MissingInterface { contract: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    #[error("Unsupported ABI type '{ty}' for parameter '{param}'")]
    UnsupportedType { param: String, ty: String },

    #[error("Invalid raw log: {reason}")]
    InvalidRawLog { reason: String },

    #[error("Missing topic for indexed parameter '{param}'")]
    MissingTopic { param: String },
}

/// Errors from the ABI registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown contract '{name}'")]
    UnknownContract { name: String },

    #[error("No ABI entry for event '{event}' on contract {contract}")]
    SchemaNotFound { contract: String, event: String },

    #[error("Invalid ABI for {contract}: {reason}")]
    InvalidAbi { contract: String, reason: String },

    #[error("Duplicate interface for contract {contract}")]
    DuplicateInterface { contract: String },
}

impl RegistryError {
    /// `true` for the soft "event not in this contract's ABI" condition.
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self, RegistryError::SchemaNotFound { .. })
    }
}
