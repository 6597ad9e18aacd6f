//! `LogDecoder`: raw log + schema → [`DecodedEvent`].

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use eigenevents_core::{
    contract::Contract,
    error::{DecodeError, RegistryError},
    event::{DecodedEvent, RawLog},
    schema::{EventSchema, Param},
    types::ReturnValues,
};
use eigenevents_registry::AbiRegistry;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{normalizer, render};

/// Decoder for EigenLayer contract logs.
/// Thread-safe; clones share the registry.
#[derive(Debug, Clone)]
pub struct LogDecoder {
    registry: Arc<AbiRegistry>,
}

impl LogDecoder {
    pub fn new(registry: Arc<AbiRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AbiRegistry> {
        &self.registry
    }

    /// Resolve the schema for `(contract, event)` and decode `raw` against it.
    ///
    /// Returns `Ok(None)` when the contract's ABI has no such event. A
    /// contract without any interface is an error.
    pub fn format_event(
        &self,
        raw: &RawLog,
        contract: Contract,
        event: &str,
    ) -> Result<Option<DecodedEvent>, DecodeError> {
        let schema = match self.registry.schema_for(contract, event) {
            Ok(schema) => schema,
            Err(RegistryError::SchemaNotFound { .. }) => {
                warn!(%contract, event, "no ABI entry for event");
                return Ok(None);
            }
            Err(_) => {
                return Err(DecodeError::MissingInterface {
                    contract: contract.to_string(),
                })
            }
        };
        self.decode_log(raw, schema).map(Some)
    }

    /// Decode one log against a known schema.
    pub fn decode_log(&self, raw: &RawLog, schema: &EventSchema) -> Result<DecodedEvent, DecodeError> {
        // Anonymous events have no signature topic
        let topics = if schema.anonymous {
            raw.topics.as_slice()
        } else {
            raw.indexed_topics()
        };

        let mut indexed = Vec::new();
        for (i, param) in schema.indexed_params().into_iter().enumerate() {
            let topic = topics.get(i).ok_or_else(|| DecodeError::MissingTopic {
                param: param_label(param, i),
            })?;
            indexed.push(decode_topic(topic, param)?);
        }

        let data = decode_data(&raw.data, &schema.data_params())?;

        // Reassemble in declaration order
        let mut indexed = indexed.into_iter();
        let mut data = data.into_iter();
        let mut return_values = ReturnValues::with_capacity(schema.params.len());
        for param in &schema.params {
            let value = if param.indexed { indexed.next() } else { data.next() };
            let (Some(name), Some(value)) = (&param.name, value) else {
                continue;
            };
            return_values.insert(name.clone(), normalizer::normalize(value, param)?);
        }

        let message = render::render(&schema.name, &return_values);

        Ok(DecodedEvent {
            transaction_hash: raw.tx_hash.clone(),
            block_number: raw.block_number,
            log_index: raw.log_index,
            address: raw.address.clone(),
            event: schema.name.clone(),
            return_values,
            message,
        })
    }

    /// Decode many logs of the same event in parallel using Rayon.
    /// Output order matches input order; the first failure aborts the batch.
    pub fn decode_batch(
        &self,
        logs: &[RawLog],
        schema: &EventSchema,
    ) -> Result<Vec<DecodedEvent>, DecodeError> {
        debug!(event = %schema.name, count = logs.len(), "decoding batch");
        logs.par_iter()
            .map(|raw| self.decode_log(raw, schema))
            .collect()
    }
}

fn param_label(param: &Param, position: usize) -> String {
    param.name.clone().unwrap_or_else(|| format!("#{position}"))
}

/// Build the alloy type for a parameter from its canonical type string.
fn dyn_type(param: &Param) -> Result<DynSolType, DecodeError> {
    let canonical = param.canonical_type();
    DynSolType::parse(&canonical).map_err(|_| DecodeError::UnsupportedType {
        param: param.name.clone().unwrap_or_default(),
        ty: canonical,
    })
}

/// Decode a single indexed topic (always 32 bytes).
///
/// Value types are padded into the word and decode directly. Reference
/// types (string, bytes, arrays, tuples) are stored as the keccak256 of
/// their encoding; the original value is unrecoverable, so the hash is
/// returned as `bytes32`.
fn decode_topic(topic_hex: &str, param: &Param) -> Result<DynSolValue, DecodeError> {
    let hex = topic_hex.strip_prefix("0x").unwrap_or(topic_hex);
    let bytes = hex::decode(hex).map_err(|e| DecodeError::InvalidRawLog {
        reason: format!("invalid topic hex: {e}"),
    })?;
    if bytes.len() != 32 {
        return Err(DecodeError::InvalidRawLog {
            reason: format!("topic is {} bytes, expected 32", bytes.len()),
        });
    }

    let ty = dyn_type(param)?;
    match ty {
        DynSolType::String
        | DynSolType::Bytes
        | DynSolType::Array(_)
        | DynSolType::FixedArray(..)
        | DynSolType::Tuple(_) => {
            let word = alloy_primitives::B256::from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, 32))
        }
        _ => ty.abi_decode(&bytes).map_err(|e| DecodeError::AbiDecodeFailed {
            reason: format!("topic decode: {e}"),
        }),
    }
}

/// Decode the data payload as the ABI parameter sequence of the
/// non-indexed params.
fn decode_data(raw_data: &[u8], params: &[&Param]) -> Result<Vec<DynSolValue>, DecodeError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let types = params
        .iter()
        .map(|p| dyn_type(p))
        .collect::<Result<Vec<_>, _>>()?;

    let decoded = DynSolType::Tuple(types)
        .abi_decode_sequence(raw_data)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            reason: e.to_string(),
        })?;

    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use eigenevents_core::types::DecodedValue;

    fn decoder() -> LogDecoder {
        LogDecoder::new(Arc::new(AbiRegistry::mainnet().unwrap()))
    }

    fn topic(addr: Address) -> String {
        format!("0x{}", hex::encode(addr.into_word()))
    }

    #[test]
    fn decodes_indexed_only_event() {
        let reg = AbiRegistry::mainnet().unwrap();
        let sig = reg
            .signature_hash_for(Contract::DelegationManager, "StakerDelegated")
            .unwrap();
        let staker = Address::repeat_byte(0x11);
        let operator = Address::repeat_byte(0x22);
        let raw = RawLog {
            tx_hash: "0xfeed".into(),
            block_number: 19_600_000,
            log_index: 7,
            address: Contract::DelegationManager.mainnet_address().to_checksum(None),
            topics: vec![sig.as_hex().to_string(), topic(staker), topic(operator)],
            data: vec![],
        };
        let ev = decoder()
            .format_event(&raw, Contract::DelegationManager, "StakerDelegated")
            .unwrap()
            .unwrap();
        assert_eq!(ev.event, "StakerDelegated");
        assert_eq!(ev.log_index, 7);
        assert_eq!(
            ev.value("staker"),
            Some(&DecodedValue::Address(staker.to_checksum(None)))
        );
        assert_eq!(
            ev.message,
            format!(
                "{} delegated stake to {}",
                staker.to_checksum(None),
                operator.to_checksum(None)
            )
        );
    }

    #[test]
    fn message_ignores_emitting_contract() {
        let reg = AbiRegistry::mainnet().unwrap();
        let sig = reg
            .signature_hash_for(Contract::DelegationManager, "OwnershipTransferred")
            .unwrap();
        let prev = Address::repeat_byte(0x0a);
        let next = Address::repeat_byte(0x0b);
        let raw = RawLog {
            tx_hash: "0x02".into(),
            block_number: 2,
            log_index: 0,
            address: Contract::DelegationManager.mainnet_address().to_checksum(None),
            topics: vec![sig.as_hex().to_string(), topic(prev), topic(next)],
            data: vec![],
        };
        let ev = decoder()
            .format_event(&raw, Contract::DelegationManager, "OwnershipTransferred")
            .unwrap()
            .unwrap();
        assert_eq!(ev.message, render::render("OwnershipTransferred", &ev.return_values));
        assert_eq!(
            ev.message,
            format!(
                "Ownership of StrategyManager.sol transferred from {} to {}",
                prev.to_checksum(None),
                next.to_checksum(None)
            )
        );
    }

    #[test]
    fn missing_topic_is_an_error() {
        let reg = AbiRegistry::mainnet().unwrap();
        let schema = reg.schema_for(Contract::DelegationManager, "StakerDelegated").unwrap();
        let raw = RawLog {
            tx_hash: "0x01".into(),
            block_number: 1,
            log_index: 0,
            address: String::new(),
            topics: vec!["0x00".into(), topic(Address::ZERO)],
            data: vec![],
        };
        let err = decoder().decode_log(&raw, schema).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTopic { ref param } if param == "operator"));
    }

    #[test]
    fn indexed_string_keeps_hash() {
        let param = Param::new("label", "string").indexed();
        let word = format!("0x{}", "ab".repeat(32));
        let value = decode_topic(&word, &param).unwrap();
        assert_eq!(
            normalizer::normalize(value, &param).unwrap(),
            DecodedValue::Bytes(word)
        );
    }

    #[test]
    fn bad_topic_hex_is_invalid_raw_log() {
        let param = Param::new("who", "address").indexed();
        assert!(matches!(
            decode_topic("0xzz", &param),
            Err(DecodeError::InvalidRawLog { .. })
        ));
        assert!(matches!(
            decode_topic("0x0102", &param),
            Err(DecodeError::InvalidRawLog { .. })
        ));
    }

    #[test]
    fn unsupported_type_is_reported() {
        let param = Param::new("x", "notatype");
        assert!(matches!(
            dyn_type(&param),
            Err(DecodeError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn data_decodes_as_sequence() {
        let encoded = DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(3u64), 256),
            DynSolValue::String("hi".into()),
        ])
        .abi_encode_params();
        let a = Param::new("a", "uint256");
        let b = Param::new("b", "string");
        let values = decode_data(&encoded, &[&a, &b]).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], DynSolValue::String("hi".into()));
    }
}
