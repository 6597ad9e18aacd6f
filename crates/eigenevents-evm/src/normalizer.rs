//! Converts alloy-core `DynSolValue` → EigenEvents `DecodedValue`.
//!
//! Scalars map one-to-one. Tuple-kind parameters are rebuilt against their
//! component tree so that each named component becomes a map key; anonymous
//! components are skipped.

use alloy_core::dyn_abi::DynSolValue;
use eigenevents_core::{error::DecodeError, schema::Param, types::DecodedValue};
use indexmap::IndexMap;

/// Normalize a decoded value against the parameter that describes it.
pub fn normalize(val: DynSolValue, param: &Param) -> Result<DecodedValue, DecodeError> {
    if !param.is_tuple() {
        return Ok(scalar(val));
    }

    match val {
        DynSolValue::Tuple(items) => named_tuple(items, &param.components),

        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let elem = param
                .array_element()
                .ok_or_else(|| DecodeError::AbiDecodeFailed {
                    reason: format!("array value for non-array type '{}'", param.ty),
                })?;
            items
                .into_iter()
                .map(|item| normalize(item, &elem))
                .collect::<Result<Vec<_>, _>>()
                .map(DecodedValue::Array)
        }

        // Indexed tuples only carry their hash
        other => Ok(scalar(other)),
    }
}

/// Zip tuple members with their component descriptors, keeping named ones.
fn named_tuple(items: Vec<DynSolValue>, components: &[Param]) -> Result<DecodedValue, DecodeError> {
    if items.len() != components.len() {
        return Err(DecodeError::AbiDecodeFailed {
            reason: format!(
                "tuple has {} members but schema declares {} components",
                items.len(),
                components.len()
            ),
        });
    }

    let mut fields = IndexMap::with_capacity(items.len());
    for (item, component) in items.into_iter().zip(components) {
        let Some(name) = &component.name else {
            continue;
        };
        fields.insert(name.clone(), normalize(item, component)?);
    }
    Ok(DecodedValue::Struct(fields))
}

/// Schema-free conversion for non-tuple values.
pub fn scalar(val: DynSolValue) -> DecodedValue {
    match val {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),

        DynSolValue::Int(i, _bits) => DecodedValue::Number(i.to_string()),

        DynSolValue::Uint(u, _bits) => DecodedValue::Number(u.to_string()),

        DynSolValue::FixedBytes(word, size) => DecodedValue::from(&word[..size.min(32)]),

        DynSolValue::Bytes(b) => DecodedValue::from(b.as_slice()),

        DynSolValue::String(s) => DecodedValue::Str(s),

        // EIP-55 checksum encoding
        DynSolValue::Address(a) => DecodedValue::Address(a.to_checksum(None)),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            DecodedValue::Array(vals.into_iter().map(scalar).collect())
        }

        // No component names available: positional keys "0", "1", ...
        DynSolValue::Tuple(vals) => DecodedValue::Struct(
            vals.into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), scalar(v)))
                .collect(),
        ),

        DynSolValue::Function(f) => DecodedValue::from(f.as_slice()),
    }
}
