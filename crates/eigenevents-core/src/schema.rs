//! Event schemas: the typed parameter tree of one ABI event.

use crate::contract::Contract;
use serde::{Deserialize, Serialize};

/// One ABI parameter. Tuple-kind parameters carry their components, which
/// makes the whole structure a finite tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// `None` for anonymous parameters; those never appear in decoded output
    pub name: Option<String>,
    /// Solidity type tag: `address`, `uint256`, `tuple`, `tuple[]`, ...
    pub ty: String,
    /// Only meaningful on top-level event parameters
    #[serde(default)]
    pub indexed: bool,
    /// Non-empty only for tuple-kind parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
            indexed: false,
            components: Vec::new(),
        }
    }

    pub fn anonymous(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
            indexed: false,
            components: Vec::new(),
        }
    }

    pub fn tuple(name: impl Into<String>, components: Vec<Param>) -> Self {
        Self {
            components,
            ..Self::new(name, "tuple")
        }
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Change the type tag, e.g. to turn a `tuple` into `tuple[]`.
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    /// `true` for `tuple`, `tuple[]`, `tuple[N]`, and nested arrays of tuples.
    pub fn is_tuple(&self) -> bool {
        self.ty.starts_with("tuple")
    }

    /// `true` if the type tag ends in an array suffix.
    pub fn is_array(&self) -> bool {
        self.ty.ends_with(']')
    }

    /// The canonical Solidity type used in event signatures. Tuples expand
    /// to their component list, keeping any array suffix:
    /// `tuple[]` with `(address, uint256)` → `(address,uint256)[]`.
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self.components.iter().map(Param::canonical_type).collect();
                format!("({}){}", inner.join(","), suffix)
            }
            None => self.ty.clone(),
        }
    }

    /// For an array-typed parameter, the parameter describing one element
    /// (outermost suffix removed). `None` for non-array types.
    pub fn array_element(&self) -> Option<Param> {
        if !self.is_array() {
            return None;
        }
        let open = self.ty.rfind('[')?;
        Some(Param {
            name: self.name.clone(),
            ty: self.ty[..open].to_string(),
            indexed: false,
            components: self.components.clone(),
        })
    }
}

/// The schema of a single event on a single contract.
/// Identity is `(contract, name)`; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchema {
    pub contract: Contract,
    /// Event name, e.g. "WithdrawalQueued"
    pub name: String,
    /// Anonymous events do not emit a signature topic
    #[serde(default)]
    pub anonymous: bool,
    /// Ordered parameters (order matters for ABI decode)
    pub params: Vec<Param>,
}

impl EventSchema {
    /// Canonical signature, e.g. `Deposit(address,address,address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.params.iter().map(Param::canonical_type).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// Parameters carried in topics[1..], in order.
    pub fn indexed_params(&self) -> Vec<&Param> {
        self.params.iter().filter(|p| p.indexed).collect()
    }

    /// Parameters carried in the data payload, in order.
    pub fn data_params(&self) -> Vec<&Param> {
        self.params.iter().filter(|p| !p.indexed).collect()
    }

    /// Names of the top-level named parameters, in order.
    pub fn named_params(&self) -> Vec<&str> {
        self.params.iter().filter_map(|p| p.name.as_deref()).collect()
    }
}
