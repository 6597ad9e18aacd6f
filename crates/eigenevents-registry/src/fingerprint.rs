//! Event signature hashing.
//!
//! The signature hash of an event is the keccak256 of its canonical
//! signature string, e.g.:
//!   keccak256("Deposit(address,address,address,uint256)")
//!   → 0x7cfff908a4b583f36430b25d75964c458d8ede8a99bd61be750e97ee1b2f3a96
//!
//! Non-anonymous events emit this hash as topics[0].

use eigenevents_core::event::EventFingerprint;
use tiny_keccak::{Hasher, Keccak};

/// Compute the keccak256 fingerprint of an event signature string.
/// Input: `"EventName(type1,type2,...)"`, tuples already expanded.
pub fn keccak256_signature(signature: &str) -> EventFingerprint {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    EventFingerprint::new(format!("0x{}", hex::encode(output)))
}
