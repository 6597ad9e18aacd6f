//! End-to-end decode scenarios against the embedded mainnet ABIs.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use eigenevents_core::{
    contract::Contract,
    error::DecodeError,
    event::RawLog,
    schema::{EventSchema, Param},
    types::DecodedValue,
};
use eigenevents_evm::LogDecoder;
use eigenevents_registry::{AbiRegistry, ContractInterface};
use std::sync::Arc;

fn mainnet() -> Arc<AbiRegistry> {
    Arc::new(AbiRegistry::mainnet().unwrap())
}

fn topic(addr: Address) -> String {
    format!("0x{}", hex::encode(addr.into_word()))
}

fn raw_log(sig: &str, indexed: Vec<String>, data: Vec<u8>, log_index: u64) -> RawLog {
    let mut topics = vec![sig.to_string()];
    topics.extend(indexed);
    RawLog {
        tx_hash: format!("0x{:064x}", log_index + 1),
        block_number: 19_500_000,
        log_index,
        address: Contract::StrategyManager.mainnet_address().to_checksum(None),
        topics,
        data,
    }
}

fn uint(v: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(v), 256)
}

fn deposit_log(staker: Address, shares: u64, log_index: u64) -> RawLog {
    let reg = mainnet();
    let sig = reg.signature_hash_for(Contract::StrategyManager, "Deposit").unwrap();
    let token: Address = "0xae78736cd615f374d3085123a210448e74fc6393".parse().unwrap();
    let strategy: Address = "0x1BeE69b7dFFfA4E2d53C2a2Df135C388AD25dCD2".parse().unwrap();
    let data = DynSolValue::Tuple(vec![
        DynSolValue::Address(staker),
        DynSolValue::Address(token),
        DynSolValue::Address(strategy),
        uint(shares),
    ])
    .abi_encode_params();
    raw_log(sig.as_hex(), vec![], data, log_index)
}

#[test]
fn deposit_renders_token_symbol() {
    let staker = Address::repeat_byte(0xaa);
    let ev = LogDecoder::new(mainnet())
        .format_event(&deposit_log(staker, 1000, 3), Contract::StrategyManager, "Deposit")
        .unwrap()
        .expect("Deposit is in the StrategyManager ABI");

    let staker_hex = staker.to_checksum(None);
    assert_eq!(ev.message, format!("{staker_hex} deposited rETH for 1000 shares"));
    assert_eq!(
        ev.return_values.keys().collect::<Vec<_>>(),
        vec!["staker", "token", "strategy", "shares"]
    );
    assert_eq!(
        ev.value("token"),
        Some(&DecodedValue::Address("0xae78736Cd615f374D3085123A210448E74Fc6393".into()))
    );
    assert_eq!(ev.value("shares"), Some(&DecodedValue::Number("1000".into())));
    assert_eq!(ev.log_index, 3);
}

#[test]
fn withdrawal_queued_nested_struct() {
    let reg = mainnet();
    let sig = reg
        .signature_hash_for(Contract::DelegationManager, "WithdrawalQueued")
        .unwrap();
    let staker = Address::repeat_byte(0x01);
    let delegated_to = Address::repeat_byte(0x02);
    let withdrawer = Address::repeat_byte(0x03);
    let strategy = Address::repeat_byte(0x04);
    let data = DynSolValue::Tuple(vec![
        DynSolValue::FixedBytes(B256::repeat_byte(0x99), 32),
        DynSolValue::Tuple(vec![
            DynSolValue::Address(staker),
            DynSolValue::Address(delegated_to),
            DynSolValue::Address(withdrawer),
            uint(0),
            DynSolValue::Uint(U256::from(19_500_000u64), 32),
            DynSolValue::Array(vec![DynSolValue::Address(strategy)]),
            DynSolValue::Array(vec![uint(42)]),
        ]),
    ])
    .abi_encode_params();
    let raw = raw_log(sig.as_hex(), vec![], data, 0);

    let ev = LogDecoder::new(reg)
        .format_event(&raw, Contract::DelegationManager, "WithdrawalQueued")
        .unwrap()
        .unwrap();

    assert_eq!(
        ev.message,
        format!(
            "Withdrawal from {} to {}",
            staker.to_checksum(None),
            withdrawer.to_checksum(None)
        )
    );
    let withdrawal = ev.value("withdrawal").and_then(|w| w.as_struct()).unwrap();
    assert_eq!(
        withdrawal.keys().collect::<Vec<_>>(),
        vec!["staker", "delegatedTo", "withdrawer", "nonce", "startBlock", "strategies", "shares"]
    );
    assert_eq!(
        withdrawal["shares"],
        DecodedValue::Array(vec![DecodedValue::Number("42".into())])
    );
    assert_eq!(
        ev.value("withdrawalRoot").and_then(|v| v.as_str()),
        Some(format!("0x{}", "99".repeat(32)).as_str())
    );
}

#[test]
fn anonymous_params_are_dropped() {
    let schema = EventSchema {
        contract: Contract::AvsDirectory,
        name: "Mixed".into(),
        anonymous: false,
        params: vec![
            Param::new("a", "uint256"),
            Param::anonymous("uint256"),
            Param::new("b", "bool"),
        ],
    };
    let reg = AbiRegistry::from_interfaces(vec![ContractInterface::new(
        Contract::AvsDirectory,
        Address::ZERO,
        vec![schema],
    )])
    .unwrap();
    let data = DynSolValue::Tuple(vec![uint(1), uint(2), DynSolValue::Bool(true)]).abi_encode_params();
    let raw = raw_log("0x00", vec![], data, 0);

    let ev = LogDecoder::new(Arc::new(reg))
        .format_event(&raw, Contract::AvsDirectory, "Mixed")
        .unwrap()
        .unwrap();
    assert_eq!(ev.return_values.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(ev.value("a"), Some(&DecodedValue::Number("1".into())));
    assert_eq!(ev.value("b"), Some(&DecodedValue::Bool(true)));
    // No template for unknown events
    assert_eq!(ev.message, "");
}

#[test]
fn array_of_tuples_becomes_array_of_structs() {
    let schema = EventSchema {
        contract: Contract::EigenPodManager,
        name: "Batch".into(),
        anonymous: false,
        params: vec![
            Param::new("owner", "address").indexed(),
            Param::tuple(
                "items",
                vec![Param::new("who", "address"), Param::anonymous("uint8"), Param::new("amount", "uint256")],
            )
            .with_type("tuple[]"),
        ],
    };
    let reg = AbiRegistry::from_interfaces(vec![ContractInterface::new(
        Contract::EigenPodManager,
        Address::ZERO,
        vec![schema],
    )])
    .unwrap();
    let item = |who: u8, amount: u64| {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(Address::repeat_byte(who)),
            DynSolValue::Uint(U256::from(9u8), 8),
            uint(amount),
        ])
    };
    let data = DynSolValue::Tuple(vec![DynSolValue::Array(vec![item(0x0a, 5), item(0x0b, 6)])])
        .abi_encode_params();
    let owner = Address::repeat_byte(0x77);
    let raw = raw_log("0x00", vec![topic(owner)], data, 0);

    let ev = LogDecoder::new(Arc::new(reg))
        .format_event(&raw, Contract::EigenPodManager, "Batch")
        .unwrap()
        .unwrap();
    let items = ev.value("items").and_then(|v| v.as_array()).unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        let fields = item.as_struct().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["who", "amount"]);
    }
    assert_eq!(items[1].field("amount"), Some(&DecodedValue::Number("6".into())));
    assert_eq!(
        ev.value("owner"),
        Some(&DecodedValue::Address(owner.to_checksum(None)))
    );
}

#[test]
fn tuple_array_inside_tuple() {
    let schema = EventSchema {
        contract: Contract::StrategyManager,
        name: "Nested".into(),
        anonymous: false,
        params: vec![
            Param::tuple(
                "outer",
                vec![
                    Param::new("x", "uint256"),
                    Param::tuple(
                        "inner",
                        vec![Param::new("a", "address"), Param::anonymous("uint256"), Param::new("b", "uint256")],
                    )
                    .with_type("tuple[]"),
                    Param {
                        name: None,
                        ..Param::tuple("ignored", vec![Param::new("c", "uint8")])
                    },
                ],
            ),
            Param::new("note", "string"),
        ],
    };
    let reg = AbiRegistry::from_interfaces(vec![ContractInterface::new(
        Contract::StrategyManager,
        Address::ZERO,
        vec![schema],
    )])
    .unwrap();
    let inner = |who: u8, hidden: u64, b: u64| {
        DynSolValue::Tuple(vec![DynSolValue::Address(Address::repeat_byte(who)), uint(hidden), uint(b)])
    };
    let data = DynSolValue::Tuple(vec![
        DynSolValue::Tuple(vec![
            uint(3),
            DynSolValue::Array(vec![inner(0x0a, 7, 5), inner(0x0b, 8, 6)]),
            DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(1u8), 8)]),
        ]),
        DynSolValue::String("n".into()),
    ])
    .abi_encode_params();
    let raw = raw_log("0x00", vec![], data, 0);

    let ev = LogDecoder::new(Arc::new(reg))
        .format_event(&raw, Contract::StrategyManager, "Nested")
        .unwrap()
        .unwrap();

    assert_eq!(ev.return_values.keys().collect::<Vec<_>>(), vec!["outer", "note"]);
    let outer = ev.value("outer").and_then(|v| v.as_struct()).unwrap();
    assert_eq!(outer.keys().collect::<Vec<_>>(), vec!["x", "inner"]);
    assert_eq!(outer["x"], DecodedValue::Number("3".into()));

    let inner = outer["inner"].as_array().unwrap();
    assert_eq!(inner.len(), 2);
    for (item, (who, b)) in inner.iter().zip([(0x0a, "5"), (0x0b, "6")]) {
        let fields = item.as_struct().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            fields["a"],
            DecodedValue::Address(Address::repeat_byte(who).to_checksum(None))
        );
        assert_eq!(fields["b"], DecodedValue::Number(b.into()));
    }
    assert_eq!(ev.value("note"), Some(&DecodedValue::Str("n".into())));
}

#[test]
fn decoded_keys_match_named_params() {
    let reg = mainnet();
    let decoder = LogDecoder::new(reg.clone());
    let raw = deposit_log(Address::repeat_byte(0x05), 7, 0);
    let schema = reg.schema_for(Contract::StrategyManager, "Deposit").unwrap();
    let ev = decoder.decode_log(&raw, schema).unwrap();
    assert_eq!(ev.return_values.keys().map(String::as_str).collect::<Vec<_>>(), schema.named_params());
}

#[test]
fn decoding_is_deterministic() {
    let decoder = LogDecoder::new(mainnet());
    let raw = deposit_log(Address::repeat_byte(0x06), 123, 9);
    let a = decoder.format_event(&raw, Contract::StrategyManager, "Deposit").unwrap();
    let b = decoder.format_event(&raw, Contract::StrategyManager, "Deposit").unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn batch_preserves_input_order() {
    let reg = mainnet();
    let decoder = LogDecoder::new(reg.clone());
    let schema = reg.schema_for(Contract::StrategyManager, "Deposit").unwrap();
    let logs: Vec<RawLog> = (0..64)
        .map(|i| deposit_log(Address::repeat_byte(i as u8 + 1), i * 10, i))
        .collect();
    let events = decoder.decode_batch(&logs, schema).unwrap();
    assert_eq!(events.len(), 64);
    for (i, ev) in events.iter().enumerate() {
        assert_eq!(ev.log_index, i as u64);
        assert_eq!(ev.value("shares"), Some(&DecodedValue::Number((i * 10).to_string())));
    }
}

#[test]
fn batch_aborts_on_bad_log() {
    let reg = mainnet();
    let decoder = LogDecoder::new(reg.clone());
    let schema = reg.schema_for(Contract::StrategyManager, "Deposit").unwrap();
    let mut logs = vec![deposit_log(Address::repeat_byte(1), 1, 0), deposit_log(Address::repeat_byte(2), 2, 1)];
    logs[1].data.truncate(40);
    assert!(matches!(
        decoder.decode_batch(&logs, schema),
        Err(DecodeError::AbiDecodeFailed { .. })
    ));
}

#[test]
fn unknown_event_is_soft_none() {
    let decoder = LogDecoder::new(mainnet());
    let raw = deposit_log(Address::repeat_byte(1), 1, 0);
    let out = decoder
        .format_event(&raw, Contract::StrategyManager, "NotARealEvent")
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn missing_interface_is_raised() {
    let decoder = LogDecoder::new(Arc::new(AbiRegistry::from_interfaces(vec![]).unwrap()));
    let raw = deposit_log(Address::repeat_byte(1), 1, 0);
    let err = decoder
        .format_event(&raw, Contract::StrategyManager, "Deposit")
        .unwrap_err();
    assert!(matches!(err, DecodeError::MissingInterface { ref contract } if contract == "StrategyManager"));
}

#[test]
fn truncated_data_fails_decode() {
    let decoder = LogDecoder::new(mainnet());
    let mut raw = deposit_log(Address::repeat_byte(1), 1, 0);
    raw.data.truncate(64);
    let err = decoder
        .format_event(&raw, Contract::StrategyManager, "Deposit")
        .unwrap_err();
    assert!(matches!(err, DecodeError::AbiDecodeFailed { .. }));
}

#[test]
fn eigenpod_signed_delta() {
    let reg = mainnet();
    let sig = reg
        .signature_hash_for(Contract::EigenPodManager, "PodSharesUpdated")
        .unwrap();
    let owner = Address::repeat_byte(0x0c);
    let delta = alloy_primitives::I256::from_dec_str("-32000000000").unwrap();
    let data = DynSolValue::Tuple(vec![DynSolValue::Int(delta, 256)]).abi_encode_params();
    let raw = raw_log(sig.as_hex(), vec![topic(owner)], data, 0);
    let ev = LogDecoder::new(reg)
        .format_event(&raw, Contract::EigenPodManager, "PodSharesUpdated")
        .unwrap()
        .unwrap();
    assert_eq!(
        ev.message,
        format!("EigenPod shares of {} changed by -32000000000", owner.to_checksum(None))
    );
}
