//! Static address → symbol tables used when rendering messages.

use eigenevents_core::types::DecodedValue;

/// A fixed mapping from contract address to asset symbol.
///
/// Keys are stored lowercase; lookups ignore case.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    entries: &'static [(&'static str, &'static str)],
}

impl SymbolTable {
    /// Strategy contract → underlying asset.
    pub const STRATEGIES: SymbolTable = SymbolTable {
        entries: &[
            ("0x54945180db7943c0ed0fee7edab2bd24620256bc", "cbETH"),
            ("0x93c4b944d05dfe6df7645a86cd2206016c51564d", "stETH"),
            ("0x1bee69b7dfffa4e2d53c2a2df135c388ad25dcd2", "rETH"),
            ("0x9d7ed45ee2e8fc5482fa2428f15c971e6369011d", "ETHx"),
            ("0x13760f50a9d7377e4f20cb8cf9e4c26586c658ff", "ankrETH"),
            ("0xa4c637e0f704745d182e4d38cab7e7485321d059", "OETH"),
            ("0x57ba429517c3473b6d34ca9acd56c0e735b94c02", "osETH"),
            ("0x0fe4f44bee93503346a3ac9ee5a26b130a5796d6", "swETH"),
            ("0x7ca911e83dabf90c90dd3de5411a10f1a6112184", "wBETH"),
            ("0x8ca7a5d6f3acd3a7a8bc468a8cd0fb14b6bd28b6", "sfrxETH"),
            ("0xae60d8180437b5c34bb956822ac2710972584473", "lsETH"),
            ("0x298afb19a105d59e74658c4c334ff360bade6dd2", "mETH"),
            ("0xbeac0eeeeeeeeeeeeeeeeeeeeeeeeeeeeeebeac0", "Beacon Chain ETH"),
        ],
    };

    /// ERC-20 token contract → symbol.
    pub const TOKENS: SymbolTable = SymbolTable {
        entries: &[
            ("0xbe9895146f7af43049ca1c1ae358b0541ea49704", "cbETH"),
            ("0xae7ab96520de3a18e5e111b5eaab095312d7fe84", "stETH"),
            ("0xae78736cd615f374d3085123a210448e74fc6393", "rETH"),
            ("0xa35b1b31ce002fbf2058d22f30f95d405200a15b", "ETHx"),
            ("0xe95a203b1a91a908f9b9ce46459d101078c2c3cb", "ankrETH"),
            ("0x856c4efb76c1d1ae02e20ceb03a2a6a08b0b8dc3", "OETH"),
            ("0xf1c9acdc66974dfb6decb12aa385b9cd01190e38", "osETH"),
            ("0xf951e335afb289353dc249e82926178eac7ded78", "swETH"),
            ("0xa2e3356610840701bdf5611a53974510ae27e2e1", "wBETH"),
            ("0xac3e018457b222d93114458476f3e3416abbe38f", "sfrxETH"),
            ("0x8c1bed5b9a0928467c9b1341da1d7bd5e10b6549", "lsETH"),
            ("0xd5f7838f5c461feff7fe49ea5ebaf7728bb0adfa", "mETH"),
            ("0xbeac0eeeeeeeeeeeeeeeeeeeeeeeeeeeeeebeac0", "Beacon Chain ETH"),
        ],
    };

    pub fn lookup(&self, address: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(addr, _)| addr.eq_ignore_ascii_case(address))
            .map(|(_, symbol)| *symbol)
    }

    /// Symbol for a decoded value, or the value's own text when the address
    /// is not in the table. A missing value renders as the empty string.
    pub fn display(&self, value: Option<&DecodedValue>) -> String {
        match value {
            Some(v) => {
                let text = v.to_string();
                self.lookup(&text).map(str::to_string).unwrap_or(text)
            }
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            SymbolTable::TOKENS.lookup("0xae78736Cd615f374D3085123A210448E74Fc6393"),
            Some("rETH")
        );
        assert_eq!(
            SymbolTable::STRATEGIES.lookup("0x1BeE69b7dFFfA4E2d53C2a2Df135C388AD25dCD2"),
            Some("rETH")
        );
    }

    #[test]
    fn beacon_chain_pseudo_address_in_both_tables() {
        let beacon = "0xbeaC0eeEeeeeEEeEeEEEEeeEEeEeeeEeeEEBEaC0";
        assert_eq!(SymbolTable::STRATEGIES.lookup(beacon), Some("Beacon Chain ETH"));
        assert_eq!(SymbolTable::TOKENS.lookup(beacon), Some("Beacon Chain ETH"));
    }

    #[test]
    fn unmatched_address_passes_through() {
        let v = DecodedValue::Address("0x0000000000000000000000000000000000000001".into());
        assert_eq!(
            SymbolTable::TOKENS.display(Some(&v)),
            "0x0000000000000000000000000000000000000001"
        );
        assert_eq!(SymbolTable::TOKENS.display(None), "");
    }

    #[test]
    fn tables_have_thirteen_entries() {
        assert_eq!(SymbolTable::STRATEGIES.len(), 13);
        assert_eq!(SymbolTable::TOKENS.len(), 13);
        assert!(!SymbolTable::TOKENS.is_empty());
    }
}
