//! # Chain Primitives
//!
//! Address/hash/token-id types shared by the host bridge and the core,
//! plus the sentinel constants and the one-shot zero-address
//! normalization used at the decode boundary.

// Re-export U256 from primitive-types for use across the workspace
pub use primitive_types::U256;

/// A 20-byte Ethereum-style contract or wallet address.
pub type Address = [u8; 20];

/// A 32-byte transaction hash.
pub type TxHash = [u8; 32];

/// An on-chain token identifier (uint256 in the registry contract).
pub type TokenId = U256;

/// The all-zeros address. Emitted by contracts to signal "no such
/// endpoint" (mint source, burn target, cleared nominee).
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// The canonical burn sentinel (`0x…dEaD`). A registry-level transfer to
/// this address is a terminal acceptance.
pub const BURN_ADDRESS: Address = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0xde, 0xad,
];

/// Collapse the zero-address sentinel to `None`.
///
/// This is applied exactly once, when a raw event parameter is decoded.
/// Downstream logic works with `Option<Address>` and never sees the
/// sentinel.
pub fn non_zero(address: Address) -> Option<Address> {
    if address == ZERO_ADDRESS {
        None
    } else {
        Some(address)
    }
}

/// Render an address as lowercase `0x`-prefixed hex. This is the entity
/// id form for accounts, registries and escrows.
pub fn address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Render a transaction hash as lowercase `0x`-prefixed hex.
pub fn tx_hash_hex(hash: &TxHash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Render a token id as minimal lowercase `0x`-prefixed hex
/// (`0x0` for zero, no leading zero digits otherwise).
pub fn token_id_hex(token_id: TokenId) -> String {
    format!("{:#x}", token_id)
}

/// Parse a `0x`-prefixed 20-byte hex address. Returns `None` on any
/// length or digit mismatch.
pub fn parse_address(s: &str) -> Option<Address> {
    let stripped = s.strip_prefix("0x")?;
    let bytes = hex::decode(stripped).ok()?;
    let mut address = ZERO_ADDRESS;
    if bytes.len() != address.len() {
        return None;
    }
    address.copy_from_slice(&bytes);
    Some(address)
}
