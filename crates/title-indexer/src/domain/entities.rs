//! # Graph Entities
//!
//! The mutable side of the entity graph: accounts, transactions,
//! registries, tokens and escrows. All entity references are stored as
//! string ids; the store resolves them by kind.

use serde::{Deserialize, Serialize};
use shared_types::TokenId;

use crate::ports::store::impl_entity_record;

/// A wallet or contract address participating in the title lifecycle.
///
/// Identity only: accounts carry no mutable state and are re-created
/// idempotently (unconditional upsert) on every reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Lowercase hex address.
    pub id: String,
}

impl_entity_record!(Account, "Account");

/// An observed on-chain transaction. Created at most once per hash,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash, lowercase hex.
    pub id: String,
    /// Block timestamp (seconds since epoch).
    pub timestamp: u64,
    /// Block number the transaction was mined in.
    pub block_number: u64,
}

impl_entity_record!(Transaction, "Transaction");

/// A token registry contract. Created lazily on first reference,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistry {
    /// Registry contract address, lowercase hex.
    pub id: String,
    /// Collection name; empty when the on-chain read reverted.
    pub name: String,
    /// Collection symbol; empty when the on-chain read reverted.
    pub symbol: String,
}

impl_entity_record!(TokenRegistry, "TokenRegistry");

/// A document token within a registry.
///
/// Initialized once (from event data or reconstructed contract state)
/// and thereafter mutated only by event handlers; live getters are not
/// re-consulted on fetch, so state set by events earlier in the same
/// block is never clobbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Composite id `{registryId}/{tokenIdHex}`.
    pub id: String,
    /// Document identifier, minimal hex form.
    pub document_id: String,
    /// Document identifier, raw uint256.
    pub document_id_int: TokenId,
    /// Owning registry id.
    pub registry: String,
    /// Current custodial escrow, if any.
    pub title_escrow: Option<String>,
    /// Current beneficiary account, mirrored from the custodial escrow.
    pub beneficiary: Option<String>,
    /// Current holder account, mirrored from the custodial escrow.
    pub holder: Option<String>,
    /// Token is in registry custody awaiting restoration or acceptance.
    pub surrendered: bool,
    /// Terminal flag; never reset once set.
    pub accepted: bool,
}

impl_entity_record!(Token, "Token");

/// A per-token escrow contract instance.
///
/// Created eagerly on deployment or lazily from contract reads; never
/// deleted. `status` reaches the terminal `Exited` label but the record
/// persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEscrow {
    /// Escrow contract address, lowercase hex.
    pub id: String,
    /// Registry this escrow belongs to.
    pub registry: String,
    /// Composite token id this escrow holds custody state for.
    pub token: String,
    pub beneficiary: Option<String>,
    pub holder: Option<String>,
    /// Pending nominee; `None` exactly when no nomination is pending.
    pub nominee: Option<String>,
    /// Active flag (current contract generation).
    pub active: bool,
    /// Status label (legacy contract generation); empty when unknown.
    pub status: String,
}

impl_entity_record!(TitleEscrow, "TitleEscrow");
