//! # Domain Value Objects
//!
//! Identity derivation, status/classification enums, and the pure
//! registry-transfer classification rule. Everything here is
//! deterministic and side-effect free.

use serde::{Deserialize, Serialize};
use shared_types::{token_id_hex, tx_hash_hex, TokenId, TxHash};

/// Derive the stable event id `{txHashHex}-{logIndex}`.
///
/// Deterministic across replays of the same log; history record ids are
/// built from it by appending the record kind.
pub fn event_id(tx_hash: &TxHash, log_index: u64) -> String {
    format!("{}-{}", tx_hash_hex(tx_hash), log_index)
}

/// Derive the composite token entity id `{registryId}/{tokenIdHex}`.
///
/// Two registries never collide even for identical token ids.
pub fn token_entity_id(registry_id: &str, token_id: TokenId) -> String {
    format!("{}/{}", registry_id, token_id_hex(token_id))
}

/// Escrow lifecycle status as reported by the legacy contract's status
/// enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    Uninitialised,
    InUse,
    Exited,
}

impl EscrowStatus {
    /// Map a raw on-chain status code to its label. Total over `u8`:
    /// unrecognized codes map to the empty string so a newer contract
    /// revision never aborts indexing.
    pub fn label(code: u8) -> &'static str {
        match code {
            0 => "Uninitialised",
            1 => "InUse",
            2 => "Exited",
            _ => "",
        }
    }

    /// The label written into escrow entities for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialised => "Uninitialised",
            Self::InUse => "InUse",
            Self::Exited => "Exited",
        }
    }
}

/// Semantic classification of a registry-level transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferType {
    /// First issuance: token minted out of the zero address.
    Mint,
    /// Custody moved between two known escrow instances.
    EscrowTransfer,
    /// Token returned from an escrow to registry custody.
    Surrender,
    /// Token re-issued out of registry custody.
    Restoration,
    /// Terminal transfer to the burn sentinel.
    Acceptance,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "Mint",
            Self::EscrowTransfer => "EscrowTransfer",
            Self::Surrender => "Surrender",
            Self::Restoration => "Restoration",
            Self::Acceptance => "Acceptance",
        }
    }
}

/// Classify a registry-level transfer from what the entity graph knows
/// about its endpoints.
///
/// Decision order:
/// 1. destination is the burn sentinel: acceptance
/// 2. both endpoints are known escrows: escrow-to-escrow transfer
/// 3. only the source is a known escrow: surrender
/// 4. source is the zero address: mint
/// 5. otherwise: restoration out of registry custody
///
/// Absence of an escrow record is signal, not an error; the caller must
/// pass plain load results, never fetch-or-create ones.
pub fn classify_transfer(
    from_is_zero: bool,
    from_is_escrow: bool,
    to_is_escrow: bool,
    to_is_burn: bool,
) -> TransferType {
    if to_is_burn {
        TransferType::Acceptance
    } else if from_is_escrow && to_is_escrow {
        TransferType::EscrowTransfer
    } else if from_is_escrow {
        TransferType::Surrender
    } else if from_is_zero {
        TransferType::Mint
    } else {
        TransferType::Restoration
    }
}
