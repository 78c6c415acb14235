//! # History Records & Snapshots
//!
//! The append-only side of the entity graph. One immutable record per
//! observed event, keyed `{txHash}-{logIndex}/{Kind}`, plus the
//! point-in-time token snapshots that accompany escrow-level records.
//!
//! The single sanctioned mutation in this module is the TokenTransfer
//! classification retag performed by the token-restored handler.

use serde::{Deserialize, Serialize};

use super::value_objects::TransferType;
use crate::ports::store::impl_entity_record;

/// First issuance of a token into escrow-mediated circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuance {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub beneficiary: String,
    pub holder: String,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(Issuance, "Issuance");

/// Token returned to registry custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surrender {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(Surrender, "Surrender");

/// Surrendered token re-issued into circulation.
///
/// Emitted by the escrow token-received path (with a snapshot) and by
/// the registry token-restored path (without one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restoration {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub initiator: String,
    pub token_snapshot: Option<String>,
}

impl_entity_record!(Restoration, "Restoration");

/// A beneficiary nominee was proposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomination {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub nominee: String,
    pub prev_nominee: Option<String>,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(Nomination, "Nomination");

/// A pending nomination was revoked. `nominee` references the account
/// whose nomination was withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationRevocation {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub nominee: String,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(NominationRevocation, "NominationRevocation");

/// Beneficiary role moved between accounts within an escrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryTransfer {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(BeneficiaryTransfer, "BeneficiaryTransfer");

/// Holder role moved between accounts within an escrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderTransfer {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub initiator: String,
    pub token_snapshot: String,
}

impl_entity_record!(HolderTransfer, "HolderTransfer");

/// Terminal acceptance of the token's escrow lifecycle.
///
/// Emitted by the escrow shred path (with a snapshot) and by the
/// registry burn-transfer path (without one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub initiator: String,
    pub token_snapshot: Option<String>,
}

impl_entity_record!(Acceptance, "Acceptance");

/// Legacy escrow approval of a future beneficiary/holder pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEscrowApproval {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub title_escrow: String,
    pub approver: String,
    pub approved_beneficiary: String,
    pub approved_holder: String,
}

impl_entity_record!(TitleEscrowApproval, "TitleEscrowApproval");

/// Raw registry-level transfer with its semantic classification and the
/// escrow endpoint state captured at event time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub id: String,
    pub transaction: String,
    pub timestamp: u64,
    pub registry: String,
    pub token: String,
    pub transfer_type: TransferType,
    pub from_title_escrow: Option<String>,
    pub from_beneficiary: Option<String>,
    pub from_holder: Option<String>,
    pub to_title_escrow: Option<String>,
    pub to_beneficiary: Option<String>,
    pub to_holder: Option<String>,
    pub initiator: String,
}

impl_entity_record!(TokenTransfer, "TokenTransfer");

/// Immutable point-in-time projection of escrow+token state, tagged
/// with the action that produced it. Keyed `{eventId}-{tokenEntityId}`
/// so repeated snapshots within one transaction never collide as long
/// as log indices differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub id: String,
    pub timestamp: u64,
    pub token: String,
    pub title_escrow: String,
    pub beneficiary: Option<String>,
    pub holder: Option<String>,
    pub nominee: Option<String>,
    pub surrendered: bool,
    pub accepted: bool,
    /// Label of the action that triggered this snapshot.
    pub action: String,
}

impl_entity_record!(TokenSnapshot, "TokenSnapshot");
