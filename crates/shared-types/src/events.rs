//! # Decoded Event Payloads
//!
//! The event shapes the host runtime delivers to the core, one struct
//! per on-chain event kind plus the [`TitleEvent`] dispatch enum.
//!
//! The host decodes ABI logs, normalizes zero-address parameters via
//! [`crate::non_zero`], and delivers events one at a time in blockchain
//! order (block number, then transaction index, then log index).

use serde::{Deserialize, Serialize};

use crate::{Address, TokenId, TxHash};

/// Which escrow contract generation emitted an event.
///
/// The two generations expose different read surfaces (status enum vs
/// active flag, differently named getters); the host supplies one state
/// reader per generation and tags every escrow-level event with its
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractGeneration {
    /// First-generation cloneable escrow (status-code lifecycle).
    Legacy,
    /// Current escrow (active-flag lifecycle, nomination support).
    Current,
}

/// Coordinates and context common to every delivered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Address of the contract that emitted the log.
    pub emitter: Address,
    /// Hash of the originating transaction.
    pub tx_hash: TxHash,
    /// Log index within the transaction.
    pub log_index: u64,
    /// Block number the event was mined in.
    pub block_number: u64,
    /// Block timestamp (seconds since epoch).
    pub timestamp: u64,
    /// Account that initiated the transaction.
    pub tx_from: Address,
    /// Escrow contract generation (ignored by registry-level handlers).
    pub generation: ContractGeneration,
}

/// Escrow signals it received its token from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReceivedEvent {
    pub meta: EventMeta,
    /// Registry the token belongs to.
    pub registry: Address,
    pub token_id: TokenId,
    pub beneficiary: Address,
    pub holder: Address,
    /// True on first issuance, false when a surrendered token is
    /// restored into circulation.
    pub is_minting: bool,
}

/// Escrow signals the token was surrendered back to registry custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurrenderEvent {
    pub meta: EventMeta,
    pub registry: Address,
    pub token_id: TokenId,
}

/// Escrow nominee changed. Zero addresses are pre-normalized: `None`
/// means "no nominee" on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationEvent {
    pub meta: EventMeta,
    pub registry: Address,
    pub token_id: TokenId,
    pub prev_nominee: Option<Address>,
    pub nominee: Option<Address>,
}

/// Escrow beneficiary changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryTransferEvent {
    pub meta: EventMeta,
    pub registry: Address,
    pub token_id: TokenId,
    pub from: Option<Address>,
    pub to: Option<Address>,
}

/// Escrow holder changed. The legacy `HolderChanged` shape maps onto
/// this same payload (previous holder as `from`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderTransferEvent {
    pub meta: EventMeta,
    pub registry: Address,
    pub token_id: TokenId,
    pub from: Option<Address>,
    pub to: Option<Address>,
}

/// Escrow signals terminal acceptance (shred).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShredEvent {
    pub meta: EventMeta,
    pub registry: Address,
    pub token_id: TokenId,
}

/// Legacy escrow approval of a future beneficiary/holder pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowApprovalEvent {
    pub meta: EventMeta,
    pub new_beneficiary: Address,
    pub new_holder: Address,
}

/// Legacy escrow signals permanent exit from the title lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCededEvent {
    pub meta: EventMeta,
}

/// Token transferred at the registry level. `meta.emitter` is the
/// registry; `from == None` is a mint, `to == None` a burn-to-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryTransferEvent {
    pub meta: EventMeta,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub token_id: TokenId,
}

/// Registry deployed a new escrow instance for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowDeployedEvent {
    pub meta: EventMeta,
    pub escrow: Address,
    pub beneficiary: Address,
    pub holder: Address,
}

/// Registry restored a surrendered token to a new owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRestoredEvent {
    pub meta: EventMeta,
    pub token_id: TokenId,
    pub new_owner: Address,
}

/// One decoded on-chain event, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleEvent {
    TokenReceived(TokenReceivedEvent),
    Surrender(SurrenderEvent),
    Nomination(NominationEvent),
    BeneficiaryTransfer(BeneficiaryTransferEvent),
    HolderTransfer(HolderTransferEvent),
    Shred(ShredEvent),
    EscrowApproval(EscrowApprovalEvent),
    TitleCeded(TitleCededEvent),
    RegistryTransfer(RegistryTransferEvent),
    EscrowDeployed(EscrowDeployedEvent),
    TokenRestored(TokenRestoredEvent),
}

impl TitleEvent {
    /// Coordinates and context of the underlying log.
    pub fn meta(&self) -> &EventMeta {
        match self {
            Self::TokenReceived(e) => &e.meta,
            Self::Surrender(e) => &e.meta,
            Self::Nomination(e) => &e.meta,
            Self::BeneficiaryTransfer(e) => &e.meta,
            Self::HolderTransfer(e) => &e.meta,
            Self::Shred(e) => &e.meta,
            Self::EscrowApproval(e) => &e.meta,
            Self::TitleCeded(e) => &e.meta,
            Self::RegistryTransfer(e) => &e.meta,
            Self::EscrowDeployed(e) => &e.meta,
            Self::TokenRestored(e) => &e.meta,
        }
    }
}
