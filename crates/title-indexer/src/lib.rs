//! # Title Indexer
//!
//! Event-indexing core for a document title-transfer protocol. A host
//! runtime delivers decoded registry and escrow events in blockchain
//! order; this crate materializes them into a queryable entity graph:
//! accounts, registries, tokens, escrows, transactions, an append-only
//! typed history, and point-in-time snapshots.
//!
//! ## Control Flow
//!
//! ```text
//! host ──decoded event──→ dispatch() ──→ handler
//!                                          │ fetch-or-create entities
//!                                          │ classify the event
//!                                          │ mutate entity state
//!                                          ↓
//!                              history record (+ snapshot) ──→ EntityStore
//! ```
//!
//! ## Failure Policy
//!
//! A reverted contract read is never fatal: every read site substitutes
//! a documented default (empty string, null reference, false flag, or
//! keep-previous-value) and processing continues. Missing entities are
//! classification signal. Only store failures surface to the host.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): entities, history records, identity
//!   derivation and the pure classification rules
//! - **Ports Layer** (`ports/`): the entity store, contract-read
//!   bridge and source-registration traits the host implements
//! - **Handlers** (`handlers/`): one handler per event kind + dispatch
//! - **Adapters Layer** (`adapters/`): in-memory store and scriptable
//!   chain-state fixture

pub mod adapters;
pub mod domain;
pub mod fetchers;
pub mod handlers;
pub mod host;
pub mod ports;

// Re-export main types for convenience
pub use domain::{
    classify_transfer,
    event_id,
    token_entity_id,
    Acceptance,
    Account,
    BeneficiaryTransfer,
    EscrowStatus,
    HolderTransfer,
    IndexError,
    Issuance,
    Nomination,
    NominationRevocation,
    Restoration,
    Surrender,
    TitleEscrow,
    TitleEscrowApproval,
    Token,
    TokenRegistry,
    TokenSnapshot,
    TokenTransfer,
    Transaction,
    TransferType,
};

pub use ports::{
    CallResult, EntityRecord, EntityStore, EntityStoreExt, EscrowStateReader, RegistryStateReader,
    Reverted, SourceRegistrar, StoreError,
};

pub use handlers::dispatch;
pub use host::HostContext;

pub use adapters::{
    EscrowFixture, InMemoryEntityStore, RecordingRegistrar, RegistryFixture, StaticChainState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
