//! # Domain Layer
//!
//! Pure entity and classification logic, no I/O dependencies beyond the
//! record trait implemented for the store seam.

pub mod entities;
pub mod errors;
pub mod history;
pub mod value_objects;

pub use entities::{Account, TitleEscrow, Token, TokenRegistry, Transaction};
pub use errors::IndexError;
pub use history::{
    Acceptance, BeneficiaryTransfer, HolderTransfer, Issuance, Nomination, NominationRevocation,
    Restoration, Surrender, TitleEscrowApproval, TokenSnapshot, TokenTransfer,
};
pub use value_objects::{
    classify_transfer, event_id, token_entity_id, EscrowStatus, TransferType,
};
