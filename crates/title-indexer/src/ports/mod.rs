//! # Ports Layer
//!
//! Driven-port traits the host runtime implements for the core: the
//! keyed entity store, the contract-read bridge, and dynamic source
//! registration.

pub mod contracts;
pub mod store;

pub use contracts::{
    CallResult, EscrowStateReader, RegistryStateReader, Reverted, SourceRegistrar,
};
pub use store::{EntityRecord, EntityStore, EntityStoreExt, StoreError};
