//! # Adapters Layer
//!
//! Concrete implementations of the driven ports: the in-memory entity
//! store and the scriptable chain-state fixture used by tests and by
//! hosts that assemble the core without a real chain.

pub mod chain_state;
pub mod memory_store;

pub use chain_state::{EscrowFixture, RecordingRegistrar, RegistryFixture, StaticChainState};
pub use memory_store::InMemoryEntityStore;
