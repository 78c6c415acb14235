//! # Host Bridge
//!
//! The bundle of host-provided capabilities a handler invocation runs
//! with: the entity store, one contract-state reader per escrow
//! generation, the registry reader, and dynamic source registration.

use shared_types::ContractGeneration;

use crate::ports::{EntityStore, EscrowStateReader, RegistryStateReader, SourceRegistrar};

/// Capabilities for one handler invocation.
///
/// The host constructs this per delivered event; handlers and fetchers
/// borrow through it. Delivery is single-threaded and strictly ordered,
/// so there is exactly one context alive at a time.
pub struct HostContext<'a> {
    /// Host-owned keyed entity store.
    pub store: &'a mut dyn EntityStore,
    /// Read-only registry contract bridge.
    pub registry_reader: &'a dyn RegistryStateReader,
    /// Read-only bridge for legacy-generation escrows.
    pub legacy_escrow_reader: &'a dyn EscrowStateReader,
    /// Read-only bridge for current-generation escrows.
    pub escrow_reader: &'a dyn EscrowStateReader,
    /// Dynamic data-source registration.
    pub sources: &'a mut dyn SourceRegistrar,
}

impl<'a> HostContext<'a> {
    /// The escrow reader matching the generation that emitted an event.
    ///
    /// Returns the `'a`-lived reference so callers can keep it across
    /// later mutable borrows of the context.
    pub fn escrow_reader_for(&self, generation: ContractGeneration) -> &'a dyn EscrowStateReader {
        match generation {
            ContractGeneration::Legacy => self.legacy_escrow_reader,
            ContractGeneration::Current => self.escrow_reader,
        }
    }
}
