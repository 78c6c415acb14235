//! Scriptable contract-state fixture implementing both reader ports,
//! plus a recording source registrar. Any field left unset reverts,
//! which is exactly how an absent or misbehaving contract presents.

use std::collections::HashMap;

use shared_types::{Address, ContractGeneration, TokenId};

use crate::ports::{
    CallResult, EscrowStateReader, RegistryStateReader, Reverted, SourceRegistrar,
};

/// Scripted state for one registry contract.
#[derive(Debug, Clone, Default)]
pub struct RegistryFixture {
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Token id to current owner; missing tokens revert `owner_of`.
    pub owners: HashMap<TokenId, Address>,
}

/// Scripted state for one escrow contract. `None` fields revert.
#[derive(Debug, Clone, Default)]
pub struct EscrowFixture {
    pub registry: Option<Address>,
    pub token_id: Option<TokenId>,
    pub beneficiary: Option<Address>,
    pub holder: Option<Address>,
    pub nominee: Option<Address>,
    pub active: Option<bool>,
    pub status_code: Option<u8>,
}

/// In-memory chain state serving both reader ports.
#[derive(Debug, Clone, Default)]
pub struct StaticChainState {
    registries: HashMap<Address, RegistryFixture>,
    escrows: HashMap<Address, EscrowFixture>,
}

impl StaticChainState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a registry fixture.
    pub fn put_registry(&mut self, address: Address, fixture: RegistryFixture) {
        self.registries.insert(address, fixture);
    }

    /// Install or replace an escrow fixture.
    pub fn put_escrow(&mut self, address: Address, fixture: EscrowFixture) {
        self.escrows.insert(address, fixture);
    }

    /// Set the current owner of a token under a registry.
    pub fn set_owner(&mut self, registry: Address, token_id: TokenId, owner: Address) {
        self.registries
            .entry(registry)
            .or_default()
            .owners
            .insert(token_id, owner);
    }

    fn registry_fixture(&self, address: &Address) -> CallResult<&RegistryFixture> {
        self.registries.get(address).ok_or(Reverted)
    }

    fn escrow_fixture(&self, address: &Address) -> CallResult<&EscrowFixture> {
        self.escrows.get(address).ok_or(Reverted)
    }
}

impl RegistryStateReader for StaticChainState {
    fn name(&self, registry: Address) -> CallResult<String> {
        self.registry_fixture(&registry)?.name.clone().ok_or(Reverted)
    }

    fn symbol(&self, registry: Address) -> CallResult<String> {
        self.registry_fixture(&registry)?.symbol.clone().ok_or(Reverted)
    }

    fn owner_of(&self, registry: Address, token_id: TokenId) -> CallResult<Address> {
        self.registry_fixture(&registry)?
            .owners
            .get(&token_id)
            .copied()
            .ok_or(Reverted)
    }
}

impl EscrowStateReader for StaticChainState {
    fn registry(&self, escrow: Address) -> CallResult<Address> {
        self.escrow_fixture(&escrow)?.registry.ok_or(Reverted)
    }

    fn token_id(&self, escrow: Address) -> CallResult<TokenId> {
        self.escrow_fixture(&escrow)?.token_id.ok_or(Reverted)
    }

    fn beneficiary(&self, escrow: Address) -> CallResult<Address> {
        self.escrow_fixture(&escrow)?.beneficiary.ok_or(Reverted)
    }

    fn holder(&self, escrow: Address) -> CallResult<Address> {
        self.escrow_fixture(&escrow)?.holder.ok_or(Reverted)
    }

    fn nominee(&self, escrow: Address) -> CallResult<Address> {
        self.escrow_fixture(&escrow)?.nominee.ok_or(Reverted)
    }

    fn active(&self, escrow: Address) -> CallResult<bool> {
        self.escrow_fixture(&escrow)?.active.ok_or(Reverted)
    }

    fn status_code(&self, escrow: Address) -> CallResult<u8> {
        self.escrow_fixture(&escrow)?.status_code.ok_or(Reverted)
    }
}

/// [`SourceRegistrar`] that records registrations for assertions.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    pub registered: Vec<(Address, ContractGeneration)>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, escrow: Address) -> bool {
        self.registered.iter().any(|(a, _)| *a == escrow)
    }
}

impl SourceRegistrar for RecordingRegistrar {
    fn register_escrow(&mut self, escrow: Address, generation: ContractGeneration) {
        self.registered.push((escrow, generation));
    }
}
