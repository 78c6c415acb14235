//! Host-like delivery harness and event fixtures.
//!
//! The harness plays the role of the host runtime: it owns the store,
//! the chain-state fixture and the source registrar, and delivers one
//! decoded event at a time in blockchain order, exactly the contract
//! the core is written against.

use std::sync::Once;

use shared_types::{
    Address, BeneficiaryTransferEvent, ContractGeneration, EscrowDeployedEvent, EventMeta,
    HolderTransferEvent, NominationEvent, RegistryTransferEvent, ShredEvent, SurrenderEvent,
    TitleEvent, TokenId, TokenReceivedEvent, TokenRestoredEvent, ZERO_ADDRESS,
};
use title_indexer::{
    dispatch, EntityRecord, EntityStoreExt, HostContext, InMemoryEntityStore, RecordingRegistrar,
    StaticChainState, StoreError,
};

/// Registry contract used by every scenario.
pub const REGISTRY: Address = test_address(0x10);
/// Transaction initiator used by every scenario.
pub const INITIATOR: Address = test_address(0xF0);

/// Deterministic 20-byte address with the discriminant in the last byte.
pub const fn test_address(byte: u8) -> Address {
    let mut address = ZERO_ADDRESS;
    address[19] = byte;
    address
}

/// Event coordinates for block `block`, log `log_index`, emitted by
/// `emitter`. Timestamps advance with the block number so records from
/// different blocks are distinguishable.
pub fn meta_at(emitter: Address, block: u64, log_index: u64) -> EventMeta {
    EventMeta {
        emitter,
        tx_hash: tx_hash_for_block(block),
        log_index,
        block_number: block,
        timestamp: 1_700_000_000 + block,
        tx_from: INITIATOR,
        generation: ContractGeneration::Current,
    }
}

/// One synthetic transaction per block keeps event ids readable.
pub fn tx_hash_for_block(block: u64) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash[24..].copy_from_slice(&block.to_be_bytes());
    hash[0] = 0xAA;
    hash
}

/// Owns the driven-port adapters and delivers events through [`dispatch`].
pub struct Harness {
    pub store: InMemoryEntityStore,
    pub chain: StaticChainState,
    pub sources: RecordingRegistrar,
}

static TRACING: Once = Once::new();

/// Install the env-filtered test subscriber once per process. Run with
/// `RUST_LOG=title_indexer=debug` to watch classification decisions.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        Self {
            store: InMemoryEntityStore::new(),
            chain: StaticChainState::new(),
            sources: RecordingRegistrar::new(),
        }
    }

    /// Deliver one event to the core, as the host would.
    pub fn deliver(&mut self, event: TitleEvent) {
        let mut ctx = HostContext {
            store: &mut self.store,
            registry_reader: &self.chain,
            legacy_escrow_reader: &self.chain,
            escrow_reader: &self.chain,
            sources: &mut self.sources,
        };
        dispatch(&mut ctx, &event).expect("event dispatch failed");
    }

    /// Typed load straight from the store, for assertions.
    pub fn load<R: EntityRecord>(&self, id: &str) -> Result<Option<R>, StoreError> {
        self.store.load(id)
    }

    /// Load a record that the scenario requires to exist.
    pub fn require<R: EntityRecord>(&self, id: &str) -> R {
        self.store
            .load(id)
            .expect("store read failed")
            .unwrap_or_else(|| panic!("missing {}/{id}", R::KIND))
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

// ========== Event Constructors ==========

pub fn escrow_deployed(block: u64, log_index: u64, escrow: Address, beneficiary: Address, holder: Address) -> TitleEvent {
    TitleEvent::EscrowDeployed(EscrowDeployedEvent {
        meta: meta_at(REGISTRY, block, log_index),
        escrow,
        beneficiary,
        holder,
    })
}

pub fn registry_transfer(block: u64, log_index: u64, from: Option<Address>, to: Option<Address>, token_id: TokenId) -> TitleEvent {
    TitleEvent::RegistryTransfer(RegistryTransferEvent {
        meta: meta_at(REGISTRY, block, log_index),
        from,
        to,
        token_id,
    })
}

pub fn token_received(block: u64, log_index: u64, escrow: Address, token_id: TokenId, beneficiary: Address, holder: Address, is_minting: bool) -> TitleEvent {
    TitleEvent::TokenReceived(TokenReceivedEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
        beneficiary,
        holder,
        is_minting,
    })
}

pub fn nomination(block: u64, log_index: u64, escrow: Address, token_id: TokenId, prev_nominee: Option<Address>, nominee: Option<Address>) -> TitleEvent {
    TitleEvent::Nomination(NominationEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
        prev_nominee,
        nominee,
    })
}

pub fn beneficiary_transfer(block: u64, log_index: u64, escrow: Address, token_id: TokenId, from: Option<Address>, to: Option<Address>) -> TitleEvent {
    TitleEvent::BeneficiaryTransfer(BeneficiaryTransferEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
        from,
        to,
    })
}

pub fn holder_transfer(block: u64, log_index: u64, escrow: Address, token_id: TokenId, from: Option<Address>, to: Option<Address>) -> TitleEvent {
    TitleEvent::HolderTransfer(HolderTransferEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
        from,
        to,
    })
}

pub fn surrender(block: u64, log_index: u64, escrow: Address, token_id: TokenId) -> TitleEvent {
    TitleEvent::Surrender(SurrenderEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
    })
}

pub fn shred(block: u64, log_index: u64, escrow: Address, token_id: TokenId) -> TitleEvent {
    TitleEvent::Shred(ShredEvent {
        meta: meta_at(escrow, block, log_index),
        registry: REGISTRY,
        token_id,
    })
}

pub fn token_restored(block: u64, log_index: u64, token_id: TokenId, new_owner: Address) -> TitleEvent {
    TitleEvent::TokenRestored(TokenRestoredEvent {
        meta: meta_at(REGISTRY, block, log_index),
        token_id,
        new_owner,
    })
}
