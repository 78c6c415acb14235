//! # Contract-Read Ports (Driven)
//!
//! Read-only access to deployed contract state, plus dynamic data-source
//! registration. Every read is synchronous and either succeeds or
//! reverts; a revert is a terminal, recoverable signal: callers pattern
//! match and substitute a documented default, never retry and never
//! propagate it as an error.

use shared_types::{Address, ContractGeneration, TokenId};

/// Marker for a reverted contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reverted;

/// Result of a single read-only contract call.
pub type CallResult<T> = Result<T, Reverted>;

/// Read-only view of a token registry contract.
pub trait RegistryStateReader {
    /// ERC-721 collection name.
    fn name(&self, registry: Address) -> CallResult<String>;

    /// ERC-721 collection symbol.
    fn symbol(&self, registry: Address) -> CallResult<String>;

    /// Current owner of a token. Reverts for unknown tokens.
    fn owner_of(&self, registry: Address, token_id: TokenId) -> CallResult<Address>;
}

/// Read-only view of a title escrow contract.
///
/// Both contract generations implement this one trait; a getter a
/// generation does not expose simply reverts, and callers fall back to
/// the documented default exactly as they would for an on-chain revert.
pub trait EscrowStateReader {
    /// Registry this escrow was deployed for.
    fn registry(&self, escrow: Address) -> CallResult<Address>;

    /// Token this escrow holds custody state for.
    fn token_id(&self, escrow: Address) -> CallResult<TokenId>;

    fn beneficiary(&self, escrow: Address) -> CallResult<Address>;

    fn holder(&self, escrow: Address) -> CallResult<Address>;

    /// Pending beneficiary nominee. Current generation only.
    fn nominee(&self, escrow: Address) -> CallResult<Address>;

    /// Active flag. Current generation only.
    fn active(&self, escrow: Address) -> CallResult<bool>;

    /// Raw lifecycle status code. Legacy generation only.
    fn status_code(&self, escrow: Address) -> CallResult<u8>;
}

/// Instructs the host to begin delivering events from a newly
/// discovered escrow contract.
pub trait SourceRegistrar {
    fn register_escrow(&mut self, escrow: Address, generation: ContractGeneration);
}
