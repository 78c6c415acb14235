//! # Entity Fetchers
//!
//! Idempotent fetch-or-create accessors. Each hides the decision of
//! whether to trust a stored record or reconstruct it from live
//! contract reads, and each tolerates reverted reads by substituting
//! documented defaults.
//!
//! Token policy: initialize once (from event data or contract state),
//! mutate explicitly in handlers afterwards. Live getters are not
//! re-consulted on fetch, so state set by events earlier in the same
//! block is never clobbered by reads the contract does not yet reflect.

use tracing::debug;

use shared_types::{
    address_hex, non_zero, token_id_hex, tx_hash_hex, Address, ContractGeneration, EventMeta,
    TokenId, TokenReceivedEvent, BURN_ADDRESS, ZERO_ADDRESS,
};

use crate::domain::value_objects::{token_entity_id, EscrowStatus};
use crate::domain::{Account, TitleEscrow, Token, TokenRegistry, Transaction};
use crate::host::HostContext;
use crate::ports::{EntityStoreExt, StoreError};

/// Unconditionally upsert the account for an address.
///
/// Accounts carry no mutable state, so there is nothing to protect:
/// write-through is cheaper than load-check-create and yields an
/// immediately usable reference.
pub fn fetch_account(ctx: &mut HostContext, address: Address) -> Result<Account, StoreError> {
    let account = Account {
        id: address_hex(&address),
    };
    ctx.store.save(&account)?;
    Ok(account)
}

/// Load the transaction for an event, creating it from the event's
/// block context on first sight. Never re-derived once present.
pub fn fetch_transaction(ctx: &mut HostContext, meta: &EventMeta) -> Result<Transaction, StoreError> {
    let id = tx_hash_hex(&meta.tx_hash);
    if let Some(transaction) = ctx.store.load::<Transaction>(&id)? {
        return Ok(transaction);
    }

    let transaction = Transaction {
        id,
        timestamp: meta.timestamp,
        block_number: meta.block_number,
    };
    ctx.store.save(&transaction)?;
    Ok(transaction)
}

/// Load a registry, creating it from name/symbol contract reads on
/// first reference. A reverted read yields the empty string; the record
/// is never refreshed afterwards.
pub fn fetch_token_registry(
    ctx: &mut HostContext,
    address: Address,
) -> Result<TokenRegistry, StoreError> {
    let id = address_hex(&address);
    if let Some(registry) = ctx.store.load::<TokenRegistry>(&id)? {
        return Ok(registry);
    }

    let name = ctx.registry_reader.name(address).unwrap_or_default();
    let symbol = ctx.registry_reader.symbol(address).unwrap_or_default();
    let registry = TokenRegistry { id, name, symbol };
    ctx.store.save(&registry)?;
    Ok(registry)
}

/// Load a token by composite key, reconstructing initial state from a
/// live `owner_of` read when absent.
///
/// Reconstruction rules: a reverted owner read means null owner and
/// false flags; an owner equal to the registry or the burn sentinel
/// means the token sits in registry custody (surrendered), and the burn
/// sentinel additionally marks it accepted. The escrow reference is the
/// owner address unless the token is surrendered.
pub fn fetch_token(
    ctx: &mut HostContext,
    registry: &TokenRegistry,
    token_id: TokenId,
) -> Result<Token, StoreError> {
    let id = token_entity_id(&registry.id, token_id);
    if let Some(token) = ctx.store.load::<Token>(&id)? {
        return Ok(token);
    }

    let registry_address = shared_types::parse_address(&registry.id);
    let owner: Option<Address> = registry_address
        .and_then(|reg| ctx.registry_reader.owner_of(reg, token_id).ok());

    let surrendered = match owner {
        Some(owner) => Some(owner) == registry_address || owner == BURN_ADDRESS,
        None => false,
    };
    let accepted = owner == Some(BURN_ADDRESS);
    let title_escrow = match owner {
        Some(owner) if !surrendered => Some(address_hex(&owner)),
        _ => None,
    };

    debug!(
        token = %id,
        owner = %owner.as_ref().map(address_hex).unwrap_or_default(),
        surrendered,
        "reconstructing token from contract state"
    );

    let token = Token {
        id,
        document_id: token_id_hex(token_id),
        document_id_int: token_id,
        registry: registry.id.clone(),
        title_escrow,
        beneficiary: None,
        holder: None,
        surrendered,
        accepted,
    };
    ctx.store.save(&token)?;
    Ok(token)
}

/// Load an escrow, reconstructing it from live contract reads when
/// absent and registering the address as a dynamic event source.
///
/// Every read tolerates a revert: registry falls back to the zero
/// address, token id to zero, role fields to null, active to false and
/// the status label to empty. Either stream (registry-level or
/// escrow-level) may reference an escrow the other has not created yet,
/// so this path must always be available.
pub fn fetch_escrow(
    ctx: &mut HostContext,
    address: Address,
    generation: ContractGeneration,
) -> Result<TitleEscrow, StoreError> {
    let id = address_hex(&address);
    if let Some(escrow) = ctx.store.load::<TitleEscrow>(&id)? {
        return Ok(escrow);
    }

    debug!(escrow = %id, ?generation, "lazily reconstructing escrow from contract state");

    let reader = ctx.escrow_reader_for(generation);
    let registry_address = reader.registry(address).unwrap_or(ZERO_ADDRESS);
    let token_id = reader.token_id(address).unwrap_or_default();
    let beneficiary = reader.beneficiary(address).ok().and_then(non_zero);
    let holder = reader.holder(address).ok().and_then(non_zero);
    let nominee = reader.nominee(address).ok().and_then(non_zero);
    let active = reader.active(address).unwrap_or(false);
    let status = reader
        .status_code(address)
        .map(EscrowStatus::label)
        .unwrap_or("")
        .to_string();

    let registry = fetch_token_registry(ctx, registry_address)?;
    for role_address in [beneficiary, holder, nominee].into_iter().flatten() {
        fetch_account(ctx, role_address)?;
    }

    let escrow = TitleEscrow {
        id,
        registry: registry.id.clone(),
        token: token_entity_id(&registry.id, token_id),
        beneficiary: beneficiary.map(|a| address_hex(&a)),
        holder: holder.map(|a| address_hex(&a)),
        nominee: nominee.map(|a| address_hex(&a)),
        active,
        status,
    };
    ctx.store.save(&escrow)?;
    ctx.sources.register_escrow(address, generation);
    Ok(escrow)
}

/// Materialize both the escrow and the token referenced by a
/// token-received event, seeding missing records from the event's own
/// data instead of contract reads.
///
/// The emitting escrow is already a registered source (the host just
/// delivered one of its events), so no dynamic registration happens
/// here.
pub fn fetch_token_and_escrow_from_issuance(
    ctx: &mut HostContext,
    event: &TokenReceivedEvent,
) -> Result<(Token, TitleEscrow), StoreError> {
    let registry = fetch_token_registry(ctx, event.registry)?;
    let beneficiary = fetch_account(ctx, event.beneficiary)?;
    let holder = fetch_account(ctx, event.holder)?;
    let token_id_str = token_entity_id(&registry.id, event.token_id);

    let escrow_id = address_hex(&event.meta.emitter);
    let escrow = match ctx.store.load::<TitleEscrow>(&escrow_id)? {
        Some(escrow) => escrow,
        None => {
            let escrow = TitleEscrow {
                id: escrow_id,
                registry: registry.id.clone(),
                token: token_id_str.clone(),
                beneficiary: Some(beneficiary.id.clone()),
                holder: Some(holder.id.clone()),
                nominee: None,
                active: true,
                status: String::new(),
            };
            ctx.store.save(&escrow)?;
            escrow
        }
    };

    let token = match ctx.store.load::<Token>(&token_id_str)? {
        Some(token) => token,
        None => {
            let token = Token {
                id: token_id_str,
                document_id: token_id_hex(event.token_id),
                document_id_int: event.token_id,
                registry: registry.id.clone(),
                title_escrow: Some(escrow.id.clone()),
                beneficiary: Some(beneficiary.id),
                holder: Some(holder.id),
                surrendered: false,
                accepted: false,
            };
            ctx.store.save(&token)?;
            token
        }
    };

    Ok((token, escrow))
}
