//! # Registry-Level Handlers
//!
//! Handlers for events emitted by the token registry contract: raw
//! transfers (classified by escrow presence at the endpoints), escrow
//! deployments, and restorations.

use tracing::debug;

use shared_types::{
    address_hex, EscrowDeployedEvent, RegistryTransferEvent, TokenRestoredEvent, BURN_ADDRESS,
};

use crate::domain::value_objects::{classify_transfer, event_id, token_entity_id, EscrowStatus};
use crate::domain::{Acceptance, IndexError, Restoration, TitleEscrow, TokenTransfer, TransferType};
use crate::fetchers::{fetch_account, fetch_token, fetch_token_registry, fetch_transaction};
use crate::host::HostContext;
use crate::ports::EntityStoreExt;

/// A token moved at the registry level.
///
/// Endpoint escrow records are looked up with plain loads, never the
/// fetch-or-create path: absence is the classification signal that
/// distinguishes mint and restoration from escrow-to-escrow movement.
/// The zero address is already `None` here and no store key is ever
/// derived from it.
pub fn handle_transfer(
    ctx: &mut HostContext,
    event: &RegistryTransferEvent,
) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.meta.emitter)?;
    let mut token = fetch_token(ctx, &registry, event.token_id)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    let from_escrow: Option<TitleEscrow> = match event.from {
        Some(from) => ctx.store.load(&address_hex(&from))?,
        None => None,
    };
    let to_escrow: Option<TitleEscrow> = match event.to {
        Some(to) => ctx.store.load(&address_hex(&to))?,
        None => None,
    };

    let to_is_burn = event.to == Some(BURN_ADDRESS);
    let transfer_type = classify_transfer(
        event.from.is_none(),
        from_escrow.is_some(),
        to_escrow.is_some(),
        to_is_burn,
    );

    debug!(
        token = %token.id,
        ?transfer_type,
        from = %event.from.as_ref().map(address_hex).unwrap_or_default(),
        to = %event.to.as_ref().map(address_hex).unwrap_or_default(),
        "classified registry transfer"
    );

    ctx.store.save(&TokenTransfer {
        id: format!("{eid}/TokenTransfer"),
        transaction: transaction.id.clone(),
        timestamp: event.meta.timestamp,
        registry: registry.id.clone(),
        token: token.id.clone(),
        transfer_type,
        from_title_escrow: from_escrow.as_ref().map(|e| e.id.clone()),
        from_beneficiary: from_escrow.as_ref().and_then(|e| e.beneficiary.clone()),
        from_holder: from_escrow.as_ref().and_then(|e| e.holder.clone()),
        to_title_escrow: to_escrow.as_ref().map(|e| e.id.clone()),
        to_beneficiary: to_escrow.as_ref().and_then(|e| e.beneficiary.clone()),
        to_holder: to_escrow.as_ref().and_then(|e| e.holder.clone()),
        initiator: initiator.id.clone(),
    })?;

    match &to_escrow {
        Some(to_escrow) => {
            token.title_escrow = Some(to_escrow.id.clone());
            token.beneficiary = to_escrow.beneficiary.clone();
            token.holder = to_escrow.holder.clone();
        }
        None => {
            token.title_escrow = None;
            token.beneficiary = None;
            token.holder = None;
        }
    }

    if transfer_type == TransferType::Acceptance {
        token.surrendered = true;
        token.accepted = true;
        ctx.store.save(&Acceptance {
            id: format!("{eid}/Acceptance"),
            transaction: transaction.id,
            timestamp: event.meta.timestamp,
            registry: registry.id,
            token: token.id.clone(),
            initiator: initiator.id,
            token_snapshot: None,
        })?;
    }

    ctx.store.save(&token)?;
    Ok(())
}

/// The registry deployed a new escrow instance for a token. Creates the
/// escrow record from event data plus contract reads and registers the
/// address for future event delivery.
pub fn handle_escrow_deployed(
    ctx: &mut HostContext,
    event: &EscrowDeployedEvent,
) -> Result<(), IndexError> {
    let registry = fetch_token_registry(ctx, event.meta.emitter)?;
    let beneficiary = fetch_account(ctx, event.beneficiary)?;
    let holder = fetch_account(ctx, event.holder)?;

    let reader = ctx.escrow_reader_for(event.meta.generation);
    let token_id = reader.token_id(event.escrow).unwrap_or_default();
    let active = reader.active(event.escrow).unwrap_or(false);
    let status = reader
        .status_code(event.escrow)
        .map(EscrowStatus::label)
        .unwrap_or("")
        .to_string();

    let escrow = TitleEscrow {
        id: address_hex(&event.escrow),
        registry: registry.id.clone(),
        token: token_entity_id(&registry.id, token_id),
        beneficiary: Some(beneficiary.id),
        holder: Some(holder.id),
        nominee: None,
        active,
        status,
    };

    ctx.sources.register_escrow(event.escrow, event.meta.generation);
    ctx.store.save(&escrow)?;
    Ok(())
}

/// The registry restored a surrendered token to a new owner.
///
/// Emits a Restoration record; when a TokenTransfer record already
/// exists for the same event coordinates, its classification is
/// retagged to restoration.
pub fn handle_token_restored(
    ctx: &mut HostContext,
    event: &TokenRestoredEvent,
) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.meta.emitter)?;
    let restorer = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    ctx.store.save(&Restoration {
        id: format!("{eid}/Restoration"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id.clone(),
        token: token_entity_id(&registry.id, event.token_id),
        title_escrow: address_hex(&event.new_owner),
        initiator: restorer.id,
        token_snapshot: None,
    })?;

    let transfer_id = format!("{eid}/TokenTransfer");
    if let Some(mut transfer) = ctx.store.load::<TokenTransfer>(&transfer_id)? {
        transfer.transfer_type = TransferType::Restoration;
        ctx.store.save(&transfer)?;
    }

    Ok(())
}
