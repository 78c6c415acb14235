//! # Escrow-Level Handlers
//!
//! One handler per event kind emitted by title escrow contracts. Each
//! fetches or creates the entities it touches, classifies the event,
//! mutates entity state, and appends a history record plus a snapshot.
//!
//! Degenerate events (both endpoints zero, unchanged empty nominee) are
//! skipped without a record; reverted contract reads downgrade to
//! documented defaults and processing continues.

use tracing::debug;

use shared_types::{
    address_hex, non_zero, BeneficiaryTransferEvent, EscrowApprovalEvent, HolderTransferEvent,
    NominationEvent, ShredEvent, SurrenderEvent, TitleCededEvent, TokenReceivedEvent,
    ZERO_ADDRESS,
};

use crate::domain::value_objects::{event_id, token_entity_id, EscrowStatus};
use crate::domain::{
    Acceptance, BeneficiaryTransfer, HolderTransfer, IndexError, Issuance, Nomination,
    NominationRevocation, Restoration, Surrender, TitleEscrowApproval,
};
use crate::fetchers::{
    fetch_account, fetch_escrow, fetch_token, fetch_token_and_escrow_from_issuance,
    fetch_token_registry, fetch_transaction,
};
use crate::host::HostContext;
use crate::ports::EntityStoreExt;

use super::snapshot;

/// An escrow received its token from the registry. `is_minting`
/// distinguishes first issuance from restoration after surrender.
pub fn handle_token_received(
    ctx: &mut HostContext,
    event: &TokenReceivedEvent,
) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let (mut token, escrow) = fetch_token_and_escrow_from_issuance(ctx, event)?;
    let beneficiary = fetch_account(ctx, event.beneficiary)?;
    let holder = fetch_account(ctx, event.holder)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    if event.is_minting {
        let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "Issuance")?;
        ctx.store.save(&Issuance {
            id: format!("{eid}/Issuance"),
            transaction: transaction.id,
            timestamp: event.meta.timestamp,
            registry: registry.id,
            token: token.id,
            title_escrow: escrow.id,
            beneficiary: beneficiary.id,
            holder: holder.id,
            initiator: initiator.id,
            token_snapshot: token_snapshot.id,
        })?;
    } else {
        token.surrendered = false;
        ctx.store.save(&token)?;

        let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "Restoration")?;
        ctx.store.save(&Restoration {
            id: format!("{eid}/Restoration"),
            transaction: transaction.id,
            timestamp: event.meta.timestamp,
            registry: registry.id,
            token: token.id,
            title_escrow: escrow.id,
            initiator: initiator.id,
            token_snapshot: Some(token_snapshot.id),
        })?;
    }

    Ok(())
}

/// The escrow surrendered its token back to registry custody.
pub fn handle_surrender(ctx: &mut HostContext, event: &SurrenderEvent) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let mut token = fetch_token(ctx, &registry, event.token_id)?;
    let escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    token.surrendered = true;
    token.title_escrow = None;
    ctx.store.save(&token)?;

    let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "Surrender")?;
    ctx.store.save(&Surrender {
        id: format!("{eid}/Surrender"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id,
        token: token.id,
        title_escrow: escrow.id,
        initiator: initiator.id,
        token_snapshot: token_snapshot.id,
    })?;

    Ok(())
}

/// The escrow's beneficiary nominee changed.
///
/// Both sides empty is a no-op (no record, no mutation); a cleared
/// nominee is a revocation referencing the withdrawn account; anything
/// else is a nomination.
pub fn handle_nomination(ctx: &mut HostContext, event: &NominationEvent) -> Result<(), IndexError> {
    if event.prev_nominee.is_none() && event.nominee.is_none() {
        debug!(
            escrow = %address_hex(&event.meta.emitter),
            "nomination event with empty endpoints, skipping"
        );
        return Ok(());
    }

    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let token = fetch_token(ctx, &registry, event.token_id)?;
    let mut escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    escrow.nominee = match event.nominee {
        Some(nominee) => Some(fetch_account(ctx, nominee)?.id),
        None => None,
    };
    ctx.store.save(&escrow)?;

    match event.nominee {
        None => {
            // Guarded above: prev_nominee must be present here.
            let prev_nominee = match event.prev_nominee {
                Some(prev) => fetch_account(ctx, prev)?.id,
                None => return Ok(()),
            };
            let token_snapshot =
                snapshot::create(ctx, &event.meta, &escrow, &token, "NominationRevocation")?;
            ctx.store.save(&NominationRevocation {
                id: format!("{eid}/NominationRevocation"),
                transaction: transaction.id,
                timestamp: event.meta.timestamp,
                registry: registry.id,
                token: token.id,
                title_escrow: escrow.id,
                nominee: prev_nominee,
                initiator: initiator.id,
                token_snapshot: token_snapshot.id,
            })?;
        }
        Some(nominee) => {
            let prev_nominee = match event.prev_nominee {
                Some(prev) => Some(fetch_account(ctx, prev)?.id),
                None => None,
            };
            let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "Nomination")?;
            ctx.store.save(&Nomination {
                id: format!("{eid}/Nomination"),
                transaction: transaction.id,
                timestamp: event.meta.timestamp,
                registry: registry.id,
                token: token.id,
                title_escrow: escrow.id,
                nominee: address_hex(&nominee),
                prev_nominee,
                initiator: initiator.id,
                token_snapshot: token_snapshot.id,
            })?;
        }
    }

    Ok(())
}

/// The escrow's beneficiary role moved. Either endpoint at the zero
/// address is an internal bookkeeping transfer and is ignored.
pub fn handle_beneficiary_transfer(
    ctx: &mut HostContext,
    event: &BeneficiaryTransferEvent,
) -> Result<(), IndexError> {
    let (Some(from), Some(to)) = (event.from, event.to) else {
        debug!(
            escrow = %address_hex(&event.meta.emitter),
            "beneficiary transfer with zero endpoint, skipping"
        );
        return Ok(());
    };

    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let token = fetch_token(ctx, &registry, event.token_id)?;
    let mut escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let from_account = fetch_account(ctx, from)?;
    let to_account = fetch_account(ctx, to)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    escrow.beneficiary = Some(to_account.id.clone());
    ctx.store.save(&escrow)?;

    let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "BeneficiaryTransfer")?;
    ctx.store.save(&BeneficiaryTransfer {
        id: format!("{eid}/BeneficiaryTransfer"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id,
        token: token.id,
        title_escrow: escrow.id,
        from: Some(from_account.id),
        to: Some(to_account.id),
        initiator: initiator.id,
        token_snapshot: token_snapshot.id,
    })?;

    Ok(())
}

/// The escrow's holder role moved. Same zero-endpoint rule as the
/// beneficiary transfer.
pub fn handle_holder_transfer(
    ctx: &mut HostContext,
    event: &HolderTransferEvent,
) -> Result<(), IndexError> {
    let (Some(from), Some(to)) = (event.from, event.to) else {
        debug!(
            escrow = %address_hex(&event.meta.emitter),
            "holder transfer with zero endpoint, skipping"
        );
        return Ok(());
    };

    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let token = fetch_token(ctx, &registry, event.token_id)?;
    let mut escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let from_account = fetch_account(ctx, from)?;
    let to_account = fetch_account(ctx, to)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    escrow.holder = Some(to_account.id.clone());
    ctx.store.save(&escrow)?;

    let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "HolderTransfer")?;
    ctx.store.save(&HolderTransfer {
        id: format!("{eid}/HolderTransfer"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id,
        token: token.id,
        title_escrow: escrow.id,
        from: Some(from_account.id),
        to: Some(to_account.id),
        initiator: initiator.id,
        token_snapshot: token_snapshot.id,
    })?;

    Ok(())
}

/// Terminal acceptance. Sets both token flags and refreshes the
/// escrow's role fields from live reads, keeping the previous value for
/// any read that reverts.
pub fn handle_shred(ctx: &mut HostContext, event: &ShredEvent) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let registry = fetch_token_registry(ctx, event.registry)?;
    let mut token = fetch_token(ctx, &registry, event.token_id)?;
    let mut escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    let initiator = fetch_account(ctx, event.meta.tx_from)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    token.surrendered = true;
    token.accepted = true;

    let reader = ctx.escrow_reader_for(event.meta.generation);
    let emitter = event.meta.emitter;
    if let Ok(beneficiary) = reader.beneficiary(emitter) {
        escrow.beneficiary = non_zero(beneficiary).map(|a| address_hex(&a));
    }
    if let Ok(holder) = reader.holder(emitter) {
        escrow.holder = non_zero(holder).map(|a| address_hex(&a));
    }
    if let Ok(nominee) = reader.nominee(emitter) {
        escrow.nominee = non_zero(nominee).map(|a| address_hex(&a));
    }
    if let Ok(active) = reader.active(emitter) {
        escrow.active = active;
    }

    ctx.store.save(&escrow)?;
    ctx.store.save(&token)?;

    let token_snapshot = snapshot::create(ctx, &event.meta, &escrow, &token, "Acceptance")?;
    ctx.store.save(&Acceptance {
        id: format!("{eid}/Acceptance"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id,
        token: token.id,
        initiator: initiator.id,
        token_snapshot: Some(token_snapshot.id),
    })?;

    Ok(())
}

/// Legacy escrow approval of a future beneficiary/holder pair. Record
/// only; escrow state does not change until the transfer itself.
pub fn handle_escrow_approval(
    ctx: &mut HostContext,
    event: &EscrowApprovalEvent,
) -> Result<(), IndexError> {
    let eid = event_id(&event.meta.tx_hash, event.meta.log_index);
    let reader = ctx.escrow_reader_for(event.meta.generation);
    let registry_address = reader.registry(event.meta.emitter).unwrap_or(ZERO_ADDRESS);
    let token_id = reader.token_id(event.meta.emitter).unwrap_or_default();

    let registry = fetch_token_registry(ctx, registry_address)?;
    let approver = fetch_account(ctx, event.meta.tx_from)?;
    let approved_beneficiary = fetch_account(ctx, event.new_beneficiary)?;
    let approved_holder = fetch_account(ctx, event.new_holder)?;
    let transaction = fetch_transaction(ctx, &event.meta)?;

    ctx.store.save(&TitleEscrowApproval {
        id: format!("{eid}/TitleEscrowApproval"),
        transaction: transaction.id,
        timestamp: event.meta.timestamp,
        registry: registry.id.clone(),
        token: token_entity_id(&registry.id, token_id),
        title_escrow: address_hex(&event.meta.emitter),
        approver: approver.id,
        approved_beneficiary: approved_beneficiary.id,
        approved_holder: approved_holder.id,
    })?;

    Ok(())
}

/// Legacy escrow exited the title lifecycle permanently.
pub fn handle_title_ceded(ctx: &mut HostContext, event: &TitleCededEvent) -> Result<(), IndexError> {
    let mut escrow = fetch_escrow(ctx, event.meta.emitter, event.meta.generation)?;
    escrow.status = EscrowStatus::Exited.as_str().to_string();
    ctx.store.save(&escrow)?;
    Ok(())
}
