//! # Snapshot Builder
//!
//! Point-in-time projection of an escrow+token pair, tagged with the
//! action that produced it. Pure projection plus a single write.

use shared_types::EventMeta;

use crate::domain::value_objects::event_id;
use crate::domain::{TitleEscrow, Token, TokenSnapshot};
use crate::host::HostContext;
use crate::ports::{EntityStoreExt, StoreError};

/// Build and persist a snapshot of the given escrow+token state.
///
/// The projection is taken from the in-memory entities the caller holds,
/// not a re-fetched copy, so mutations the handler just applied are
/// reflected. The id combines event coordinates with the token's
/// composite key; snapshots for the same token in one transaction never
/// collide as long as log indices differ.
pub fn create(
    ctx: &mut HostContext,
    meta: &EventMeta,
    escrow: &TitleEscrow,
    token: &Token,
    action: &str,
) -> Result<TokenSnapshot, StoreError> {
    let snapshot = TokenSnapshot {
        id: format!("{}-{}", event_id(&meta.tx_hash, meta.log_index), token.id),
        timestamp: meta.timestamp,
        token: token.id.clone(),
        title_escrow: escrow.id.clone(),
        beneficiary: escrow.beneficiary.clone(),
        holder: escrow.holder.clone(),
        nominee: escrow.nominee.clone(),
        surrendered: token.surrendered,
        accepted: token.accepted,
        action: action.to_string(),
    };
    ctx.store.save(&snapshot)?;
    Ok(snapshot)
}
