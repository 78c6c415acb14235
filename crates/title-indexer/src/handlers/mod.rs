//! # Event Handlers
//!
//! One handler per on-chain event kind, plus the [`dispatch`] entry the
//! host calls with each delivered event. Handlers run to completion
//! before the next event arrives; all effects go through the
//! [`HostContext`](crate::host::HostContext) capabilities.

pub mod escrow;
pub mod registry;
pub mod snapshot;

use shared_types::TitleEvent;

use crate::domain::IndexError;
use crate::host::HostContext;

/// Route one decoded event to its handler.
pub fn dispatch(ctx: &mut HostContext, event: &TitleEvent) -> Result<(), IndexError> {
    match event {
        TitleEvent::TokenReceived(e) => escrow::handle_token_received(ctx, e),
        TitleEvent::Surrender(e) => escrow::handle_surrender(ctx, e),
        TitleEvent::Nomination(e) => escrow::handle_nomination(ctx, e),
        TitleEvent::BeneficiaryTransfer(e) => escrow::handle_beneficiary_transfer(ctx, e),
        TitleEvent::HolderTransfer(e) => escrow::handle_holder_transfer(ctx, e),
        TitleEvent::Shred(e) => escrow::handle_shred(ctx, e),
        TitleEvent::EscrowApproval(e) => escrow::handle_escrow_approval(ctx, e),
        TitleEvent::TitleCeded(e) => escrow::handle_title_ceded(ctx, e),
        TitleEvent::RegistryTransfer(e) => registry::handle_transfer(ctx, e),
        TitleEvent::EscrowDeployed(e) => registry::handle_escrow_deployed(ctx, e),
        TitleEvent::TokenRestored(e) => registry::handle_token_restored(ctx, e),
    }
}
