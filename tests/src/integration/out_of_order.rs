//! # Cross-Stream Ordering
//!
//! The registry stream and each escrow stream are indexed independently,
//! so escrow events can arrive before the deployment event that created
//! the escrow, and registry transfers can reference escrows the indexer
//! has never seen. These scenarios exercise the lazy reconstruction and
//! fallback paths that keep processing alive in every ordering.

#[cfg(test)]
mod tests {
    use primitive_types::U256;

    use shared_types::{address_hex, TokenId, ZERO_ADDRESS};
    use title_indexer::{
        EscrowFixture, HolderTransfer, RegistryFixture, Surrender, TitleEscrow,
    };

    use crate::harness::{
        escrow_deployed, holder_transfer, surrender, test_address, Harness, REGISTRY,
    };

    const ESCROW_B: shared_types::Address = test_address(0x77);
    const ALICE: shared_types::Address = test_address(0x01);
    const BOB: shared_types::Address = test_address(0x02);
    const DAVE: shared_types::Address = test_address(0x04);

    fn token_id() -> TokenId {
        U256::from(9u64)
    }

    #[test]
    fn test_escrow_event_before_deployment_reconstructs_from_chain() {
        let mut harness = Harness::new();
        harness.chain.put_registry(
            REGISTRY,
            RegistryFixture {
                name: Some("Bill of Lading Registry".to_string()),
                symbol: Some("BOLR".to_string()),
                ..Default::default()
            },
        );
        harness.chain.put_escrow(
            ESCROW_B,
            EscrowFixture {
                registry: Some(REGISTRY),
                token_id: Some(token_id()),
                beneficiary: Some(ALICE),
                holder: Some(BOB),
                active: Some(true),
                ..Default::default()
            },
        );

        // Holder transfer lands before any deployment event was seen
        harness.deliver(holder_transfer(1, 0, ESCROW_B, token_id(), Some(BOB), Some(DAVE)));

        let escrow: TitleEscrow = harness.require(&address_hex(&ESCROW_B));
        assert_eq!(escrow.registry, address_hex(&REGISTRY));
        assert_eq!(escrow.beneficiary, Some(address_hex(&ALICE)));
        // The event mutation applied on top of the reconstructed state
        assert_eq!(escrow.holder, Some(address_hex(&DAVE)));
        assert!(escrow.active);

        // The unknown emitter became a registered source
        assert!(harness.sources.contains(ESCROW_B));

        let record_id = format!(
            "{}/HolderTransfer",
            title_indexer::event_id(&crate::harness::tx_hash_for_block(1), 0)
        );
        let record: HolderTransfer = harness.require(&record_id);
        assert_eq!(record.to, Some(address_hex(&DAVE)));
    }

    #[test]
    fn test_unreadable_escrow_still_yields_records() {
        // No chain fixtures at all: every contract read reverts
        let mut harness = Harness::new();

        harness.deliver(surrender(1, 0, ESCROW_B, token_id()));

        // The escrow record exists with documented fallbacks
        let escrow: TitleEscrow = harness.require(&address_hex(&ESCROW_B));
        assert_eq!(escrow.registry, address_hex(&ZERO_ADDRESS));
        assert_eq!(escrow.beneficiary, None);
        assert!(!escrow.active);
        assert_eq!(escrow.status, "");

        // The surrender record keys off the event's registry, not the
        // escrow's unreadable one
        let record_id = format!(
            "{}/Surrender",
            title_indexer::event_id(&crate::harness::tx_hash_for_block(1), 0)
        );
        let record: Surrender = harness.require(&record_id);
        assert_eq!(record.registry, address_hex(&REGISTRY));
    }

    #[test]
    fn test_late_deployment_overwrites_lazy_reconstruction() {
        let mut harness = Harness::new();
        harness.chain.put_escrow(
            ESCROW_B,
            EscrowFixture {
                registry: Some(REGISTRY),
                token_id: Some(token_id()),
                beneficiary: Some(ALICE),
                holder: Some(BOB),
                active: Some(true),
                status_code: Some(1),
                ..Default::default()
            },
        );

        harness.deliver(holder_transfer(1, 0, ESCROW_B, token_id(), Some(BOB), Some(DAVE)));
        harness.deliver(escrow_deployed(2, 0, ESCROW_B, ALICE, BOB));

        // Deployment is authoritative for roles
        let escrow: TitleEscrow = harness.require(&address_hex(&ESCROW_B));
        assert_eq!(escrow.holder, Some(address_hex(&BOB)));
        assert_eq!(escrow.status, "InUse");

        // Registered once lazily and once at deployment
        assert_eq!(harness.sources.registered.len(), 2);
    }
}
