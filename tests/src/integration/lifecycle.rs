//! # Full Title Lifecycle
//!
//! One token driven from escrow deployment through issuance, nomination,
//! endorsement, surrender, restoration and terminal shred, with the
//! entity graph checked at every stage.

#[cfg(test)]
mod tests {
    use primitive_types::U256;

    use shared_types::{address_hex, TokenId, BURN_ADDRESS};
    use title_indexer::{
        event_id, token_entity_id, Acceptance, BeneficiaryTransfer, EscrowFixture, HolderTransfer,
        Issuance, Nomination, RegistryFixture, Restoration, Surrender, TitleEscrow, Token,
        TokenSnapshot, TokenTransfer, TransferType,
    };

    use crate::harness::{
        beneficiary_transfer, escrow_deployed, holder_transfer, nomination, registry_transfer,
        shred, surrender, test_address, token_received, tx_hash_for_block, Harness, REGISTRY,
    };

    const ESCROW_A: shared_types::Address = test_address(0x55);
    const ALICE: shared_types::Address = test_address(0x01);
    const BOB: shared_types::Address = test_address(0x02);
    const CAROL: shared_types::Address = test_address(0x03);
    const DAVE: shared_types::Address = test_address(0x04);

    fn token_id() -> TokenId {
        U256::from(7u64)
    }

    fn harness_with_chain() -> Harness {
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
            ESCROW_A,
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
        harness
    }

    fn token_key() -> String {
        token_entity_id(&address_hex(&REGISTRY), token_id())
    }

    #[test]
    fn test_full_lifecycle() {
        let mut harness = harness_with_chain();

        // ========== Block 1: deployment + issuance ==========

        harness.deliver(escrow_deployed(1, 0, ESCROW_A, ALICE, BOB));
        harness.deliver(registry_transfer(1, 1, None, Some(ESCROW_A), token_id()));
        harness.deliver(token_received(1, 2, ESCROW_A, token_id(), ALICE, BOB, true));

        let escrow: TitleEscrow = harness.require(&address_hex(&ESCROW_A));
        assert_eq!(escrow.status, "InUse");
        assert!(escrow.active);
        assert!(harness.sources.contains(ESCROW_A));

        let token: Token = harness.require(&token_key());
        assert_eq!(token.title_escrow, Some(address_hex(&ESCROW_A)));
        assert_eq!(token.beneficiary, Some(address_hex(&ALICE)));
        assert_eq!(token.holder, Some(address_hex(&BOB)));
        assert!(!token.surrendered);

        let mint_eid = event_id(&tx_hash_for_block(1), 1);
        let mint: TokenTransfer = harness.require(&format!("{mint_eid}/TokenTransfer"));
        assert_eq!(mint.transfer_type, TransferType::Mint);
        assert_eq!(mint.to_title_escrow, Some(address_hex(&ESCROW_A)));
        assert_eq!(mint.to_beneficiary, Some(address_hex(&ALICE)));

        let issue_eid = event_id(&tx_hash_for_block(1), 2);
        let issuance: Issuance = harness.require(&format!("{issue_eid}/Issuance"));
        let issue_snapshot: TokenSnapshot = harness.require(&issuance.token_snapshot);
        assert_eq!(issue_snapshot.action, "Issuance");
        assert!(!issue_snapshot.surrendered);

        // ========== Block 2: nomination + endorsement ==========

        harness.deliver(nomination(2, 0, ESCROW_A, token_id(), None, Some(CAROL)));
        harness.deliver(beneficiary_transfer(2, 1, ESCROW_A, token_id(), Some(ALICE), Some(CAROL)));
        harness.deliver(holder_transfer(2, 2, ESCROW_A, token_id(), Some(BOB), Some(DAVE)));

        let escrow: TitleEscrow = harness.require(&address_hex(&ESCROW_A));
        assert_eq!(escrow.nominee, Some(address_hex(&CAROL)));
        assert_eq!(escrow.beneficiary, Some(address_hex(&CAROL)));
        assert_eq!(escrow.holder, Some(address_hex(&DAVE)));

        let nom_eid = event_id(&tx_hash_for_block(2), 0);
        let nom: Nomination = harness.require(&format!("{nom_eid}/Nomination"));
        assert_eq!(nom.nominee, address_hex(&CAROL));

        let endorse_eid = event_id(&tx_hash_for_block(2), 1);
        let endorse: BeneficiaryTransfer =
            harness.require(&format!("{endorse_eid}/BeneficiaryTransfer"));
        assert_eq!(endorse.from, Some(address_hex(&ALICE)));
        assert_eq!(endorse.to, Some(address_hex(&CAROL)));

        let holder_eid = event_id(&tx_hash_for_block(2), 2);
        let moved: HolderTransfer = harness.require(&format!("{holder_eid}/HolderTransfer"));
        assert_eq!(moved.to, Some(address_hex(&DAVE)));

        // ========== Block 3: surrender ==========

        harness.deliver(registry_transfer(3, 0, Some(ESCROW_A), Some(REGISTRY), token_id()));
        harness.deliver(surrender(3, 1, ESCROW_A, token_id()));

        let token: Token = harness.require(&token_key());
        assert!(token.surrendered);
        assert!(!token.accepted);
        assert_eq!(token.title_escrow, None);

        let raw_eid = event_id(&tx_hash_for_block(3), 0);
        let raw: TokenTransfer = harness.require(&format!("{raw_eid}/TokenTransfer"));
        assert_eq!(raw.transfer_type, TransferType::Surrender);
        assert_eq!(raw.from_beneficiary, Some(address_hex(&CAROL)));

        let surrender_eid = event_id(&tx_hash_for_block(3), 1);
        let record: Surrender = harness.require(&format!("{surrender_eid}/Surrender"));
        let snapshot: TokenSnapshot = harness.require(&record.token_snapshot);
        assert!(snapshot.surrendered);
        assert!(!snapshot.accepted);

        // ========== Block 4: restoration ==========

        harness.deliver(registry_transfer(4, 0, Some(REGISTRY), Some(ESCROW_A), token_id()));
        harness.deliver(token_received(4, 1, ESCROW_A, token_id(), CAROL, DAVE, false));

        let token: Token = harness.require(&token_key());
        assert!(!token.surrendered, "restoration returns the token to circulation");
        assert_eq!(token.title_escrow, Some(address_hex(&ESCROW_A)));

        let restore_raw_eid = event_id(&tx_hash_for_block(4), 0);
        let restore_raw: TokenTransfer =
            harness.require(&format!("{restore_raw_eid}/TokenTransfer"));
        assert_eq!(restore_raw.transfer_type, TransferType::Restoration);

        let restore_eid = event_id(&tx_hash_for_block(4), 1);
        let restoration: Restoration = harness.require(&format!("{restore_eid}/Restoration"));
        assert!(restoration.token_snapshot.is_some());

        // ========== Block 5: terminal shred ==========

        harness.deliver(registry_transfer(5, 0, Some(ESCROW_A), Some(BURN_ADDRESS), token_id()));
        harness.deliver(shred(5, 1, ESCROW_A, token_id()));

        let token: Token = harness.require(&token_key());
        assert!(token.surrendered);
        assert!(token.accepted);

        let burn_eid = event_id(&tx_hash_for_block(5), 0);
        let burn: TokenTransfer = harness.require(&format!("{burn_eid}/TokenTransfer"));
        assert_eq!(burn.transfer_type, TransferType::Acceptance);
        let paired: Acceptance = harness.require(&format!("{burn_eid}/Acceptance"));
        assert_eq!(paired.token_snapshot, None);

        let shred_eid = event_id(&tx_hash_for_block(5), 1);
        let accepted: Acceptance = harness.require(&format!("{shred_eid}/Acceptance"));
        let final_snapshot: TokenSnapshot =
            harness.require(&accepted.token_snapshot.expect("shred path snapshots"));
        assert!(final_snapshot.accepted);
        assert!(final_snapshot.surrendered);

        // ========== Graph-wide invariants ==========

        // One transaction record per block
        assert_eq!(harness.store.count_of_kind("Transaction"), 5);

        // The escrow was registered exactly once, at deployment
        assert_eq!(harness.sources.registered.len(), 1);

        // Every raw transfer got a record; none were mutated away
        assert_eq!(harness.store.count_of_kind("TokenTransfer"), 4);
        assert_eq!(harness.store.count_of_kind("Acceptance"), 2);
        assert_eq!(harness.store.count_of_kind("Restoration"), 1);
        assert_eq!(harness.store.count_of_kind("TokenSnapshot"), 7);
    }

    #[test]
    fn test_snapshot_ids_never_collide_within_transaction() {
        let mut harness = harness_with_chain();

        harness.deliver(escrow_deployed(1, 0, ESCROW_A, ALICE, BOB));
        harness.deliver(token_received(1, 1, ESCROW_A, token_id(), ALICE, BOB, true));
        // Same transaction, later log: nomination snapshots the same token
        harness.deliver(nomination(1, 2, ESCROW_A, token_id(), None, Some(CAROL)));

        assert_eq!(harness.store.count_of_kind("TokenSnapshot"), 2);
    }
}
