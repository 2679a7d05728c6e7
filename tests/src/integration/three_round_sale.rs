//! # Three-Round Sale
//!
//! A complete sale lifecycle across three rounds with cumulative caps
//! 3 / 10 / 15:
//!
//! 1. **Round 1** (price 7): allowlist of two, sells out
//! 2. **Round 2** (price 8): allowlist of four, per-call and per-address caps hit
//! 3. **Round 3** (price 10): open to all, blocked once MINTER is revoked
//!
//! Ends with treasury withdrawal and a collection admin handover.

#[cfg(test)]
mod tests {
    use mint_admission::prelude::*;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const BLOCK: u64 = 1;

    fn admin() -> Address {
        Address::repeat_byte(0xAD)
    }

    /// Four buyers; round 1 allows the first two, round 2 all four.
    fn wl() -> [Address; 4] {
        [
            Address::repeat_byte(0x01),
            Address::repeat_byte(0x02),
            Address::repeat_byte(0x03),
            Address::repeat_byte(0x04),
        ]
    }

    struct Sale {
        controller: Arc<SaleController>,
        collection: Arc<InMemoryCollection>,
        payouts: Arc<InMemoryPayouts>,
        round1: AllowlistTree,
        round2: AllowlistTree,
    }

    impl Sale {
        fn mint(
            &self,
            who: Address,
            round: u64,
            quantity: u64,
            paid: u64,
            proof: &[Hash],
        ) -> Result<MintReceipt, SaleError> {
            self.controller.mint(
                &CallContext::paying(who, paid, BLOCK),
                RoundId(round),
                quantity,
                proof,
            )
        }
    }

    fn round(price: u64, total_cap: u64, cap: u64, root: Hash) -> RoundInfo {
        RoundInfo {
            price: U256::from(price),
            total_cap,
            per_call_cap: cap,
            per_address_cap: cap,
            start_block: 0,
            allowlist_root: root,
        }
    }

    fn deploy() -> Sale {
        let buyers = wl();
        let round1 = AllowlistTree::from_addresses(&buyers[..2]);
        let round2 = AllowlistTree::from_addresses(&buyers);

        let payouts = Arc::new(InMemoryPayouts::new());
        let controller =
            Arc::new(SaleController::new(SaleConfig::for_testing(), payouts.clone()).unwrap());
        let collection = Arc::new(InMemoryCollection::new(Address::repeat_byte(0xC1), admin()));

        let ctx = CallContext::new(admin(), 0);
        collection
            .grant_role(&admin(), Role::Minter, controller.address())
            .unwrap();
        controller.set_bridge(&ctx, collection.clone()).unwrap();

        let schedule = [
            round(7, 3, 2, round1.root()),
            round(8, 10, 3, round2.root()),
            round(10, 15, 3, Hash::ZERO),
        ];
        for (i, info) in schedule.into_iter().enumerate() {
            controller
                .set_round_info(&ctx, RoundId(i as u64 + 1), info)
                .unwrap();
        }
        assert!(controller.lint().is_empty());

        Sale {
            controller,
            collection,
            payouts,
            round1,
            round2,
        }
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[test]
    fn test_three_round_sale_lifecycle() {
        let sale = deploy();
        let c = &sale.controller;
        let admin_ctx = CallContext::new(admin(), 0);
        let [wl0, wl1, wl2, wl3] = wl();

        // ---- Round 1 --------------------------------------------------------
        c.set_round(&admin_ctx, RoundId(1)).unwrap();
        assert_eq!(c.remain_count(), 3);

        let p0 = sale.round1.proof_for(&wl0).unwrap();
        let p1 = sale.round1.proof_for(&wl1).unwrap();
        assert!(sale.round1.proof_for(&wl3).is_none());

        assert!(matches!(
            sale.mint(wl3, 1, 1, 7, &[]),
            Err(SaleError::NotAllowlisted(_))
        ));
        sale.mint(wl0, 1, 1, 7, &p0).unwrap();
        sale.mint(wl1, 1, 1, 7, &p1).unwrap();
        assert_eq!(c.remain_count(), 1);

        assert!(sale.mint(wl2, 1, 1, 7, &[]).is_err());
        assert!(matches!(
            sale.mint(wl2, 1, 1, 7, &p1),
            Err(SaleError::NotAllowlisted(_))
        ));
        assert!(sale.mint(wl1, 1, 2, 14, &p1).is_err());

        sale.mint(wl1, 1, 1, 7, &p1).unwrap();
        assert_eq!(c.remain_count(), 0);
        assert_eq!(c.round_state(RoundId(1)), RoundState::SoldOut);

        // ---- Round 2 --------------------------------------------------------
        c.set_round(&admin_ctx, RoundId(2)).unwrap();
        assert_eq!(c.remain_count(), 7);
        assert_eq!(c.round_state(RoundId(1)), RoundState::Inactive);

        let q1 = sale.round2.proof_for(&wl1).unwrap();
        let q2 = sale.round2.proof_for(&wl2).unwrap();
        let q3 = sale.round2.proof_for(&wl3).unwrap();

        sale.mint(wl3, 2, 1, 8, &q3).unwrap();
        assert!(matches!(
            sale.mint(wl3, 2, 4, 8 * 3 + 1, &q3),
            Err(SaleError::QuantityExceedsPerCallCap { quantity: 4, cap: 3 })
        ));
        sale.mint(wl3, 2, 2, 16, &q3).unwrap();
        assert_eq!(c.remain_count(), 4);

        assert!(sale.mint(wl1, 2, 4, 32, &q1).is_err());
        assert!(matches!(
            sale.mint(wl1, 2, 1, 7, &q1),
            Err(SaleError::IncorrectPayment { .. })
        ));
        // Round 1 purchases do not count against round 2's address cap
        sale.mint(wl1, 2, 3, 24, &q1).unwrap();
        assert_eq!(c.remain_count(), 1);

        assert!(matches!(
            sale.mint(wl2, 2, 3, 24, &q2),
            Err(SaleError::SupplyExhausted { remaining: 1, quantity: 3 })
        ));
        sale.mint(wl2, 2, 1, 8, &q2).unwrap();
        assert_eq!(c.remain_count(), 0);
        assert!(matches!(
            sale.mint(wl2, 2, 1, 8, &q2),
            Err(SaleError::SupplyExhausted { .. })
        ));

        assert_eq!(c.total_sold(), 10);
        assert_eq!(sale.collection.total_supply(), 10);
        assert_eq!(sale.collection.balance_of(&wl1), 5);
        assert_eq!(c.minted(RoundId(1), &wl1), 2);
        assert_eq!(c.minted(RoundId(2), &wl1), 3);

        // ---- Round 3 after MINTER is revoked ---------------------------------
        sale.collection
            .revoke_role(&admin(), Role::Minter, c.address())
            .unwrap();
        c.set_round(&admin_ctx, RoundId(3)).unwrap();
        assert_eq!(c.remain_count(), 5);

        assert!(matches!(
            sale.mint(wl2, 3, 1, 10, &[]),
            Err(SaleError::Issuance(IssuanceError::MissingMinterRole(_)))
        ));
        assert_eq!(c.remain_count(), 5);

        // ---- Treasury --------------------------------------------------------
        let balance = c.treasury_balance();
        assert_eq!(balance, U256::from(7u64 * 3 + 8 * 7));

        assert!(matches!(
            c.withdraw(&CallContext::new(wl2, 0), admin(), balance),
            Err(SaleError::Unauthorized { .. })
        ));
        c.withdraw(&admin_ctx, admin(), balance).unwrap();
        assert!(c.treasury_balance().is_zero());
        assert_eq!(sale.payouts.balance_of(&admin()), balance);

        // ---- Collection admin handover ---------------------------------------
        let successor = Address::from_slice(&[
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ])
        .unwrap();
        sale.collection
            .grant_role(&admin(), Role::Admin, successor)
            .unwrap();
        sale.collection
            .revoke_role(&admin(), Role::Admin, admin())
            .unwrap();
        assert!(sale
            .collection
            .grant_role(&admin(), Role::Minter, successor)
            .is_err());
    }

    #[test]
    fn test_event_log_matches_lifecycle() {
        let sale = deploy();
        let admin_ctx = CallContext::new(admin(), 0);
        let [wl0, ..] = wl();

        sale.controller.set_round(&admin_ctx, RoundId(1)).unwrap();
        let proof = sale.round1.proof_for(&wl0).unwrap();
        sale.mint(wl0, 1, 2, 14, &proof).unwrap();

        let events = sale.controller.take_events();
        let names: Vec<_> = events.iter().map(SaleEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "BridgeUpdated",
                "RoundConfigured",
                "RoundConfigured",
                "RoundConfigured",
                "RoundActivated",
                "Minted",
            ]
        );

        match events.last() {
            Some(SaleEvent::Minted {
                minter, token_ids, ..
            }) => {
                assert_eq!(*minter, wl0);
                assert_eq!(token_ids, &vec![1, 2]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_patching_root_mid_round() {
        let sale = deploy();
        let admin_ctx = CallContext::new(admin(), 0);
        let [wl0, wl1, wl2, _] = wl();

        sale.controller.set_round(&admin_ctx, RoundId(1)).unwrap();
        assert!(sale.mint(wl2, 1, 1, 7, &[]).is_err());

        // Admin widens round 1 to the round 2 list
        sale.controller
            .set_merkle_root(&admin_ctx, sale.round2.root())
            .unwrap();
        assert_eq!(
            sale.controller.round_info(RoundId(1)).allowlist_root,
            sale.round2.root()
        );

        let proof = sale.round2.proof_for(&wl2).unwrap();
        sale.mint(wl2, 1, 1, 7, &proof).unwrap();

        // Old proofs stop working
        let stale = sale.round1.proof_for(&wl0).unwrap();
        assert!(sale.mint(wl0, 1, 1, 7, &stale).is_err());
    }
}
