//! # Configured Schedules
//!
//! Sales booted from a JSON configuration, misconfiguration warnings and
//! the serialized event stream.

#[cfg(test)]
mod tests {
    use mint_admission::prelude::*;
    use std::sync::Arc;

    const SCHEDULE: &str = r#"{
        "admin": "0xadadadadadadadadadadadadadadadadadadadad",
        "contract_address": "0xc0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0",
        "max_proof_len": 8,
        "initial_rounds": [
            { "id": 1, "price": "0x7", "total_cap": 3, "per_call_cap": 2,
              "per_address_cap": 2, "start_block": 100 },
            { "id": 2, "price": "0xa", "total_cap": 15, "per_call_cap": 3,
              "per_address_cap": 3, "start_block": 200 }
        ],
        "initial_active_round": 1
    }"#;

    fn boot(json: &str) -> (Arc<SaleController>, Arc<InMemoryCollection>) {
        let config = SaleConfig::from_json_str(json).unwrap();
        let admin = config.admin;
        let sale =
            Arc::new(SaleController::new(config, Arc::new(InMemoryPayouts::new())).unwrap());
        let collection = Arc::new(InMemoryCollection::new(Address::repeat_byte(0xC1), admin));
        collection
            .grant_role(&admin, Role::Minter, sale.address())
            .unwrap();
        sale.set_bridge(&CallContext::new(admin, 0), collection.clone())
            .unwrap();
        (sale, collection)
    }

    #[test]
    fn test_boot_from_json_schedule() {
        let (sale, _) = boot(SCHEDULE);
        let buyer = Address::repeat_byte(0x01);

        assert_eq!(sale.active_round(), RoundId(1));
        assert_eq!(sale.configured_rounds(), vec![RoundId(1), RoundId(2)]);
        assert_eq!(sale.config().max_proof_len, 8);
        assert_eq!(sale.remain_count(), 3);

        assert!(matches!(
            sale.mint(&CallContext::paying(buyer, 7u64, 99), RoundId(1), 1, &[]),
            Err(SaleError::TooEarly { current: 99, start: 100 })
        ));
        sale.mint(&CallContext::paying(buyer, 14u64, 100), RoundId(1), 2, &[])
            .unwrap();
        assert_eq!(sale.round_state(RoundId(1)), RoundState::Open);
    }

    #[test]
    fn test_schedule_with_round_zero_rejected() {
        let json = r#"{ "initial_rounds": [ { "id": 0, "total_cap": 1 } ] }"#;
        let config = SaleConfig::from_json_str(json).unwrap();
        assert!(matches!(
            SaleController::new(config, Arc::new(InMemoryPayouts::new())),
            Err(SaleError::InvalidRoundId(RoundId(0)))
        ));
    }

    #[test]
    fn test_proof_bound_from_config() {
        let json = SCHEDULE.replace("\"max_proof_len\": 8", "\"max_proof_len\": 1");
        let (sale, _) = boot(&json);
        let admin = CallContext::new(sale.config().admin, 0);

        // Four members need two proof levels; bound is one
        let members: Vec<Address> = (1..=4).map(Address::repeat_byte).collect();
        let tree = AllowlistTree::from_addresses(&members);
        sale.set_merkle_root(&admin, tree.root()).unwrap();

        let proof = tree.proof_for(&members[0]).unwrap();
        assert_eq!(proof.len(), 2);
        assert!(verify_allowlist_proof(&members[0], &proof, &tree.root()));
        assert!(matches!(
            sale.mint(&CallContext::paying(members[0], 7u64, 100), RoundId(1), 1, &proof),
            Err(SaleError::NotAllowlisted(_))
        ));
    }

    #[test]
    fn test_non_monotonic_caps_are_tolerated_and_reported() {
        let (sale, _) = boot(SCHEDULE);
        let admin = CallContext::new(sale.config().admin, 0);
        let shrunk = RoundInfo {
            price: U256::from(10u64),
            total_cap: 2,
            per_call_cap: 3,
            per_address_cap: 3,
            start_block: 0,
            allowlist_root: Hash::ZERO,
        };
        sale.set_round_info(&admin, RoundId(2), shrunk).unwrap();

        let warnings = sale.lint();
        assert!(warnings.iter().any(|w| matches!(
            w,
            ConfigWarning::NonMonotonicTotalCap { .. }
        )));

        // Sell round 1 out, then move to the shrunken round 2
        let buyer = Address::repeat_byte(0x01);
        let other = Address::repeat_byte(0x02);
        sale.mint(&CallContext::paying(buyer, 14u64, 100), RoundId(1), 2, &[])
            .unwrap();
        sale.mint(&CallContext::paying(other, 7u64, 100), RoundId(1), 1, &[])
            .unwrap();
        sale.set_round(&admin, RoundId(2)).unwrap();

        assert_eq!(sale.remain_count(), 0);
        assert_eq!(sale.round_state(RoundId(2)), RoundState::SoldOut);
        assert!(matches!(
            sale.mint(&CallContext::paying(other, 10u64, 200), RoundId(2), 1, &[]),
            Err(SaleError::SupplyExhausted { remaining: 0, .. })
        ));
    }

    #[test]
    fn test_event_stream_serializes() {
        let (sale, _) = boot(SCHEDULE);
        let buyer = Address::repeat_byte(0x01);
        sale.take_events();
        sale.mint(&CallContext::paying(buyer, 7u64, 100), RoundId(1), 1, &[])
            .unwrap();

        let events = sale.take_events();
        let json = serde_json::to_value(&events).unwrap();
        assert_eq!(json[0]["event"], "minted");
        assert_eq!(json[0]["round"], 1);
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["paid"], "0x7");
        assert_eq!(json[0]["minter"], format!("0x{}", "01".repeat(20)));

        let back: Vec<SaleEvent> = serde_json::from_value(json).unwrap();
        assert_eq!(back, events);
    }
}
