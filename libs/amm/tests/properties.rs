//! Quote Math Property Tests
//!
//! Properties of the fixed-point layer and the solvency curve that must hold
//! for any input, not just the mainnet snapshots.

use mobius_amm::{
    AssetKind, AssetState, PoolConfig, PoolType, QuoteError, SolvencyCurve, SwapQuoteEngine,
    WadMath, U256, WAD,
};
use proptest::prelude::*;

fn wad_u64(raw: u64) -> U256 {
    U256::from(raw)
}

prop_compose! {
    fn threshold()
        (raw in 1u64..1_000_000_000_000_000_000u64) -> U256 {
        wad_u64(raw)
    }
}

prop_compose! {
    fn balances()
        (cash in 1u128..1_000_000_000_000_000_000_000_000u128,
         liability in 1u128..1_000_000_000_000_000_000_000_000u128) -> (U256, U256) {
        (U256::from(cash), U256::from(liability))
    }
}

fn asset(account: u8, cash: U256, liability: U256) -> AssetState {
    AssetState {
        token: [account; 20],
        asset: [account; 20],
        cash,
        liability,
        decimals: 18,
        aggregate_account: [account; 20],
        kind: AssetKind::Stable,
    }
}

proptest! {
    #[test]
    fn prop_native_round_trip_is_lossless(amount in any::<u128>(), decimals in 0u8..=18) {
        let native = U256::from(amount);
        let canonical = WadMath::to_wad(native, decimals).unwrap();
        prop_assert_eq!(WadMath::from_wad(canonical, decimals).unwrap(), native);
    }

    #[test]
    fn prop_high_precision_round_trip_truncates(amount in any::<u128>(), decimals in 19u8..=40) {
        let native = U256::from(amount);
        let canonical = WadMath::to_wad(native, decimals).unwrap();
        let back = WadMath::from_wad(canonical, decimals).unwrap();
        let unit = WadMath::pow10(u32::from(decimals - 18)).unwrap();

        prop_assert!(back <= native);
        prop_assert_eq!(back, native - native % unit);
    }

    #[test]
    fn prop_curve_is_continuous_at_threshold(r_threshold in threshold()) {
        let at = SolvencyCurve::integral(r_threshold, r_threshold).unwrap();
        prop_assert_eq!(at, (WAD - r_threshold) / 5);

        // One wei above the threshold evaluates the fifth-power branch
        let above = SolvencyCurve::integral(r_threshold, r_threshold + 1).unwrap();
        prop_assert!(above <= at);
        prop_assert!(at - above <= U256::one());
    }

    #[test]
    fn prop_curve_is_zero_when_fully_covered(
        r_threshold in threshold(),
        excess in 0u64..10_000_000_000_000_000_000u64,
    ) {
        let r = WAD + U256::from(excess);
        prop_assert_eq!(SolvencyCurve::integral(r_threshold, r).unwrap(), U256::zero());
    }

    #[test]
    fn prop_unchanged_cash_scores_zero(
        r_threshold in threshold(),
        (cash, liability) in balances(),
        add_cash in any::<bool>(),
    ) {
        let score = SolvencyCurve::score(r_threshold, cash, liability, U256::zero(), add_cash).unwrap();
        prop_assert_eq!(score, U256::zero());
    }

    #[test]
    fn prop_zero_liability_always_fails(
        r_threshold in threshold(),
        cash in any::<u64>(),
        change in any::<u64>(),
    ) {
        prop_assert_eq!(
            SolvencyCurve::score(r_threshold, U256::from(cash), U256::zero(), U256::from(change), true),
            Err(QuoteError::ZeroLiability)
        );
        prop_assert_eq!(
            asset(1, U256::from(cash), U256::zero()).coverage_ratio(),
            Err(QuoteError::ZeroLiability)
        );
    }

    #[test]
    fn prop_aggregate_account_gate(
        amount in any::<i128>(),
        (cash, liability) in balances(),
        from_account in any::<u8>(),
        offset in 1u8..=255,
    ) {
        let config = PoolConfig::new(WAD / 4, WAD / 10_000, WAD / 5, PoolType::Stable).unwrap();
        let from = asset(from_account, cash, liability);
        let to = asset(from_account.wrapping_add(offset), cash, liability);

        prop_assert_eq!(
            SwapQuoteEngine::quote(&config, &from, &to, amount),
            Err(QuoteError::AggregateAccountMismatch)
        );
        prop_assert!(!SwapQuoteEngine::validate(&config, &from, &to, amount).unwrap());
    }

    #[test]
    fn prop_net_plus_haircut_is_gross(
        (cash, liability) in balances(),
        amount in 1i128..1_000_000_000_000_000_000i128,
    ) {
        let config = PoolConfig::new(WAD / 4, WAD / 10_000, WAD / 5, PoolType::Stable).unwrap();
        let from = asset(7, cash, liability);
        let mut to = asset(7, cash, liability);
        to.token = [8u8; 20];

        if let Ok(breakdown) = SwapQuoteEngine::quote_detailed(&config, &from, &to, amount) {
            prop_assert_eq!(breakdown.net_to_amount + breakdown.haircut, breakdown.gross_to_amount);
            prop_assert!(breakdown.ideal_to_amount <= to.cash);
        }
    }
}
