//! Pool Quote Scenarios
//!
//! Mantle mainnet stable and variant pool snapshots quoted end to end through
//! `MobiusPool`. Expected values are the exact integers the WAD pipeline
//! produces for these balances.

use mobius_amm::{
    Address, AssetKind, AssetStateSink, AssetUpdate, MobiusPool, PoolConfig, PoolType, QuoteError,
    SwapIntent, U256, WAD,
};
use std::sync::Arc;
use std::thread;

const USDE: Address = [0x5d; 20];
const USDC: Address = [0x09; 20];
const USDT: Address = [0x20; 20];
const WETH: Address = [0xde; 20];
const CMETH: Address = [0xe6; 20];
const METH: Address = [0xcd; 20];

const STABLE_ACCOUNT: Address = [0x7f; 20];
const VARIANT_ACCOUNT: Address = [0x92; 20];

const HAIRCUT_RATE: u64 = 50_000_000_000_000; // 0.005%

fn dec(value: &str) -> U256 {
    U256::from_dec_str(value).unwrap()
}

fn units(amount: i128, decimals: u32) -> i128 {
    amount * 10i128.pow(decimals)
}

fn sync(pool: &MobiusPool, token: Address, cash: &str, liability: &str, decimals: u8, account: Address, price: Option<U256>) {
    pool.update_asset_state(AssetUpdate {
        token,
        asset: [token[0].wrapping_add(1); 20],
        cash: dec(cash),
        liability: dec(liability),
        decimals,
        aggregate_account: account,
        values_in_wad: true,
        price,
    })
    .unwrap();
}

fn stable_pool() -> MobiusPool {
    let config = PoolConfig::new(
        U256::from(230_000_000_000_000_000u64),
        U256::from(HAIRCUT_RATE),
        U256::from(200_000_000_000_000_000u64),
        PoolType::Stable,
    )
    .unwrap();
    let pool = MobiusPool::new([0x3c; 20], config);

    sync(&pool, USDE, "21564039972018040980967", "24336765812301186559140", 18, STABLE_ACCOUNT, None);
    sync(&pool, USDC, "21491644533317066991913", "18717507771725148273016", 6, STABLE_ACCOUNT, None);
    sync(&pool, USDT, "17494532897516387104081", "17494496221405803482740", 6, STABLE_ACCOUNT, None);
    pool
}

fn variant_pool() -> MobiusPool {
    let config = PoolConfig::new(
        U256::from(200_000_000_000_000_000u64),
        U256::from(HAIRCUT_RATE),
        U256::from(200_000_000_000_000_000u64),
        PoolType::Variant,
    )
    .unwrap();
    let pool = MobiusPool::new([0xf9; 20], config);

    let hundred = "100000000000000000000";
    let lst_price = U256::from(1_072_690_000_000_000_000u64);
    sync(&pool, WETH, hundred, hundred, 18, VARIANT_ACCOUNT, Some(WAD));
    sync(&pool, CMETH, hundred, hundred, 18, VARIANT_ACCOUNT, Some(lst_price));
    sync(&pool, METH, hundred, hundred, 18, VARIANT_ACCOUNT, Some(lst_price));
    pool
}

#[test]
fn test_usde_to_usdc_quote() {
    let pool = stable_pool();
    let quote = pool.quote_swap(&USDE, &USDC, units(100, 18)).unwrap();

    // USDe coverage rises on the sloped branch while USDC stays above 1.0
    assert_eq!(quote.amount, U256::from(100_039_593u64));
    assert_eq!(quote.haircut, U256::from(5_002u64));

    let detail = pool.quote_swap_detailed(&USDE, &USDC, units(100, 18)).unwrap();
    assert_eq!(detail.ideal_to_amount, U256::from(100u64) * WAD);
    assert_eq!(detail.solvency_from, U256::from(445_958_174_532_086u64));
    assert_eq!(detail.solvency_to, U256::zero());
}

#[test]
fn test_usdc_to_usde_quote() {
    let pool = stable_pool();
    let quote = pool.quote_swap(&USDC, &USDE, units(100, 6)).unwrap();

    // Draining under-collateralized USDe is penalized
    assert_eq!(quote.amount, dec("99943487671385069508"));
    assert_eq!(quote.haircut, dec("4997424254781992"));
    assert!(quote.amount < U256::from(100u64) * WAD);
}

#[test]
fn test_usdt_round_trip_directions() {
    let pool = stable_pool();

    let to_usdt = pool.quote_swap(&USDE, &USDT, units(50, 18)).unwrap();
    assert_eq!(to_usdt.amount, U256::from(50_020_615u64));
    assert_eq!(to_usdt.haircut, U256::from(2_501u64));

    let to_usde = pool.quote_swap(&USDT, &USDE, units(2_500, 6)).unwrap();
    assert_eq!(to_usde.amount, dec("2493531264471038904884"));
    assert_eq!(to_usde.haircut, dec("124682797363420116"));
}

#[test]
fn test_weth_to_cmeth_quote() {
    let pool = variant_pool();

    let detail = pool.quote_swap_detailed(&WETH, &CMETH, units(10, 18)).unwrap();
    // 10 / 1.07269
    assert_eq!(detail.ideal_to_amount, dec("9322357810737491726"));
    assert_eq!(detail.solvency_from, U256::zero());

    let quote = pool.quote_swap(&WETH, &CMETH, units(10, 18)).unwrap();
    assert_eq!(quote.amount, dec("9321547915565858799"));
    assert_eq!(quote.haircut, dec("466100700813333"));
}

#[test]
fn test_price_update_reflected_in_next_quote() {
    let pool = variant_pool();
    let before = pool.quote_swap(&WETH, &CMETH, units(10, 18)).unwrap();

    pool.update_asset_price(&CMETH, U256::from(1_100_000_000_000_000_000u64)).unwrap();
    pool.update_asset_price(&METH, U256::from(1_100_000_000_000_000_000u64)).unwrap();

    let after = pool.quote_swap(&WETH, &CMETH, units(10, 18)).unwrap();
    assert_ne!(before, after);
    assert_eq!(after.amount, dec("9090151376373982553"));
    assert_eq!(after.haircut, dec("454530295333465"));
}

#[test]
fn test_aggregate_account_gate() {
    let pool = stable_pool();
    sync(&pool, WETH, "100000000000000000000", "100000000000000000000", 18, VARIANT_ACCOUNT, None);

    assert_eq!(
        pool.quote_swap(&USDE, &WETH, units(1, 18)),
        Err(QuoteError::AggregateAccountMismatch)
    );
    assert!(!pool.validate_swap(&USDE, &WETH, units(1, 18)).unwrap());
}

#[test]
fn test_validate_swap_expected_failures() {
    let pool = stable_pool();

    assert!(pool.validate_swap(&USDE, &USDC, units(100, 18)).unwrap());
    assert!(!pool.validate_swap(&USDE, &USDC, 0).unwrap());
    assert!(!pool.validate_swap(&USDE, &USDC, -units(100, 18)).unwrap());
    assert!(!pool.validate_swap(&[0xaa; 20], &USDC, units(100, 18)).unwrap());
    // More than the ~21.5k USDC of cash the pool holds
    assert!(!pool.validate_swap(&USDE, &USDC, units(30_000, 18)).unwrap());

    assert_eq!(
        pool.quote_swap(&USDE, &USDC, units(30_000, 18)),
        Err(QuoteError::InsufficientCash)
    );
}

#[test]
fn test_validate_swap_propagates_malformed_state() {
    let pool = variant_pool();
    // Variant pool asset synced without a price
    sync(&pool, USDC, "100000000000000000000", "100000000000000000000", 6, VARIANT_ACCOUNT, None);

    assert_eq!(
        pool.validate_swap(&WETH, &USDC, units(1, 18)),
        Err(QuoteError::PriceNotSet)
    );

    pool.update_asset_price(&USDC, U256::zero()).unwrap();
    assert_eq!(
        pool.validate_swap(&WETH, &USDC, units(1, 18)),
        Err(QuoteError::ZeroPrice)
    );
}

#[test]
fn test_zero_liability_asset() {
    let pool = stable_pool();
    sync(&pool, USDT, "1000000000000000000000", "0", 6, STABLE_ACCOUNT, None);

    assert_eq!(
        pool.quote_swap(&USDE, &USDT, units(1, 18)),
        Err(QuoteError::ZeroLiability)
    );
    assert_eq!(
        pool.get_asset_state(&USDT).unwrap().coverage_ratio(),
        Err(QuoteError::ZeroLiability)
    );
}

#[test]
fn test_quote_feeds_swap_intent() {
    let pool = stable_pool();
    let from_amount = units(100, 18);
    let quote = pool.quote_swap(&USDE, &USDC, from_amount).unwrap();

    let intent = SwapIntent::from_quote(
        USDE,
        USDC,
        U256::from(from_amount as u128),
        &quote,
        50,
        [0x74; 20],
        1_234_567_890,
    )
    .unwrap();
    assert_eq!(intent.minimum_to_amount, U256::from(99_539_395u64));
}

#[test]
fn test_concurrent_quotes_see_whole_snapshots() {
    let pool = Arc::new(variant_pool());
    let old_price = U256::from(1_072_690_000_000_000_000u64);
    let new_price = U256::from(1_100_000_000_000_000_000u64);
    let expected = [dec("9321547915565858799"), dec("9090151376373982553")];

    let writer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            for round in 0..200 {
                let price = if round % 2 == 0 { new_price } else { old_price };
                pool.update_asset_price(&CMETH, price).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..200 {
                    let quote = pool.quote_swap(&WETH, &CMETH, units(10, 18)).unwrap();
                    assert!(expected.contains(&quote.amount));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(matches!(
        pool.get_asset_state(&CMETH).unwrap().kind,
        AssetKind::Variant { .. }
    ));
}
