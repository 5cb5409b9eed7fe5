use staking_pool::constants::RAY;
use staking_pool::error::StakingError;
use staking_pool::lending::{to_scaled, to_underlying};

// --- identity at index one ---

#[test]
fn conversions_are_identity_at_one_ray() {
    assert_eq!(to_scaled(1_000_000, RAY).unwrap(), 1_000_000);
    assert_eq!(to_underlying(1_000_000, RAY).unwrap(), 1_000_000);
    assert_eq!(to_scaled(0, RAY).unwrap(), 0);
    assert_eq!(to_underlying(0, RAY).unwrap(), 0);
}

// --- rounding directions ---

#[test]
fn to_scaled_floors() {
    // 1_000_000 / 1.1 = 909090.909... → 909090, never 909091
    let index = 11 * RAY / 10;
    assert_eq!(to_scaled(1_000_000, index).unwrap(), 909_090);

    // below one scaled unit floors to zero
    assert_eq!(to_scaled(1, 3 * RAY / 2).unwrap(), 0);

    // the smallest index above one ray already shaves a unit
    assert_eq!(to_scaled(10, RAY + 1).unwrap(), 9);
}

#[test]
fn to_underlying_rounds_half_up() {
    // 1 * 1.5 = 1.5 → rounds up to 2
    assert_eq!(to_underlying(1, 3 * RAY / 2).unwrap(), 2);

    // 909090 * 1.1 = 999999.0, 909091 * 1.1 = 1000000.1
    let index = 11 * RAY / 10;
    assert_eq!(to_underlying(909_090, index).unwrap(), 999_999);
    assert_eq!(to_underlying(909_091, index).unwrap(), 1_000_000);
}

// --- reconciliation between the two directions ---

#[test]
fn round_trip_never_credits_extra_scaled_units() {
    // valuing a position and converting the value back must not produce
    // more scaled units than the position held
    let index = 1_071_234_567_890_123_456_789_012_345u128;
    let scaled = 9_500_000u64;

    let underlying = to_underlying(scaled, index).unwrap();
    assert_eq!(underlying, 10_176_728);
    assert!(to_scaled(underlying, index).unwrap() <= scaled);
}

#[test]
fn partial_withdrawal_amounts_are_deterministic() {
    // withdrawing 5.0 underlying at this index debits exactly this many
    // scaled units, at every call site that computes it
    let index = 1_071_234_567_890_123_456_789_012_345u128;
    assert_eq!(to_scaled(5_000_000, index).unwrap(), 4_667_511);
}

// --- index validation ---

#[test]
fn index_below_one_ray_is_rejected() {
    assert_eq!(
        to_scaled(1_000_000, RAY - 1),
        Err(StakingError::InvalidLiquidityIndex.into())
    );
    assert_eq!(
        to_underlying(1_000_000, 0),
        Err(StakingError::InvalidLiquidityIndex.into())
    );
}

// --- overflow behavior ---

#[test]
fn full_range_amounts_convert_at_one_ray() {
    assert_eq!(to_scaled(u64::MAX, RAY).unwrap(), u64::MAX);
    assert_eq!(to_underlying(u64::MAX, RAY).unwrap(), u64::MAX);
}

#[test]
fn underlying_value_beyond_u64_surfaces_overflow() {
    // a max-size position at a 100x index cannot be represented in u64
    // and must error rather than wrap or saturate
    assert_eq!(
        to_underlying(u64::MAX, 100 * RAY),
        Err(StakingError::MathOverflow.into())
    );
}
