use anchor_lang::prelude::*;

use crate::constants::{HALF_RAY, RAY};
use crate::error::StakingError;

mod u256 {
    uint::construct_uint! {
        /// 256-bit unsigned integer for ray-precision intermediates.
        pub struct U256(4);
    }
}
use u256::U256;

/// Convert a raw base-asset amount into scaled units at the given
/// liquidity index, flooring.
///
/// The floor matches the lending market's mint-side rounding: the pool is
/// credited no more scaled units than the market itself creates for the
/// same deposit.
pub fn to_scaled(amount: u64, liquidity_index: u128) -> Result<u64> {
    require!(liquidity_index >= RAY, StakingError::InvalidLiquidityIndex);

    let scaled = U256::from(amount)
        .checked_mul(U256::from(RAY))
        .ok_or(StakingError::MathOverflow)?
        .checked_div(U256::from(liquidity_index))
        .ok_or(StakingError::DivisionByZero)?;

    // index >= RAY, so the quotient never exceeds the input amount
    require!(scaled <= U256::from(u64::MAX), StakingError::MathOverflow);
    Ok(scaled.as_u64())
}

/// Convert scaled units back into a raw base-asset amount at the given
/// liquidity index, rounding half-up.
///
/// Must stay bit-compatible with the lending market's own balance
/// function (scaled * index + half ray, divided by a ray); any deviation
/// drifts this ledger away from the market's actual custody.
pub fn to_underlying(scaled_amount: u64, liquidity_index: u128) -> Result<u64> {
    require!(liquidity_index >= RAY, StakingError::InvalidLiquidityIndex);

    let underlying = U256::from(scaled_amount)
        .checked_mul(U256::from(liquidity_index))
        .ok_or(StakingError::MathOverflow)?
        .checked_add(U256::from(HALF_RAY))
        .ok_or(StakingError::MathOverflow)?
        .checked_div(U256::from(RAY))
        .ok_or(StakingError::DivisionByZero)?;

    require!(underlying <= U256::from(u64::MAX), StakingError::MathOverflow);
    Ok(underlying.as_u64())
}
