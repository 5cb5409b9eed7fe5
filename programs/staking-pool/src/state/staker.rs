use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Per-user staking position
/// PDA: ["staker", staking_pool, owner]
///
/// Created on first deposit and never closed; a position withdrawn to
/// zero is equivalent to no position.
#[account]
#[derive(Default)]
pub struct Staker {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position
    pub owner: Pubkey,

    /// The position in scaled units. Scaled units are the unit of record
    /// because they stay an exact measure of custodied value no matter how
    /// far the lending market's index has moved since the deposit.
    pub scaled_amount: u64,

    /// scaled_amount * acc_reward_per_share / REWARD_PRECISION as of the
    /// last settlement. Subtracted from the accumulated value on the next
    /// settlement so reward earned before the position existed is never
    /// paid out.
    pub reward_debt: u128,

    /// Total rewards paid out (lifetime)
    pub rewards_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // scaled_amount
        16 + // reward_debt (u128)
        8 +  // rewards_claimed
        1 +  // bump
        32;  // padding for future fields

    /// Reward owed to this staker at the given accumulator value.
    /// Always zero for an empty position, regardless of elapsed slots.
    pub fn pending_rewards(&self, acc_reward_per_share: u128) -> Result<u64> {
        if self.scaled_amount == 0 {
            return Ok(0);
        }

        let accumulated = (self.scaled_amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(StakingError::DivisionByZero)?;

        let pending = accumulated
            .checked_sub(self.reward_debt)
            .ok_or(StakingError::MathUnderflow)?;

        u64::try_from(pending).map_err(|_| StakingError::MathOverflow.into())
    }

    /// Grow the position by `scaled_delta` and re-snapshot the reward debt
    /// against the new size. The caller settles pending rewards first; by
    /// the time this runs the debt snapshot must reflect the new position.
    pub fn record_deposit(&mut self, scaled_delta: u64, acc_reward_per_share: u128) -> Result<()> {
        self.scaled_amount = self
            .scaled_amount
            .checked_add(scaled_delta)
            .ok_or(StakingError::MathOverflow)?;

        self.update_reward_debt(acc_reward_per_share)
    }

    /// Shrink the position by `scaled_delta` and re-snapshot the reward
    /// debt. Checked against the current position before anything mutates.
    pub fn record_withdraw(&mut self, scaled_delta: u64, acc_reward_per_share: u128) -> Result<()> {
        require!(
            self.scaled_amount >= scaled_delta,
            StakingError::InsufficientStake
        );

        self.scaled_amount = self
            .scaled_amount
            .checked_sub(scaled_delta)
            .ok_or(StakingError::MathUnderflow)?;

        self.update_reward_debt(acc_reward_per_share)
    }

    /// Record a settlement payout in the lifetime total.
    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    fn update_reward_debt(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = (self.scaled_amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(StakingError::DivisionByZero)?;
        Ok(())
    }
}
