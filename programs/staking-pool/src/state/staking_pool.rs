use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", base_mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Base stable asset mint (e.g. USDC)
    pub base_mint: Pubkey,

    /// Yield-bearing asset mint issued by the lending market for the base
    /// asset; a token balance of this mint is denominated in scaled units
    pub yield_mint: Pubkey,

    /// Reward token mint
    pub reward_mint: Pubkey,

    /// External lending market program custodying the pool's funds
    pub lending_program: Pubkey,

    /// The lending market reserve for the base asset; source of the
    /// liquidity index
    pub reserve: Pubkey,

    /// Vault holding the pool's custodied yield tokens
    /// PDA: ["yield_vault", staking_pool]
    pub yield_vault: Pubkey,

    /// Pre-funded vault the rewards are paid from
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Sum of all stakers' scaled amounts
    pub total_scaled_amount: u64,

    /// Accumulated reward per scaled unit (scaled by REWARD_PRECISION).
    /// Monotonically non-decreasing.
    pub acc_reward_per_share: u128,

    /// Slot at which the accumulator was last advanced
    pub last_rewarded_slot: u64,

    /// Reward tokens emitted per elapsed slot, regardless of stake size.
    /// Immutable after initialization.
    pub reward_rate_per_slot: u64,

    /// Number of stakers with a nonzero position
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Yield vault bump seed
    pub yield_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // base_mint
        32 + // yield_mint
        32 + // reward_mint
        32 + // lending_program
        32 + // reserve
        32 + // yield_vault
        32 + // reward_vault
        8 +  // total_scaled_amount
        16 + // acc_reward_per_share (u128)
        8 +  // last_rewarded_slot
        8 +  // reward_rate_per_slot
        8 +  // staker_count
        1 +  // bump
        1 +  // yield_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    /// Accumulator value as it would stand after accruing up to
    /// `current_slot`, without mutating state. This is what the public
    /// pending-reward query evaluates against.
    ///
    /// Slots elapsed while the pool held no stake mint nothing: there is
    /// nobody to attribute that reward to, and it is forfeited rather
    /// than backfilled later.
    pub fn projected_acc_reward_per_share(&self, current_slot: u64) -> Result<u128> {
        let elapsed = current_slot
            .checked_sub(self.last_rewarded_slot)
            .ok_or(StakingError::MathUnderflow)?;

        if elapsed == 0 || self.total_scaled_amount == 0 {
            return Ok(self.acc_reward_per_share);
        }

        let minted = (self.reward_rate_per_slot as u128)
            .checked_mul(elapsed as u128)
            .ok_or(StakingError::MathOverflow)?;

        let increase = minted
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(self.total_scaled_amount as u128)
            .ok_or(StakingError::DivisionByZero)?;

        self.acc_reward_per_share
            .checked_add(increase)
            .ok_or(StakingError::MathOverflow.into())
    }

    /// Advance the accumulator to `current_slot`.
    ///
    /// Must run at the top of every deposit and withdrawal, before
    /// settlement is computed and before any position size changes.
    pub fn accrue(&mut self, current_slot: u64) -> Result<()> {
        self.acc_reward_per_share = self.projected_acc_reward_per_share(current_slot)?;
        self.last_rewarded_slot = current_slot;
        Ok(())
    }
}
