use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod lending;
pub mod rewards;
pub mod state;

use instructions::*;

declare_id!("2sMTxqFQMHJ1xzTefW9mgUgqfHFcgUV3aHSxydZpo8fG");

#[program]
pub mod staking_pool {
    use super::*;

    /// Initialize the staking pool for one base asset
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `reward_rate_per_slot` - Reward tokens emitted per elapsed slot;
    ///   immutable for the pool's lifetime
    ///
    /// # Accounts
    /// * `payer` - Pays for the created accounts (signer)
    /// * `staking_pool` - Staking pool PDA to create
    /// * `base_mint` / `yield_mint` / `reward_mint` - Configured assets
    /// * `yield_vault` - Vault holding custodied yield tokens
    /// * `reward_vault` - Pre-funded vault the rewards are paid from
    /// * `reserve` / `lending_program` - External lending market handles
    ///
    pub fn initialize(ctx: Context<Initialize>, reward_rate_per_slot: u64) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, reward_rate_per_slot)
    }

    /// Deposit the base stable asset
    ///
    /// The asset is supplied to the lending market and the caller's
    /// position is credited with its scaled equivalent at the current
    /// liquidity index. Settles the caller's pending reward first.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of base asset to deposit
    ///
    pub fn deposit_base_asset(ctx: Context<DepositBaseAsset>, amount: u64) -> Result<()> {
        instructions::deposit_base::handler_deposit_base_asset(ctx, amount)
    }

    /// Deposit the yield-bearing asset directly
    ///
    /// The caller's balance is already in scaled units; the position is
    /// credited one-for-one. Settles the caller's pending reward first.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `scaled_amount` - Amount of yield tokens (scaled units) to deposit
    ///
    pub fn deposit_yield_asset(ctx: Context<DepositYieldAsset>, scaled_amount: u64) -> Result<()> {
        instructions::deposit_yield::handler_deposit_yield_asset(ctx, scaled_amount)
    }

    /// Withdraw as the base stable asset
    ///
    /// Redeems from the lending market and pays exactly `amount` of the
    /// base asset to the caller, debiting the scaled equivalent from
    /// their position. Settles the caller's pending reward first.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of base asset to withdraw
    ///
    pub fn withdraw_base_asset(ctx: Context<WithdrawBaseAsset>, amount: u64) -> Result<()> {
        instructions::withdraw_base::handler_withdraw_base_asset(ctx, amount)
    }

    /// Withdraw as the yield-bearing asset
    ///
    /// Transfers yield tokens out of pool custody one-for-one against the
    /// caller's scaled position. Settles the caller's pending reward
    /// first.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `scaled_amount` - Amount of yield tokens (scaled units) to withdraw
    ///
    pub fn withdraw_yield_asset(ctx: Context<WithdrawYieldAsset>, scaled_amount: u64) -> Result<()> {
        instructions::withdraw_yield::handler_withdraw_yield_asset(ctx, scaled_amount)
    }
}
