use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED, YIELD_VAULT_SEED};
use crate::error::StakingError;
use crate::rewards;
use crate::state::{Staker, StakingPool};

/// Withdraw as the yield-bearing asset
///
/// The requested amount is already in scaled units, so no index
/// conversion happens: the position is debited one-for-one and the
/// tokens leave the pool vault.
///
#[derive(Accounts)]
pub struct WithdrawYieldAsset<'info> {
    /// User withdrawing yield tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.base_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's staker account
    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub staker: Account<'info, Staker>,

    /// Yield token mint
    #[account(
        constraint = yield_mint.key() == staking_pool.yield_mint @ StakingError::InvalidYieldMint
    )]
    pub yield_mint: Account<'info, Mint>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's yield token account (withdrawal destination)
    #[account(
        mut,
        token::mint = yield_mint,
        token::authority = user
    )]
    pub user_yield_account: Account<'info, TokenAccount>,

    /// User's reward token account (settlement destination)
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's yield token vault
    #[account(
        mut,
        seeds = [YIELD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.yield_vault_bump
    )]
    pub yield_vault: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw_yield_asset(
    ctx: Context<WithdrawYieldAsset>,
    scaled_amount: u64,
) -> Result<()> {
    require!(scaled_amount > 0, StakingError::InvalidAmount);

    // The limit lives in the scaled domain; no conversion involved
    require!(
        scaled_amount <= ctx.accounts.staker.scaled_amount,
        StakingError::InsufficientStake
    );

    // Accrual precedes settlement and any position change
    let current_slot = Clock::get()?.slot;
    ctx.accounts.staking_pool.accrue(current_slot)?;
    let acc_reward_per_share = ctx.accounts.staking_pool.acc_reward_per_share;

    // Settle against the pre-withdrawal position
    let pending = ctx.accounts.staker.pending_rewards(acc_reward_per_share)?;
    rewards::payout(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_account,
        &ctx.accounts.staking_pool,
        pending,
    )?;

    // Debit the ledger before custody leaves the pool
    let staker = &mut ctx.accounts.staker;
    staker.record_payout(pending)?;
    staker.record_withdraw(scaled_amount, acc_reward_per_share)?;
    let emptied = staker.scaled_amount == 0;
    let user_position = staker.scaled_amount;

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.total_scaled_amount = staking_pool
        .total_scaled_amount
        .checked_sub(scaled_amount)
        .ok_or(StakingError::MathUnderflow)?;

    if emptied {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_sub(1)
            .ok_or(StakingError::MathUnderflow)?;
    }
    let pool_total = staking_pool.total_scaled_amount;

    // Pay the yield tokens out of pool custody; the pool PDA signs
    let base_mint_key = ctx.accounts.staking_pool.base_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        base_mint_key.as_ref(),
        &[ctx.accounts.staking_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.yield_vault.to_account_info(),
                to: ctx.accounts.user_yield_account.to_account_info(),
                authority: ctx.accounts.staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        scaled_amount,
    )?;

    msg!(
        "Withdrew {} scaled units of yield asset. User position: {}, pool total: {}",
        scaled_amount,
        user_position,
        pool_total
    );

    Ok(())
}
