use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED, YIELD_VAULT_SEED};
use crate::error::StakingError;
use crate::rewards;
use crate::state::{Staker, StakingPool};

/// Deposit the yield-bearing asset directly
///
/// The caller's token balance is already denominated in scaled units, so
/// no index conversion happens: the tokens move into the pool vault and
/// the position is credited one-for-one.
///
#[derive(Accounts)]
pub struct DepositYieldAsset<'info> {
    /// User depositing yield tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.base_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's staker account (created on first deposit)
    #[account(
        init_if_needed,
        payer = user,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
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

    /// User's yield token account (source of the deposit)
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit_yield_asset(
    ctx: Context<DepositYieldAsset>,
    scaled_amount: u64,
) -> Result<()> {
    require!(scaled_amount > 0, StakingError::InvalidAmount);

    // Accrual precedes settlement and any position change
    let current_slot = Clock::get()?.slot;
    ctx.accounts.staking_pool.accrue(current_slot)?;
    let acc_reward_per_share = ctx.accounts.staking_pool.acc_reward_per_share;

    // Settle against the pre-deposit position
    let pending = ctx.accounts.staker.pending_rewards(acc_reward_per_share)?;
    rewards::payout(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_account,
        &ctx.accounts.staking_pool,
        pending,
    )?;

    // Pull the yield tokens into pool custody
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_yield_account.to_account_info(),
                to: ctx.accounts.yield_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        scaled_amount,
    )?;

    // Credit the ledger
    let pool_key = ctx.accounts.staking_pool.key();
    let staker = &mut ctx.accounts.staker;

    if staker.owner == Pubkey::default() {
        staker.pool = pool_key;
        staker.owner = ctx.accounts.user.key();
        staker.bump = ctx.bumps.staker;
    }

    let was_empty = staker.scaled_amount == 0;
    staker.record_payout(pending)?;
    staker.record_deposit(scaled_amount, acc_reward_per_share)?;

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.total_scaled_amount = staking_pool
        .total_scaled_amount
        .checked_add(scaled_amount)
        .ok_or(StakingError::MathOverflow)?;

    if was_empty {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    msg!(
        "Deposited {} scaled units of yield asset. User position: {}, pool total: {}",
        scaled_amount,
        staker.scaled_amount,
        staking_pool.total_scaled_amount
    );

    Ok(())
}
