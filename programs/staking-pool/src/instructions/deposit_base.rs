use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED, YIELD_VAULT_SEED};
use crate::error::StakingError;
use crate::lending::{self, ReserveView};
use crate::rewards;
use crate::state::{Staker, StakingPool};

/// Deposit the base asset
///
/// # Flow
/// 1. Validate the amount and resolve the current liquidity index
/// 2. Accrue the reward accumulator, settle the caller's pending reward
/// 3. Supply the base asset to the lending market; the matching yield
///    tokens land in the pool's vault
/// 4. Credit the position with the scaled equivalent
///
#[derive(Accounts)]
pub struct DepositBaseAsset<'info> {
    /// User depositing the base asset
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

    /// Base asset mint
    #[account(
        constraint = base_mint.key() == staking_pool.base_mint @ StakingError::InvalidBaseMint
    )]
    pub base_mint: Account<'info, Mint>,

    /// Yield token mint; the lending market mints to the pool vault
    #[account(
        mut,
        constraint = yield_mint.key() == staking_pool.yield_mint @ StakingError::InvalidYieldMint
    )]
    pub yield_mint: Account<'info, Mint>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's base asset token account (source of the deposit)
    #[account(
        mut,
        token::mint = base_mint,
        token::authority = user
    )]
    pub user_base_account: Account<'info, TokenAccount>,

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

    /// The lending market reserve
    /// CHECK: pinned to the address stored at initialization; owner and
    /// layout re-validated on load
    #[account(
        mut,
        constraint = reserve.key() == staking_pool.reserve @ StakingError::InvalidReserve
    )]
    pub reserve: UncheckedAccount<'info>,

    /// The reserve's liquidity vault (destination of the supplied asset)
    /// CHECK: validated against the reserve's own record in the handler
    #[account(mut)]
    pub reserve_liquidity_vault: UncheckedAccount<'info>,

    /// The lending market program
    /// CHECK: pinned to the address stored at initialization
    #[account(
        constraint = lending_program.key() == staking_pool.lending_program @ StakingError::InvalidLendingProgram
    )]
    pub lending_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit_base_asset(ctx: Context<DepositBaseAsset>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let reserve = ReserveView::load(
        &ctx.accounts.reserve,
        &ctx.accounts.staking_pool.lending_program,
    )?;
    require!(
        ctx.accounts.reserve_liquidity_vault.key() == reserve.liquidity_vault,
        StakingError::InvalidReserve
    );

    let scaled_delta = lending::to_scaled(amount, reserve.liquidity_index)?;
    // an amount too small to be worth one scaled unit is a zero deposit
    require!(scaled_delta > 0, StakingError::InvalidAmount);

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

    // Move custody into the lending market; the user signs the liquidity leg
    lending::cpi::deposit_reserve_liquidity(
        ctx.accounts.lending_program.to_account_info(),
        ctx.accounts.reserve.to_account_info(),
        ctx.accounts.reserve_liquidity_vault.to_account_info(),
        ctx.accounts.yield_mint.to_account_info(),
        ctx.accounts.user_base_account.to_account_info(),
        ctx.accounts.yield_vault.to_account_info(),
        ctx.accounts.user.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
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
    staker.record_deposit(scaled_delta, acc_reward_per_share)?;

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.total_scaled_amount = staking_pool
        .total_scaled_amount
        .checked_add(scaled_delta)
        .ok_or(StakingError::MathOverflow)?;

    if was_empty {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    msg!(
        "Deposited {} base asset as {} scaled units. User position: {}, pool total: {}",
        amount,
        scaled_delta,
        staker.scaled_amount,
        staking_pool.total_scaled_amount
    );

    Ok(())
}
