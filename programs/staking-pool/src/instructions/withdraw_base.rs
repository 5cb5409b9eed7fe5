use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED, YIELD_VAULT_SEED};
use crate::error::StakingError;
use crate::lending::{self, ReserveView};
use crate::rewards;
use crate::state::{Staker, StakingPool};

/// Withdraw as the base asset
///
/// # Flow
/// 1. Validate the amount against the position's current underlying value
/// 2. Accrue the reward accumulator, settle the caller's pending reward
/// 3. Debit the position by the scaled equivalent
/// 4. Redeem from the lending market, paying the base asset straight to
///    the caller
///
#[derive(Accounts)]
pub struct WithdrawBaseAsset<'info> {
    /// User withdrawing the base asset
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

    /// Base asset mint
    #[account(
        constraint = base_mint.key() == staking_pool.base_mint @ StakingError::InvalidBaseMint
    )]
    pub base_mint: Account<'info, Mint>,

    /// Yield token mint; the lending market burns from the pool vault
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

    /// User's base asset token account (withdrawal destination)
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

    /// The reserve's liquidity vault (source of the paid-out asset)
    /// CHECK: validated against the reserve's own record in the handler
    #[account(mut)]
    pub reserve_liquidity_vault: UncheckedAccount<'info>,

    /// The lending market program
    /// CHECK: pinned to the address stored at initialization
    #[account(
        constraint = lending_program.key() == staking_pool.lending_program @ StakingError::InvalidLendingProgram
    )]
    pub lending_program: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw_base_asset(ctx: Context<WithdrawBaseAsset>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let reserve = ReserveView::load(
        &ctx.accounts.reserve,
        &ctx.accounts.staking_pool.lending_program,
    )?;
    require!(
        ctx.accounts.reserve_liquidity_vault.key() == reserve.liquidity_vault,
        StakingError::InvalidReserve
    );

    // The limit lives in the underlying domain: the position's value at
    // the current index, using the market's own rounding
    let staked_underlying =
        lending::to_underlying(ctx.accounts.staker.scaled_amount, reserve.liquidity_index)?;
    require!(amount <= staked_underlying, StakingError::InsufficientStake);

    let scaled_delta = lending::to_scaled(amount, reserve.liquidity_index)?;
    require!(scaled_delta > 0, StakingError::InvalidAmount);

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
    staker.record_withdraw(scaled_delta, acc_reward_per_share)?;
    let emptied = staker.scaled_amount == 0;
    let user_position = staker.scaled_amount;

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.total_scaled_amount = staking_pool
        .total_scaled_amount
        .checked_sub(scaled_delta)
        .ok_or(StakingError::MathUnderflow)?;

    if emptied {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_sub(1)
            .ok_or(StakingError::MathUnderflow)?;
    }
    let pool_total = staking_pool.total_scaled_amount;

    // Redeem out of the lending market; the pool PDA signs the collateral
    // leg and the caller is paid directly
    let base_mint_key = ctx.accounts.staking_pool.base_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        base_mint_key.as_ref(),
        &[ctx.accounts.staking_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    lending::cpi::redeem_reserve_collateral(
        ctx.accounts.lending_program.to_account_info(),
        ctx.accounts.reserve.to_account_info(),
        ctx.accounts.reserve_liquidity_vault.to_account_info(),
        ctx.accounts.yield_mint.to_account_info(),
        ctx.accounts.yield_vault.to_account_info(),
        ctx.accounts.user_base_account.to_account_info(),
        ctx.accounts.staking_pool.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        signer_seeds,
        amount,
    )?;

    msg!(
        "Withdrew {} base asset ({} scaled units). User position: {}, pool total: {}",
        amount,
        scaled_delta,
        user_position,
        pool_total
    );

    Ok(())
}
