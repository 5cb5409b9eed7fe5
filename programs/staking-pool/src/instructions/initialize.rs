use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED, YIELD_VAULT_SEED};
use crate::error::StakingError;
use crate::lending::ReserveView;
use crate::state::StakingPool;

/// Create the staking pool for one base asset
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `reward_rate_per_slot` - Reward tokens emitted per elapsed slot;
///   immutable for the pool's lifetime
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the pool and vault accounts
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = payer,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, base_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Base stable asset mint
    pub base_mint: Account<'info, Mint>,

    /// Yield-bearing collateral mint the lending market issues for the
    /// base asset
    pub yield_mint: Account<'info, Mint>,

    /// Reward token mint
    pub reward_mint: Account<'info, Mint>,

    /// Vault holding the pool's custodied yield tokens
    #[account(
        init,
        payer = payer,
        seeds = [YIELD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = yield_mint,
        token::authority = staking_pool
    )]
    pub yield_vault: Account<'info, TokenAccount>,

    /// Vault the rewards are paid from; funded out of band
    #[account(
        init,
        payer = payer,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// The lending market reserve for the base asset
    /// CHECK: owner and layout are validated against the lending program
    /// in the handler
    pub reserve: UncheckedAccount<'info>,

    /// The lending market program
    /// CHECK: must be executable; its address is stored and every later
    /// CPI is pinned to it
    #[account(executable)]
    pub lending_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>, reward_rate_per_slot: u64) -> Result<()> {
    let reserve = ReserveView::load(&ctx.accounts.reserve, ctx.accounts.lending_program.key)?;

    // The configured reserve must actually be the market for this pair
    require!(
        reserve.liquidity_mint == ctx.accounts.base_mint.key(),
        StakingError::InvalidBaseMint
    );
    require!(
        reserve.collateral_mint == ctx.accounts.yield_mint.key(),
        StakingError::InvalidYieldMint
    );

    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.base_mint = ctx.accounts.base_mint.key();
    staking_pool.yield_mint = ctx.accounts.yield_mint.key();
    staking_pool.reward_mint = ctx.accounts.reward_mint.key();
    staking_pool.lending_program = ctx.accounts.lending_program.key();
    staking_pool.reserve = ctx.accounts.reserve.key();
    staking_pool.yield_vault = ctx.accounts.yield_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    staking_pool.total_scaled_amount = 0;
    staking_pool.acc_reward_per_share = 0;
    staking_pool.last_rewarded_slot = Clock::get()?.slot;
    staking_pool.reward_rate_per_slot = reward_rate_per_slot;
    staking_pool.staker_count = 0;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.yield_vault_bump = ctx.bumps.yield_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: base_mint={}, yield_mint={}, reward_rate_per_slot={}",
        staking_pool.base_mint,
        staking_pool.yield_mint,
        staking_pool.reward_rate_per_slot
    );

    Ok(())
}
