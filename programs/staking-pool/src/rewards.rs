use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::state::StakingPool;

/// Deliver a settled reward amount to `recipient` out of the pool's
/// pre-funded reward vault, the pool PDA signing the transfer.
///
/// A zero amount is a no-op; a zero-value transfer is never issued. A
/// rejected transfer propagates and aborts the enclosing instruction, so
/// a position can never change without its settlement landing.
pub fn payout<'info>(
    token_program: &Program<'info, Token>,
    reward_vault: &Account<'info, TokenAccount>,
    recipient: &Account<'info, TokenAccount>,
    staking_pool: &Account<'info, StakingPool>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    require!(
        reward_vault.amount >= amount,
        StakingError::InsufficientRewardBalance
    );

    let base_mint = staking_pool.base_mint;
    let seeds = &[STAKING_POOL_SEED, base_mint.as_ref(), &[staking_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: reward_vault.to_account_info(),
                to: recipient.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}
