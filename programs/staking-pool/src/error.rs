use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Amount Errors
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Amount exceeds the staker's staked position")]
    InsufficientStake,

    #[msg("Insufficient balance in reward vault")]
    InsufficientRewardBalance,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors
    #[msg("Invalid base asset mint")]
    InvalidBaseMint,

    #[msg("Invalid yield asset mint")]
    InvalidYieldMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid lending market program")]
    InvalidLendingProgram,

    #[msg("Invalid reserve account")]
    InvalidReserve,

    #[msg("Liquidity index below one ray")]
    InvalidLiquidityIndex,

    #[msg("Invalid authority")]
    InvalidAuthority,
}
