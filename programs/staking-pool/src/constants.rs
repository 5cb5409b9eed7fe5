// =============================================================================
// Staking Pool Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const YIELD_VAULT_SEED: &[u8] = b"yield_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Precision for reward-per-share calculations (18 decimals)
// Using u128 to handle large numbers without overflow
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Fixed-point base of the lending market's liquidity index (27 decimals).
// An index of exactly one ray means a scaled unit is worth one underlying
// unit; the index only grows from there as interest accrues.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000; // 10^27
pub const HALF_RAY: u128 = RAY / 2;
