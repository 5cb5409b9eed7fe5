use anchor_lang::prelude::*;

use crate::error::StakingError;

// Byte layout of the lending market's reserve account, per its published
// interface: 8-byte discriminator, three account references, then the
// ray-scaled liquidity index.
const LIQUIDITY_MINT_OFFSET: usize = 8;
const COLLATERAL_MINT_OFFSET: usize = 40;
const LIQUIDITY_VAULT_OFFSET: usize = 72;
const LIQUIDITY_INDEX_OFFSET: usize = 104;
const RESERVE_DATA_LEN: usize = 120;

/// Read-only view of the fields this program needs from the lending
/// market's reserve. The reserve itself is external state; nothing here
/// is ever written back.
pub struct ReserveView {
    /// Mint of the raw asset the reserve lends out
    pub liquidity_mint: Pubkey,

    /// Mint of the yield-bearing collateral token the reserve issues
    pub collateral_mint: Pubkey,

    /// Token account holding the reserve's available liquidity
    pub liquidity_vault: Pubkey,

    /// Current liquidity index, ray-scaled. Monotonically non-decreasing,
    /// starting at one ray.
    pub liquidity_index: u128,
}

impl ReserveView {
    pub fn load(reserve: &AccountInfo, lending_program: &Pubkey) -> Result<Self> {
        require!(
            reserve.owner == lending_program,
            StakingError::InvalidReserve
        );

        let data = reserve.try_borrow_data()?;
        let bytes: &[u8] = &data;
        require!(bytes.len() >= RESERVE_DATA_LEN, StakingError::InvalidReserve);

        Ok(Self {
            liquidity_mint: read_pubkey(bytes, LIQUIDITY_MINT_OFFSET),
            collateral_mint: read_pubkey(bytes, COLLATERAL_MINT_OFFSET),
            liquidity_vault: read_pubkey(bytes, LIQUIDITY_VAULT_OFFSET),
            liquidity_index: read_u128(bytes, LIQUIDITY_INDEX_OFFSET),
        })
    }
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

fn read_u128(data: &[u8], offset: usize) -> u128 {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&data[offset..offset + 16]);
    u128::from_le_bytes(bytes)
}
