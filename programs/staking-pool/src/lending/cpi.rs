// =============================================================================
// Lending Market CPI
// =============================================================================
// Manual CPI into the external lending market. The market is integrated
// without an SDK dependency: instructions are built by hand from the
// discriminators in its published IDL, with instruction data of
// discriminator (8 bytes) followed by the little-endian u64 amount.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{invoke, invoke_signed};

// Instruction discriminators from the lending market IDL
pub const DEPOSIT_RESERVE_LIQUIDITY_DISCRIMINATOR: [u8; 8] = [169, 201, 30, 126, 6, 205, 102, 68];
pub const REDEEM_RESERVE_COLLATERAL_DISCRIMINATOR: [u8; 8] = [234, 117, 181, 125, 185, 142, 220, 29];

/// Supply `amount` of the base asset to the reserve. The reserve pulls the
/// liquidity from `source_liquidity` (authorized by `transfer_authority`,
/// a signer of the outer transaction) and mints the matching collateral
/// tokens to `destination_collateral`.
#[allow(clippy::too_many_arguments)]
pub fn deposit_reserve_liquidity<'info>(
    lending_program: AccountInfo<'info>,
    reserve: AccountInfo<'info>,
    reserve_liquidity_vault: AccountInfo<'info>,
    collateral_mint: AccountInfo<'info>,
    source_liquidity: AccountInfo<'info>,
    destination_collateral: AccountInfo<'info>,
    transfer_authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let ix = Instruction {
        program_id: lending_program.key(),
        accounts: vec![
            AccountMeta::new(reserve.key(), false),
            AccountMeta::new(reserve_liquidity_vault.key(), false),
            AccountMeta::new(collateral_mint.key(), false),
            AccountMeta::new(source_liquidity.key(), false),
            AccountMeta::new(destination_collateral.key(), false),
            AccountMeta::new_readonly(transfer_authority.key(), true),
            AccountMeta::new_readonly(token_program.key(), false),
        ],
        data: instruction_data(DEPOSIT_RESERVE_LIQUIDITY_DISCRIMINATOR, amount),
    };

    invoke(
        &ix,
        &[
            reserve,
            reserve_liquidity_vault,
            collateral_mint,
            source_liquidity,
            destination_collateral,
            transfer_authority,
            token_program,
            lending_program,
        ],
    )?;

    Ok(())
}

/// Redeem collateral from the reserve: burns the collateral tokens held in
/// `source_collateral` (owned by a PDA, signed via `signer_seeds`) and pays
/// `amount` of the base asset straight to `destination_liquidity`.
#[allow(clippy::too_many_arguments)]
pub fn redeem_reserve_collateral<'info>(
    lending_program: AccountInfo<'info>,
    reserve: AccountInfo<'info>,
    reserve_liquidity_vault: AccountInfo<'info>,
    collateral_mint: AccountInfo<'info>,
    source_collateral: AccountInfo<'info>,
    destination_liquidity: AccountInfo<'info>,
    transfer_authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    let ix = Instruction {
        program_id: lending_program.key(),
        accounts: vec![
            AccountMeta::new(reserve.key(), false),
            AccountMeta::new(reserve_liquidity_vault.key(), false),
            AccountMeta::new(collateral_mint.key(), false),
            AccountMeta::new(source_collateral.key(), false),
            AccountMeta::new(destination_liquidity.key(), false),
            AccountMeta::new_readonly(transfer_authority.key(), true),
            AccountMeta::new_readonly(token_program.key(), false),
        ],
        data: instruction_data(REDEEM_RESERVE_COLLATERAL_DISCRIMINATOR, amount),
    };

    invoke_signed(
        &ix,
        &[
            reserve,
            reserve_liquidity_vault,
            collateral_mint,
            source_collateral,
            destination_liquidity,
            transfer_authority,
            token_program,
            lending_program,
        ],
        signer_seeds,
    )?;

    Ok(())
}

fn instruction_data(discriminator: [u8; 8], amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}
