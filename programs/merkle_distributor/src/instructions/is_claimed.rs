use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine::ClaimRegistry;
use crate::state::*;

/// Read-only view over the claim bitmap of a fungible distributor
#[derive(Accounts)]
pub struct IsClaimed<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    #[account(
        seeds = [CLAIM_BITMAP_SEED.as_bytes(), distributor.key().as_ref()],
        bump
    )]
    pub claim_bitmap: Account<'info, ClaimBitmap>,
}

pub fn handle_is_claimed(ctx: Context<IsClaimed>, index: u64) -> Result<bool> {
    Ok(ctx.accounts.claim_bitmap.is_claimed(index))
}

/// Read-only view over the receipt of one non-fungible token id
#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct IsTokenClaimed<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    /// Receipt of the token id, absent until the token is claimed
    /// CHECK: Address is pinned by seeds, ownership checked before deserializing
    #[account(
        seeds = [TOKEN_RECEIPT_SEED.as_bytes(), distributor.key().as_ref(), token_id.to_le_bytes().as_ref()],
        bump
    )]
    pub token_receipt: UncheckedAccount<'info>,
}

pub fn handle_is_token_claimed(ctx: Context<IsTokenClaimed>, token_id: u64) -> Result<bool> {
    let receipt_info = &ctx.accounts.token_receipt;

    // Unclaimed token ids have no receipt account yet
    if receipt_info.data_is_empty() || receipt_info.owner != &crate::ID {
        return Ok(false);
    }

    let data = receipt_info.try_borrow_data()?;
    let receipt = TokenReceipt::try_deserialize(&mut data.as_ref())?;
    Ok(receipt.is_claimed(token_id))
}
