use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::engine::Distribution;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{ClaimRecord, DistributorSigner, NftMint};

/**
 * Account context for redeeming a non-fungible token
 *
 * The token's mint and the recipient's associated token account are
 * created on first use; the receipt PDA is the replay registry entry for
 * this token id.
 *
 * Access Control: Any signer with a valid merkle proof
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(token_id: u64)]
pub struct ClaimNft<'info> {
    #[account(
        mut,
        constraint = distributor.asset_kind == AssetKind::NonFungible @ DistributorError::AssetKindMismatch
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Receipt of this token id
    /// - Derived from: ["token_receipt", distributor_key, token_id]
    #[account(
        init_if_needed,
        payer = payer,
        space = TokenReceipt::LEN,
        seeds = [TOKEN_RECEIPT_SEED.as_bytes(), distributor.key().as_ref(), token_id.to_le_bytes().as_ref()],
        bump
    )]
    pub token_receipt: Account<'info, TokenReceipt>,

    /// Mint of this token id, authority is the distributor PDA
    /// - Derived from: ["token_mint", distributor_key, token_id]
    #[account(
        init_if_needed,
        payer = payer,
        mint::decimals = 0,
        mint::authority = distributor,
        mint::freeze_authority = distributor,
        mint::token_program = token_program,
        seeds = [TOKEN_MINT_SEED.as_bytes(), distributor.key().as_ref(), token_id.to_le_bytes().as_ref()],
        bump
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = token_mint,
        associated_token::authority = recipient,
        associated_token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only the key is used, and it is bound to the proven leaf
    pub recipient: UncheckedAccount<'info>,

    /// Submitter of the claim, pays for the created accounts
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,
}

/**
 * Processes a non-fungible claim with merkle proof verification
 *
 * @param ctx - The account context containing all required accounts
 * @param token_id - Token id, the anti-replay key
 * @param timestamp - Leaf unlock time, per-leaf timestamp distributions only
 * @param proof - Sibling hashes from leaf to root
 */
pub fn handle_claim_nft(
    ctx: Context<ClaimNft>,
    token_id: u64,
    timestamp: Option<i64>,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let mut record = ClaimRecord::non_fungible(token_id, ctx.accounts.recipient.key());
    record.timestamp = timestamp;
    let now = Clock::get()?.unix_timestamp;

    let mover = NftMint {
        distributor: ctx.accounts.distributor.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        recipient_token_account: ctx.accounts.recipient_token_account.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        supply: ctx.accounts.token_mint.supply,
        signer: DistributorSigner::of(&ctx.accounts.distributor),
    };

    Distribution::new(
        &mut ctx.accounts.distributor,
        &mut *ctx.accounts.token_receipt,
        mover,
    )
    .claim(&record, &proof, now)?;
    ctx.accounts.token_receipt.recipient = record.recipient;

    emit_cpi!(NftClaimed {
        distributor: ctx.accounts.distributor.key(),
        token_id,
        recipient: record.recipient,
        token_mint: ctx.accounts.token_mint.key(),
    });

    msg!("Token {} minted to {}", token_id, record.recipient);

    Ok(())
}
