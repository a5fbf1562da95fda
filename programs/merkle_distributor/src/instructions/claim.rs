use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::engine::Distribution;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::{ClaimRecord, DistributorSigner, EscrowTransfer};

/**
 * Account context for claiming fungible tokens
 *
 * Anyone may submit a claim on behalf of `recipient`; the tokens always
 * land in the recipient's token account, and the recipient key is part of
 * the leaf being proven.
 *
 * Access Control: Any signer with a valid merkle proof
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Claim<'info> {
    /// The distributor account containing distribution parameters
    /// - Will be modified to update the claim counters
    #[account(
        mut,
        constraint = distributor.asset_kind == AssetKind::Fungible @ DistributorError::AssetKindMismatch
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Claim bitmap of this distributor
    /// - Derived from: ["claim_bitmap", distributor_key]
    #[account(
        mut,
        seeds = [CLAIM_BITMAP_SEED.as_bytes(), distributor.key().as_ref()],
        bump
    )]
    pub claim_bitmap: Account<'info, ClaimBitmap>,

    /// Escrow vault holding the tokens to be distributed
    /// - Derived from: ["vault", distributor_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Recipient's token account to receive the tokens
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = recipient,
        token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Only the key is used, and it is bound to the proven leaf
    pub recipient: UncheckedAccount<'info>,

    /// The token mint for verification
    #[account(
        mint::token_program = token_program,
        constraint = token_mint.key() == distributor.asset @ DistributorError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Submitter of the claim
    pub payer: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Processes a fungible claim with merkle proof verification
 *
 * @param ctx - The account context containing all required accounts
 * @param index - Leaf index, the anti-replay key
 * @param amount - Amount committed for this leaf
 * @param timestamp - Leaf unlock time, per-leaf timestamp distributions only
 * @param proof - Sibling hashes from leaf to root
 */
pub fn handle_claim(
    ctx: Context<Claim>,
    index: u64,
    amount: u64,
    timestamp: Option<i64>,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let record = ClaimRecord {
        index,
        recipient: ctx.accounts.recipient.key(),
        amount,
        timestamp,
    };
    let now = Clock::get()?.unix_timestamp;

    let mover = EscrowTransfer {
        distributor: ctx.accounts.distributor.to_account_info(),
        vault: ctx.accounts.token_vault.to_account_info(),
        recipient_token_account: ctx.accounts.recipient_token_account.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        decimals: ctx.accounts.token_mint.decimals,
        vault_balance: ctx.accounts.token_vault.amount,
        signer: DistributorSigner::of(&ctx.accounts.distributor),
    };

    let total_claimed = Distribution::new(
        &mut ctx.accounts.distributor,
        &mut *ctx.accounts.claim_bitmap,
        mover,
    )
    .claim(&record, &proof, now)?;

    emit_cpi!(TokensClaimed {
        distributor: ctx.accounts.distributor.key(),
        index,
        recipient: record.recipient,
        amount,
        total_claimed,
    });

    Ok(())
}
