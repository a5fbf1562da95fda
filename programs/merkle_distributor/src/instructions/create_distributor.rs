use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::engine::create_distribution;
use crate::event::*;
use crate::state::*;
use crate::utils::SignerPull;

/// Parameters of a directly created fungible distributor
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateDistributorParams {
    pub merkle_root: [u8; 32],
    pub total_amount: u64,
    /// Any policy, including global timelock and per-leaf timestamps
    pub policy: TemporalPolicy,
    pub max_claims: u64,
}

/**
 * Account context for creating a fungible distributor without the factory
 *
 * Same accounts as the factory minus the factory authority: the creator
 * signs the funding transfer directly, and may pick any temporal policy.
 *
 * Access Control: Creator only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(params: CreateDistributorParams)]
pub struct CreateDistributor<'info> {
    /// Nonce state account (PDA) that tracks distributors opened by the creator
    /// - Derived from: ["creator_nonce", creator]
    #[account(
        init_if_needed,
        payer = creator,
        space = CreatorNonce::LEN,
        seeds = [CREATOR_NONCE_SEED.as_bytes(), creator.key().as_ref()],
        bump
    )]
    pub creator_nonce: Account<'info, CreatorNonce>,

    /// The distributor account (PDA)
    /// - Derived from: ["distributor", token_mint, creator, creator_nonce.next_seed()]
    #[account(
        init,
        payer = creator,
        space = MerkleDistributor::LEN,
        seeds = [
            DISTRIBUTOR_SEED.as_bytes(),
            token_mint.key().as_ref(),
            creator.key().as_ref(),
            creator_nonce.next_seed().as_ref()
        ],
        bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    /// Claim bitmap (PDA)
    /// - Derived from: ["claim_bitmap", distributor_key]
    #[account(
        init,
        payer = creator,
        space = ClaimBitmap::space(params.max_claims.min(MAX_CLAIMS)),
        seeds = [CLAIM_BITMAP_SEED.as_bytes(), distributor.key().as_ref()],
        bump
    )]
    pub claim_bitmap: Account<'info, ClaimBitmap>,

    /// Escrow vault (PDA) controlled by the distributor
    /// - Derived from: ["vault", distributor_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = distributor,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), distributor.key().as_ref()],
        bump,
        payer = creator,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mint::token_program = token_program)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Creator's token account containing the allocation
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = creator,
        token::token_program = token_program,
    )]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Creates and funds a fungible distributor with an explicit policy
 *
 * @param ctx - The account context containing all required accounts
 * @param params - Root, allocation, temporal policy and tree size
 */
pub fn handle_create_distributor(
    ctx: Context<CreateDistributor>,
    params: CreateDistributorParams,
) -> Result<()> {
    let nonce = ctx.accounts.creator_nonce.advance()?;

    let mut funding = SignerPull {
        creator: ctx.accounts.creator.to_account_info(),
        source: ctx.accounts.creator_token_account.to_account_info(),
        escrow: ctx.accounts.token_vault.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        decimals: ctx.accounts.token_mint.decimals,
        balance: ctx.accounts.creator_token_account.amount,
    };

    let config = DistributorConfig {
        bump: ctx.bumps.distributor,
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::Fungible,
        asset: ctx.accounts.token_mint.key(),
        escrow: ctx.accounts.token_vault.key(),
        merkle_root: params.merkle_root,
        policy: params.policy,
        total_amount: params.total_amount,
        max_claims: params.max_claims,
    };

    create_distribution(&mut ctx.accounts.distributor, &mut funding, config)?;
    ctx.accounts
        .claim_bitmap
        .set_inner(ClaimBitmap::with_capacity(params.max_claims));

    emit_cpi!(DistributionCreated {
        distributor: ctx.accounts.distributor.key(),
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::Fungible,
        asset: ctx.accounts.token_mint.key(),
        escrow: ctx.accounts.token_vault.key(),
        merkle_root: params.merkle_root,
        policy: params.policy,
        total_amount: params.total_amount,
    });

    Ok(())
}
