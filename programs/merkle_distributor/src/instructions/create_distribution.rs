use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::engine::create_distribution;
use crate::event::*;
use crate::state::*;
use crate::utils::DelegatedPull;

/// Parameters of the factory entry point
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateDistributionParams {
    /// Root of the (index, recipient, amount) tree
    pub merkle_root: [u8; 32],
    /// Allocation pulled into escrow
    pub total_amount: u64,
    /// Gate claims to [start, end) when set, otherwise claims open immediately
    pub use_window: bool,
    pub start: i64,
    pub end: i64,
    /// Number of leaves in the tree, sizes the claim bitmap
    pub max_claims: u64,
}

/**
 * Account context for the distribution factory
 *
 * Creates a fungible distributor and funds its escrow in one instruction:
 * - Creates or updates the creator nonce PDA
 * - Creates the distributor PDA with the next nonce
 * - Creates the claim bitmap and escrow vault PDAs
 * - Pulls `total_amount` from the creator's token account through the
 *   allowance the creator granted to the factory authority PDA
 *
 * Access Control: anyone, funding requires a prior `approve` to the factory authority
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(params: CreateDistributionParams)]
pub struct CreateDistribution<'info> {
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

    /// Claim bitmap (PDA), one bit per leaf index
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

    /// The token mint being distributed
    #[account(mint::token_program = token_program)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Creator's token account holding the allocation
    /// - Must have approved the factory authority for at least `total_amount`
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = creator,
        token::token_program = token_program,
    )]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Factory authority PDA, the delegate the allocation is pulled with
    /// CHECK: Address is pinned by seeds; the account only signs
    #[account(seeds = [FACTORY_AUTHORITY_SEED.as_bytes()], bump)]
    pub factory_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Creates and funds a fungible distributor
 *
 * @param ctx - The account context containing all required accounts
 * @param params - Root, allocation, optional claim window and tree size
 */
pub fn handle_create_distribution(
    ctx: Context<CreateDistribution>,
    params: CreateDistributionParams,
) -> Result<()> {
    let policy = TemporalPolicy::from_window(params.use_window, params.start, params.end);
    let nonce = ctx.accounts.creator_nonce.advance()?;

    // Only an allowance granted to the factory authority counts
    let creator_token_account = &ctx.accounts.creator_token_account;
    let delegate: Option<Pubkey> = creator_token_account.delegate.into();
    let allowance = match delegate {
        Some(delegate) if delegate == ctx.accounts.factory_authority.key() => {
            creator_token_account.delegated_amount
        }
        _ => 0,
    };

    let mut funding = DelegatedPull {
        factory_authority: ctx.accounts.factory_authority.to_account_info(),
        source: creator_token_account.to_account_info(),
        escrow: ctx.accounts.token_vault.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        decimals: ctx.accounts.token_mint.decimals,
        allowance,
        balance: creator_token_account.amount,
        factory_bump: ctx.bumps.factory_authority,
    };

    let config = DistributorConfig {
        bump: ctx.bumps.distributor,
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::Fungible,
        asset: ctx.accounts.token_mint.key(),
        escrow: ctx.accounts.token_vault.key(),
        merkle_root: params.merkle_root,
        policy,
        total_amount: params.total_amount,
        max_claims: params.max_claims,
    };

    create_distribution(&mut ctx.accounts.distributor, &mut funding, config)?;
    ctx.accounts
        .claim_bitmap
        .set_inner(ClaimBitmap::with_capacity(params.max_claims));

    // The emitted address is how callers learn the new distributor
    emit_cpi!(DistributionCreated {
        distributor: ctx.accounts.distributor.key(),
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::Fungible,
        asset: ctx.accounts.token_mint.key(),
        escrow: ctx.accounts.token_vault.key(),
        merkle_root: params.merkle_root,
        policy,
        total_amount: params.total_amount,
    });

    msg!(
        "Distribution created: {} funded with {}",
        ctx.accounts.distributor.key(),
        params.total_amount
    );

    Ok(())
}
