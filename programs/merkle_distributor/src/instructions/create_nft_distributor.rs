use anchor_lang::prelude::*;
use crate::constants::*;
use crate::event::*;
use crate::state::*;

/// Parameters of a non-fungible distributor
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateNftDistributorParams {
    /// Identifier of the collection the minted tokens belong to
    pub collection: Pubkey,
    /// Root of the (token_id, recipient[, timestamp]) tree
    pub merkle_root: [u8; 32],
    pub policy: TemporalPolicy,
}

/**
 * Account context for creating a non-fungible distributor
 *
 * Nothing is escrowed: the distributor PDA becomes the mint authority of
 * every token it hands out, one mint per token id.
 *
 * Access Control: Creator only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(params: CreateNftDistributorParams)]
pub struct CreateNftDistributor<'info> {
    #[account(
        init_if_needed,
        payer = creator,
        space = CreatorNonce::LEN,
        seeds = [CREATOR_NONCE_SEED.as_bytes(), creator.key().as_ref()],
        bump
    )]
    pub creator_nonce: Account<'info, CreatorNonce>,

    /// The distributor account (PDA)
    /// - Derived from: ["distributor", collection, creator, creator_nonce.next_seed()]
    #[account(
        init,
        payer = creator,
        space = MerkleDistributor::LEN,
        seeds = [
            DISTRIBUTOR_SEED.as_bytes(),
            params.collection.as_ref(),
            creator.key().as_ref(),
            creator_nonce.next_seed().as_ref()
        ],
        bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_create_nft_distributor(
    ctx: Context<CreateNftDistributor>,
    params: CreateNftDistributorParams,
) -> Result<()> {
    let nonce = ctx.accounts.creator_nonce.advance()?;

    ctx.accounts.distributor.initialize(DistributorConfig {
        bump: ctx.bumps.distributor,
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::NonFungible,
        asset: params.collection,
        escrow: Pubkey::default(),
        merkle_root: params.merkle_root,
        policy: params.policy,
        total_amount: 0,
        max_claims: 0,
    })?;

    emit_cpi!(DistributionCreated {
        distributor: ctx.accounts.distributor.key(),
        nonce,
        creator: ctx.accounts.creator.key(),
        asset_kind: AssetKind::NonFungible,
        asset: params.collection,
        escrow: Pubkey::default(),
        merkle_root: params.merkle_root,
        policy: params.policy,
        total_amount: 0,
    });

    Ok(())
}
