use anchor_lang::prelude::*;

declare_id!("BcNQW4FJoCeH1vBPH9VaG56mSk8LGHqWJn2rCzGmhyfR");

pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;

/**
 * Merkle Distributor Program
 *
 * Distributes a fixed, pre-committed allocation of SPL tokens or
 * non-fungible tokens to a known set of recipients. Membership is proven
 * with a merkle proof instead of storing recipients on chain.
 *
 * Key Features:
 * - Sorted-pair keccak merkle proofs
 * - Replay protection per leaf index (bitmap) or per token id (receipt PDA)
 * - Temporal policies: none, global timelock, claim window, per-leaf timestamp
 * - Factory that funds the escrow through a pre-approved allowance
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Creator Nonce PDA: nonce counter per creator
 * - Distributor PDA: root, policy and counters; signs escrow transfers and mints
 * - Token Vault PDA: escrow of a fungible distribution
 * - Claim Bitmap PDA / Token Receipt PDAs: claim registries
 *
 * Workflow:
 * 1. Creator approves the factory authority and calls create_distribution
 *    (or funds directly through create_distributor / create_nft_distributor)
 * 2. Recipients, or anyone on their behalf, claim with a valid proof
 */
#[program]
pub mod merkle_distributor {
    use super::*;

    /**
     * Factory: creates a fungible distributor and funds its escrow
     *
     * Claims are gated by [start, end) when `use_window` is set and open
     * immediately otherwise. The allocation is pulled through the
     * allowance the creator granted to the factory authority PDA.
     *
     * Access Control: Anyone with a sufficient allowance
     */
    pub fn create_distribution(
        ctx: Context<CreateDistribution>,
        params: CreateDistributionParams,
    ) -> Result<()> {
        handle_create_distribution(ctx, params)
    }

    /**
     * Creates a fungible distributor with any temporal policy
     *
     * Access Control: Creator only, funds are moved with the creator's signature
     */
    pub fn create_distributor(
        ctx: Context<CreateDistributor>,
        params: CreateDistributorParams,
    ) -> Result<()> {
        handle_create_distributor(ctx, params)
    }

    /**
     * Creates a non-fungible distributor
     *
     * Access Control: Creator only
     */
    pub fn create_nft_distributor(
        ctx: Context<CreateNftDistributor>,
        params: CreateNftDistributorParams,
    ) -> Result<()> {
        handle_create_nft_distributor(ctx, params)
    }

    /**
     * Claims fungible tokens with merkle proof verification
     *
     * Access Control: Any signer with a valid merkle proof
     */
    pub fn claim(
        ctx: Context<Claim>,
        index: u64,
        amount: u64,
        timestamp: Option<i64>,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_claim(ctx, index, amount, timestamp, proof)
    }

    /**
     * Redeems a non-fungible token with merkle proof verification
     *
     * Access Control: Any signer with a valid merkle proof
     */
    pub fn claim_nft(
        ctx: Context<ClaimNft>,
        token_id: u64,
        timestamp: Option<i64>,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_claim_nft(ctx, token_id, timestamp, proof)
    }

    /// Whether leaf `index` of a fungible distributor has been claimed
    pub fn is_claimed(ctx: Context<IsClaimed>, index: u64) -> Result<bool> {
        handle_is_claimed(ctx, index)
    }

    /// Whether `token_id` of a non-fungible distributor has been claimed
    pub fn is_token_claimed(ctx: Context<IsTokenClaimed>, token_id: u64) -> Result<bool> {
        handle_is_token_claimed(ctx, token_id)
    }
}
