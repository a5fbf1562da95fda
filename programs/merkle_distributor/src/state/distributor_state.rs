use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::state::TemporalPolicy;

/// Value-movement primitive of a distribution
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum AssetKind {
    /// Claims transfer `amount` out of the escrow vault
    #[default]
    Fungible,
    /// Claims mint a single token with id `index`
    NonFungible,
}

/**
 * Main distributor state account
 *
 * One distribution campaign bound to a single asset and a single merkle
 * root. Every field except the claim counters is written once at creation.
 *
 * Derivation: ["distributor", asset, creator, nonce]
 *
 * Lifecycle:
 * 1. Created and funded by create_distribution / create_distributor / create_nft_distributor
 * 2. Updated during claims (total_claimed and num_claimed increment)
 */
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct MerkleDistributor {
    /// Bump seed for PDA derivation
    /// - Saved to avoid recomputation when the distributor signs
    pub bump: u8,

    /// Nonce number for this distributor
    /// - Allows several distributions of the same asset by one creator
    pub nonce: u32,

    /// Account that created and funded the distributor
    pub creator: Pubkey,

    /// Whether claims transfer from escrow or mint
    pub asset_kind: AssetKind,

    /// Token mint (fungible) or collection identifier (non-fungible)
    pub asset: Pubkey,

    /// Escrow vault address
    /// - Derived from: ["vault", distributor_key]
    /// - Default pubkey for non-fungible distributions
    pub escrow: Pubkey,

    /// Merkle root committing to every claim record
    pub merkle_root: [u8; 32],

    /// When leaves become claimable
    pub policy: TemporalPolicy,

    /// Amount moved into escrow at creation
    pub total_amount: u64,

    /// Total amount of tokens claimed by all recipients
    pub total_claimed: u64,

    /// Number of leaves redeemed so far
    pub num_claimed: u64,

    /// Capacity of the claim bitmap (fungible only)
    pub max_claims: u64,
}

/// Immutable configuration of a new distributor
#[derive(Clone, Debug)]
pub struct DistributorConfig {
    pub bump: u8,
    pub nonce: u32,
    pub creator: Pubkey,
    pub asset_kind: AssetKind,
    pub asset: Pubkey,
    pub escrow: Pubkey,
    pub merkle_root: [u8; 32],
    pub policy: TemporalPolicy,
    pub total_amount: u64,
    pub max_claims: u64,
}

impl MerkleDistributor {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + serialized struct size
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    /// Validates `config` and writes it into a freshly created account
    pub fn initialize(&mut self, config: DistributorConfig) -> Result<()> {
        require!(config.merkle_root != [0; 32], DistributorError::InvalidMerkleRoot);
        config.policy.validate()?;

        if config.asset_kind == AssetKind::Fungible {
            require!(config.total_amount > 0, DistributorError::InvalidAmount);
            require!(
                config.max_claims > 0 && config.max_claims <= MAX_CLAIMS,
                DistributorError::InvalidMaxClaims
            );
        }

        self.bump = config.bump;
        self.nonce = config.nonce;
        self.creator = config.creator;
        self.asset_kind = config.asset_kind;
        self.asset = config.asset;
        self.escrow = config.escrow;
        self.merkle_root = config.merkle_root;
        self.policy = config.policy;
        self.total_amount = config.total_amount;
        self.total_claimed = 0;
        self.num_claimed = 0;
        self.max_claims = config.max_claims;
        Ok(())
    }

    /// Records one successful claim of `amount`
    pub fn record_claim(&mut self, amount: u64) -> Result<u64> {
        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(DistributorError::ArithmeticOverflow)?;
        let num_claimed = self
            .num_claimed
            .checked_add(1)
            .ok_or(DistributorError::ArithmeticOverflow)?;

        self.total_claimed = total_claimed;
        self.num_claimed = num_claimed;
        Ok(total_claimed)
    }

    /// Nonce bytes used in the distributor's PDA seeds
    pub fn nonce_bytes(&self) -> [u8; 4] {
        self.nonce.to_le_bytes()
    }
}
