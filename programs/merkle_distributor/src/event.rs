use anchor_lang::prelude::*;
use crate::state::{AssetKind, TemporalPolicy};

/// Event emitted when a new distributor is created
#[event]
pub struct DistributionCreated {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Nonce of the distributor
    pub nonce: u32,
    /// Creator that funded the distributor
    pub creator: Pubkey,
    /// Fungible or non-fungible
    pub asset_kind: AssetKind,
    /// Token mint (fungible) or collection identifier (non-fungible)
    pub asset: Pubkey,
    /// Escrow vault address, default for non-fungible distributions
    pub escrow: Pubkey,
    /// Committed merkle root
    pub merkle_root: [u8; 32],
    /// Claim time gate
    pub policy: TemporalPolicy,
    /// Amount moved into escrow at creation
    pub total_amount: u64,
}

/// Event emitted when fungible tokens are claimed
#[event]
pub struct TokensClaimed {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Leaf index that was redeemed
    pub index: u64,
    /// Address credited with the tokens
    pub recipient: Pubkey,
    /// Amount transferred out of escrow
    pub amount: u64,
    /// Total amount claimed from the distributor by all recipients
    pub total_claimed: u64,
}

/// Event emitted when a non-fungible token is claimed
#[event]
pub struct NftClaimed {
    /// The distributor account public key
    pub distributor: Pubkey,
    /// Token id that was redeemed
    pub token_id: u64,
    /// Owner of the freshly minted token
    pub recipient: Pubkey,
    /// Mint account of the token
    pub token_mint: Pubkey,
}
