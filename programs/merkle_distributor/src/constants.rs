use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * PDA seeds and capacity limits shared by the distributor instructions
 * and the claim engine.
 */

#[constant]
/// ===== CAPACITY CONSTANTS =====

/// Maximum number of leaves a fungible distribution can track
/// - Bounds the claim bitmap so it fits in a single account created by CPI
/// - 10,000 bytes of bitmap * 8 bits = 80,000 claim indices
pub const MAX_CLAIMS: u64 = 10_000 * 8;

/// ===== PDA SEED CONSTANTS =====

/// Seed for creator nonce PDA derivation
/// - Used in: ["creator_nonce", creator]
/// - Gives every distributor of a creator a distinct address
pub const CREATOR_NONCE_SEED: &str = "creator_nonce";

/// Seed for distributor PDA derivation
/// - Used in: ["distributor", asset, creator, nonce]
/// - The distributor PDA signs escrow transfers and NFT mints
pub const DISTRIBUTOR_SEED: &str = "distributor";

/// Seed for the escrow vault PDA derivation
/// - Used in: ["vault", distributor_key]
/// - Token account owned by the distributor PDA
pub const VAULT_SEED: &str = "vault";

/// Seed for the claim bitmap PDA derivation
/// - Used in: ["claim_bitmap", distributor_key]
/// - One bit per leaf index of a fungible distribution
pub const CLAIM_BITMAP_SEED: &str = "claim_bitmap";

/// Seed for non-fungible claim receipts
/// - Used in: ["token_receipt", distributor_key, token_id]
/// - Exists once a token id has been redeemed
pub const TOKEN_RECEIPT_SEED: &str = "token_receipt";

/// Seed for the per-token mint of a non-fungible distribution
/// - Used in: ["token_mint", distributor_key, token_id]
/// - Mint authority is the distributor PDA, supply is capped at one by the claim flow
pub const TOKEN_MINT_SEED: &str = "token_mint";

/// Seed for the factory authority PDA
/// - Used in: ["factory_authority"]
/// - Creators approve this PDA as delegate before calling create_distribution
pub const FACTORY_AUTHORITY_SEED: &str = "factory_authority";
