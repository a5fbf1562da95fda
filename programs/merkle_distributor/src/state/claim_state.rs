use anchor_lang::prelude::*;
use crate::error::*;

/**
 * Claim bitmap account
 *
 * Dense replay registry of a fungible distribution: bit `i` is set once
 * leaf index `i` has been redeemed. The bitmap is sized for `max_claims`
 * bits at creation and never grows or shrinks.
 *
 * Derivation: ["claim_bitmap", distributor_key]
 *
 * Lifecycle:
 * 1. Created with all bits clear alongside the distributor
 * 2. One bit set per successful claim
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimBitmap {
    /// Number of addressable claim indices
    pub capacity: u64,

    /// Bit per claim index (1 = claimed)
    pub bits: Vec<u8>,
}

impl ClaimBitmap {
    /// Space required for a bitmap addressing `capacity` indices
    /// - 8-byte discriminator + capacity + vec length prefix + bytes
    pub fn space(capacity: u64) -> usize {
        8 + 8 + 4 + Self::byte_len(capacity)
    }

    fn byte_len(capacity: u64) -> usize {
        capacity.div_ceil(8) as usize
    }

    /// Allocates a clear bitmap of `capacity` bits
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            bits: vec![0; Self::byte_len(capacity)],
        }
    }

    pub fn is_set(&self, index: u64) -> bool {
        if index >= self.capacity {
            return false;
        }
        self.bits
            .get((index / 8) as usize)
            .is_some_and(|byte| (byte >> (index % 8)) & 1 == 1)
    }

    pub fn set(&mut self, index: u64) -> Result<()> {
        require!(index < self.capacity, DistributorError::InvalidClaimIndex);
        let byte = self
            .bits
            .get_mut((index / 8) as usize)
            .ok_or(DistributorError::InvalidClaimIndex)?;
        *byte |= 1 << (index % 8);
        Ok(())
    }
}

/**
 * Non-fungible claim receipt
 *
 * Sparse replay registry entry: one receipt per redeemed token id.
 *
 * Derivation: ["token_receipt", distributor_key, token_id]
 */
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct TokenReceipt {
    /// Token id this receipt belongs to
    pub token_id: u64,

    /// Owner the token was minted to
    pub recipient: Pubkey,

    /// Set once the token id has been redeemed
    pub claimed: bool,
}

impl TokenReceipt {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + serialized struct size
    pub const LEN: usize = 8 + Self::INIT_SPACE;
}
