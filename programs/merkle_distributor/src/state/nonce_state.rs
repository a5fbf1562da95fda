use anchor_lang::prelude::*;
use crate::error::*;

/**
 * Creator nonce account
 *
 * Tracks how many distributors a creator has opened so each new one gets
 * a distinct PDA without the caller choosing a nonce.
 *
 * Derivation: ["creator_nonce", creator]
 *
 * Lifecycle:
 * 1. Created on the creator's first distributor (using init_if_needed)
 * 2. Incremented with each new distributor
 */
#[account]
#[derive(Default, Debug)]
pub struct CreatorNonce {
    /// Increments with each distributor creation
    pub nonce: u32,
}

impl CreatorNonce {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<CreatorNonce>();

    /// Nonce the next distributor will be derived with
    pub fn next(&self) -> Result<u32> {
        self.nonce
            .checked_add(1)
            .ok_or_else(|| error!(DistributorError::ArithmeticOverflow))
    }

    /// Seed bytes of the distributor about to be created
    ///
    /// Wraps at `u32::MAX` so account validation never panics; `advance`
    /// then rejects the exhausted counter with `ArithmeticOverflow`.
    pub fn next_seed(&self) -> [u8; 4] {
        self.nonce.wrapping_add(1).to_le_bytes()
    }

    /// Advances the counter and returns the nonce that was assigned
    pub fn advance(&mut self) -> Result<u32> {
        let nonce = self.next()?;
        self.nonce = nonce;
        Ok(nonce)
    }
}
