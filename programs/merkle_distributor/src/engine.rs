use anchor_lang::prelude::*;
use std::collections::BTreeSet;
use crate::error::*;
use crate::state::*;
use crate::utils::{verify, ClaimRecord};

/**
 * Claim engine
 *
 * The verification and anti-replay pipeline shared by every distributor
 * variant. It knows nothing about accounts or CPIs: the instruction
 * handlers plug in a registry backing and a value mover, and pass in the
 * clock value they read.
 */

/// Set of keys that have already been redeemed
pub trait ClaimRegistry {
    fn is_claimed(&self, key: u64) -> bool;

    /// Callers must have checked `is_claimed` first
    fn mark_claimed(&mut self, key: u64) -> Result<()>;
}

/// Moves value to a recipient once a claim has been accepted
pub trait ValueMover {
    /// Fails if `move_value` could not complete for `record`
    fn preflight(&self, record: &ClaimRecord) -> Result<()>;

    fn move_value(&mut self, record: &ClaimRecord) -> Result<()>;
}

/// Source of the initial allocation pulled in by the factory
pub trait FundingSource {
    fn pull(&mut self, amount: u64) -> Result<()>;
}

impl ClaimRegistry for ClaimBitmap {
    fn is_claimed(&self, key: u64) -> bool {
        self.is_set(key)
    }

    fn mark_claimed(&mut self, key: u64) -> Result<()> {
        self.set(key)
    }
}

// A receipt PDA is derived from its token id, so it only ever answers for that key
impl ClaimRegistry for TokenReceipt {
    fn is_claimed(&self, key: u64) -> bool {
        self.claimed && self.token_id == key
    }

    fn mark_claimed(&mut self, key: u64) -> Result<()> {
        self.token_id = key;
        self.claimed = true;
        Ok(())
    }
}

impl ClaimRegistry for BTreeSet<u64> {
    fn is_claimed(&self, key: u64) -> bool {
        self.contains(&key)
    }

    fn mark_claimed(&mut self, key: u64) -> Result<()> {
        self.insert(key);
        Ok(())
    }
}

/// A distributor wired to its registry and value mover for one call
pub struct Distribution<'a, R: ClaimRegistry, M: ValueMover> {
    state: &'a mut MerkleDistributor,
    registry: &'a mut R,
    mover: M,
}

impl<'a, R: ClaimRegistry, M: ValueMover> Distribution<'a, R, M> {
    pub fn new(state: &'a mut MerkleDistributor, registry: &'a mut R, mover: M) -> Self {
        Self { state, registry, mover }
    }

    pub fn is_claimed(&self, key: u64) -> bool {
        self.registry.is_claimed(key)
    }

    /// Redeems `record` at time `now`, returning the distributor's new total claimed
    ///
    /// Validation Process:
    /// 1. Temporal eligibility
    /// 2. Replay check
    /// 3. Leaf reconstruction and proof verification
    /// 4. Value mover preflight
    ///
    /// Only then is the key marked and the value moved, in that order.
    pub fn claim(&mut self, record: &ClaimRecord, proof: &[[u8; 32]], now: i64) -> Result<u64> {
        // ===== VALIDATION PHASE =====
        self.state.policy.check(record, now)?;

        require!(
            !self.registry.is_claimed(record.index),
            DistributorError::AlreadyClaimed
        );

        let leaf = record.leaf(self.state.asset_kind);
        require!(
            verify(proof, self.state.merkle_root, leaf),
            DistributorError::InvalidProof
        );

        self.mover.preflight(record)?;

        // ===== EFFECTS PHASE =====
        self.registry.mark_claimed(record.index)?;
        let amount = match self.state.asset_kind {
            AssetKind::Fungible => record.amount,
            AssetKind::NonFungible => 0,
        };
        let total_claimed = self.state.record_claim(amount)?;

        // ===== INTERACTIONS PHASE =====
        self.mover.move_value(record)?;

        Ok(total_claimed)
    }
}

/// Writes a new fungible distributor and pulls its allocation into escrow
///
/// The policy must already be resolved; the factory passes `None` or
/// `Window`, direct creation may pass any variant.
pub fn create_distribution<F: FundingSource>(
    state: &mut MerkleDistributor,
    funding: &mut F,
    config: DistributorConfig,
) -> Result<()> {
    require!(
        config.asset_kind == AssetKind::Fungible,
        DistributorError::AssetKindMismatch
    );
    let total_amount = config.total_amount;
    state.initialize(config)?;
    funding.pull(total_amount)
}
