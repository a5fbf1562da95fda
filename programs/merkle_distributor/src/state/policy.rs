use anchor_lang::prelude::*;
use crate::error::*;
use crate::utils::ClaimRecord;

/**
 * Temporal policy
 *
 * Decides *when* a leaf may be redeemed. The policy is fixed at creation
 * and evaluated against the clock value the instruction read, so the
 * predicate itself never touches sysvars.
 *
 * Variants:
 * - None: always eligible
 * - GlobalTimelock: eligible once `now >= unlock_at`
 * - Window: eligible while `start <= now < end`
 * - PerLeafTimestamp: eligible once `now >= record.timestamp`, the timestamp
 *   being part of the committed leaf
 */
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum TemporalPolicy {
    #[default]
    None,
    GlobalTimelock { unlock_at: i64 },
    Window { start: i64, end: i64 },
    PerLeafTimestamp,
}

impl TemporalPolicy {
    /// Policy produced by the factory for its `use_window` switch
    pub fn from_window(use_window: bool, start: i64, end: i64) -> Self {
        if use_window {
            TemporalPolicy::Window { start, end }
        } else {
            TemporalPolicy::None
        }
    }

    /// Rejects configurations that could never admit a claim
    pub fn validate(&self) -> Result<()> {
        if let TemporalPolicy::Window { start, end } = *self {
            require!(end > start, DistributorError::InvalidWindow);
        }
        Ok(())
    }

    /// Whether leaves of this distribution commit to a timestamp
    pub fn uses_leaf_timestamp(&self) -> bool {
        matches!(self, TemporalPolicy::PerLeafTimestamp)
    }

    /// Checks that `record` may be claimed at `now`
    pub fn check(&self, record: &ClaimRecord, now: i64) -> Result<()> {
        // Only per-leaf distributions commit a timestamp into their leaves
        if !self.uses_leaf_timestamp() && record.timestamp.is_some() {
            return err!(DistributorError::InvalidTimestamp);
        }

        match *self {
            TemporalPolicy::None => Ok(()),
            TemporalPolicy::GlobalTimelock { unlock_at } => {
                require!(now >= unlock_at, DistributorError::NotYetEligible);
                Ok(())
            }
            TemporalPolicy::Window { start, end } => {
                require!(now >= start, DistributorError::WindowNotStarted);
                require!(now < end, DistributorError::WindowEnded);
                Ok(())
            }
            TemporalPolicy::PerLeafTimestamp => {
                let unlock_at = record
                    .timestamp
                    .ok_or(DistributorError::InvalidTimestamp)?;
                require!(now >= unlock_at, DistributorError::NotYetEligible);
                Ok(())
            }
        }
    }
}
