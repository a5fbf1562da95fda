use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak::hashv;
use crate::state::AssetKind;

/**
 * Claim record
 *
 * One entry of a committed distribution. `index` is the anti-replay key:
 * the leaf index of a fungible drop, the token id of a non-fungible one.
 * A recipient may appear under several indices.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimRecord {
    pub index: u64,
    pub recipient: Pubkey,
    /// Tokens owed (fungible); always 1 and not hashed for non-fungible records
    pub amount: u64,
    /// Unlock time committed in the leaf, per-leaf timestamp distributions only
    pub timestamp: Option<i64>,
}

impl ClaimRecord {
    pub fn fungible(index: u64, recipient: Pubkey, amount: u64) -> Self {
        Self {
            index,
            recipient,
            amount,
            timestamp: None,
        }
    }

    pub fn non_fungible(token_id: u64, recipient: Pubkey) -> Self {
        Self {
            index: token_id,
            recipient,
            amount: 1,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Leaf hash of this record under the layout of `kind`
    ///
    /// Fields are concatenated without padding, integers little-endian:
    /// - fungible: index ++ recipient ++ amount [++ timestamp]
    /// - non-fungible: token_id ++ recipient [++ timestamp]
    pub fn leaf(&self, kind: AssetKind) -> [u8; 32] {
        let index = self.index.to_le_bytes();
        let recipient = self.recipient.to_bytes();
        let amount = self.amount.to_le_bytes();
        let timestamp = self.timestamp.map(i64::to_le_bytes);

        let mut fields: Vec<&[u8]> = Vec::with_capacity(4);
        fields.push(&index);
        fields.push(&recipient);
        if kind == AssetKind::Fungible {
            fields.push(&amount);
        }
        if let Some(timestamp) = timestamp.as_ref() {
            fields.push(timestamp);
        }

        hashv(&fields).0
    }
}
