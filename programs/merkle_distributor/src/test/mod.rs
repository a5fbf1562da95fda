
mod test_claim;

use anchor_lang::prelude::*;
use crate::engine::Distribution;
use crate::state::*;
use crate::utils::ClaimRecord;
use ledger::{execute, InMemoryLedger, LedgerEscrow};
use test_merkle::SimpleMerkleTree;

/// Claim records together with the tree committing to them
pub struct Fixture {
    pub records: Vec<ClaimRecord>,
    pub kind: AssetKind,
    tree: SimpleMerkleTree,
}

impl Fixture {
    pub fn new(records: Vec<ClaimRecord>, kind: AssetKind) -> Self {
        let tree = SimpleMerkleTree::new(records.iter().map(|r| r.leaf(kind)).collect());
        Self { records, kind, tree }
    }

    /// Indices 0..count, one fresh recipient each, `amount` per leaf
    pub fn uniform(count: u64, amount: u64) -> Self {
        Self::new(
            (0..count)
                .map(|i| ClaimRecord::fungible(i, Pubkey::new_unique(), amount))
                .collect(),
            AssetKind::Fungible,
        )
    }

    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn proof(&self, position: usize) -> Vec<[u8; 32]> {
        self.tree.proof(position)
    }
}

pub fn fungible_config(
    merkle_root: [u8; 32],
    total_amount: u64,
    policy: TemporalPolicy,
    max_claims: u64,
) -> DistributorConfig {
    DistributorConfig {
        bump: 254,
        nonce: 1,
        creator: Pubkey::new_unique(),
        asset_kind: AssetKind::Fungible,
        asset: Pubkey::new_unique(),
        escrow: Pubkey::new_unique(),
        merkle_root,
        policy,
        total_amount,
        max_claims,
    }
}

/// A fungible distributor, its bitmap and the ledger it pays out of
#[derive(Clone)]
pub struct World {
    pub ledger: InMemoryLedger,
    pub distributor: MerkleDistributor,
    pub bitmap: ClaimBitmap,
}

impl World {
    /// Distributor whose escrow holds `escrowed`, independent of `total_amount`
    pub fn funded(config: DistributorConfig, escrowed: u64) -> Self {
        let mut ledger = InMemoryLedger::default();
        ledger.credit(config.escrow, escrowed);
        let bitmap = ClaimBitmap::with_capacity(config.max_claims);
        let mut distributor = MerkleDistributor::default();
        distributor
            .initialize(config)
            .expect("valid distributor config");

        Self {
            ledger,
            distributor,
            bitmap,
        }
    }

    pub fn claim(&mut self, record: &ClaimRecord, proof: &[[u8; 32]], now: i64) -> Result<u64> {
        execute(self, |world| {
            let mover = LedgerEscrow {
                ledger: &mut world.ledger,
                escrow: world.distributor.escrow,
            };
            Distribution::new(&mut world.distributor, &mut world.bitmap, mover)
                .claim(record, proof, now)
        })
    }

    pub fn escrow_balance(&self) -> u64 {
        self.ledger.balance_of(&self.distributor.escrow)
    }

    pub fn is_claimed(&self, index: u64) -> bool {
        self.bitmap.is_set(index)
    }
}
