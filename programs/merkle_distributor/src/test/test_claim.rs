use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use super::ledger::{assert_error, execute, FailingMover};
use super::{fungible_config, Fixture, World};
use crate::engine::{ClaimRegistry, Distribution, ValueMover};
use crate::error::DistributorError;
use crate::state::*;
use crate::utils::ClaimRecord;
use anchor_lang::prelude::*;

const NOW: i64 = 1_700_000_000;

fn four_by_fifty() -> (Fixture, World) {
    let fixture = Fixture::uniform(4, 50);
    let world = World::funded(
        fungible_config(fixture.root(), 200, TemporalPolicy::None, 4),
        200,
    );
    (fixture, world)
}

#[test]
fn test_end_to_end_four_leaf_distribution() {
    let (fixture, mut world) = four_by_fifty();
    let first = fixture.records[0];

    assert!(!world.is_claimed(0));
    let total = world.claim(&first, &fixture.proof(0), NOW).unwrap();
    assert_eq!(total, 50);
    assert_eq!(world.escrow_balance(), 150);
    assert_eq!(world.ledger.balance_of(&first.recipient), 50);
    assert!(world.is_claimed(0));

    // Replay of the same index
    assert_error(
        world.claim(&first, &fixture.proof(0), NOW),
        DistributorError::AlreadyClaimed,
    );

    // Leaf data of index 0 presented as index 1 with index 1's proof
    let mut relabelled = first;
    relabelled.index = 1;
    assert_error(
        world.claim(&relabelled, &fixture.proof(1), NOW),
        DistributorError::InvalidProof,
    );
    assert!(!world.is_claimed(1));
    assert_eq!(world.escrow_balance(), 150);

    for position in 1..4 {
        let record = fixture.records[position];
        world.claim(&record, &fixture.proof(position), NOW).unwrap();
        assert_eq!(world.ledger.balance_of(&record.recipient), 50);
    }

    assert_eq!(world.escrow_balance(), 0);
    assert_eq!(world.distributor.total_claimed, 200);
    assert_eq!(world.distributor.num_claimed, 4);
    assert!((0..4).all(|index| world.is_claimed(index)));
}

#[test]
fn test_perturbed_proof_is_rejected_without_side_effects() {
    let (fixture, mut world) = four_by_fifty();
    let record = fixture.records[2];
    let proof = fixture.proof(2);

    for position in 0..proof.len() {
        for byte in [0usize, 31] {
            let mut tampered = proof.clone();
            tampered[position][byte] ^= 0x01;
            assert_error(
                world.claim(&record, &tampered, NOW),
                DistributorError::InvalidProof,
            );
        }
    }

    assert!(!world.is_claimed(2));
    assert_eq!(world.escrow_balance(), 200);
    assert_eq!(world.distributor.num_claimed, 0);

    // The untouched proof still works afterwards
    world.claim(&record, &proof, NOW).unwrap();
}

#[test]
fn test_altered_record_fields_are_rejected() {
    let (fixture, mut world) = four_by_fifty();
    let record = fixture.records[1];
    let proof = fixture.proof(1);

    let mut inflated = record;
    inflated.amount = 51;
    assert_error(world.claim(&inflated, &proof, NOW), DistributorError::InvalidProof);

    let mut redirected = record;
    redirected.recipient = Pubkey::new_unique();
    assert_error(world.claim(&redirected, &proof, NOW), DistributorError::InvalidProof);

    assert_error(world.claim(&record, &[], NOW), DistributorError::InvalidProof);
}

#[test]
fn test_same_recipient_under_several_indices() {
    let recipient = Pubkey::new_unique();
    let fixture = Fixture::new(
        vec![
            ClaimRecord::fungible(0, recipient, 10),
            ClaimRecord::fungible(1, recipient, 10),
            ClaimRecord::fungible(2, Pubkey::new_unique(), 30),
        ],
        AssetKind::Fungible,
    );
    let mut world = World::funded(
        fungible_config(fixture.root(), 50, TemporalPolicy::None, 3),
        50,
    );

    world.claim(&fixture.records[0], &fixture.proof(0), NOW).unwrap();
    world.claim(&fixture.records[1], &fixture.proof(1), NOW).unwrap();
    assert_eq!(world.ledger.balance_of(&recipient), 20);
    assert_error(
        world.claim(&fixture.records[1], &fixture.proof(1), NOW),
        DistributorError::AlreadyClaimed,
    );
}

#[test]
fn test_single_leaf_distribution() {
    let fixture = Fixture::uniform(1, 75);
    assert!(fixture.proof(0).is_empty());

    let mut world = World::funded(
        fungible_config(fixture.root(), 75, TemporalPolicy::None, 1),
        75,
    );
    world.claim(&fixture.records[0], &[], NOW).unwrap();
    assert_eq!(world.escrow_balance(), 0);
}

#[test]
fn test_underfunded_escrow_fails_before_marking() {
    let fixture = Fixture::uniform(4, 50);
    let mut world = World::funded(
        fungible_config(fixture.root(), 200, TemporalPolicy::None, 4),
        150,
    );

    for position in 0..3 {
        world
            .claim(&fixture.records[position], &fixture.proof(position), NOW)
            .unwrap();
    }

    assert_error(
        world.claim(&fixture.records[3], &fixture.proof(3), NOW),
        DistributorError::InsufficientEscrowBalance,
    );
    assert!(!world.is_claimed(3));
    assert_eq!(world.distributor.total_claimed, 150);

    // Topping the escrow up makes the same claim succeed
    let escrow = world.distributor.escrow;
    world.ledger.credit(escrow, 50);
    world.claim(&fixture.records[3], &fixture.proof(3), NOW).unwrap();
    assert_eq!(world.escrow_balance(), 0);
}

#[test]
fn test_failed_transfer_rolls_back_claim() {
    let (fixture, mut world) = four_by_fifty();
    let record = fixture.records[0];
    let proof = fixture.proof(0);

    let result = execute(&mut world, |world| {
        Distribution::new(&mut world.distributor, &mut world.bitmap, FailingMover)
            .claim(&record, &proof, NOW)
    });
    assert_error(result, DistributorError::InsufficientBalance);

    assert!(!world.is_claimed(0));
    assert_eq!(world.distributor.total_claimed, 0);
    assert_eq!(world.distributor.num_claimed, 0);

    world.claim(&record, &proof, NOW).unwrap();
    assert!(world.is_claimed(0));
}

#[test]
fn test_index_beyond_bitmap_capacity() {
    let fixture = Fixture::new(
        vec![
            ClaimRecord::fungible(0, Pubkey::new_unique(), 10),
            ClaimRecord::fungible(9, Pubkey::new_unique(), 10),
        ],
        AssetKind::Fungible,
    );
    let mut world = World::funded(
        fungible_config(fixture.root(), 20, TemporalPolicy::None, 2),
        20,
    );

    assert_error(
        world.claim(&fixture.records[1], &fixture.proof(1), NOW),
        DistributorError::InvalidClaimIndex,
    );
    assert_eq!(world.escrow_balance(), 20);
    assert_eq!(world.distributor.num_claimed, 0);
}

#[test]
fn test_timestamp_on_untimed_distribution() {
    let (fixture, mut world) = four_by_fifty();
    let stamped = fixture.records[0].with_timestamp(NOW - 10);

    assert_error(
        world.claim(&stamped, &fixture.proof(0), NOW),
        DistributorError::InvalidTimestamp,
    );
}

#[test]
fn test_claim_bitmap_bits() {
    let mut bitmap = ClaimBitmap::with_capacity(20);
    assert_eq!(bitmap.bits.len(), 3);
    assert_eq!(ClaimBitmap::space(20), 8 + 8 + 4 + 3);

    bitmap.set(0).unwrap();
    bitmap.set(9).unwrap();
    bitmap.set(19).unwrap();
    assert!(bitmap.is_set(0) && bitmap.is_set(9) && bitmap.is_set(19));
    assert!(!bitmap.is_set(1) && !bitmap.is_set(8) && !bitmap.is_set(10));
    assert!(!bitmap.is_set(20));
    assert_error(bitmap.set(20), DistributorError::InvalidClaimIndex);
}

/// Registry whose set is also visible to the value mover
struct SharedRegistry(Rc<RefCell<BTreeSet<u64>>>);

impl ClaimRegistry for SharedRegistry {
    fn is_claimed(&self, key: u64) -> bool {
        self.0.borrow().contains(&key)
    }

    fn mark_claimed(&mut self, key: u64) -> Result<()> {
        self.0.borrow_mut().insert(key);
        Ok(())
    }
}

/// Records what a callback during the transfer would see for the claimed index
struct ObservingMover {
    claimed: Rc<RefCell<BTreeSet<u64>>>,
    seen: Rc<Cell<Option<bool>>>,
}

impl ValueMover for ObservingMover {
    fn preflight(&self, record: &ClaimRecord) -> Result<()> {
        // Nothing is marked while checks are still running
        require!(
            !self.claimed.borrow().contains(&record.index),
            DistributorError::AlreadyClaimed
        );
        Ok(())
    }

    fn move_value(&mut self, record: &ClaimRecord) -> Result<()> {
        let registry = SharedRegistry(Rc::clone(&self.claimed));
        self.seen.set(Some(registry.is_claimed(record.index)));
        Ok(())
    }
}

#[test]
fn test_index_is_marked_before_value_moves() {
    let (fixture, world) = four_by_fifty();
    let mut distributor = world.distributor;
    let record = fixture.records[2];

    let claimed = Rc::new(RefCell::new(BTreeSet::new()));
    let seen = Rc::new(Cell::new(None));
    let mut registry = SharedRegistry(Rc::clone(&claimed));
    let mover = ObservingMover {
        claimed: Rc::clone(&claimed),
        seen: Rc::clone(&seen),
    };

    let total = Distribution::new(&mut distributor, &mut registry, mover)
        .claim(&record, &fixture.proof(2), NOW)
        .unwrap();

    assert_eq!(seen.get(), Some(true));
    assert_eq!(total, 50);
    assert!(claimed.borrow().contains(&2));

    // A reentrant claim of the same index during the transfer is a replay
    let reentrant = ObservingMover {
        claimed: Rc::clone(&claimed),
        seen: Rc::new(Cell::new(None)),
    };
    assert_error(
        Distribution::new(&mut distributor, &mut registry, reentrant)
            .claim(&record, &fixture.proof(2), NOW),
        DistributorError::AlreadyClaimed,
    );
}
