use anchor_lang::solana_program::keccak::hashv;

/// Hash of an interior node: the smaller child goes first
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).0
    } else {
        hashv(&[b, a]).0
    }
}

/// Recomputes the root from `leaf` and its sibling path
///
/// Pairs are sorted before hashing, so proofs carry no left/right bits.
/// An empty proof only verifies a single-leaf tree (`leaf == root`).
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed = proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling));
    computed == root
}
