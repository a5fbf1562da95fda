use anchor_lang::prelude::*;

#[error_code]
pub enum DistributorError {
    // Eligibility errors
    #[msg("Timelock has not expired")]
    NotYetEligible,
    #[msg("Distribution has not started yet")]
    WindowNotStarted,
    #[msg("Distribution has ended")]
    WindowEnded,
    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    // Claim errors
    #[msg("Drop already claimed")]
    AlreadyClaimed,
    #[msg("Invalid proof")]
    InvalidProof,
    #[msg("Claim index is outside the distribution")]
    InvalidClaimIndex,
    #[msg("Token has already been minted")]
    AlreadyMinted,

    // Funding errors
    #[msg("Insufficient escrow balance for this claim")]
    InsufficientEscrowBalance,
    #[msg("Insufficient allowance")]
    InsufficientAllowance,
    #[msg("Insufficient balance")]
    InsufficientBalance,

    // Configuration errors
    #[msg("Invalid merkle root")]
    InvalidMerkleRoot,
    #[msg("Distribution window must end after it starts")]
    InvalidWindow,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Claim capacity must be between 1 and MAX_CLAIMS")]
    InvalidMaxClaims,
    #[msg("Instruction does not match the distributor's asset kind")]
    AssetKindMismatch,
    #[msg("Token mint does not match distributor's asset")]
    TokenMintMismatch,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
