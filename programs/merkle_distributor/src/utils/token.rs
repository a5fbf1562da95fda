use anchor_lang::prelude::*;
use anchor_spl::token_interface::{mint_to, transfer_checked, MintTo, TransferChecked};
use crate::constants::*;
use crate::engine::{FundingSource, ValueMover};
use crate::error::*;
use crate::state::MerkleDistributor;
use crate::utils::ClaimRecord;

/// Universal token transfer function that supports both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_ctx = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(token_program, cpi_accounts, seeds),
        None => CpiContext::new(token_program, cpi_accounts),
    };

    transfer_checked(cpi_ctx, amount, decimals)
}

/// Mint `amount` of `mint` to `to` with a PDA mint authority
pub fn mint_token<'a>(
    authority: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    to: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = MintTo {
        mint,
        to,
        authority,
    };

    mint_to(
        CpiContext::new_with_signer(token_program, cpi_accounts, signer_seeds),
        amount,
    )
}

/// Owned copy of the distributor PDA seeds
pub struct DistributorSigner {
    asset: Pubkey,
    creator: Pubkey,
    nonce: [u8; 4],
    bump: [u8; 1],
}

impl DistributorSigner {
    pub fn of(distributor: &MerkleDistributor) -> Self {
        Self {
            asset: distributor.asset,
            creator: distributor.creator,
            nonce: distributor.nonce_bytes(),
            bump: [distributor.bump],
        }
    }

    pub fn seeds(&self) -> [&[u8]; 5] {
        [
            DISTRIBUTOR_SEED.as_bytes(),
            self.asset.as_ref(),
            self.creator.as_ref(),
            &self.nonce,
            &self.bump,
        ]
    }
}

/// Pays fungible claims out of the distributor's escrow vault
pub struct EscrowTransfer<'info> {
    pub distributor: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub recipient_token_account: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub decimals: u8,
    /// Vault balance when the instruction started
    pub vault_balance: u64,
    pub signer: DistributorSigner,
}

impl<'info> ValueMover for EscrowTransfer<'info> {
    fn preflight(&self, record: &ClaimRecord) -> Result<()> {
        require!(
            self.vault_balance >= record.amount,
            DistributorError::InsufficientEscrowBalance
        );
        Ok(())
    }

    fn move_value(&mut self, record: &ClaimRecord) -> Result<()> {
        let seeds = self.signer.seeds();
        let signer = &[&seeds[..]];

        transfer_token(
            self.distributor.clone(),
            self.vault.clone(),
            self.recipient_token_account.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            record.amount,
            self.decimals,
            Some(signer), // PDA signing for the escrow vault
        )?;

        self.vault_balance -= record.amount;
        Ok(())
    }
}

/// Mints the single unit of a non-fungible claim
pub struct NftMint<'info> {
    pub distributor: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub recipient_token_account: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    /// Mint supply when the instruction started
    pub supply: u64,
    pub signer: DistributorSigner,
}

impl<'info> ValueMover for NftMint<'info> {
    fn preflight(&self, _record: &ClaimRecord) -> Result<()> {
        require!(self.supply == 0, DistributorError::AlreadyMinted);
        Ok(())
    }

    fn move_value(&mut self, _record: &ClaimRecord) -> Result<()> {
        let seeds = self.signer.seeds();
        let signer = &[&seeds[..]];

        mint_token(
            self.distributor.clone(),
            self.mint.clone(),
            self.recipient_token_account.clone(),
            self.token_program.clone(),
            1,
            signer,
        )?;

        self.supply = 1;
        Ok(())
    }
}

/// Pulls the allocation through the allowance granted to the factory authority PDA
pub struct DelegatedPull<'info> {
    pub factory_authority: AccountInfo<'info>,
    pub source: AccountInfo<'info>,
    pub escrow: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub decimals: u8,
    /// Delegated amount, zero unless the factory authority is the delegate
    pub allowance: u64,
    pub balance: u64,
    pub factory_bump: u8,
}

impl<'info> FundingSource for DelegatedPull<'info> {
    fn pull(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, DistributorError::InvalidAmount);
        require!(self.allowance >= amount, DistributorError::InsufficientAllowance);
        require!(self.balance >= amount, DistributorError::InsufficientBalance);

        let bump = [self.factory_bump];
        let seeds: [&[u8]; 2] = [FACTORY_AUTHORITY_SEED.as_bytes(), &bump];
        let signer = &[&seeds[..]];

        transfer_token(
            self.factory_authority.clone(),
            self.source.clone(),
            self.escrow.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.decimals,
            Some(signer), // factory authority signs as delegate
        )?;

        self.allowance -= amount;
        self.balance -= amount;
        Ok(())
    }
}

/// Pulls the allocation with the creator's own signature
pub struct SignerPull<'info> {
    pub creator: AccountInfo<'info>,
    pub source: AccountInfo<'info>,
    pub escrow: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub decimals: u8,
    pub balance: u64,
}

impl<'info> FundingSource for SignerPull<'info> {
    fn pull(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, DistributorError::InvalidAmount);
        require!(self.balance >= amount, DistributorError::InsufficientBalance);

        transfer_token(
            self.creator.clone(),
            self.source.clone(),
            self.escrow.clone(),
            self.mint.clone(),
            self.token_program.clone(),
            amount,
            self.decimals,
            None, // No signer seeds needed for creator-signed transfer
        )?;

        self.balance -= amount;
        Ok(())
    }
}
