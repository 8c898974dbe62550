//! Token-level context containing mint metadata and helpers for building mint and token-account
//! instructions.

use anyhow::Context;
use solana_instruction::Instruction;
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token_2022_interface::{
    check_spl_token_program_account,
    instruction::{initialize_account, initialize_mint, mint_to_checked},
};
use spl_token_interface::state::{Account, Mint};

pub struct TokenContext {
    pub mint_authority: Option<Pubkey>,
    pub mint_address: Pubkey,
    pub token_program: Pubkey,
    pub mint_decimals: u8,
}

impl TokenContext {
    pub const fn new(
        mint_authority: Option<Pubkey>,
        mint_address: Pubkey,
        token_program: Pubkey,
        mint_decimals: u8,
    ) -> Self {
        Self {
            mint_authority,
            mint_address,
            token_program,
            mint_decimals,
        }
    }

    /// Creates a [`TokenContext`] from an on-chain mint account's owner and data.
    ///
    /// Validates that the owner is a recognized SPL token program and unpacks the mint to extract
    /// the decimals.
    pub fn from_account_data(
        mint_address: Pubkey,
        owner: Pubkey,
        data: &[u8],
    ) -> anyhow::Result<Self> {
        check_spl_token_program_account(&owner)?;
        let mint = Mint::unpack(data)?;
        Ok(Self::new(
            mint.mint_authority.into(),
            mint_address,
            owner,
            mint.decimals,
        ))
    }

    /// Builds the instruction pair that allocates and initializes this context's mint account.
    ///
    /// `mint_rent` is the rent-exempt minimum for [`Mint::LEN`] bytes; the mint keypair must sign
    /// the transaction alongside the funder.
    pub fn create_mint(&self, funder: &Pubkey, mint_rent: u64) -> anyhow::Result<[Instruction; 2]> {
        let mint_authority = self
            .mint_authority
            .as_ref()
            .context("Token doesn't have a mint authority.")?;

        Ok([
            solana_system_interface::instruction::create_account(
                funder,
                &self.mint_address,
                mint_rent,
                Mint::LEN as u64,
                &self.token_program,
            ),
            initialize_mint(
                &self.token_program,
                &self.mint_address,
                mint_authority,
                None,
                self.mint_decimals,
            )?,
        ])
    }

    /// Builds the instruction pair that allocates a token account for this mint and hands it to
    /// `owner`.
    ///
    /// `account_rent` is the rent-exempt minimum for [`Account::LEN`] bytes; the token account
    /// keypair must sign the transaction alongside the funder.
    pub fn create_token_account(
        &self,
        funder: &Pubkey,
        token_account: &Pubkey,
        owner: &Pubkey,
        account_rent: u64,
    ) -> anyhow::Result<[Instruction; 2]> {
        Ok([
            solana_system_interface::instruction::create_account(
                funder,
                token_account,
                account_rent,
                Account::LEN as u64,
                &self.token_program,
            ),
            initialize_account(
                &self.token_program,
                token_account,
                &self.mint_address,
                owner,
            )?,
        ])
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to `destination`.
    pub fn mint_to(&self, destination: &Pubkey, amount: u64) -> anyhow::Result<Instruction> {
        if let Some(ref mint_authority) = self.mint_authority {
            Ok(mint_to_checked(
                &self.token_program,
                &self.mint_address,
                destination,
                mint_authority,
                &[],
                amount,
                self.mint_decimals,
            )?)
        } else {
            Err(anyhow::anyhow!("Token doesn't have a mint authority."))
        }
    }
}
