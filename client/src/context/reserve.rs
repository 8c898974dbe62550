//! Reserve-level context tying together the two token contexts, the derived authority, and the
//! instruction builders for reserve initialization.

use reserve_interface::{instructions::init_reserve::init_reserve, state::reserve::RESERVE_SIZE};
use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

use crate::{config::ProvisionConfig, context::token::TokenContext, pda::find_reserve_authority};

pub struct ReserveContext {
    /// The mint of the underlying asset deposited into the reserve. Minting stays with the funder.
    pub reserve_mint: TokenContext,
    /// The mint of the liquidity token handed out against deposits. Its mint authority is the
    /// derived reserve authority.
    pub liquidity_mint: TokenContext,
    /// The reserve record account.
    pub reserve: Pubkey,
    /// Token account holding the underlying asset, owned by the authority.
    pub reserve_token_account: Pubkey,
    /// Token account holding liquidity tokens, owned by the authority.
    pub collateral_token_account: Pubkey,
    /// The program-derived authority over the token accounts and the liquidity mint.
    pub authority: Pubkey,
    pub bump_seed: u8,
    pub lending_program: Pubkey,
}

impl ReserveContext {
    /// Lays out one reserve: derives the authority from the fresh reserve account key and wires
    /// up both token contexts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &ProvisionConfig,
        funder: &Pubkey,
        reserve: Pubkey,
        reserve_mint: Pubkey,
        liquidity_mint: Pubkey,
        reserve_token_account: Pubkey,
        collateral_token_account: Pubkey,
        decimals: u8,
    ) -> Self {
        let (authority, bump_seed) = find_reserve_authority(&reserve, &config.lending_program);

        Self {
            reserve_mint: TokenContext::new(
                Some(*funder),
                reserve_mint,
                config.token_program,
                decimals,
            ),
            liquidity_mint: TokenContext::new(
                Some(authority),
                liquidity_mint,
                config.token_program,
                decimals,
            ),
            reserve,
            reserve_token_account,
            collateral_token_account,
            authority,
            bump_seed,
            lending_program: config.lending_program,
        }
    }

    /// The instruction pair that allocates the reserve record account and initializes it in the
    /// same transaction: the record spans exactly [`RESERVE_SIZE`] bytes and is owned by the
    /// lending program.
    pub fn init_reserve_instructions(&self, funder: &Pubkey, reserve_rent: u64) -> Vec<Instruction> {
        vec![
            solana_system_interface::instruction::create_account(
                funder,
                &self.reserve,
                reserve_rent,
                RESERVE_SIZE as u64,
                &self.lending_program,
            ),
            init_reserve(
                &self.lending_program,
                &self.reserve,
                &self.reserve_token_account,
                &self.collateral_token_account,
                &self.liquidity_mint.mint_address,
                &self.authority,
                &self.reserve_mint.token_program,
            ),
        ]
    }
}
