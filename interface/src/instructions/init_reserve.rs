use core::mem::MaybeUninit;

use pinocchio::pubkey::Pubkey;

use crate::{
    error::ReserveError,
    instructions::InstructionTag,
    pack::{write_bytes, Pack},
};

/// The packed length of [`InitReserveData`]: the tag byte plus the 32-byte authority key.
pub const INIT_RESERVE_DATA_SIZE: usize = 33;

/// Instruction data for [`InstructionTag::InitReserve`].
///
/// Wire layout, no padding:
///   - `[0]`: the instruction tag, 1 byte
///   - `[1..33]`: the reserve authority key, 32 bytes
#[repr(C)]
#[derive(Clone, Debug, PartialEq)]
pub struct InitReserveData {
    /// Authority derived by the caller from the reserve account key and the lending program id.
    pub authority: Pubkey,
}

impl InitReserveData {
    pub fn new(authority: Pubkey) -> Self {
        InitReserveData { authority }
    }

    /// Decodes the payload from exactly [`INIT_RESERVE_DATA_SIZE`] bytes.
    pub fn unpack(data: &[u8]) -> Result<Self, ReserveError> {
        let (&tag, rest) = data
            .split_first()
            .ok_or(ReserveError::InvalidInstructionTag)?;
        match InstructionTag::try_from(tag)? {
            InstructionTag::InitReserve => {
                let authority = rest
                    .try_into()
                    .map_err(|_| ReserveError::InvalidKeyLength)?;
                Ok(InitReserveData { authority })
            }
        }
    }
}

unsafe impl Pack<INIT_RESERVE_DATA_SIZE> for InitReserveData {
    fn pack_into_slice(&self, dst: &mut [MaybeUninit<u8>; INIT_RESERVE_DATA_SIZE]) {
        dst[0].write(InstructionTag::InitReserve as u8);
        write_bytes(&mut dst[1..33], &self.authority);
    }
}

#[cfg(feature = "client")]
mod client {
    use solana_instruction::{AccountMeta, Instruction};
    use solana_sdk::{pubkey::Pubkey, sysvar};
    use std::vec::Vec;

    use super::InitReserveData;
    use crate::pack::Pack;

    /// Builds the instruction that initializes a freshly allocated reserve account.
    ///
    /// The caller allocates the reserve account (with exactly
    /// [`RESERVE_SIZE`](crate::state::reserve::RESERVE_SIZE) bytes, owned by the lending program)
    /// in the same transaction, and derives `authority` from the reserve account key.
    ///
    /// ### Accounts
    ///  0. `[WRITE, SIGNER]` Reserve account
    ///  1. `[READ]` Reserve token account, owned by `authority`
    ///  2. `[READ]` Collateral token account, owned by `authority`, minted by the liquidity mint
    ///  3. `[READ]` Liquidity token mint, owned by `authority`
    ///  4. `[READ]` Rent sysvar
    ///  5. `[READ]` Token program
    pub fn init_reserve(
        lending_program: &Pubkey,
        reserve: &Pubkey,
        reserve_token: &Pubkey,
        collateral_token: &Pubkey,
        liquidity_token_mint: &Pubkey,
        authority: &Pubkey,
        token_program: &Pubkey,
    ) -> Instruction {
        let accounts: Vec<AccountMeta> = [
            AccountMeta::new(*reserve, true),
            AccountMeta::new_readonly(*reserve_token, false),
            AccountMeta::new_readonly(*collateral_token, false),
            AccountMeta::new_readonly(*liquidity_token_mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(*token_program, false),
        ]
        .to_vec();

        Instruction {
            program_id: *lending_program,
            accounts,
            data: InitReserveData::new(authority.to_bytes()).pack().to_vec(),
        }
    }
}

#[cfg(feature = "client")]
pub use client::init_reserve;
