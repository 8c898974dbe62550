//! PDA helpers for deriving lending program addresses.

use solana_sdk::pubkey::Pubkey;

/// Derives the authority that owns a reserve's token accounts and its liquidity token mint,
/// seeded by the reserve account key.
pub fn find_reserve_authority(reserve: &Pubkey, lending_program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[reserve.as_ref()], lending_program)
}
