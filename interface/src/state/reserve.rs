use core::mem::MaybeUninit;

use pinocchio::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{
    error::ReserveError,
    pack::{write_bytes, Pack},
    state::transmutable::{self, Transmutable},
};

/// The exact byte span allocated for a reserve account. The on-chain program rejects or misparses
/// the record if the account's data length differs.
pub const RESERVE_SIZE: usize = 98;

/// A reserve record, pairing a deposited token account with a derived collateral token account
/// and the liquidity token mint.
///
/// Wire layout, no padding:
///   - `[0]`: the initialized flag, 1 byte
///   - `[1]`: the authority bump seed, 1 byte
///   - `[2..34]`: the reserve token account key, 32 bytes
///   - `[34..66]`: the collateral token account key, 32 bytes
///   - `[66..98]`: the liquidity token mint key, 32 bytes
#[repr(C)]
#[derive(Clone, Debug, PartialEq)]
pub struct Reserve {
    /// Set once the record is populated. Only 0 and 1 are valid on the wire.
    is_initialized: u8,
    /// Bumps the derived authority address off the ed25519 curve. The authority is derived from
    /// the reserve account key and the lending program id, and owns the reserve's token accounts
    /// and the liquidity token mint.
    pub bump_seed: u8,
    /// Token account holding the underlying asset.
    pub reserve_token: Pubkey,
    /// Token account holding the derived collateral token.
    pub collateral_token: Pubkey,
    /// Liquidity tokens are minted against reserve token deposits and can be redeemed back.
    pub liquidity_token_mint: Pubkey,
}

// Safety:
//
// - Stable layout with `#[repr(C)]`.
// - `size_of` and `align_of` are checked below.
// - All bit patterns are valid: the initialized flag is stored as a raw `u8`.
unsafe impl Transmutable for Reserve {
    const LEN: usize = RESERVE_SIZE;
}

const_assert_eq!(RESERVE_SIZE, size_of::<Reserve>());
const_assert_eq!(align_of::<Reserve>(), 1);

impl Reserve {
    /// Builds an initialized record. Storage for a reserve is allocated once and initialized once;
    /// there is no update path.
    pub fn init(
        bump_seed: u8,
        reserve_token: &Pubkey,
        collateral_token: &Pubkey,
        liquidity_token_mint: &Pubkey,
    ) -> Self {
        Reserve {
            is_initialized: 1,
            bump_seed,
            reserve_token: *reserve_token,
            collateral_token: *collateral_token,
            liquidity_token_mint: *liquidity_token_mint,
        }
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.is_initialized == 1
    }

    /// Decodes an owned record from exactly [`RESERVE_SIZE`] bytes.
    pub fn unpack(bytes: &[u8]) -> Result<Self, ReserveError> {
        // Safety: every field is a raw byte or byte array, so all bit patterns form a valid
        // `Reserve`. The flag byte is validated before the view escapes.
        let view = unsafe { transmutable::load::<Reserve>(bytes)? };
        if view.is_initialized > 1 {
            return Err(ReserveError::InvalidInitializedFlag);
        }
        Ok(view.clone())
    }
}

unsafe impl Pack<RESERVE_SIZE> for Reserve {
    fn pack_into_slice(&self, dst: &mut [MaybeUninit<u8>; RESERVE_SIZE]) {
        dst[0].write(self.is_initialized);
        dst[1].write(self.bump_seed);
        write_bytes(&mut dst[2..34], &self.reserve_token);
        write_bytes(&mut dst[34..66], &self.collateral_token);
        write_bytes(&mut dst[66..98], &self.liquidity_token_mint);
    }
}
