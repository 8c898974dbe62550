use pinocchio::program_error::ProgramError;

#[repr(u8)]
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(any(test, feature = "client"), derive(strum_macros::FromRepr))]
pub enum ReserveError {
    InvalidInstructionTag,
    InvalidKeyLength,
    InsufficientByteLength,
    InvalidInitializedFlag,
}

impl From<ReserveError> for ProgramError {
    #[inline(always)]
    fn from(e: ReserveError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl From<ReserveError> for &'static str {
    fn from(value: ReserveError) -> Self {
        match value {
            ReserveError::InvalidInstructionTag => "Invalid instruction tag",
            ReserveError::InvalidKeyLength => "Key is not exactly 32 bytes",
            ReserveError::InsufficientByteLength => "Not enough bytes passed",
            ReserveError::InvalidInitializedFlag => "Initialized flag byte is not 0 or 1",
        }
    }
}

#[cfg(not(target_os = "solana"))]
impl core::fmt::Display for ReserveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(<&'static str>::from(self.clone()))
    }
}
