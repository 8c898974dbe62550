use crate::error::ReserveError;

pub mod init_reserve;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    any(test, feature = "client"),
    derive(strum_macros::Display, strum_macros::EnumIter, strum_macros::FromRepr)
)]
pub enum InstructionTag {
    InitReserve,
}

impl TryFrom<u8> for InstructionTag {
    type Error = ReserveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InstructionTag::InitReserve),
            _ => Err(ReserveError::InvalidInstructionTag),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::InstructionTag;

    #[test]
    fn test_instruction_tag_from_u8_exhaustive() {
        for variant in InstructionTag::iter() {
            let variant_u8 = variant as u8;
            assert_eq!(
                InstructionTag::from_repr(variant_u8).unwrap(),
                InstructionTag::try_from(variant_u8).unwrap(),
            );
            assert_eq!(InstructionTag::try_from(variant_u8).unwrap(), variant);
        }
    }
}
