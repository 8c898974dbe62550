use reserve_interface::{
    error::ReserveError,
    instructions::init_reserve::{InitReserveData, INIT_RESERVE_DATA_SIZE},
    pack::Pack,
    state::{
        reserve::{Reserve, RESERVE_SIZE},
        transmutable::{self, Transmutable},
    },
};

fn reserve_wire_bytes(flag: u8, bump: u8) -> [u8; RESERVE_SIZE] {
    let mut bytes = [0u8; RESERVE_SIZE];
    bytes[0] = flag;
    bytes[1] = bump;
    bytes[2..34].fill(0x11);
    bytes[34..66].fill(0x22);
    bytes[66..98].fill(0x33);
    bytes
}

#[test]
fn reserve_layout_matches_wire_format() {
    assert_eq!(Reserve::LEN, 98);
    assert_eq!(RESERVE_SIZE, 98);

    let bytes = reserve_wire_bytes(0, 7);
    let reserve = Reserve::unpack(&bytes).expect("Should unpack an uninitialized record");

    assert!(!reserve.is_initialized());
    assert_eq!(reserve.bump_seed, 7);
    assert_eq!(reserve.reserve_token, [0x11; 32]);
    assert_eq!(reserve.collateral_token, [0x22; 32]);
    assert_eq!(reserve.liquidity_token_mint, [0x33; 32]);

    // Re-packing reproduces the wire bytes exactly.
    assert_eq!(reserve.pack(), bytes);
}

#[test]
fn init_marks_record_initialized() {
    let reserve = Reserve::init(251, &[0x11; 32], &[0x22; 32], &[0x33; 32]);
    assert!(reserve.is_initialized());

    let packed = reserve.pack();
    assert_eq!(packed, reserve_wire_bytes(1, 251));
    assert_eq!(Reserve::unpack(&packed).unwrap(), reserve);
}

#[test]
fn unpack_rejects_wrong_record_length() {
    let bytes = reserve_wire_bytes(1, 7);
    assert_eq!(
        Reserve::unpack(&bytes[..RESERVE_SIZE - 1]),
        Err(ReserveError::InsufficientByteLength)
    );
    assert_eq!(
        Reserve::unpack(&[bytes.as_slice(), &[0]].concat()),
        Err(ReserveError::InsufficientByteLength)
    );
}

#[test]
fn unpack_rejects_invalid_initialized_flag() {
    for flag in [2, 0xff] {
        assert_eq!(
            Reserve::unpack(&reserve_wire_bytes(flag, 0)),
            Err(ReserveError::InvalidInitializedFlag)
        );
    }
}

#[test]
fn zero_copy_load_checks_length() {
    let bytes = reserve_wire_bytes(1, 3);
    let view = unsafe { transmutable::load::<Reserve>(&bytes) }.unwrap();
    assert_eq!(view.bump_seed, 3);

    assert_eq!(
        unsafe { transmutable::load::<Reserve>(&bytes[..40]) }.unwrap_err(),
        ReserveError::InsufficientByteLength
    );
}

#[test]
fn init_reserve_payload_is_tag_then_authority() {
    let data = InitReserveData::new([0x44; 32]).pack();

    assert_eq!(data.len(), INIT_RESERVE_DATA_SIZE);
    assert_eq!(data[0], 0);
    assert_eq!(&data[1..], [0x44; 32]);

    // Deterministic: identical inputs always produce identical bytes.
    assert_eq!(InitReserveData::new([0x44; 32]).pack(), data);

    let decoded = InitReserveData::unpack(&data).unwrap();
    assert_eq!(decoded.authority, [0x44; 32]);
}

#[test]
fn init_reserve_payload_rejects_malformed_input() {
    // A short or long authority is an encoding error.
    assert_eq!(
        InitReserveData::unpack(&[vec![0], vec![0x44; 31]].concat()),
        Err(ReserveError::InvalidKeyLength)
    );
    assert_eq!(
        InitReserveData::unpack(&[vec![0], vec![0x44; 33]].concat()),
        Err(ReserveError::InvalidKeyLength)
    );

    // Missing or unknown tags never reach the authority parse.
    assert_eq!(
        InitReserveData::unpack(&[]),
        Err(ReserveError::InvalidInstructionTag)
    );
    assert_eq!(
        InitReserveData::unpack(&[vec![1], vec![0x44; 32]].concat()),
        Err(ReserveError::InvalidInstructionTag)
    );
}
