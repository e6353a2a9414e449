#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{
    SW_INS_NOT_SUPPORTED_HEX, SW_NOT_FOUND_HEX, SW_OK_HEX, get_chunk_apdu, patterned_payload,
    select_apdu, wire,
};
use hcelink::test_support::mock_device;

#[test]
fn wire_table_without_payload() {
    common::init_logger();
    let (device, _adapter) = mock_device();

    let table: Vec<(Vec<u8>, &str)> = vec![
        (select_apdu(), SW_OK_HEX),
        (wire("00a4040007a0000000031010"), SW_NOT_FOUND_HEX),
        (get_chunk_apdu(0), SW_NOT_FOUND_HEX),
        (wire("00b0000010"), SW_INS_NOT_SUPPORTED_HEX),
        (wire("00a40400"), SW_INS_NOT_SUPPORTED_HEX),
        (wire("00a4040007f00102"), SW_NOT_FOUND_HEX),
        (wire("80"), SW_INS_NOT_SUPPORTED_HEX),
        (Vec::new(), SW_INS_NOT_SUPPORTED_HEX),
    ];

    for (command, expected) in table {
        assert_eq!(
            hex::encode(device.process_command(&command)),
            expected,
            "command {}",
            hex::encode(&command)
        );
    }
}

#[test]
fn chunks_follow_payload_layout() -> anyhow::Result<()> {
    common::init_logger();
    let (device, _adapter) = mock_device();
    let payload = patterned_payload(450);
    device.set_payload(payload.clone())?;

    let chunk0 = device.process_command(&get_chunk_apdu(0));
    assert_eq!(chunk0.len(), 202);
    assert_eq!(&chunk0[..200], &payload[..200]);
    assert_eq!(&chunk0[200..], &[0x90, 0x00]);

    let chunk2 = device.process_command(&get_chunk_apdu(2));
    assert_eq!(&chunk2[..50], &payload[400..]);
    assert_eq!(chunk2.len(), 52);

    // past the end: explicit empty success
    assert_eq!(hex::encode(device.process_command(&get_chunk_apdu(3))), SW_OK_HEX);
    assert_eq!(hex::encode(device.process_command(&get_chunk_apdu(200))), SW_OK_HEX);
    Ok(())
}

#[test]
fn get_chunk_does_not_require_prior_select() -> anyhow::Result<()> {
    let (device, _adapter) = mock_device();
    device.set_payload(b"abc".to_vec())?;
    assert_eq!(hex::encode(device.process_command(&get_chunk_apdu(0))), "6162639000");
    Ok(())
}

#[test]
fn empty_payload_serves_end_of_stream_immediately() -> anyhow::Result<()> {
    let (device, _adapter) = mock_device();
    device.set_payload(Vec::new())?;
    assert!(device.has_payload());
    assert_eq!(hex::encode(device.process_command(&get_chunk_apdu(0))), SW_OK_HEX);
    Ok(())
}
