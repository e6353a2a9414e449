#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::fixtures::{boundary_lengths, patterned_payload};
use common::helpers::{ReaderRig, card_serving, peer};
use hcelink::{CHUNK_SIZE, Error, MAX_PAYLOAD_LEN};

const BUDGET: Duration = Duration::from_secs(5);

#[test]
fn payloads_round_trip_across_chunk_boundaries() {
    common::init_logger();
    for len in boundary_lengths() {
        let payload = patterned_payload(len);
        let rig = ReaderRig::new();
        let received = rig
            .read_from(peer(&card_serving(&payload), 1), BUDGET)
            .unwrap_or_else(|e| panic!("len {}: {}", len, e));
        assert_eq!(received, payload, "len {}", len);
        assert!(!rig.adapter.is_reader_mode());
    }
}

#[test]
fn largest_transferable_payload() {
    common::init_logger();
    let payload = patterned_payload(MAX_PAYLOAD_LEN);
    let rig = ReaderRig::new();
    let received = rig
        .read_from(peer(&card_serving(&payload), 1), BUDGET)
        .unwrap();
    assert_eq!(received.len(), MAX_PAYLOAD_LEN);
    assert_eq!(received, payload);
}

#[test]
fn payload_needing_a_257th_exchange_fails_closed() {
    common::init_logger();
    for len in [MAX_PAYLOAD_LEN + 1, 65_536] {
        let rig = ReaderRig::new();
        let result = rig.read_from(peer(&card_serving(&patterned_payload(len)), 1), BUDGET);
        match result {
            Err(Error::ReadError(msg)) => assert!(msg.contains("256"), "{}", msg),
            other => panic!("len {}: expected ReadError, got {:?}", len, other.map(|v| v.len())),
        }
        assert!(!rig.device.is_reading());
    }
}

#[test]
fn text_payload_round_trips() -> anyhow::Result<()> {
    let rig = ReaderRig::new();
    let card = card_serving("héllo, wörld".as_bytes());
    let tag = peer(&card, 1);
    let presenter = hcelink::test_support::present_when_reading(rig.adapter.clone(), tag);
    let text = rig.device.read_once_text(BUDGET)?;
    assert!(presenter.join().unwrap_or(false));
    assert_eq!(text, "héllo, wörld");
    Ok(())
}

#[test]
fn device_to_device_transfer() -> anyhow::Result<()> {
    common::init_logger();
    let (card, card_adapter) = hcelink::test_support::mock_device();
    let payload = patterned_payload(3 * CHUNK_SIZE + 17);
    card.set_payload(payload.clone())?;
    assert!(card_adapter.is_preferred());

    let rig = ReaderRig::new();
    let received = rig.read_from(peer(card.responder(), 1), BUDGET)?;
    assert_eq!(received, payload);
    Ok(())
}
