#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::fixtures::patterned_payload;
use common::helpers::{ReaderRig, card_serving, peer};
use hcelink::card::{CardResponder, PayloadStore};
use hcelink::reader::config::RECONNECT_PAUSE_MS;
use hcelink::transport::mock::{LoopbackIsoDep, MockIsoDep, MockTag};
use hcelink::transport::{IsoDep, Tag};
use hcelink::{Aid, DeviceBuilder, Error, ReaderConfig, StatusWord};

const BUDGET: Duration = Duration::from_secs(5);

fn flaky_then_healthy(card: &CardResponder, fail_after: usize) -> Arc<MockTag> {
    Arc::new(MockTag::new(vec![
        Box::new(LoopbackIsoDep::new(card.clone()).fail_after(fail_after)),
        Box::new(LoopbackIsoDep::new(card.clone())),
    ]))
}

#[test]
fn transport_drop_mid_transfer_recovers_on_fresh_link() -> anyhow::Result<()> {
    common::init_logger();
    let payload = patterned_payload(450);
    let card = card_serving(&payload);
    // select + chunk 0 succeed, chunk 1 drops the link
    let tag = flaky_then_healthy(&card, 2);

    let rig = ReaderRig::new();
    let received = rig.read_from(tag.clone(), BUDGET)?;
    assert_eq!(received, payload);
    assert_eq!(tag.acquired(), 2);
    Ok(())
}

#[test]
fn second_transport_failure_is_reported() {
    common::init_logger();
    let card = card_serving(&patterned_payload(450));
    let tag = Arc::new(MockTag::new(vec![
        Box::new(LoopbackIsoDep::new(card.clone()).fail_after(1)),
        Box::new(LoopbackIsoDep::new(card.clone()).fail_after(1)),
        Box::new(LoopbackIsoDep::new(card.clone())),
    ]));

    let rig = ReaderRig::new();
    match rig.read_from(tag.clone(), BUDGET) {
        Err(Error::ReadError(msg)) => assert!(msg.contains("transport"), "{}", msg),
        other => panic!("expected ReadError, got {:?}", other),
    }
    assert_eq!(tag.acquired(), 2);
}

#[test]
fn reconnect_waits_before_reopening() -> anyhow::Result<()> {
    let adapter = Arc::new(hcelink::transport::mock::MockAdapter::new());
    let device = DeviceBuilder::new()
        .with_adapter(adapter.clone())
        .with_config(ReaderConfig::default().with_chunk_pause(Duration::ZERO))
        .build();

    let card = card_serving(b"short");
    let tag: Arc<dyn Tag> = flaky_then_healthy(&card, 1);
    let presenter = hcelink::test_support::present_when_reading(adapter, tag);

    let started = Instant::now();
    assert_eq!(device.read_once(BUDGET)?, b"short");
    assert!(started.elapsed() >= Duration::from_millis(RECONNECT_PAUSE_MS));
    assert!(presenter.join().unwrap_or(false));
    Ok(())
}

#[test]
fn lost_selection_is_recovered_by_reselect() -> anyhow::Result<()> {
    common::init_logger();
    let link = MockIsoDep::new();
    link.push_response(hex::decode("9000")?);
    link.push_response(hex::decode("6a82")?);
    link.push_response(hex::decode("9000")?);
    link.push_response(hex::decode("68699000")?);
    let tag = Arc::new(MockTag::new(vec![Box::new(link.clone()) as Box<dyn IsoDep>]));

    let rig = ReaderRig::new();
    assert_eq!(rig.read_from(tag, BUDGET)?, b"hi");
    assert_eq!(link.sent().len(), 4);
    assert_eq!(link.timeout(), Some(Duration::from_millis(10_000)));
    assert!(!link.is_connected());
    Ok(())
}

#[test]
fn wrong_application_is_not_retried() {
    let store = PayloadStore::new();
    store.set(&b"data"[..]);
    let other = Aid::from_bytes([0xA0, 0x00, 0x00, 0x00, 0x03, 0x10, 0x10]);
    let card = CardResponder::with_aid(store, other);
    let tag = Arc::new(MockTag::new(vec![
        Box::new(LoopbackIsoDep::new(card.clone())),
        Box::new(LoopbackIsoDep::new(card)),
    ]));

    let rig = ReaderRig::new();
    assert_eq!(
        rig.read_from(tag.clone(), BUDGET),
        Err(Error::SelectFailed(StatusWord::NOT_FOUND))
    );
    assert_eq!(tag.acquired(), 1);
}

#[test]
fn peer_without_payload_reports_chunk_failure() {
    let card = CardResponder::new(PayloadStore::new());
    let rig = ReaderRig::new();
    assert_eq!(
        rig.read_from(peer(&card, 1), BUDGET),
        Err(Error::ChunkFailed(StatusWord::NOT_FOUND))
    );
}

#[test]
fn non_iso_dep_peer_is_unsupported() {
    let rig = ReaderRig::new();
    assert_eq!(
        rig.read_from(Arc::new(MockTag::unsupported()), BUDGET),
        Err(Error::TagUnsupported)
    );
}
