#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::helpers::{ReaderRig, card_serving, peer};
use hcelink::test_support::{mock_device, wait_for};
use hcelink::transport::mock::MockTag;
use hcelink::{Device, Error};
use serial_test::serial;

fn spawn_read(device: &Arc<Device>, timeout: Duration) -> thread::JoinHandle<hcelink::Result<Vec<u8>>> {
    let device = Arc::clone(device);
    thread::spawn(move || device.read_once(timeout))
}

#[test]
#[serial]
fn second_read_while_armed_is_busy() {
    common::init_logger();
    let (device, adapter) = mock_device();
    let device = Arc::new(device);

    let first = spawn_read(&device, Duration::from_secs(5));
    assert!(wait_for(Duration::from_secs(2), || adapter.is_reader_mode()));

    assert_eq!(device.read_once(Duration::from_millis(50)), Err(Error::Busy));
    // the first read is still armed
    assert!(device.is_reading());
    assert!(adapter.is_reader_mode());

    device.disable_reader();
    assert_eq!(first.join().unwrap(), Err(Error::Cancelled));
    assert_eq!(adapter.enable_calls(), 1);
}

#[test]
#[serial]
fn read_times_out_without_a_peer() {
    common::init_logger();
    let (device, adapter) = mock_device();
    let budget = Duration::from_millis(150);

    let started = Instant::now();
    assert_eq!(device.read_once(budget), Err(Error::Timeout));
    assert!(started.elapsed() >= budget);
    assert!(!adapter.is_reader_mode());
    assert!(!device.is_reading());
}

#[test]
#[serial]
fn pause_cancels_an_armed_read() {
    common::init_logger();
    let (device, adapter) = mock_device();
    let device = Arc::new(device);
    device.set_payload(b"mine".to_vec()).unwrap();

    let read = spawn_read(&device, Duration::from_secs(5));
    assert!(wait_for(Duration::from_secs(2), || adapter.is_reader_mode()));

    device.on_pause();
    assert_eq!(read.join().unwrap(), Err(Error::Cancelled));
    assert!(!adapter.is_reader_mode());
    assert!(!adapter.is_preferred());
}

#[test]
#[serial]
fn late_tag_callback_is_ignored() {
    common::init_logger();
    let (device, adapter) = mock_device();
    assert_eq!(device.read_once(Duration::from_millis(20)), Err(Error::Timeout));

    let tag = MockTag::new(Vec::new());
    assert!(adapter.present_stale(&tag));
    assert_eq!(tag.acquired(), 0);
    assert!(!device.is_reading());
    assert!(!adapter.is_reader_mode());
}

#[test]
#[serial]
fn reads_can_follow_each_other() {
    common::init_logger();
    let rig = ReaderRig::new();
    let card = card_serving(b"again");
    for _ in 0..3 {
        assert_eq!(
            rig.read_from(peer(&card, 1), Duration::from_secs(5)).unwrap(),
            b"again"
        );
    }
    assert_eq!(rig.adapter.enable_calls(), 3);
    assert!(rig.adapter.disable_calls() >= 3);
}

#[test]
fn read_with_radio_missing() {
    let device = Device::new(None, hcelink::ReaderConfig::immediate());
    assert_eq!(device.read_once(Duration::from_millis(10)), Err(Error::NoAdapter));
    assert!(!device.is_reading());
}
