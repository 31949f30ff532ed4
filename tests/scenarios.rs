//! End-to-end scenarios from the numbered test plan: feed raw SCI bytes
//! through the framer and dispatcher, and inspect the resulting bindings.

use sci_snmp_bridge::sci::{dispatch, FrameDecoder, ListenAddress};
use sci_snmp_bridge::snmp::SnmpValue;

fn crc(dest_src: u8, cmd_len: u8, payload: &[u8]) -> u8 {
    let mut acc = dest_src ^ cmd_len;
    for &b in payload {
        acc ^= b;
    }
    !acc
}

fn build_frame(dest_src: u8, cmd: u8, payload: &[u8]) -> Vec<u8> {
    let cmd_len = (cmd << 4) | (payload.len() as u8 & 0x0F);
    let c = crc(dest_src, cmd_len, payload);
    let mut out = vec![0x7E, dest_src, cmd_len];
    out.extend_from_slice(payload);
    out.push(c);
    out.push(0x7F);
    out
}

fn integer_values(bindings: &[sci_snmp_bridge::snmp::Binding]) -> Vec<i32> {
    bindings
        .iter()
        .map(|b| match b.value {
            SnmpValue::Integer { value, .. } => value,
            SnmpValue::OctetString(_) => panic!("expected integer binding"),
        })
        .collect()
}

#[test]
fn scenario_1_upd_pa_a_nominal() {
    let wire = build_frame(
        0xA0,
        0x8,
        &[0xFF, 0x09, 0x00, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x14, 0x00, 0x64],
    );
    let mut decoder = FrameDecoder::new();
    let (frames, errors) = decoder.feed(&wire);
    assert!(errors.is_empty());
    assert_eq!(frames.len(), 1);

    let bindings = dispatch(&frames[0], ListenAddress::All).unwrap();
    assert_eq!(integer_values(&bindings), vec![0, 0, 0, 60, 20, 100]);
}

#[test]
fn scenario_2_upd_pa_b_temp_alarm_and_negative_temperature() {
    let wire = build_frame(
        0xB0,
        0x8,
        &[0xFF, 0x09, 0x00, 0x00, 0x04, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00],
    );
    let mut decoder = FrameDecoder::new();
    let (frames, _) = decoder.feed(&wire);
    let bindings = dispatch(&frames[0], ListenAddress::All).unwrap();

    match bindings[2].value {
        SnmpValue::Integer { value, .. } => assert_eq!(value, 1),
        SnmpValue::OctetString(_) => panic!("expected integer"),
    }
    match bindings[3].value {
        SnmpValue::Integer { value, signed } => {
            assert!(signed);
            assert_eq!(value, -128);
        }
        SnmpValue::OctetString(_) => panic!("expected integer"),
    }
}

#[test]
fn scenario_3_listen_address_filter_drops_non_matching_frame() {
    let wire = build_frame(0xB0, 0x8, &[0xFF, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let mut decoder = FrameDecoder::new();
    let (frames, _) = decoder.feed(&wire);

    let bindings = dispatch(&frames[0], ListenAddress::One(0xA)).unwrap();
    assert!(bindings.is_empty());
}

#[test]
fn scenario_4_corrupted_crc_then_valid_frame() {
    let mut wire = build_frame(0xA0, 0x8, &[0xFF, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    wire[4] ^= 0x01; // flip a payload bit, breaking the CRC
    wire.extend_from_slice(&build_frame(0xB0, 0x8, &[0xFF, 0x21, b'U', b'N', b'I', b'T', b'-', b'N', b'O', b'D', b'E', b'0', b'1']));

    let mut decoder = FrameDecoder::new();
    let (frames, errors) = decoder.feed(&wire);
    assert_eq!(errors.len(), 1);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].source(), 0xB);
}

#[test]
fn scenario_5_resync_past_surrounding_garbage() {
    let mut wire = vec![0xAA, 0xBB, 0xCC];
    wire.extend_from_slice(&build_frame(0xA1, 0xE, &[0x01]));
    wire.push(0xDD);

    let mut decoder = FrameDecoder::new();
    let (frames, errors) = decoder.feed(&wire);
    assert!(errors.is_empty());
    assert_eq!(frames.len(), 1);
}

#[test]
fn scenario_6_host_name_binding() {
    let mut payload = vec![0xFF, 0x21];
    payload.extend_from_slice(b"UNIT-NODE01");
    let wire = build_frame(0xA0, 0x8, &payload);

    let mut decoder = FrameDecoder::new();
    let (frames, _) = decoder.feed(&wire);
    let bindings = dispatch(&frames[0], ListenAddress::All).unwrap();

    assert_eq!(bindings.len(), 1);
    match &bindings[0].value {
        SnmpValue::OctetString(bytes) => assert_eq!(bytes, b"UNIT-NODE01"),
        SnmpValue::Integer { .. } => panic!("expected octet string"),
    }
}

#[test]
fn len_zero_frame_produces_no_bindings() {
    let wire = build_frame(0xA0, 0x8, &[]);
    let mut decoder = FrameDecoder::new();
    let (frames, errors) = decoder.feed(&wire);
    assert!(errors.is_empty());

    let bindings = dispatch(&frames[0], ListenAddress::All).unwrap();
    assert!(bindings.is_empty());
}

#[test]
fn max_length_frame_round_trips_through_dispatch() {
    // len=15, cmd=0x8, unrecognized subcommand -> accepted and discarded.
    let payload = [0xFFu8, 0x99, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
    let wire = build_frame(0xAB, 0x8, &payload);
    assert_eq!(wire.len(), 20);

    let mut decoder = FrameDecoder::new();
    let (frames, errors) = decoder.feed(&wire);
    assert!(errors.is_empty());
    let bindings = dispatch(&frames[0], ListenAddress::All).unwrap();
    assert!(bindings.is_empty());
}
