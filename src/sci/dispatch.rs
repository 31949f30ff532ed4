//! SCI decoding and dispatch to SNMP bindings (C2, §4.2).
//!
//! [`dispatch`] takes one validated frame and returns the bindings it
//! produces, in emission order. A decoding failure drops the frame (with an
//! error) but never raises a partial set of bindings.

use crate::error::BridgeError;
use crate::snmp::{Binding, Oid, SnmpValue};

use super::frame::SciFrame;
use super::unit::{global, other_subtrees, ListenAddress, Parameter, UnitId};

const CMD_UPDATE: u8 = 0x8;
const CMD_ACK: u8 = 0xE;
const CMD_NACK: u8 = 0xF;

/// Decodes `frame` into zero or more SNMP bindings.
///
/// # Errors
///
/// Returns [`BridgeError::Decode`] when the payload is too short for the
/// subcommand it claims to carry. The caller (the driver loop) records the
/// error and moves on; no bindings are emitted for a frame that errors.
pub fn dispatch(frame: &SciFrame, listen: ListenAddress) -> Result<Vec<Binding>, BridgeError> {
    let source = frame.source();
    if !listen.accepts(source) {
        return Ok(Vec::new());
    }

    let unit = UnitId::from_nibble(source);
    // The original only ever assigns OIDs to PA A/B/C; every other source is
    // dropped before any command is even inspected (Open Questions, §9).
    let UnitId::PaA | UnitId::PaB | UnitId::PaC = unit else {
        return Ok(Vec::new());
    };

    match frame.cmd() {
        CMD_UPDATE => dispatch_update(unit, frame.payload()),
        CMD_ACK | CMD_NACK => Ok(Vec::new()),
        _ => Ok(Vec::new()),
    }
}

fn require_len(payload: &[u8], min: usize, what: &str) -> Result<(), BridgeError> {
    if payload.len() < min {
        return Err(BridgeError::Decode(format!(
            "{what}: payload too short ({} < {min})",
            payload.len()
        )));
    }
    Ok(())
}

fn dispatch_update(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    if payload.len() < 2 || payload[0] != 0xFF {
        return Ok(Vec::new());
    }
    let subcmd = payload[1];

    match subcmd {
        0x00 => sw_version(unit, payload),
        0x03 => frequency_band(unit, payload),
        0x04 => Ok(Vec::new()),
        0x05 => alarm_log(unit, payload),
        0x06 => redundant_system_status(unit, payload),
        0x09 => upd(unit, payload),
        0x0C => system_and_switch_alarms(unit, payload),
        0x17 => lo_frequency(unit, payload),
        0x18 => output_frequency(unit, payload),
        0x19 => input_voltage(unit, payload),
        0x21 => host_name(payload),
        0x20 | 0x31 => Ok(Vec::new()),
        _ => Ok(Vec::new()),
    }
}

fn pa_oid(unit: UnitId, param: Parameter) -> Oid {
    // `unit` is always a PA here: dispatch() already filtered non-PA sources.
    let suffix = super::unit::pa_suffix(unit, param).expect("non-PA unit reached pa_oid");
    Oid::unitquery(suffix)
}

fn sw_version(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 10, "sw version")?;
    let base = format!(
        "{:02x}.{:02x}.{:02x}.{:02x}",
        payload[2], payload[3], payload[4], payload[5]
    );
    let config = format!("{:02x}.{:02x}", payload[6], payload[7]);
    let revision = format!("{}{}", payload[8] as char, payload[9] as char);
    let full_version = format!("{base}-{config}-{revision}");

    let mut bindings = vec![Binding::new(
        Oid::product_version(),
        SnmpValue::OctetString(full_version.clone().into_bytes()),
    )];

    let info_suffix = match unit {
        UnitId::PaA => Some(other_subtrees::INFO_PA_VER[0]),
        UnitId::PaB => Some(other_subtrees::INFO_PA_VER[1]),
        UnitId::PaC => Some(other_subtrees::INFO_PA_VER[2]),
        UnitId::Other(_) => None,
    };
    if let Some(suffix) = info_suffix {
        bindings.push(Binding::new(
            Oid::info_pa_version(suffix),
            SnmpValue::OctetString(full_version.into_bytes()),
        ));
    }
    Ok(bindings)
}

fn frequency_band(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 3, "frequency band")?;
    let value = if payload[2] == 0 { 13050 } else { 12800 };
    Ok(vec![Binding::new(
        pa_oid(unit, Parameter::OperatingIf),
        SnmpValue::unsigned(value),
    )])
}

/// Mirrors a bug in the original: the "event id" is read from `payload[1]`,
/// which is the subcommand byte itself (always `0x05` on this path). The
/// documented range `0x11..=0x15` is therefore never reached. Implemented
/// faithfully rather than "fixed" — see Open Questions.
fn alarm_log(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 5, "alarm log")?;
    let event_id = payload[1];
    if !(0x11..=0x15).contains(&event_id) {
        return Ok(Vec::new());
    }

    let unit_kind = payload[4];
    let hex_value = format!("{:02x}{:02x}", payload[2], payload[3]);
    let log_index = event_id - 0x11 + 1; // 0x11 -> 1, 0x12 -> 2, 0x13 -> 3
    if !(1..=3).contains(&log_index) {
        return Ok(Vec::new());
    }

    let (text, oid) = match unit_kind {
        0x01 => {
            let letter = unit.letter().unwrap_or('?');
            let param = match log_index {
                1 => Parameter::AlarmLog1,
                2 => Parameter::AlarmLog2,
                _ => Parameter::AlarmLog3,
            };
            (format!("PA {letter}: {hex_value}"), pa_oid(unit, param))
        }
        0x04 => {
            let suffix = match log_index {
                1 => global::SWITCH_ALARM_LOG1,
                2 => global::SWITCH_ALARM_LOG2,
                _ => global::SWITCH_ALARM_LOG3,
            };
            (format!("Switches: {hex_value}"), Oid::unitquery(suffix))
        }
        _ => return Ok(Vec::new()),
    };

    Ok(vec![Binding::new(oid, SnmpValue::OctetString(text.into_bytes()))])
}

fn redundant_system_status(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 5, "redundant system status")?;
    let ww = payload[3];
    let yy = payload[4];

    let unit_type = if ww & 0x80 != 0 {
        1
    } else if ww & 0x01 != 0 {
        3
    } else {
        0
    };
    let op_mode = i32::from(ww & 0x02 != 0);
    let uplink_chain = match yy {
        0x01 => 0,
        0x02 => 1,
        _ => 2,
    };
    let pa_status = i32::from(yy != 0x01);

    Ok(vec![
        Binding::new(Oid::info_unit_type(), SnmpValue::unsigned(unit_type)),
        Binding::new(Oid::info_op_mode(), SnmpValue::unsigned(op_mode)),
        Binding::new(
            Oid::config_uplink_chain(),
            SnmpValue::unsigned(uplink_chain),
        ),
        Binding::new(pa_oid(unit, Parameter::Status), SnmpValue::unsigned(pa_status)),
    ])
}

fn upd(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 11, "UPD")?;

    let mute = i32::from(payload[2]);
    let summary_alarm = i32::from(payload[3] & 0x80 != 0);
    let temp_alarm = i32::from(payload[4] & 0x04 != 0);
    let temp_raw = i16::from_be_bytes([payload[5], payload[6]]);
    let gain = i32::from(u16::from_be_bytes([payload[7], payload[8]]));
    let power = i32::from(u16::from_be_bytes([payload[9], payload[10]]));

    Ok(vec![
        Binding::new(pa_oid(unit, Parameter::Mute), SnmpValue::unsigned(mute)),
        Binding::new(
            pa_oid(unit, Parameter::SummaryAlarm),
            SnmpValue::unsigned(summary_alarm),
        ),
        Binding::new(
            pa_oid(unit, Parameter::TempAlarm),
            SnmpValue::unsigned(temp_alarm),
        ),
        Binding::new(
            pa_oid(unit, Parameter::Temperature),
            SnmpValue::signed(i32::from(temp_raw)),
        ),
        Binding::new(pa_oid(unit, Parameter::Gain), SnmpValue::unsigned(gain)),
        Binding::new(pa_oid(unit, Parameter::OutPower), SnmpValue::unsigned(power)),
    ])
}

fn system_and_switch_alarms(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 5, "system and switch alarms")?;
    let vv = payload[2];
    let ww = payload[3];
    let yy = payload[4];

    let switch1 = if yy & 0x01 != 0 {
        2
    } else if yy & 0x04 != 0 {
        3
    } else if vv & 0x01 != 0 {
        1
    } else {
        0
    };
    let switch2 = if yy & 0x08 != 0 {
        2
    } else if yy & 0x20 != 0 {
        3
    } else if vv & 0x02 != 0 {
        1
    } else {
        0
    };

    let mut bindings = vec![
        Binding::new(
            Oid::unitquery(global::UP_SWITCH_ALARM),
            SnmpValue::unsigned(switch1),
        ),
        Binding::new(
            Oid::unitquery(global::UP_SWITCH2_ALARM),
            SnmpValue::unsigned(switch2),
        ),
    ];

    let bit = match unit {
        UnitId::PaA => 0x01,
        UnitId::PaB => 0x02,
        UnitId::PaC => 0x04,
        UnitId::Other(_) => 0,
    };
    if bit != 0 {
        let summary_alarm = i32::from(ww & bit != 0);
        bindings.push(Binding::new(
            pa_oid(unit, Parameter::SummaryAlarm),
            SnmpValue::unsigned(summary_alarm),
        ));
    }

    Ok(bindings)
}

/// Retains only the first of the original's two `sc=0x17` branches; the
/// second (`p[2]==0xFF && p[3]==0x17`) is structurally unreachable since the
/// outer dispatch already consumed a `0x17` subcommand byte (Open Questions).
///
/// Requires only 4 payload bytes, not 5: the original's guard is
/// `pack.data.size() < 4`, yet it goes on to read `pack.data[4]` — Qt's
/// `QByteArray::operator[]` returns the implicit null terminator (`0`) at
/// `index == size()`. A 4-byte payload is therefore valid on the wire and
/// decodes with the missing low byte read as zero, mirrored here rather
/// than rejected.
fn lo_frequency(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 4, "LO frequency")?;
    if payload[2] != 0x17 {
        return Ok(Vec::new());
    }
    let low_byte = payload.get(4).copied().unwrap_or(0);
    let lo_freq = u16::from_be_bytes([payload[3], low_byte]);
    Ok(vec![Binding::new(
        pa_oid(unit, Parameter::OperatingIf),
        SnmpValue::unsigned(i32::from(lo_freq)),
    )])
}

fn output_frequency(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 4, "output frequency")?;
    let tx_freq = u16::from_be_bytes([payload[2], payload[3]]);
    Ok(vec![Binding::new(
        pa_oid(unit, Parameter::OperatingIf),
        SnmpValue::unsigned(i32::from(tx_freq)),
    )])
}

fn input_voltage(unit: UnitId, payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 4, "input voltage")?;
    let voltage = u16::from_be_bytes([payload[2], payload[3]]);
    Ok(vec![Binding::new(
        pa_oid(unit, Parameter::InputVoltage),
        SnmpValue::unsigned(i32::from(voltage)),
    )])
}

fn host_name(payload: &[u8]) -> Result<Vec<Binding>, BridgeError> {
    require_len(payload, 13, "host name")?;
    Ok(vec![Binding::new(
        Oid::product_name(),
        SnmpValue::OctetString(payload[2..13].to_vec()),
    )])
}
