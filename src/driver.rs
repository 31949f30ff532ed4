//! The single-threaded cooperative driver loop tying C1/C2/C3 together (§5).
//!
//! One task drains the serial port, feeds bytes to the [`FrameDecoder`],
//! dispatches each resulting frame, and emits its bindings over UDP. The
//! read timeout on the serial port is the only thing that lets the loop
//! notice a shutdown request — the original Qt implementation instead woke
//! up on an async `readyRead` signal (see SPEC_FULL.md §6.1).

use std::io::Read;
use std::net::SocketAddrV4;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::BridgeConfig;
use crate::error::{self, BridgeError};
use crate::sci::{dispatch, FrameDecoder};
use crate::snmp::Emitter;

/// Opens the configured serial port and UDP emitter, then drains the port
/// until `shutdown` is set.
///
/// # Errors
///
/// Returns [`BridgeError::PortOpen`] if the serial port or UDP socket cannot
/// be opened. Once running, all other errors are reported and absorbed.
pub fn run(config: &BridgeConfig, shutdown: Arc<AtomicBool>) -> Result<(), BridgeError> {
    let mut port = serialport::new(config.serial.port_name.as_str(), config.serial.baud_rate)
        .data_bits(config.serial.data_bits)
        .parity(config.serial.parity)
        .stop_bits(config.serial.stop_bits)
        .flow_control(config.serial.flow_control)
        .timeout(Duration::from_millis(config.serial.read_timeout_ms))
        .open()
        .map_err(|e| BridgeError::PortOpen(format!("{}: {e}", config.serial.port_name)))?;

    let peer = SocketAddrV4::new(config.snmp.ip_address, config.snmp.port);
    let mut emitter = Emitter::new(peer, config.snmp.community.clone())?;

    log::info!(
        "listening on {} ({} baud), emitting to {peer}",
        config.serial.port_name,
        config.serial.baud_rate
    );

    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 256];

    while !shutdown.load(Ordering::Relaxed) {
        match port.read(&mut buf) {
            Ok(0) => continue,
            Ok(n) => {
                let (frames, errors) = decoder.feed(&buf[..n]);
                for err in &errors {
                    error::report(err);
                }
                for frame in &frames {
                    process_frame(frame, config, &mut emitter);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => error::report(&BridgeError::SerialIo(e.to_string())),
        }
    }

    log::info!("shutdown requested, closing serial port");
    Ok(())
}

fn process_frame(frame: &crate::sci::SciFrame, config: &BridgeConfig, emitter: &mut Emitter) {
    match dispatch(frame, config.listen_address) {
        Ok(bindings) => {
            for binding in &bindings {
                if let Err(e) = emitter.send(binding) {
                    error::report(&e);
                }
            }
        }
        Err(e) => error::report(&e),
    }
}
