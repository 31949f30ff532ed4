//! INI configuration loading (§6.1).
//!
//! Sections: `SerialPort`, `SNMP`, `RS485`. Every key has a documented
//! default so a bridge can start from an empty or partial file; only a
//! missing/unreadable file itself is a fatal [`BridgeError::Config`].

use std::net::Ipv4Addr;
use std::path::Path;

use ini::Ini;
use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::error::BridgeError;
use crate::sci::unit::ListenAddress;

/// Serial port settings, translated into the `serialport` crate's own types
/// so [`crate::serial`] can hand them straight to the port builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialSettings {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    /// Read timeout for the blocking port, so the driver loop can poll the
    /// shutdown flag periodically. Not present in the original Qt
    /// implementation, which used async `readyRead` signals instead.
    pub read_timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port_name: default_port_name().to_string(),
            baud_rate: 19200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            read_timeout_ms: 50,
        }
    }
}

#[cfg(windows)]
fn default_port_name() -> &'static str {
    "COM1"
}

#[cfg(not(windows))]
fn default_port_name() -> &'static str {
    "/dev/ttyUSB0"
}

/// SNMP peer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SnmpSettings {
    pub ip_address: Ipv4Addr,
    pub port: u16,
    pub community: String,
    /// Recorded from the config file but not consulted by the core — the
    /// bridge never binds or filters on these (§6.1).
    pub subnet_mask: Ipv4Addr,
    /// Recorded from the config file but not consulted by the core.
    pub gateway: Ipv4Addr,
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            ip_address: Ipv4Addr::new(127, 0, 0, 1),
            port: 161,
            community: "public".to_string(),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(0, 0, 0, 0),
        }
    }
}

/// Top-level bridge configuration, assembled from an INI file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BridgeConfig {
    pub serial: SerialSettings,
    pub snmp: SnmpSettings,
    pub listen_address: ListenAddress,
}

impl BridgeConfig {
    /// Loads configuration from an INI file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the file cannot be read or parsed.
    /// Individual malformed *values* fall back to defaults with a warning
    /// (or, for `RS485.listenAddress`, to `All` per the original source's
    /// behavior) rather than failing the whole load.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        let ini = Ini::load_from_file(path)
            .map_err(|e| BridgeError::Config(format!("{}: {e}", path.display())))?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("SerialPort")) {
            if let Some(v) = section.get("portName") {
                config.serial.port_name = v.to_string();
            }
            if let Some(v) = section.get("baudRate").and_then(|s| s.parse().ok()) {
                config.serial.baud_rate = v;
            }
            if let Some(v) = section.get("dataBits") {
                match v.parse::<u8>() {
                    Ok(5) => config.serial.data_bits = DataBits::Five,
                    Ok(6) => config.serial.data_bits = DataBits::Six,
                    Ok(7) => config.serial.data_bits = DataBits::Seven,
                    Ok(8) => config.serial.data_bits = DataBits::Eight,
                    _ => log::warn!("invalid SerialPort.dataBits {v:?}, using default"),
                }
            }
            if let Some(v) = section.get("parity") {
                match v {
                    "None" => config.serial.parity = Parity::None,
                    "Even" => config.serial.parity = Parity::Even,
                    "Odd" => config.serial.parity = Parity::Odd,
                    other => log::warn!("invalid SerialPort.parity {other:?}, using default"),
                }
            }
            if let Some(v) = section.get("stopBits") {
                match v.parse::<u8>() {
                    Ok(1) => config.serial.stop_bits = StopBits::One,
                    Ok(2) => config.serial.stop_bits = StopBits::Two,
                    _ => log::warn!("invalid SerialPort.stopBits {v:?}, using default"),
                }
            }
            if let Some(v) = section.get("flowControl") {
                match v {
                    "None" => config.serial.flow_control = FlowControl::None,
                    "Hardware" => config.serial.flow_control = FlowControl::Hardware,
                    "Software" => config.serial.flow_control = FlowControl::Software,
                    other => {
                        log::warn!("invalid SerialPort.flowControl {other:?}, using default");
                    }
                }
            }
            if let Some(v) = section.get("readTimeoutMs").and_then(|s| s.parse().ok()) {
                config.serial.read_timeout_ms = v;
            }
        }

        if let Some(section) = ini.section(Some("SNMP")) {
            if let Some(v) = section.get("ipAddress").and_then(|s| s.parse().ok()) {
                config.snmp.ip_address = v;
            }
            if let Some(v) = section.get("port").and_then(|s| s.parse().ok()) {
                config.snmp.port = v;
            }
            if let Some(v) = section.get("community") {
                config.snmp.community = v.to_string();
            }
            if let Some(v) = section.get("subnetMask").and_then(|s| s.parse().ok()) {
                config.snmp.subnet_mask = v;
            }
            if let Some(v) = section.get("gateway").and_then(|s| s.parse().ok()) {
                config.snmp.gateway = v;
            }
        }

        if let Some(section) = ini.section(Some("RS485")) {
            if let Some(v) = section.get("listenAddress") {
                config.listen_address = parse_listen_address(v);
            }
        }

        Ok(config)
    }
}

/// Parses `RS485.listenAddress`: `"all"` or a hex address like `"0xA"`.
///
/// An unparsable value is not a fatal config error — it logs a warning and
/// falls back to [`ListenAddress::All`], matching the original `main.cpp`
/// (`listenAddress = -1` on parse failure rather than aborting startup).
fn parse_listen_address(raw: &str) -> ListenAddress {
    if raw.eq_ignore_ascii_case("all") {
        return ListenAddress::All;
    }
    let cleaned = raw.strip_prefix("0x").unwrap_or(raw);
    match u8::from_str_radix(cleaned, 16) {
        Ok(addr) if addr <= 0x0F => ListenAddress::One(addr),
        _ => {
            log::warn!("invalid RS485.listenAddress {raw:?}, using 'all'");
            ListenAddress::All
        }
    }
}
