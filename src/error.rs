//! Typed error taxonomy for the bridge (§7 of the design spec).
//!
//! Only [`BridgeError::Config`] and [`BridgeError::PortOpen`] are fatal at
//! startup. Every other variant is constructed by a component, logged via
//! the `log` facade, and the pipeline continues — a single bad frame or a
//! failed send must never take the process down.

use thiserror::Error;

/// An error produced by one of the bridge's pipeline stages.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Unreadable or malformed configuration file. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serial port could not be opened or configured. Fatal at startup.
    #[error("failed to open serial port: {0}")]
    PortOpen(String),

    /// Transient serial read failure. The framer resumes on the next
    /// readable byte.
    #[error("serial I/O error: {0}")]
    SerialIo(String),

    /// Malformed frame: bad STX/ETX, length mismatch, or CRC failure. The
    /// offending bytes are discarded and the framer resynchronizes.
    #[error("frame error: {0}")]
    Frame(String),

    /// Payload too short for its declared subcommand, or otherwise
    /// unparseable. The frame is dropped.
    #[error("decode error: {0}")]
    Decode(String),

    /// UDP send failed. The binding is dropped.
    #[error("send error: {0}")]
    Send(String),
}

impl BridgeError {
    /// Whether this error kind is fatal and should abort startup.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::PortOpen(_))
    }
}

/// Logs a non-fatal [`BridgeError`] at the appropriate level and continues.
///
/// Centralizing this keeps the "errors are reported, never panic" policy in
/// one place instead of scattered `log::warn!` calls at every call site.
pub fn report(err: &BridgeError) {
    debug_assert!(!err.is_fatal(), "fatal errors must not reach report()");
    match err {
        BridgeError::SerialIo(_) => log::warn!("{err}"),
        BridgeError::Frame(_) | BridgeError::Decode(_) | BridgeError::Send(_) => {
            log::warn!("{err}");
        }
        BridgeError::Config(_) | BridgeError::PortOpen(_) => log::error!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_and_port_open_are_fatal() {
        assert!(BridgeError::Config("x".into()).is_fatal());
        assert!(BridgeError::PortOpen("x".into()).is_fatal());
    }

    #[test]
    fn runtime_errors_are_not_fatal() {
        assert!(!BridgeError::SerialIo("x".into()).is_fatal());
        assert!(!BridgeError::Frame("x".into()).is_fatal());
        assert!(!BridgeError::Decode("x".into()).is_fatal());
        assert!(!BridgeError::Send("x".into()).is_fatal());
    }
}
