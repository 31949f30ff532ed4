//! UDP transmission of `GetResponse` datagrams (C3, §4.3, §5).
//!
//! Owns the only persistent process state: the `request_id` counter. One
//! `send_to` per binding; a failed send is reported and the binding is
//! dropped, never retried.

use std::net::{SocketAddrV4, UdpSocket};

use crate::error::BridgeError;

use super::message::{build_get_response, Binding};

/// Sends SNMP `GetResponse` datagrams for individual bindings.
pub struct Emitter {
    socket: UdpSocket,
    peer: SocketAddrV4,
    community: String,
    request_id: u32,
}

impl Emitter {
    /// Binds an ephemeral local UDP socket for sending to `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::PortOpen`] if the socket cannot be created —
    /// the emitter is as essential to startup as the serial port.
    pub fn new(peer: SocketAddrV4, community: String) -> Result<Self, BridgeError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| BridgeError::PortOpen(format!("UDP socket bind failed: {e}")))?;
        Ok(Self {
            socket,
            peer,
            community,
            request_id: 1,
        })
    }

    /// Encodes and sends `binding` as one UDP datagram, incrementing the
    /// request-id counter exactly once regardless of send outcome.
    pub fn send(&mut self, binding: &Binding) -> Result<(), BridgeError> {
        let message = build_get_response(&self.community, self.request_id, binding);
        self.request_id = self.request_id.wrapping_add(1);

        let sent = self
            .socket
            .send_to(&message, self.peer)
            .map_err(|e| BridgeError::Send(format!("UDP send failed: {e}")))?;

        if sent != message.len() {
            return Err(BridgeError::Send(format!(
                "partial UDP write: sent {sent} of {} bytes",
                message.len()
            )));
        }
        Ok(())
    }
}
