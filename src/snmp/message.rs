//! Assembly of a single-varbind SNMPv1 `GetResponse` datagram (§4.3).
//!
//! Each inner TLV is built into its own buffer and then wrapped outward, so
//! every length is known at the point it's written — no placeholder bytes
//! retro-filled after the fact (see the design note on "placeholder-and-patch
//! BER construction").

use super::ber::{encode_tlv, encode_signed_integer, encode_unsigned_integer};
use super::oid::Oid;

/// The value carried by a single varbind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    /// A `u16`-range telemetry reading. `signed` selects two's-complement
    /// (e.g. temperature) vs. zero-extended unsigned encoding.
    Integer { signed: bool, value: i32 },
    /// A textual binding (version string, alarm log line, host name).
    OctetString(Vec<u8>),
}

impl SnmpValue {
    /// Convenience constructor for an unsigned reading.
    #[must_use]
    pub fn unsigned(value: i32) -> Self {
        Self::Integer {
            signed: false,
            value,
        }
    }

    /// Convenience constructor for a signed reading.
    #[must_use]
    pub fn signed(value: i32) -> Self {
        Self::Integer {
            signed: true,
            value,
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Integer {
                signed: true,
                value,
            } => encode_tlv(0x02, &encode_signed_integer(*value)),
            Self::Integer {
                signed: false,
                value,
            } => encode_tlv(0x02, &encode_unsigned_integer(*value as u32)),
            Self::OctetString(bytes) => encode_tlv(0x04, bytes),
        }
    }
}

/// An `(OID, value)` pair destined for its own `GetResponse` datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub oid: Oid,
    pub value: SnmpValue,
}

impl Binding {
    #[must_use]
    pub fn new(oid: Oid, value: SnmpValue) -> Self {
        Self { oid, value }
    }
}

/// Builds one BER-encoded SNMPv1 `GetResponse` message carrying `binding`.
#[must_use]
pub fn build_get_response(community: &str, request_id: u32, binding: &Binding) -> Vec<u8> {
    let var_bind = encode_tlv(0x30, &{
        let mut inner = binding.oid.encode();
        inner.extend(binding.value.encode());
        inner
    });

    let var_bind_list = encode_tlv(0x30, &var_bind);

    let pdu_body = {
        let mut body = Vec::new();
        body.extend(encode_tlv(0x02, &request_id.to_be_bytes()));
        body.extend(encode_tlv(0x02, &[0x00])); // error_status
        body.extend(encode_tlv(0x02, &[0x00])); // error_index
        body.extend(var_bind_list);
        body
    };
    let pdu = encode_tlv(0xA2, &pdu_body);

    let message_body = {
        let mut body = Vec::new();
        body.extend(encode_tlv(0x02, &[0x00])); // version = SNMPv1
        body.extend(encode_tlv(0x04, community.as_bytes()));
        body.extend(pdu);
        body
    };

    encode_tlv(0x30, &message_body)
}
