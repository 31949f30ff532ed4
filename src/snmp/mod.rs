//! SNMP/BER encoding and UDP transmission (C3).

pub mod ber;
pub mod emitter;
pub mod message;
pub mod oid;

pub use emitter::Emitter;
pub use message::{Binding, SnmpValue};
pub use oid::Oid;
