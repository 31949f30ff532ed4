//! Unidirectional SCI-to-SNMP protocol bridge for a redundant PA chassis.
//!
//! Serial frames (`STX…ETX`, §4.1) are decoded into SNMP varbinds (§4.2) and
//! shipped as unsolicited `GetResponse` datagrams (§4.3). See `SPEC_FULL.md`
//! for the full component breakdown.

pub mod config;
pub mod driver;
pub mod error;
pub mod sci;
pub mod snmp;
