//! Pre-encoded OID prefixes and the `Oid` wire-form wrapper (§4.2, §4.3).
//!
//! Every prefix below is the literal byte string the chassis documentation
//! hands down for that sub-tree — they are carried as-is rather than
//! recomputed from the enterprise number, matching the note in §4.2 that
//! prefixes are "pre-encoded as the exact byte strings given."

use super::ber::{encode_sub_identifier, encode_tlv};

/// `1.3.6.1.4.1.58039.1` — the `product` sub-tree.
const PRODUCT_PREFIX: [u8; 8] = [0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x01];
/// `1.3.6.1.4.1.58039.2` — the `info` sub-tree.
const INFO_PREFIX: [u8; 8] = [0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x02];
/// `1.3.6.1.4.1.58039.3` — the `config` sub-tree.
const CONFIG_PREFIX: [u8; 8] = [0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x03];
/// `1.3.6.1.4.1.58039.4` — the `unitquery` sub-tree.
const UNITQUERY_PREFIX: [u8; 8] = [0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x04];

/// A fully-assembled OID in its BER content form (no tag/length yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oid(Vec<u8>);

impl Oid {
    fn with_suffix(prefix: &[u8], suffix: u8) -> Self {
        let mut bytes = prefix.to_vec();
        bytes.extend(encode_sub_identifier(u32::from(suffix)));
        Self(bytes)
    }

    /// `product.name` (`1.3.6.1.4.1.58039.1.1`).
    #[must_use]
    pub fn product_name() -> Self {
        Self::with_suffix(&PRODUCT_PREFIX, 1)
    }

    /// `product.version` (`1.3.6.1.4.1.58039.1.2`).
    #[must_use]
    pub fn product_version() -> Self {
        Self::with_suffix(&PRODUCT_PREFIX, 2)
    }

    /// `info.unitType` (`1.3.6.1.4.1.58039.2.1`).
    #[must_use]
    pub fn info_unit_type() -> Self {
        Self::with_suffix(&INFO_PREFIX, 1)
    }

    /// `info.opMode` (`1.3.6.1.4.1.58039.2.2`).
    #[must_use]
    pub fn info_op_mode() -> Self {
        Self::with_suffix(&INFO_PREFIX, 2)
    }

    /// `info.paXVer` for the PA identified by `info_suffix` (4/5/6).
    #[must_use]
    pub fn info_pa_version(info_suffix: u8) -> Self {
        Self::with_suffix(&INFO_PREFIX, info_suffix)
    }

    /// `config.uplinkChain` (`1.3.6.1.4.1.58039.3.6`).
    #[must_use]
    pub fn config_uplink_chain() -> Self {
        Self::with_suffix(&CONFIG_PREFIX, 6)
    }

    /// Any `unitquery.*` OID, given its table-driven suffix.
    #[must_use]
    pub fn unitquery(suffix: u8) -> Self {
        Self::with_suffix(&UNITQUERY_PREFIX, suffix)
    }

    /// BER-encodes this OID as a complete `06 <len> <bytes>` TLV.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode_tlv(0x06, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_matches_literal_prefix() {
        // 2B06010401E2F70101
        assert_eq!(
            Oid::product_name().encode(),
            vec![0x06, 0x09, 0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x01, 0x01]
        );
    }

    #[test]
    fn unitquery_pa_a_status_matches_literal_prefix() {
        // 2B06010401E2F70401 (unitquery.1 = PA A status)
        assert_eq!(
            Oid::unitquery(1).encode(),
            vec![0x06, 0x08, 0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x04, 0x01]
        );
    }

    #[test]
    fn config_uplink_chain_matches_literal_prefix() {
        assert_eq!(
            Oid::config_uplink_chain().encode(),
            vec![0x06, 0x08, 0x2B, 0x06, 0x01, 0x04, 0x01, 0xE2, 0xF7, 0x03, 0x06]
        );
    }
}
