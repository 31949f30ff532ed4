//! Source-unit identity and the per-unit OID suffix table (§4.2).
//!
//! The suffix table is kept as static data, not chained `if`/`match` arms,
//! per the design note that OID arithmetic should be table-driven.

/// The originating unit of an SCI frame, decoded from the low nibble of the
/// dest/src byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitId {
    /// PA A (`src = 0xA`).
    PaA,
    /// PA B (`src = 0xB`).
    PaB,
    /// PA C (`src = 0xC`).
    PaC,
    /// Any other source nibble. The original implementation only ever
    /// assigns OIDs for PA A/B/C; other sources fall through with no
    /// bindings (see Open Questions, SPEC_FULL.md §9).
    Other(u8),
}

impl UnitId {
    /// Decodes a unit id from a 4-bit source nibble.
    #[must_use]
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0xA => Self::PaA,
            0xB => Self::PaB,
            0xC => Self::PaC,
            other => Self::Other(other),
        }
    }

    /// Row index into [`PA_SUFFIX_TABLE`], or `None` for non-PA units.
    fn pa_row(self) -> Option<usize> {
        match self {
            Self::PaA => Some(0),
            Self::PaB => Some(1),
            Self::PaC => Some(2),
            Self::Other(_) => None,
        }
    }

    /// Single-letter label used in alarm log text (`"PA A: ..."`).
    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Self::PaA => Some('A'),
            Self::PaB => Some('B'),
            Self::PaC => Some('C'),
            Self::Other(_) => None,
        }
    }
}

/// A monitored PA parameter, addressed under the `unitquery` subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Status,
    OutPower,
    ReflectedPower,
    Temperature,
    InputVoltage,
    Gain,
    Mute,
    OperatingIf,
    SummaryAlarm,
    OutOfLockAlarm,
    TempAlarm,
    InputVoltageAlarm,
    OverPowerAlarm,
    AlarmLog1,
    AlarmLog2,
    AlarmLog3,
}

impl Parameter {
    /// Column index into [`PA_SUFFIX_TABLE`].
    fn column(self) -> usize {
        match self {
            Self::Status => 0,
            Self::OutPower => 1,
            Self::ReflectedPower => 2,
            Self::Temperature => 3,
            Self::InputVoltage => 4,
            Self::Gain => 5,
            Self::Mute => 6,
            Self::OperatingIf => 7,
            Self::SummaryAlarm => 8,
            Self::OutOfLockAlarm => 9,
            Self::TempAlarm => 10,
            Self::InputVoltageAlarm => 11,
            Self::OverPowerAlarm => 12,
            Self::AlarmLog1 => 13,
            Self::AlarmLog2 => 14,
            Self::AlarmLog3 => 15,
        }
    }
}

/// `unitquery` subtree suffix for each (unit, parameter) pair, reproduced
/// verbatim from the §4.2 table.
const PA_SUFFIX_TABLE: [[u8; 16]; 3] = [
    // status outPower reflPower temp inputV gain mute opIF summary ool tempA inV overP log1 log2 log3
    [1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 62, 63, 64], // PA A
    [2, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 65, 66, 67], // PA B
    [40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 74, 75, 76], // PA C
];

/// Looks up the `unitquery` suffix for `unit`/`param`. Returns `None` for
/// non-PA units — the table simply has no entry for them.
#[must_use]
pub fn pa_suffix(unit: UnitId, param: Parameter) -> Option<u8> {
    unit.pa_row().map(|row| PA_SUFFIX_TABLE[row][param.column()])
}

/// Global (non-per-unit) `unitquery` suffixes.
pub mod global {
    /// `unitquery.upSwitchAlarm`.
    pub const UP_SWITCH_ALARM: u8 = 60;
    /// `unitquery.upSwitch2Alarm`.
    pub const UP_SWITCH2_ALARM: u8 = 61;
    /// `unitquery.switchAlarmLog1`.
    pub const SWITCH_ALARM_LOG1: u8 = 68;
    /// `unitquery.switchAlarmLog2`.
    pub const SWITCH_ALARM_LOG2: u8 = 69;
    /// `unitquery.switchAlarmLog3`.
    pub const SWITCH_ALARM_LOG3: u8 = 70;
}

/// `product`/`info`/`config` subtree suffixes used by non-`unitquery`
/// bindings (SW version, host name, redundancy status).
pub mod other_subtrees {
    /// `product.name`.
    pub const PRODUCT_NAME: u8 = 1;
    /// `product.version`.
    pub const PRODUCT_VERSION: u8 = 2;
    /// `info.unitType`.
    pub const INFO_UNIT_TYPE: u8 = 1;
    /// `info.opMode`.
    pub const INFO_OP_MODE: u8 = 2;
    /// `info.paAVer` / `info.paBVer` / `info.paCVer`.
    pub const INFO_PA_VER: [u8; 3] = [4, 5, 6];
    /// `config.uplinkChain`.
    pub const CONFIG_UPLINK_CHAIN: u8 = 6;
}

/// The RS-485 source-address filter (`RS485.listenAddress`, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenAddress {
    /// Accept frames from any source.
    #[default]
    All,
    /// Accept frames only from this source nibble.
    One(u8),
}

impl ListenAddress {
    /// Whether a frame from `source` nibble passes the filter.
    #[must_use]
    pub fn accepts(self, source: u8) -> bool {
        match self {
            Self::All => true,
            Self::One(a) => a == (source & 0x0F),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_id_decodes_pa_addresses() {
        assert_eq!(UnitId::from_nibble(0xA), UnitId::PaA);
        assert_eq!(UnitId::from_nibble(0xB), UnitId::PaB);
        assert_eq!(UnitId::from_nibble(0xC), UnitId::PaC);
        assert_eq!(UnitId::from_nibble(0x0), UnitId::Other(0x0));
    }

    #[test]
    fn pa_suffix_table_matches_spec() {
        assert_eq!(pa_suffix(UnitId::PaA, Parameter::Status), Some(1));
        assert_eq!(pa_suffix(UnitId::PaA, Parameter::OutPower), Some(3));
        assert_eq!(pa_suffix(UnitId::PaA, Parameter::AlarmLog3), Some(64));

        assert_eq!(pa_suffix(UnitId::PaB, Parameter::Status), Some(2));
        assert_eq!(pa_suffix(UnitId::PaB, Parameter::OutPower), Some(20));
        assert_eq!(pa_suffix(UnitId::PaB, Parameter::AlarmLog3), Some(67));

        assert_eq!(pa_suffix(UnitId::PaC, Parameter::Status), Some(40));
        assert_eq!(pa_suffix(UnitId::PaC, Parameter::OutPower), Some(41));
        assert_eq!(pa_suffix(UnitId::PaC, Parameter::AlarmLog3), Some(76));
    }

    #[test]
    fn non_pa_units_have_no_suffix() {
        assert_eq!(pa_suffix(UnitId::Other(0x0), Parameter::Status), None);
    }

    #[test]
    fn listen_address_filter() {
        assert!(ListenAddress::All.accepts(0xB));
        assert!(ListenAddress::One(0xA).accepts(0xA));
        assert!(!ListenAddress::One(0xA).accepts(0xB));
    }
}
