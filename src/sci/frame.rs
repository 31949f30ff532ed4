//! SCI wire framing: `STX | dest_src | cmd|len | payload... | crc | ETX`.
//!
//! The chassis and its peripheral units emit frames asynchronously on a
//! shared RS-485 line. [`FrameDecoder`] turns an arbitrary byte stream into
//! a sequence of validated [`SciFrame`]s, resynchronizing past corrupted or
//! truncated frames without losing its place in the stream.

use crate::error::BridgeError;

/// Start-of-frame sentinel.
pub const STX: u8 = 0x7E;
/// End-of-frame sentinel.
pub const ETX: u8 = 0x7F;

/// A validated SCI frame.
///
/// `dest_src` is kept in its packed wire form; [`SciFrame::source`] and
/// [`SciFrame::dest`] decode the nibbles. `cmd`/`len` are already unpacked
/// from the second header byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SciFrame {
    dest_src: u8,
    cmd: u8,
    payload: Vec<u8>,
}

impl SciFrame {
    /// Low nibble of the dest/src byte: the originating unit's address.
    #[must_use]
    pub fn source(&self) -> u8 {
        self.dest_src & 0x0F
    }

    /// High nibble of the dest/src byte: the addressed destination.
    #[must_use]
    pub fn dest(&self) -> u8 {
        (self.dest_src >> 4) & 0x0F
    }

    /// High nibble of the second header byte.
    #[must_use]
    pub fn cmd(&self) -> u8 {
        self.cmd
    }

    /// Frame payload, `len` bytes as declared on the wire.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Computes the SCI CRC: XOR of every byte strictly between STX and the CRC
/// byte (i.e. `dest_src`, the packed `cmd|len` byte, and the payload), then
/// bitwise complement.
fn crc(dest_src: u8, cmd_len: u8, payload: &[u8]) -> u8 {
    let mut acc = dest_src ^ cmd_len;
    for &b in payload {
        acc ^= b;
    }
    !acc
}

/// Incremental SCI frame decoder.
///
/// Feed bytes via [`FrameDecoder::feed`] and extract complete, CRC-valid
/// frames. Handles partial reads and resynchronizes after a corrupted or
/// truncated frame without discarding bytes that belong to a later,
/// well-formed frame.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    /// Creates a new decoder with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feeds bytes into the decoder and extracts all complete frames.
    ///
    /// Returns the frames found in order, followed by a list of framing
    /// errors encountered along the way (wrong ETX, CRC mismatch). A framing
    /// error never blocks subsequent frames in the same `feed` call: on
    /// failure only the leading STX is discarded and the scan resumes from
    /// the next STX in the buffer.
    pub fn feed(&mut self, bytes: &[u8]) -> (Vec<SciFrame>, Vec<BridgeError>) {
        self.buf.extend_from_slice(bytes);
        let mut frames = Vec::new();
        let mut errors = Vec::new();

        loop {
            // Discard leading bytes until STX.
            match self.buf.iter().position(|&b| b == STX) {
                Some(0) => {}
                Some(stx_pos) => {
                    self.buf.drain(..stx_pos);
                }
                None => {
                    self.buf.clear();
                    break;
                }
            }

            // Need STX + dest_src + cmd_len to know the declared length.
            if self.buf.len() < 3 {
                break;
            }

            let dest_src = self.buf[1];
            let cmd_len = self.buf[2];
            let len = (cmd_len & 0x0F) as usize;
            let total = len + 5;

            if self.buf.len() < total {
                break; // wait for more bytes
            }

            let etx_ok = self.buf[total - 1] == ETX;
            let declared_crc = self.buf[total - 2];
            let payload = &self.buf[3..3 + len];
            let computed_crc = crc(dest_src, cmd_len, payload);

            if etx_ok && computed_crc == declared_crc {
                frames.push(SciFrame {
                    dest_src,
                    cmd: (cmd_len >> 4) & 0x0F,
                    payload: payload.to_vec(),
                });
                self.buf.drain(..total);
            } else {
                errors.push(if !etx_ok {
                    BridgeError::Frame("missing ETX at declared frame boundary".into())
                } else {
                    BridgeError::Frame(format!(
                        "CRC mismatch: expected {declared_crc:#04x}, computed {computed_crc:#04x}"
                    ))
                });
                // Forward progress: drop only the leading STX, rescan.
                self.buf.drain(..1);
            }
        }

        (frames, errors)
    }

    /// Returns `true` if the decoder is holding an incomplete frame.
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_frame(dest_src: u8, cmd: u8, payload: &[u8]) -> Vec<u8> {
        let cmd_len = (cmd << 4) | (payload.len() as u8 & 0x0F);
        let c = crc(dest_src, cmd_len, payload);
        let mut out = vec![STX, dest_src, cmd_len];
        out.extend_from_slice(payload);
        out.push(c);
        out.push(ETX);
        out
    }

    #[test]
    fn decodes_single_valid_frame() {
        let wire = build_frame(0xA0, 0x8, &[0xFF, 0x09, 1, 2, 3]);
        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire);
        assert!(errors.is_empty());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].source(), 0xA);
        assert_eq!(frames[0].dest(), 0x0);
        assert_eq!(frames[0].cmd(), 0x8);
        assert_eq!(frames[0].payload(), &[0xFF, 0x09, 1, 2, 3]);
        assert!(!dec.has_partial());
    }

    #[test]
    fn len_zero_frame_is_valid() {
        let wire = build_frame(0xAB, 0xE, &[]);
        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire);
        assert!(errors.is_empty());
        assert_eq!(frames.len(), 1);
        assert!(frames[0].payload().is_empty());
    }

    #[test]
    fn max_length_frame_is_20_bytes() {
        let payload = [0u8; 15];
        let wire = build_frame(0xAB, 0x8, &payload);
        assert_eq!(wire.len(), 20);
        let mut dec = FrameDecoder::new();
        let (frames, _) = dec.feed(&wire);
        assert_eq!(frames[0].payload().len(), 15);
    }

    #[test]
    fn corrupted_crc_is_discarded_and_next_frame_still_decodes() {
        let mut wire = build_frame(0xA0, 0x8, &[0xFF, 0x09, 1, 2, 3]);
        // Flip a payload bit so CRC no longer matches.
        wire[4] ^= 0x01;
        wire.extend_from_slice(&build_frame(0xB0, 0x8, &[0xFF, 0x09]));

        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].source(), 0xB);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn resyncs_past_garbage_prefix_and_suffix() {
        let mut wire = vec![0xAA, 0xBB, 0xCC];
        wire.extend_from_slice(&build_frame(0xA1, 0xE, &[0x01]));
        wire.push(0xDD);

        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire);
        assert_eq!(frames.len(), 1);
        assert!(errors.is_empty());
        // Trailing 0xDD is not STX, so it's held as a dangling partial.
        assert!(dec.has_partial());
    }

    #[test]
    fn partial_frame_reassembles_across_feeds() {
        let wire = build_frame(0xA0, 0x8, &[0xFF, 0x00, 1, 2, 3, 4, 5, 6, 7, 8]);
        let mid = wire.len() / 2;

        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire[..mid]);
        assert!(frames.is_empty());
        assert!(errors.is_empty());
        assert!(dec.has_partial());

        let (frames, errors) = dec.feed(&wire[mid..]);
        assert_eq!(frames.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn byte_at_a_time_decodes_eventually() {
        let wire = build_frame(0xC0, 0xF, &[0x01, 0x02]);
        let mut dec = FrameDecoder::new();
        let mut total_frames = Vec::new();
        for byte in &wire {
            let (frames, _) = dec.feed(std::slice::from_ref(byte));
            total_frames.extend(frames);
        }
        assert_eq!(total_frames.len(), 1);
    }

    #[test]
    fn multiple_frames_in_a_single_feed() {
        let mut wire = build_frame(0xA0, 0x8, &[0xFF, 0x04]);
        wire.extend_from_slice(&build_frame(0xB0, 0x8, &[0xFF, 0x04]));
        wire.extend_from_slice(&build_frame(0xC0, 0x8, &[0xFF, 0x04]));

        let mut dec = FrameDecoder::new();
        let (frames, errors) = dec.feed(&wire);
        assert_eq!(frames.len(), 3);
        assert!(errors.is_empty());
        assert_eq!(frames[0].source(), 0xA);
        assert_eq!(frames[1].source(), 0xB);
        assert_eq!(frames[2].source(), 0xC);
    }

    #[test]
    fn crc_matches_hand_computed_value() {
        // dest_src=0xA0, cmd_len = (0x8<<4)|2 = 0x82, payload=[0x11,0x22]
        let expected = !(0xA0u8 ^ 0x82 ^ 0x11 ^ 0x22);
        assert_eq!(crc(0xA0, 0x82, &[0x11, 0x22]), expected);
    }
}
