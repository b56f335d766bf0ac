//! Hex dump rendering for the [`log_x!`] macro.
//!
//! Renders a byte buffer as uppercase two-digit hex pairs, 16 bytes per
//! line, each line re-prefixed with the caller's label:
//!
//! ```text
//! TX 00 FF 10
//! ```
//!
//! Lines stream through the console's bounded record buffer one at a
//! time, so working memory stays O([`BYTES_PER_LINE`]) no matter how
//! large the buffer is. The buffer itself is a borrowed view: never
//! mutated, never retained past the call, never read out of bounds.

use core::fmt;

use crate::console::Console;
use crate::sink::TransportSink;

/// Bytes rendered per output line; the final line may be shorter.
pub const BYTES_PER_LINE: usize = 16;

/// Maximum dump length, the 16-bit bound of the transport API.
pub const MAX_DUMP_LEN: usize = u16::MAX as usize;

/// Dump `bytes` as labeled hex lines through the console.
///
/// An empty buffer emits exactly one record containing only the prefix,
/// with no trailing separator. Buffers longer than [`MAX_DUMP_LEN`] are
/// trimmed to it.
pub fn log_hex_dump<S: TransportSink>(
    console: &mut Console<S>,
    prefix: &str,
    bytes: &[u8],
) {
    dump_with_width(console, prefix, bytes, BYTES_PER_LINE);
}

/// Dump with an explicit line width. A width of zero falls back to one.
pub(crate) fn dump_with_width<S: TransportSink>(
    console: &mut Console<S>,
    prefix: &str,
    bytes: &[u8],
    width: usize,
) {
    let bytes = &bytes[..bytes.len().min(MAX_DUMP_LEN)];
    if bytes.is_empty() {
        console.write_line(prefix);
        return;
    }

    for chunk in bytes.chunks(width.max(1)) {
        console.write_fmt_line(format_args!("{} {}", prefix, HexPairs(chunk)));
    }
}

/// Display adapter rendering one chunk as space-separated hex pairs.
struct HexPairs<'a>(&'a [u8]);

impl fmt::Display for HexPairs<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for byte in self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "debug-console"))]
mod tests {
    use super::*;
    use crate::sink::VecSink;

    fn dump(
        prefix: &str,
        bytes: &[u8],
    ) -> Vec<std::string::String> {
        let mut console = Console::new(VecSink::default());
        log_hex_dump(&mut console, prefix, bytes);
        console.sink().records.clone()
    }

    /// Decode "<prefix> AA BB ...\n" records back into the raw bytes.
    fn decode(
        prefix: &str,
        records: &[std::string::String],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        for record in records {
            let payload = record
                .strip_prefix(prefix)
                .unwrap()
                .trim_end_matches('\n')
                .trim_start();
            for pair in payload.split(' ').filter(|p| !p.is_empty()) {
                bytes.push(u8::from_str_radix(pair, 16).unwrap());
            }
        }
        bytes
    }

    #[test]
    fn test_single_line_dump() {
        assert_eq!(dump("TX", &[0x00, 0xFF, 0x10]), ["TX 00 FF 10\n"]);
    }

    #[test]
    fn test_empty_buffer_emits_prefix_only() {
        assert_eq!(dump("RX", &[]), ["RX\n"]);
    }

    #[test]
    fn test_twenty_bytes_wrap_into_two_lines() {
        let bytes: Vec<u8> = (0..20).collect();
        let records = dump("RX", &bytes);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            "RX 00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F\n"
        );
        assert_eq!(records[1], "RX 10 11 12 13\n");
    }

    #[test]
    fn test_full_line_has_no_trailing_separator() {
        let records = dump("D", &[0xAB; 16]);
        assert_eq!(records.len(), 1);
        assert!(records[0].ends_with("AB\n"));
        assert!(!records[0].contains(" \n"));
    }

    #[test]
    fn test_line_count_and_roundtrip() {
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 160, 1000] {
            // Deterministic pseudo-random content
            let mut state = 0x2F6E_2B1Du32;
            let bytes: Vec<u8> = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    (state >> 24) as u8
                })
                .collect();

            let records = dump("P", &bytes);
            let expected_lines = if len == 0 { 1 } else { len.div_ceil(BYTES_PER_LINE) };
            assert_eq!(records.len(), expected_lines, "len {len}");
            assert_eq!(decode("P", &records), bytes, "len {len}");
        }
    }

    #[test]
    fn test_custom_width() {
        let mut console = Console::new(VecSink::default());
        dump_with_width(&mut console, "W", &[1, 2, 3, 4, 5], 2);
        assert_eq!(
            console.sink().records,
            ["W 01 02\n", "W 03 04\n", "W 05\n"]
        );
    }

    #[test]
    fn test_oversized_buffer_is_trimmed_to_u16_bound() {
        let bytes = vec![0x5Au8; MAX_DUMP_LEN + 100];
        let records = dump("L", &bytes);
        assert_eq!(records.len(), MAX_DUMP_LEN.div_ceil(BYTES_PER_LINE));
        // 65535 = 4095 full lines + 15 bytes on the last
        assert_eq!(records.last().unwrap().matches(' ').count(), 15);
    }
}
