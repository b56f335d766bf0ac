//! Transport sinks for the debug console.
//!
//! A [`TransportSink`] is the channel that ultimately receives diagnostic
//! text: the RTT link on hardware, a ring buffer for an on-device log
//! screen, or a stub that swallows everything. A sink accepts one
//! complete record per call and may silently drop it; it never blocks
//! indefinitely and never corrupts records it already accepted.
//!
//! Formatted records are rendered by the console into a bounded buffer
//! before they reach the sink, so `write` only ever sees finished text.
//!
//! # Reentrancy
//!
//! Sinks assume a single writer. Callers on interrupt contexts must
//! serialize through a critical section or an external queue before
//! reaching the sink.

use heapless::{Deque, String};

/// Capacity of one rendered record, including the trailing newline.
///
/// Large enough for a full 16-byte hex dump line with a short prefix.
/// Overlong records are truncated, never split across sink writes.
pub const RECORD_CAPACITY: usize = 96;

/// Identifier selecting a transport endpoint.
///
/// Maps to RTT up-channel numbers on hardware. Whether the facility is
/// active at all is resolved at build time by the `debug-console`
/// feature, not per channel at runtime.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogChannel(pub u8);

impl LogChannel {
    /// Up-channel 0, the conventional terminal channel.
    pub const DEFAULT: Self = Self(0);
}

/// The debug output channel.
pub trait TransportSink {
    /// Write one record, or drop it silently if the sink is full.
    ///
    /// The record is accepted or dropped as a whole before the call
    /// returns; nothing is buffered across calls.
    fn write(
        &mut self,
        channel: LogChannel,
        text: &str,
    );
}

// =============================================================================
// Stub sink
// =============================================================================

/// Sink that accepts and discards everything.
///
/// Stands in for an unavailable or uninitialized transport: writes are
/// defined no-ops rather than invalid-handle dereferences.
#[derive(Default)]
pub struct NullSink;

impl TransportSink for NullSink {
    fn write(
        &mut self,
        _channel: LogChannel,
        _text: &str,
    ) {
    }
}

// =============================================================================
// Ring buffer sink
// =============================================================================

/// Ring buffer sink retaining the last `N` records.
///
/// Backs an on-device log screen and serves as the capture sink in host
/// tests. When full the oldest record is dropped to make room and the
/// eviction is counted.
pub struct RingSink<const N: usize> {
    records: Deque<String<RECORD_CAPACITY>, N>,
    dropped: u32,
}

impl<const N: usize> RingSink<N> {
    /// Create a new empty ring sink.
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
            dropped: 0,
        }
    }

    /// Number of records evicted to make room for newer ones.
    pub const fn dropped(&self) -> u32 { self.dropped }

    /// Number of retained records.
    pub const fn len(&self) -> usize { self.records.len() }

    /// Check if the sink holds no records.
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.records.iter().map(|s| s.as_str()) }
}

impl<const N: usize> Default for RingSink<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> TransportSink for RingSink<N> {
    fn write(
        &mut self,
        _channel: LogChannel,
        text: &str,
    ) {
        if self.records.is_full() {
            self.records.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }

        // Truncate record if too long
        let mut record: String<RECORD_CAPACITY> = String::new();
        for c in text.chars() {
            if record.push(c).is_err() {
                break;
            }
        }

        self.records.push_back(record).ok();
    }
}

// =============================================================================
// RTT sink (hardware targets)
// =============================================================================

#[cfg(target_arch = "arm")]
use defmt_rtt as _;

/// RTT sink for hardware targets.
///
/// Forwards each record over the defmt RTT link on up-channel 0. defmt
/// frames are line oriented, so the trailing newline added by the
/// console is stripped before transmission. If the host-side probe is
/// not draining the RTT buffer, full records are dropped by the link
/// rather than blocking the firmware.
///
/// Not reentrant: do not call from interrupt context without external
/// serialization.
#[cfg(target_arch = "arm")]
pub struct RttSink;

#[cfg(target_arch = "arm")]
impl TransportSink for RttSink {
    fn write(
        &mut self,
        _channel: LogChannel,
        text: &str,
    ) {
        defmt::println!("{=str}", text.trim_end_matches('\n'));
    }
}

// =============================================================================
// Test capture sink
// =============================================================================

/// Unbounded capture sink for host tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct VecSink {
    pub records: Vec<std::string::String>,
}

#[cfg(test)]
impl TransportSink for VecSink {
    fn write(
        &mut self,
        _channel: LogChannel,
        text: &str,
    ) {
        self.records.push(text.to_owned());
    }
}

// =============================================================================
// Tests
// =============================================================================
