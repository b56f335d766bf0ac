//! Debug console and diagnostics for the BLE keyfob firmware.
//!
//! Provides the pieces a live debug console needs on a constrained
//! target:
//!
//! - [`console`]: the logging facade behind [`log_s!`], [`log_fmt!`] and
//!   [`log_x!`], compiled away entirely without the `debug-console`
//!   feature
//! - [`sink`]: transport sinks (RTT on hardware, ring buffer, stub)
//! - [`hex`]: labeled hex dump rendering for [`log_x!`]
//! - [`memory`]: heap statistics and canary-based stack high-water mark
//! - [`config`]: static BLE service access configuration (data only)
//!
//! # Testing
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the actual firmware links this crate
//! as `no_std`:
//! ```bash
//! cargo test                        # console enabled (default)
//! cargo test --no-default-features  # console compiled away
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hex;
pub mod memory;
pub mod sink;

// Re-export at top level for call-site convenience
pub use console::Console;
#[cfg(target_arch = "arm")]
pub use console::init_console;
pub use hex::{BYTES_PER_LINE, log_hex_dump};
pub use memory::{
    HeapStats,
    HeapStatsSource,
    MemoryReporter,
    MemorySnapshot,
    NoHeap,
    StackMonitor,
};
#[cfg(target_arch = "arm")]
pub use sink::RttSink;
pub use sink::{LogChannel, NullSink, RingSink, TransportSink};
