//! Logging facade for the debug console.
//!
//! [`Console`] is the explicit context object behind the [`log_s!`],
//! [`log_fmt!`] and [`log_x!`] macros: constructed once at startup and
//! passed by reference into every diagnostic call site, instead of a
//! hidden global transport handle. Each call renders one
//! newline-terminated record into a bounded buffer and hands it to the
//! sink in a single write. Nothing is buffered across calls; a record
//! is fully written (or fully dropped) before the call returns.
//!
//! # Build-time toggle
//!
//! With the `debug-console` feature (the default) the macros forward to
//! the console. Without it the macro definitions themselves are swapped
//! for empty expansions: zero code and zero argument evaluation, so a
//! side-effecting expression passed as a logging argument never runs.
//!
//! # Usage
//!
//! ```ignore
//! let mut console = Console::new(RttSink);
//!
//! log_s!(console, "boot");
//! log_fmt!(console, "battery {} mV", millivolts);
//! log_x!(console, "TX", &frame);
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::sink::{LogChannel, RECORD_CAPACITY, TransportSink};

/// The logging facade context.
///
/// Holds the transport sink and the channel every record goes to. One
/// writer at a time: interrupt-context use requires external
/// serialization (see [`crate::sink`]).
pub struct Console<S: TransportSink> {
    sink: S,
    channel: LogChannel,
}

impl<S: TransportSink> Console<S> {
    /// Create a console writing to `sink` on the default channel.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            channel: LogChannel::DEFAULT,
        }
    }

    /// Create a console writing to a specific channel.
    pub const fn with_channel(
        sink: S,
        channel: LogChannel,
    ) -> Self {
        Self { sink, channel }
    }

    /// Write a literal string as one newline-terminated record.
    pub fn write_line(
        &mut self,
        text: &str,
    ) {
        self.render(format_args!("{text}"));
    }

    /// Write a formatted string as one newline-terminated record.
    pub fn write_fmt_line(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.render(args);
    }

    /// Access the sink, e.g. to read back a ring buffer.
    pub fn sink(&self) -> &S { &self.sink }

    /// Render one record and hand it to the sink in a single write.
    ///
    /// Overlong records are truncated but keep the trailing newline, so
    /// a truncated record still terminates cleanly on the console.
    fn render(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut buf: String<RECORD_CAPACITY> = String::new();
        let _ = write!(Truncating(&mut buf), "{args}"); // Err means truncated, emit anyway
        if buf.push('\n').is_err() {
            buf.pop();
            buf.push('\n').ok();
        }
        self.sink.write(self.channel, &buf);
    }
}

/// Writer that fills the record buffer and stops at capacity, keeping
/// what fit instead of rejecting the whole chunk.
struct Truncating<'a>(&'a mut String<RECORD_CAPACITY>);

impl fmt::Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                // Full: stop the formatter, the partial record stands
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

// =============================================================================
// One-time hardware console (ARM targets)
// =============================================================================

/// Construct the process-wide hardware console, once.
///
/// Returns the console on the first call and `None` on every call after
/// it. The returned reference is `'static`: set once at startup, shared
/// everywhere after.
#[cfg(target_arch = "arm")]
pub fn init_console() -> Option<&'static mut Console<crate::sink::RttSink>> {
    use static_cell::StaticCell;

    static CONSOLE: StaticCell<Console<crate::sink::RttSink>> = StaticCell::new();
    CONSOLE.try_init(Console::new(crate::sink::RttSink))
}

// =============================================================================
// Logging macros
// =============================================================================

/// Write a literal string to the debug console.
///
/// Expands to nothing without the `debug-console` feature.
#[cfg(feature = "debug-console")]
#[macro_export]
macro_rules! log_s {
    ($console:expr, $text:expr) => {
        $console.write_line($text)
    };
}

/// Write a literal string to the debug console.
///
/// Expands to nothing without the `debug-console` feature.
#[cfg(not(feature = "debug-console"))]
#[macro_export]
macro_rules! log_s {
    ($console:expr, $text:expr) => {};
}

/// Write a formatted string to the debug console.
///
/// Arguments are checked by `format_args!` at compile time. Expands to
/// nothing without the `debug-console` feature; the argument
/// expressions are then never evaluated.
#[cfg(feature = "debug-console")]
#[macro_export]
macro_rules! log_fmt {
    ($console:expr, $($arg:tt)*) => {
        $console.write_fmt_line(::core::format_args!($($arg)*))
    };
}

/// Write a formatted string to the debug console.
///
/// Arguments are checked by `format_args!` at compile time. Expands to
/// nothing without the `debug-console` feature; the argument
/// expressions are then never evaluated.
#[cfg(not(feature = "debug-console"))]
#[macro_export]
macro_rules! log_fmt {
    ($console:expr, $($arg:tt)*) => {};
}

/// Write a labeled hex dump of a byte buffer to the debug console.
///
/// Expands to nothing without the `debug-console` feature.
#[cfg(feature = "debug-console")]
#[macro_export]
macro_rules! log_x {
    ($console:expr, $prefix:expr, $bytes:expr) => {
        $crate::hex::log_hex_dump(&mut $console, $prefix, $bytes)
    };
}

/// Write a labeled hex dump of a byte buffer to the debug console.
///
/// Expands to nothing without the `debug-console` feature.
#[cfg(not(feature = "debug-console"))]
#[macro_export]
macro_rules! log_x {
    ($console:expr, $prefix:expr, $bytes:expr) => {};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "debug-console"))]
mod tests {
    use super::*;
    use crate::sink::VecSink;

    #[test]
    fn test_write_line_terminates_with_newline() {
        let mut console = Console::new(VecSink::default());
        console.write_line("boot");
        assert_eq!(console.sink().records, ["boot\n"]);
    }

    #[test]
    fn test_log_macros_forward_to_sink() {
        let mut console = Console::new(VecSink::default());
        crate::log_s!(console, "startup");
        crate::log_fmt!(console, "battery {} mV", 2987);
        assert_eq!(console.sink().records, ["startup\n", "battery 2987 mV\n"]);
    }

    #[test]
    fn test_one_sink_write_per_record() {
        let mut console = Console::new(VecSink::default());
        crate::log_fmt!(console, "a={} b={}", 1, 2);
        assert_eq!(console.sink().records.len(), 1);
    }

    #[test]
    fn test_truncated_record_keeps_newline() {
        let mut console = Console::new(VecSink::default());
        let long = "y".repeat(RECORD_CAPACITY * 2);
        console.write_line(&long);
        let record = &console.sink().records[0];
        assert_eq!(record.len(), RECORD_CAPACITY);
        assert!(record.ends_with('\n'));
    }

    #[test]
    fn test_channel_is_passed_through() {
        struct ChannelCheck(Option<LogChannel>);
        impl TransportSink for ChannelCheck {
            fn write(
                &mut self,
                channel: LogChannel,
                _text: &str,
            ) {
                self.0 = Some(channel);
            }
        }

        let mut console = Console::with_channel(ChannelCheck(None), LogChannel(2));
        console.write_line("hello");
        assert_eq!(console.sink().0, Some(LogChannel(2)));
    }
}

#[cfg(all(test, not(feature = "debug-console")))]
mod disabled_tests {
    use super::Console;
    use crate::sink::RingSink;

    /// The zero-cost contract: disabled macros produce no output and
    /// never evaluate their argument expressions, side effects included.
    #[test]
    fn test_disabled_macros_skip_work_and_arguments() {
        let mut console = Console::new(RingSink::<8>::new());
        let mut evaluations = 0u32;

        for _ in 0..10 {
            crate::log_s!(console, "never");
            crate::log_fmt!(console, "count {}", {
                evaluations += 1;
                evaluations
            });
            crate::log_x!(console, "TX", {
                evaluations += 1;
                &[0u8; 4][..]
            });
        }

        assert_eq!(evaluations, 0);
        assert!(console.sink().is_empty());
    }
}
