//! Memory usage reporting: heap statistics and stack high-water mark.
//!
//! The stack measurement uses canary painting: an unused region of the
//! reserved stack extent is pre-filled with a marker byte at startup,
//! and the reporter later scans from the lowest address of the extent
//! upward until the first overwritten byte. On Cortex-M the stack grows
//! downward into the painted region, so the untouched span at the
//! bottom tells how deep the stack ever reached.
//!
//! The report must run on the execution context whose stack was
//! painted; reading it from another context yields a meaningless
//! number. That is caller responsibility and is not validated here.

use crate::console::Console;
use crate::sink::TransportSink;

/// Marker byte for stack painting.
pub const STACK_CANARY: u8 = 0xA5;

// =============================================================================
// Heap statistics
// =============================================================================

/// Point-in-time heap statistics from the active allocator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HeapStats {
    /// Bytes currently allocated.
    pub used: u32,
    /// Bytes currently free.
    pub free: u32,
    /// Size of the largest free block, a fragmentation indicator.
    pub largest_free_block: u32,
}

impl HeapStats {
    /// Total managed heap; `used + free == total` by construction.
    pub const fn total(&self) -> u32 { self.used.saturating_add(self.free) }
}

/// Adapter over the active allocator's statistics.
///
/// The query must not allocate or free: the measurement must not
/// perturb what it measures. `None` means the allocator has not been
/// initialized yet and renders as `unknown`, never as garbage.
pub trait HeapStatsSource {
    fn heap_stats(&self) -> Option<HeapStats>;
}

/// Source for firmware that runs without a heap allocator.
#[derive(Default)]
pub struct NoHeap;

impl HeapStatsSource for NoHeap {
    fn heap_stats(&self) -> Option<HeapStats> { None }
}

// =============================================================================
// Stack monitor
// =============================================================================

/// Canary-painted stack extent monitor.
///
/// Holds a raw pointer into the calling context's stack region, so it
/// is neither `Send` nor `Sync`: it stays on the context it measures.
pub struct StackMonitor {
    base: *mut u8,
    len: usize,
    painted: bool,
}

impl StackMonitor {
    /// Monitor `len` bytes of reserved stack starting at `base`, the
    /// lowest address of the extent.
    ///
    /// # Safety
    ///
    /// The region must stay valid for the monitor's lifetime and must
    /// be the currently-unused part of the calling context's reserved
    /// stack: painting it while live frames occupy it corrupts the
    /// stack.
    pub const unsafe fn new(
        base: *mut u8,
        len: usize,
    ) -> Self {
        Self {
            base,
            len,
            painted: false,
        }
    }

    /// Size of the monitored extent in bytes.
    pub const fn extent(&self) -> usize { self.len }

    /// Fill the extent with the canary pattern.
    pub fn paint(&mut self) {
        for offset in 0..self.len {
            // Volatile: the region aliases the live stack
            unsafe { self.base.add(offset).write_volatile(STACK_CANARY) };
        }
        self.painted = true;
    }

    /// Deepest stack usage in bytes since [`paint`](Self::paint), or
    /// `None` before it.
    ///
    /// Scans from the lowest address upward, bounded to the extent; the
    /// first non-canary byte ends the untouched span. A fully
    /// overwritten extent reports the full extent size.
    pub fn high_water(&self) -> Option<u32> {
        if !self.painted {
            return None;
        }

        let mut untouched = 0usize;
        while untouched < self.len {
            let byte = unsafe { self.base.add(untouched).read_volatile() };
            if byte != STACK_CANARY {
                break;
            }
            untouched += 1;
        }
        Some((self.len - untouched) as u32)
    }
}

// =============================================================================
// Snapshot and reporter
// =============================================================================

/// Read-only view of memory state at one instant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemorySnapshot {
    /// Allocator statistics, `None` while the allocator is
    /// uninitialized.
    pub heap: Option<HeapStats>,
    /// Deepest observed stack usage in bytes, `None` before painting.
    pub stack_high_water: Option<u32>,
    /// Size of the monitored stack extent in bytes.
    pub stack_extent: u32,
}

/// Collects [`MemorySnapshot`]s and renders them through the console.
pub struct MemoryReporter<H: HeapStatsSource> {
    heap: H,
    stack: StackMonitor,
}

impl<H: HeapStatsSource> MemoryReporter<H> {
    pub const fn new(
        heap: H,
        stack: StackMonitor,
    ) -> Self {
        Self { heap, stack }
    }

    /// Paint the stack extent. Call once at startup, before any report
    /// and before the stack grows into the monitored region.
    pub fn paint_stack(&mut self) { self.stack.paint(); }

    /// Collect a snapshot.
    ///
    /// Performs no allocation and is idempotent: repeated calls with no
    /// intervening allocation or deeper stack activity yield identical
    /// values.
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            heap: self.heap.heap_stats(),
            stack_high_water: self.stack.high_water(),
            stack_extent: self.stack.extent() as u32,
        }
    }

    /// Print the current memory usage through the console.
    ///
    /// Uninitialized state renders as the literal `unknown` rather than
    /// as ratios against zero. On ARM targets an extra line reports the
    /// current main stack pointer.
    #[cfg_attr(not(feature = "debug-console"), allow(unused_variables))]
    pub fn print<S: TransportSink>(
        &self,
        console: &mut Console<S>,
    ) {
        let snapshot = self.snapshot();

        if let Some(heap) = snapshot.heap {
            crate::log_fmt!(
                console,
                "heap: used={} free={} total={} largest={}",
                heap.used,
                heap.free,
                heap.total(),
                heap.largest_free_block
            );
        } else {
            crate::log_s!(console, "heap: unknown");
        }

        if let Some(high_water) = snapshot.stack_high_water {
            crate::log_fmt!(
                console,
                "stack: high water {}/{} bytes",
                high_water,
                snapshot.stack_extent
            );
        } else {
            crate::log_s!(console, "stack: unknown");
        }

        #[cfg(target_arch = "arm")]
        crate::log_fmt!(console, "sp=0x{:08X}", cortex_m::register::msp::read());
    }
}

// =============================================================================
// Tests
// =============================================================================
