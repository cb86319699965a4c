//! Allocation accounting for document buffers
//!
//! Advisory only: tracks outstanding document buffer bytes and the
//! high-water mark so memory-constrained deployments can size buffers.
//! Nothing in validation or marshalling depends on these numbers.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Sink for document buffer accounting.
///
/// Implementations must never fail and must never let the running total
/// go below zero.
pub trait AllocationAccounting: Send + Sync {
    /// Record `bytes` acquired
    fn record_allocation(&self, bytes: usize);

    /// Record `bytes` released
    fn record_deallocation(&self, bytes: usize);

    /// Current point-in-time figures
    fn stats(&self) -> MemoryStats;
}

/// Atomic allocation tracker.
///
/// Uses Relaxed ordering; the figures are observational.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    /// Outstanding bytes
    current: AtomicUsize,
    /// Highest value `current` has reached
    peak: AtomicUsize,
}

impl MemoryTracker {
    /// Create a tracker with both counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide tracker used by the default codec
    pub fn global() -> &'static MemoryTracker {
        static GLOBAL: OnceLock<MemoryTracker> = OnceLock::new();
        GLOBAL.get_or_init(MemoryTracker::new)
    }

    /// Outstanding bytes
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// High-water mark
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

impl AllocationAccounting for MemoryTracker {
    fn record_allocation(&self, bytes: usize) {
        let total = self
            .current
            .fetch_add(bytes, Ordering::Relaxed)
            .saturating_add(bytes);
        self.peak.fetch_max(total, Ordering::Relaxed);
    }

    fn record_deallocation(&self, bytes: usize) {
        // Saturate at zero: an unmatched release leaves the total untouched
        let _ = self
            .current
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                cur.checked_sub(bytes)
            });
    }

    fn stats(&self) -> MemoryStats {
        MemoryStats {
            current: self.current(),
            peak: self.peak(),
        }
    }
}

/// A point-in-time snapshot of allocation accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub current: usize,
    pub peak: usize,
}

impl MemoryStats {
    /// Render as a JSON object
    pub fn to_json(&self) -> String {
        format!(r#"{{"current":{},"peak":{}}}"#, self.current, self.peak)
    }
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Memory - Current: {} bytes, Peak: {} bytes",
            self.current, self.peak
        )
    }
}
