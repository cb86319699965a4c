//! Observability subsystem for structa
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Typed codec events
//! - Document buffer allocation accounting
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation or marshalling results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use structa::observability::{AllocationAccounting, Logger, MemoryTracker, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! println!("{}", MemoryTracker::global().stats());
//! ```

mod events;
mod logger;
mod memory;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, DEFAULT_MIN_SEVERITY};
pub use memory::{AllocationAccounting, MemoryStats, MemoryTracker};
pub use scope::ObservationScope;

/// Log a codec event with fields at the event's own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::ConfigLoaded, &[("document_capacity", "512")]);
        log_event(Event::BufferOverflow, &[]);
    }
}
