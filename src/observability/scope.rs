//! ObservationScope for per-call codec logging
//!
//! - Logs the outcome event when the call completes or fails
//! - Warns on drop if neither happened (an early return that skipped both)

use std::cell::Cell;

use super::events::Event;
use super::logger::Logger;

/// A scope wrapped around one serialize or deserialize call.
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::new("deserialize", "User");
/// // ... do work ...
/// scope.complete(Event::DeserializeComplete);
/// ```
pub struct ObservationScope<'a> {
    operation: &'a str,
    record: &'a str,
    completed: Cell<bool>,
}

impl<'a> ObservationScope<'a> {
    /// Open a scope for `operation` on the named record type
    pub fn new(operation: &'a str, record: &'a str) -> Self {
        Self {
            operation,
            record,
            completed: Cell::new(false),
        }
    }

    /// Mark the call as successful
    pub fn complete(self, event: Event) {
        self.completed.set(true);
        self.emit(event, &[]);
    }

    /// Mark the call as failed, attaching the error's code, path and message
    pub fn fail(self, event: Event, code: &str, field_path: &str, message: &str) {
        self.completed.set(true);
        self.emit(
            event,
            &[("code", code), ("field", field_path), ("message", message)],
        );
    }

    /// Check if the scope has been closed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn emit(&self, event: Event, extra: &[(&str, &str)]) {
        if !Logger::enabled(event.severity()) {
            return;
        }
        let mut fields = vec![("operation", self.operation), ("record", self.record)];
        fields.extend(extra.iter().copied().filter(|(_, v)| !v.is_empty()));
        Logger::log(event.severity(), event.as_str(), &fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                "SCOPE_INCOMPLETE",
                &[
                    ("operation", self.operation),
                    ("reason", "scope dropped without completion"),
                    ("record", self.record),
                ],
            );
        }
    }
}
