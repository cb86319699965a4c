//! Scoped document buffer
//!
//! Acquiring a buffer records its capacity with the accounting sink;
//! dropping it records the release. Every exit path of a codec call,
//! early returns included, therefore leaves the running total unchanged.

use crate::observability::{log_event, AllocationAccounting, Event};
use crate::schema::{SchemaError, SchemaResult};

/// Fixed-capacity document buffer guard
pub struct DocumentBuffer<'a> {
    capacity: usize,
    accounting: &'a dyn AllocationAccounting,
}

impl<'a> DocumentBuffer<'a> {
    /// Acquire a buffer of `capacity` bytes
    pub fn acquire(capacity: usize, accounting: &'a dyn AllocationAccounting) -> Self {
        accounting.record_allocation(capacity);
        Self {
            capacity,
            accounting,
        }
    }

    /// Buffer size in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check that a document of `len` bytes fits.
    ///
    /// # Errors
    ///
    /// `BUFFER_OVERFLOW` when `len` exceeds the capacity.
    pub fn ensure_fits(&self, len: usize) -> SchemaResult<()> {
        if len > self.capacity {
            let needed = len.to_string();
            let capacity = self.capacity.to_string();
            log_event(
                Event::BufferOverflow,
                &[("capacity", capacity.as_str()), ("needed", needed.as_str())],
            );
            return Err(SchemaError::buffer_overflow(len, self.capacity));
        }
        Ok(())
    }

    /// Check that input text of `len` bytes can be parsed into the buffer.
    ///
    /// # Errors
    ///
    /// `INVALID_JSON` when `len` exceeds the capacity; the document cannot
    /// be parsed at all.
    pub fn ensure_parsable(&self, len: usize) -> SchemaResult<()> {
        if len > self.capacity {
            return Err(SchemaError::invalid_json(format!(
                "Parse error: document needs {} bytes, capacity is {}",
                len, self.capacity
            )));
        }
        Ok(())
    }
}

impl Drop for DocumentBuffer<'_> {
    fn drop(&mut self) {
        self.accounting.record_deallocation(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemoryTracker;
    use crate::schema::ErrorKind;

    #[test]
    fn test_acquire_and_release() {
        let tracker = MemoryTracker::new();
        {
            let buffer = DocumentBuffer::acquire(512, &tracker);
            assert_eq!(buffer.capacity(), 512);
            assert_eq!(tracker.current(), 512);
        }
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.peak(), 512);
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(tracker: &MemoryTracker) -> SchemaResult<()> {
            let buffer = DocumentBuffer::acquire(64, tracker);
            buffer.ensure_fits(65)?;
            Ok(())
        }

        let tracker = MemoryTracker::new();
        let err = fails(&tracker).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferOverflow);
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn test_exact_fit_allowed() {
        let tracker = MemoryTracker::new();
        let buffer = DocumentBuffer::acquire(16, &tracker);
        assert!(buffer.ensure_fits(16).is_ok());
        assert!(buffer.ensure_parsable(16).is_ok());
    }

    #[test]
    fn test_oversized_input_is_unparsable() {
        let tracker = MemoryTracker::new();
        let buffer = DocumentBuffer::acquire(8, &tracker);
        let err = buffer.ensure_parsable(9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidJson);
        assert!(err.message().starts_with("Parse error: "));
        assert!(err.field_path().is_empty());
    }
}
