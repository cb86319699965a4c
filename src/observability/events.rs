//! Observable codec events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Events emitted by the serializer and deserializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Record rendered to text
    SerializeComplete,
    /// Record could not be rendered
    SerializeFailed,
    /// Text parsed and populated into a record
    DeserializeComplete,
    /// Text failed parsing or validation
    DeserializeRejected,
    /// Document exceeded the fixed buffer capacity
    BufferOverflow,
    /// Codec configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SerializeComplete => "SERIALIZE_COMPLETE",
            Event::SerializeFailed => "SERIALIZE_FAILED",
            Event::DeserializeComplete => "DESERIALIZE_COMPLETE",
            Event::DeserializeRejected => "DESERIALIZE_REJECTED",
            Event::BufferOverflow => "BUFFER_OVERFLOW",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SerializeComplete | Event::DeserializeComplete => Severity::Trace,
            Event::ConfigLoaded => Severity::Info,
            Event::SerializeFailed | Event::DeserializeRejected | Event::BufferOverflow => {
                Severity::Warn
            }
        }
    }

    /// Whether this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        self.severity() >= Severity::Warn
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SerializeFailed.as_str(), "SERIALIZE_FAILED");
        assert_eq!(Event::DeserializeRejected.to_string(), "DESERIALIZE_REJECTED");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::BufferOverflow.is_failure());
        assert!(Event::DeserializeRejected.is_failure());
        assert!(!Event::SerializeComplete.is_failure());
        assert!(!Event::ConfigLoaded.is_failure());
    }
}
