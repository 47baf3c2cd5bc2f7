use thiserror::Error;

/// timegrid error types
#[derive(Error, Debug)]
pub enum TimegridError {
    /// Failed to parse a schedule, room directory, or config payload
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Day/slot catalog violates its ordering invariants
    #[error("catalog error: {0}")]
    Catalog(String),

    /// HTTP fetch from an external collaborator failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for timegrid
pub type Result<T> = std::result::Result<T, TimegridError>;

/// Lookup failures against the slot catalog.
///
/// These never escape the core as hard errors; callers fall back or record
/// an exclusion instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("slot label not in catalog: {0:?}")]
    NotFound(String),

    #[error("slot index {index} out of range (catalog has {len} slots)")]
    OutOfRange { index: usize, len: usize },

    #[error("day label not in catalog: {0:?}")]
    UnknownDay(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TimegridError::Parse("invalid json".into());
        assert_eq!(err.to_string(), "parse error: invalid json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TimegridError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_slot_error_display() {
        let err = SlotError::OutOfRange { index: 40, len: 30 };
        assert_eq!(
            err.to_string(),
            "slot index 40 out of range (catalog has 30 slots)"
        );
        assert_eq!(
            SlotError::NotFound("12:00-12:30".into()).to_string(),
            "slot label not in catalog: \"12:00-12:30\""
        );
    }
}
