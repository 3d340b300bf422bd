//! Error types for registry operations.

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for registry operations.
///
/// The registry has exactly one checked failure category: a caller handed in
/// an argument the operation cannot accept. Everything else is either a
/// silent no-op by contract or a bug.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_displays_reason() {
        let err = Error::InvalidArgument("user_id must be non-empty".to_string());
        assert_eq!(err.to_string(), "invalid argument: user_id must be non-empty");
    }
}
