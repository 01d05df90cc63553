/// Crate-level error type for the timefreq conversion library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid parameter value: malformed note or key text, or an
    /// inconsistent combination of formatting options.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Frequency weighting kind not present in the weighting table.
    #[error("unknown frequency weighting kind `{kind}` (expected one of A, B, C, D, Z)")]
    UnknownWeighting { kind: String },

    /// Input array has incorrect shape for the operation.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for timefreq operations.
pub type Result<T> = std::result::Result<T, Error>;
