//! Error types for filter parsing.

/// Errors raised while parsing user-supplied platform filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A pair token that is not exactly `os/arch`.
    #[error("invalid platform syntax: {token} should be os/arch")]
    MalformedPair {
        /// The offending token as supplied.
        token: String,
    },

    /// A token made of the negation marker alone.
    #[error("invalid filter: '{token}' negates nothing")]
    BareNegation {
        /// The offending token as supplied.
        token: String,
    },
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
