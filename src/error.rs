use thiserror::Error;

/// Errors raised by the rating core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    /// A pool must contain at least one card to be indexed
    #[error("card pool is empty")]
    EmptyPool,

    /// A name could not be resolved by exact, substring, or edit-distance match
    #[error("no card matches '{0}'")]
    CardNotFound(String),

    /// Scoring configuration failed validation
    #[error("invalid scoring config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DraftError>;
